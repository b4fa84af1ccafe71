//! The per-pair date → rate series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date → rate mapping for one currency pair.
///
/// Values written by a completed fetch are never overwritten by a merge; the
/// only way to replace one is to [`evict`](RateSeries::evict) that exact date
/// first. Serializes as a flat `{ "YYYY-MM-DD": rate }` object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateSeries {
    rates: BTreeMap<NaiveDate, f64>,
}

impl RateSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, date: &NaiveDate) -> Option<f64> {
        self.rates.get(date).copied()
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.rates.contains_key(date)
    }

    /// Add newly fetched points. Keys already present are left untouched.
    ///
    /// Returns how many keys were added.
    pub fn merge(&mut self, fetched: impl IntoIterator<Item = (NaiveDate, f64)>) -> usize {
        let mut added = 0;
        for (date, rate) in fetched {
            if let std::collections::btree_map::Entry::Vacant(slot) = self.rates.entry(date) {
                slot.insert(rate);
                added += 1;
            }
        }
        added
    }

    /// Remove exactly one date so the next pass re-fetches it.
    pub fn evict(&mut self, date: &NaiveDate) -> Option<f64> {
        self.rates.remove(date)
    }

    /// The newest stored point strictly older than `date`.
    pub fn latest_before(&self, date: &NaiveDate) -> Option<(NaiveDate, f64)> {
        self.rates
            .range(..*date)
            .next_back()
            .map(|(d, r)| (*d, *r))
    }

    /// Points in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.rates.iter().map(|(d, r)| (*d, *r))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(NaiveDate, f64)> for RateSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
    }

    #[test]
    fn test_merge_adds_only_new_keys() {
        let mut series: RateSeries = [(d(1), 17.0), (d(2), 17.5)].into_iter().collect();
        let added = series.merge([(d(2), 99.0), (d(3), 18.0)]);
        assert_eq!(added, 1);
        assert_eq!(series.get(&d(2)), Some(17.5));
        assert_eq!(series.get(&d(3)), Some(18.0));
    }

    #[test]
    fn test_merge_is_idempotent() {
        let mut once = RateSeries::new();
        once.merge([(d(1), 1.0), (d(2), 2.0)]);
        let mut twice = once.clone();
        assert_eq!(twice.merge([(d(1), 1.0), (d(2), 2.0)]), 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_evict_removes_exactly_one_date() {
        let mut series: RateSeries = [(d(1), 1.0), (d(2), 2.0), (d(3), 3.0)].into_iter().collect();
        assert_eq!(series.evict(&d(3)), Some(3.0));
        assert_eq!(series.len(), 2);
        assert!(series.contains(&d(1)) && series.contains(&d(2)));
        assert_eq!(series.evict(&d(3)), None);
    }

    #[test]
    fn test_latest_before_skips_gaps() {
        let series: RateSeries = [(d(1), 1.0), (d(4), 4.0), (d(9), 9.0)].into_iter().collect();
        assert_eq!(series.latest_before(&d(9)), Some((d(4), 4.0)));
        assert_eq!(series.latest_before(&d(4)), Some((d(1), 1.0)));
        assert_eq!(series.latest_before(&d(1)), None);
    }

    #[test]
    fn test_serializes_as_flat_date_map() {
        let series: RateSeries = [(d(9), 15.91), (d(10), 16.04)].into_iter().collect();
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(json, r#"{"2026-10-09":15.91,"2026-10-10":16.04}"#);
        let back: RateSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);
    }
}
