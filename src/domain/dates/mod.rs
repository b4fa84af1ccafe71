//! Date range generation for zoom windows.
//!
//! Every function here is a pure function of the injected `today`. Sequences are
//! newest first and free of duplicates.

use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

/// First day the provider publishes a dated snapshot for.
pub fn earliest_available_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 2).unwrap_or(NaiveDate::MIN)
}

/// How far back a window reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookback {
    /// A fixed number of calendar days ending today (inclusive).
    Days(u32),
    /// Everything from a boundary date up to today.
    Since(NaiveDate),
}

/// The fixed set of chart zoom levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoomWindow {
    /// One month, daily.
    Short,
    /// One year, daily.
    Medium,
    /// Full provider history, weekly.
    Full,
}

impl ZoomWindow {
    pub const ALL: [ZoomWindow; 3] = [ZoomWindow::Short, ZoomWindow::Medium, ZoomWindow::Full];

    pub fn lookback(self) -> Lookback {
        match self {
            ZoomWindow::Short => Lookback::Days(30),
            ZoomWindow::Medium => Lookback::Days(365),
            ZoomWindow::Full => Lookback::Since(earliest_available_date()),
        }
    }

    pub fn step_days(self) -> u32 {
        match self {
            ZoomWindow::Short | ZoomWindow::Medium => 1,
            ZoomWindow::Full => 7,
        }
    }

    /// Button label used by the presentation layer.
    pub fn label(self) -> &'static str {
        match self {
            ZoomWindow::Short => "1M",
            ZoomWindow::Medium => "1Y",
            ZoomWindow::Full => "Max",
        }
    }

    /// Exclusive lower bound of the dates a chart in this zoom shows, or `None`
    /// for everything.
    ///
    /// A `Days(n)` window shows exactly the `n` days ending today.
    pub fn cutoff(self, today: NaiveDate) -> Option<NaiveDate> {
        match self.lookback() {
            Lookback::Days(n) => today.checked_sub_days(Days::new(u64::from(n))),
            Lookback::Since(_) => None,
        }
    }
}

/// Dates for `window`, newest first.
pub fn dates_for(window: ZoomWindow, today: NaiveDate) -> Vec<NaiveDate> {
    dates_with(window.lookback(), window.step_days(), today)
}

/// Dates stepping back from `today` by `step_days` until the lookback is exhausted.
pub fn dates_with(lookback: Lookback, step_days: u32, today: NaiveDate) -> Vec<NaiveDate> {
    let step = u64::from(step_days.max(1));
    let mut dates = Vec::new();
    let mut offset = 0u64;

    loop {
        let in_range = match lookback {
            Lookback::Days(n) => offset < u64::from(n),
            Lookback::Since(_) => true,
        };
        if !in_range {
            break;
        }
        let Some(date) = today.checked_sub_days(Days::new(offset)) else {
            break;
        };
        if let Lookback::Since(boundary) = lookback {
            if date < boundary {
                break;
            }
        }
        dates.push(date);
        offset += step;
    }

    dates
}

/// Deduplicated union of two date sets, newest first.
pub fn union_for(primary: &[NaiveDate], secondary: &[NaiveDate]) -> Vec<NaiveDate> {
    let set: BTreeSet<NaiveDate> = primary.iter().chain(secondary).copied().collect();
    set.into_iter().rev().collect()
}

/// The two windows a synchronization pass keeps filled.
///
/// The default pairs the daily year (`Medium`) with the weekly full history
/// (`Full`), which covers every zoom the chart offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePlan {
    pub dense: Lookback,
    pub dense_step: u32,
    pub sparse: Lookback,
    pub sparse_step: u32,
}

impl Default for DatePlan {
    fn default() -> Self {
        Self {
            dense: ZoomWindow::Medium.lookback(),
            dense_step: ZoomWindow::Medium.step_days(),
            sparse: ZoomWindow::Full.lookback(),
            sparse_step: ZoomWindow::Full.step_days(),
        }
    }
}

impl DatePlan {
    /// A plan of `days` consecutive daily dates and nothing else.
    pub fn daily(days: u32) -> Self {
        Self {
            dense: Lookback::Days(days),
            dense_step: 1,
            sparse: Lookback::Days(days),
            sparse_step: 1,
        }
    }

    /// Required dates newest first (`required[0]` is today), plus the dense
    /// sequence, whose second entry is the daily baseline.
    pub fn required(&self, today: NaiveDate) -> (Vec<NaiveDate>, Vec<NaiveDate>) {
        let dense = dates_with(self.dense, self.dense_step, today);
        let sparse = dates_with(self.sparse, self.sparse_step, today);
        let required = union_for(&dense, &sparse);
        (required, dense)
    }
}

/// [`DatePlan::required`] for the default plan.
pub fn required_dates(today: NaiveDate) -> (Vec<NaiveDate>, Vec<NaiveDate>) {
    DatePlan::default().required(today)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn strictly_decreasing(dates: &[NaiveDate]) -> bool {
        dates.windows(2).all(|w| w[0] > w[1])
    }

    #[test]
    fn test_daily_window_is_consecutive_ending_today() {
        let today = d(2026, 10, 18);
        let dates = dates_for(ZoomWindow::Short, today);
        assert_eq!(dates.len(), 30);
        assert_eq!(dates[0], today);
        assert_eq!(dates[29], d(2026, 9, 19));
        assert!(dates.windows(2).all(|w| w[0] - w[1] == chrono::Duration::days(1)));
    }

    #[test]
    fn test_year_window_length() {
        let dates = dates_for(ZoomWindow::Medium, d(2026, 10, 18));
        assert_eq!(dates.len(), 365);
        assert!(strictly_decreasing(&dates));
    }

    #[test]
    fn test_weekly_window_stops_at_boundary() {
        let today = d(2024, 3, 20);
        let dates = dates_for(ZoomWindow::Full, today);
        assert_eq!(dates, vec![d(2024, 3, 20), d(2024, 3, 13), d(2024, 3, 6)]);
    }

    #[test]
    fn test_since_boundary_after_today_is_empty() {
        let dates = dates_with(Lookback::Since(d(2030, 1, 1)), 7, d(2026, 1, 1));
        assert!(dates.is_empty());
    }

    #[test]
    fn test_stepped_fixed_count() {
        let dates = dates_with(Lookback::Days(365 * 5), 7, d(2026, 10, 18));
        assert_eq!(dates.len(), 261);
        assert!(strictly_decreasing(&dates));
    }

    #[test]
    fn test_union_keeps_newest_first_and_dedups() {
        let a = vec![d(2026, 1, 5), d(2026, 1, 3), d(2026, 1, 1)];
        let b = vec![d(2026, 1, 4), d(2026, 1, 3), d(2025, 12, 1)];
        assert_eq!(
            union_for(&a, &b),
            vec![
                d(2026, 1, 5),
                d(2026, 1, 4),
                d(2026, 1, 3),
                d(2026, 1, 1),
                d(2025, 12, 1)
            ]
        );
        assert_eq!(union_for(&a, &a), a);
    }

    #[test]
    fn test_required_dates_cover_both_windows() {
        let today = d(2026, 10, 18);
        let (required, dense) = required_dates(today);
        assert_eq!(required[0], today);
        assert_eq!(dense[1], d(2026, 10, 17));
        assert!(strictly_decreasing(&required));
        assert!(*required.last().unwrap() >= earliest_available_date());
        for date in dates_for(ZoomWindow::Full, today) {
            assert!(required.contains(&date));
        }
    }

    #[test]
    fn test_daily_plan() {
        let today = d(2026, 10, 18);
        let (required, dense) = DatePlan::daily(10).required(today);
        assert_eq!(required.len(), 10);
        assert_eq!(required, dense);
        assert_eq!(required[9], d(2026, 10, 9));
    }

    #[test]
    fn test_cutoff_excludes_the_day_before_the_window() {
        assert_eq!(ZoomWindow::Short.cutoff(d(2026, 3, 31)), Some(d(2026, 3, 1)));
        assert_eq!(ZoomWindow::Short.cutoff(d(2026, 10, 18)), Some(d(2026, 9, 18)));
        assert_eq!(ZoomWindow::Medium.cutoff(d(2026, 10, 18)), Some(d(2025, 10, 18)));
        assert_eq!(ZoomWindow::Full.cutoff(d(2026, 10, 18)), None);
        // Everything after the cutoff matches the zoom's own dates.
        let today = d(2026, 3, 31);
        let cutoff = ZoomWindow::Short.cutoff(today).unwrap();
        assert!(dates_for(ZoomWindow::Short, today).iter().all(|x| *x > cutoff));
    }
}
