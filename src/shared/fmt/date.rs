//! Short date labels for chart ticks and titles.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `"3 Jan"`.
pub fn day_month(date: NaiveDate) -> String {
    format!("{} {}", date.day(), MONTHS[date.month0() as usize])
}

/// `"3 Jan '25"`.
pub fn day_month_year(date: NaiveDate) -> String {
    format!("{} '{:02}", day_month(date), date.year().rem_euclid(100))
}

/// Whether `first..=last` crosses a calendar-year boundary.
pub fn spans_years(first: NaiveDate, last: NaiveDate) -> bool {
    first.year() != last.year()
}

/// Label a date, adding the year suffix when the visible range spans years.
pub fn range_label(date: NaiveDate, multi_year: bool) -> String {
    if multi_year {
        day_month_year(date)
    } else {
        day_month(date)
    }
}

/// `"3 Jan – 18 Oct"`, or `"3 Jan '25 – 18 Oct '26"` across years.
pub fn range_title(first: NaiveDate, last: NaiveDate) -> String {
    let multi_year = spans_years(first, last);
    format!(
        "{} – {}",
        range_label(first, multi_year),
        range_label(last, multi_year)
    )
}
