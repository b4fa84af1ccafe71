//! Number formatting for rate labels.
//!
//! Fixed decimal places with thousands separators. Unlike free-form display,
//! trailing zeros are kept so a column of axis labels lines up.

/// Adds thousands separators to the integer part of an already formatted number.
pub fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let grouped = integer
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|c| std::str::from_utf8(c).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(",");

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Decimal places for a single rate: two for ordinary magnitudes, more for
/// sub-unit rates so three significant digits survive.
pub fn rate_decimals(value: f64) -> usize {
    let abs_value = value.abs();

    if abs_value >= 1.0 || abs_value == 0.0 || !abs_value.is_finite() {
        return 2;
    }

    let exponent = abs_value.log10().floor().abs() as usize;
    (exponent + 2).min(8)
}

/// Decimal places for axis labels spaced `step` apart, so neighbours differ.
pub fn step_decimals(step: f64) -> usize {
    if !(step.is_finite() && step > 0.0) {
        return 2;
    }
    let needed = (-step.log10()).ceil() + 1.0;
    needed.clamp(2.0, 8.0) as usize
}

/// Format with explicit decimal places and thousands separators.
pub fn fixed(amount: f64, decimals: usize) -> String {
    group_thousands(&format!("{:.1$}", amount, decimals))
}

/// Format a rate for the panel label, e.g. `18.42` or `0.0123`.
pub fn display_rate(amount: f64) -> String {
    fixed(amount, rate_decimals(amount))
}
