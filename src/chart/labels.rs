//! Tick label thinning.

use std::collections::BTreeSet;

/// Indices of the points that get a date label, ascending.
///
/// As many labels as fit `plot_width` at `budget` pixels each, but never fewer
/// than two: the first and last point are always labelled and the rest are
/// spread evenly by index.
pub fn select_label_indices(n: usize, plot_width: f64, budget: f64) -> Vec<usize> {
    match n {
        0 => return Vec::new(),
        1 => return vec![0],
        _ => {}
    }

    let fit = if budget > 0.0 && plot_width.is_finite() {
        (plot_width / budget).floor().max(0.0) as usize
    } else {
        0
    };
    let max_labels = fit.clamp(2, n);
    let step = (n - 1) as f64 / (max_labels - 1) as f64;

    let mut show = BTreeSet::from([0, n - 1]);
    for i in 1..max_labels - 1 {
        show.insert(((i as f64 * step).round() as usize).min(n - 1));
    }
    show.into_iter().collect()
}
