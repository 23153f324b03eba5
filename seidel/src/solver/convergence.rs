/// Fraction of unknowns whose absolute relative error is strictly below the tolerance.
/// Undefined (NaN) errors never count as below it.
pub fn fraction_below(relative_errors: &[f64], tolerance_percent: f64) -> f64 {
    if relative_errors.is_empty() {
        return 0.0;
    }
    let below = relative_errors
        .iter()
        .filter(|e| e.abs() < tolerance_percent)
        .count();
    below as f64 / relative_errors.len() as f64
}

/// Has every unknown settled below the tolerance?
///
/// This is deliberately the strict "all unknowns" rule, not a majority or an
/// average: one unknown still moving by more than the tolerance keeps the
/// solver iterating.
pub fn has_converged(relative_errors: &[f64], tolerance_percent: f64) -> bool {
    !relative_errors.is_empty()
        && relative_errors
            .iter()
            .all(|e| e.abs() < tolerance_percent)
}
