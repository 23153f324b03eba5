use crate::{Error, System};

/// Residual A·x − b of each row, computed from the original coefficients.
/// For a correct solution every entry is close to zero.
pub fn verify(system: &System, solution: &[f64]) -> Result<Vec<f64>, Error> {
    let n = system.n();
    if solution.len() != n {
        return Err(Error::SolutionLength {
            expected: n,
            actual: solution.len(),
        });
    }
    let residuals = (0..n)
        .map(|i| {
            let lhs: f64 = solution
                .iter()
                .enumerate()
                .map(|(k, x)| system.coefficient(i, k) * x)
                .sum();
            lhs - system.rhs(i)
        })
        .collect();
    Ok(residuals)
}

/// Largest absolute residual. 0 for an empty vector.
pub fn max_abs_residual(residuals: &[f64]) -> f64 {
    residuals.iter().map(|r| r.abs()).fold(0.0, libm::fmax)
}
