use faer::Mat;

use crate::error::InvalidSystem;

/// A square linear system Ax = b, stored as the augmented n × (n+1) matrix A|b.
/// Columns 0..n are coefficients, column n is the right-hand side.
///
/// Construction checks every invariant the solver relies on, so a `System`
/// always has n ≥ 1, finite entries, and non-zero diagonal entries.
#[derive(Debug, Clone)]
pub struct System {
    augmented: Mat<f64>,
}

impl System {
    /// Build a system from an n × (n+1) augmented matrix.
    pub fn new(augmented: Mat<f64>) -> Result<Self, InvalidSystem> {
        let n = augmented.nrows();
        if n == 0 {
            return Err(InvalidSystem::Empty);
        }
        if augmented.ncols() != n + 1 {
            // Every row of a dense matrix has the same width, so blame the first.
            return Err(InvalidSystem::WrongRowLength {
                row: 0,
                n,
                actual: augmented.ncols(),
            });
        }
        for row in 0..n {
            for col in 0..=n {
                if !augmented[(row, col)].is_finite() {
                    return Err(InvalidSystem::NonFinite { row, col });
                }
            }
        }
        if let Some(row) = (0..n).find(|&i| augmented[(i, i)] == 0.0) {
            return Err(InvalidSystem::ZeroDiagonal { row });
        }
        Ok(Self { augmented })
    }

    /// Build a system from its rows. Each row is n coefficients followed by the constant.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, InvalidSystem> {
        let n = rows.len();
        if n == 0 {
            return Err(InvalidSystem::Empty);
        }
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n + 1) {
            return Err(InvalidSystem::WrongRowLength {
                row,
                n,
                actual: r.len(),
            });
        }
        Self::new(Mat::from_fn(n, n + 1, |i, j| rows[i][j]))
    }

    /// Number of unknowns.
    pub fn n(&self) -> usize {
        self.augmented.nrows()
    }

    /// Coefficient a[row][col], for col < n.
    pub fn coefficient(&self, row: usize, col: usize) -> f64 {
        debug_assert!(col < self.n(), "column {col} is the right-hand side, not a coefficient");
        self.augmented[(row, col)]
    }

    /// Right-hand-side constant b[row]. Always read from column n.
    pub fn rhs(&self, row: usize) -> f64 {
        self.augmented[(row, self.n())]
    }

    /// The full augmented matrix.
    pub fn augmented(&self) -> &Mat<f64> {
        &self.augmented
    }

    /// Every |a[i][i]| is at least the sum of the other |a[i][k]| in its row,
    /// and at least one row is strictly dominant.
    /// Sufficient (though not necessary) for Gauss-Seidel to converge.
    pub fn is_diagonally_dominant(&self) -> bool {
        let n = self.n();
        let mut any_strict = false;
        for i in 0..n {
            let diagonal = self.coefficient(i, i).abs();
            let off_diagonal: f64 = (0..n)
                .filter(|&k| k != i)
                .map(|k| self.coefficient(i, k).abs())
                .sum();
            if diagonal < off_diagonal {
                return false;
            }
            any_strict |= diagonal > off_diagonal;
        }
        any_strict
    }
}
