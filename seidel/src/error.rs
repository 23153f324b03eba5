/// Errors that stop a system from being solved or verified.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum Error {
    /// The augmented matrix can't be used by Gauss-Seidel.
    #[error("Invalid system: {0}")]
    InvalidSystem(#[from] InvalidSystem),
    /// One of the run parameters is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] InvalidConfig),
    /// The textual table couldn't be parsed.
    #[error("Could not parse the system: {0}")]
    Parse(String),
    /// A candidate solution had the wrong number of unknowns for this system.
    #[error("Expected a solution with {expected} unknowns but got {actual}")]
    SolutionLength {
        /// Number of unknowns in the system.
        expected: usize,
        /// Number of values in the candidate solution.
        actual: usize,
    },
}

/// Structural problems with an augmented matrix A|b.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum InvalidSystem {
    /// There were no rows at all.
    #[error("Cannot solve an empty system")]
    Empty,
    /// A row didn't have exactly n coefficients plus one right-hand side.
    #[error("Row {row} has {actual} columns, but a system of {n} unknowns needs {} columns", .n + 1)]
    WrongRowLength {
        /// Which row (0-indexed) was malformed.
        row: usize,
        /// How many unknowns the system has.
        n: usize,
        /// How many columns that row actually had.
        actual: usize,
    },
    /// An entry was NaN or infinite.
    #[error("Entry at row {row}, column {col} is not a finite number")]
    NonFinite {
        /// Row of the bad entry.
        row: usize,
        /// Column of the bad entry.
        col: usize,
    },
    /// Gauss-Seidel divides by a[i][i] every iteration, so it can't be zero.
    #[error("Diagonal entry a[{row}][{row}] is zero")]
    ZeroDiagonal {
        /// Row whose diagonal entry is zero.
        row: usize,
    },
}

/// Run parameters which make no sense.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum InvalidConfig {
    /// Tolerance must be a positive, finite percentage.
    #[error("Tolerance must be a positive percentage, but was {0}")]
    Tolerance(f64),
    /// At least one iteration must be allowed.
    #[error("At least one iteration must be allowed")]
    ZeroIterations,
    /// Relaxation factor must be positive and finite.
    #[error("Relaxation factor must be positive, but was {0}")]
    RelaxationFactor(f64),
}
