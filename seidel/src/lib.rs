//! Gauss-Seidel solver for square linear systems Ax = b,
//! with successive over-relaxation (SOR).
//!
//! ```
//! use seidel::{Config, System, solve, verify};
//!
//! // 4x + y + z = 7, x + 3y + z = 6, x + y + 5z = 8
//! let system = System::from_rows(&[
//!     vec![4.0, 1.0, 1.0, 7.0],
//!     vec![1.0, 3.0, 1.0, 6.0],
//!     vec![1.0, 1.0, 5.0, 8.0],
//! ])
//! .unwrap();
//! let outcome = solve(&system, Config::default().with_tolerance_percent(1e-6)).unwrap();
//! assert!(outcome.converged());
//! let residuals = verify(&system, outcome.solution()).unwrap();
//! assert!(seidel::max_abs_residual(&residuals) < 1e-6);
//! ```

pub use crate::config::Config;
pub use crate::error::{Error, InvalidConfig, InvalidSystem};
pub use crate::solve_outcome::SolveOutcome;
pub use crate::solver::{
    Control, IterationRecord, Termination, fraction_below, has_converged, solve,
    solve_with_callback,
};
pub use crate::system::System;
pub use crate::verify::{max_abs_residual, verify};
pub use crate::warnings::{Warning, WarningContent};

/// Run parameters.
pub mod config;
mod error;
/// Writing results out as a CSV report.
pub mod report;
mod solve_outcome;
/// The iterative Gauss-Seidel/SOR solver.
mod solver;
/// The augmented matrix A|b.
mod system;
/// Parser for the plain-text table format of a system.
pub mod textual;
/// Independent residual check of a solution.
mod verify;
mod warnings;
