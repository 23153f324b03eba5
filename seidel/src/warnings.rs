use tracing::warn;

use crate::{Config, System};

/// Something suspicious about the problem or the run, which didn't stop it.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Warning {
    /// Which row/unknown this is about, if any.
    pub about_row: Option<usize>,
    /// What went wrong.
    pub content: WarningContent,
}

/// Kinds of warning.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub enum WarningContent {
    /// The coefficient matrix isn't diagonally dominant, so convergence isn't guaranteed.
    NotDiagonallyDominant,
    /// SOR only converges for relaxation factors in (0, 2).
    RelaxationOutOfRange(f64),
    /// An unknown's value was exactly zero, so its relative error couldn't be computed.
    UndefinedRelativeError {
        /// 0-indexed iteration it happened in.
        iteration: usize,
        /// 0-indexed unknown.
        unknown: usize,
    },
    /// The iterates overflowed to infinity or NaN. Only reported once per run.
    NonFiniteValues {
        /// 0-indexed iteration where it first happened.
        iteration: usize,
    },
}

impl Warning {
    pub(crate) fn new(about_row: Option<usize>, content: WarningContent) -> Self {
        warn!("{content}");
        Self { about_row, content }
    }
}

pub(crate) fn lint(system: &System, config: &Config) -> Vec<Warning> {
    let mut warnings = Vec::default();
    if !system.is_diagonally_dominant() {
        warnings.push(Warning::new(None, WarningContent::NotDiagonallyDominant));
    }
    if !config.relaxation_in_range() {
        warnings.push(Warning::new(
            None,
            WarningContent::RelaxationOutOfRange(config.relaxation_factor),
        ));
    }
    warnings
}

impl std::fmt::Display for WarningContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningContent::NotDiagonallyDominant => write!(
                f,
                "The coefficient matrix is not diagonally dominant, so Gauss-Seidel might not converge. Try reordering the equations so the largest coefficient of each row sits on the diagonal."
            ),
            WarningContent::RelaxationOutOfRange(factor) => write!(
                f,
                "Relaxation factor {factor} is outside (0, 2), where successive over-relaxation diverges"
            ),
            WarningContent::UndefinedRelativeError { iteration, unknown } => write!(
                f,
                "x_{} was exactly zero in iteration {iteration}, so its relative error is undefined",
                unknown + 1
            ),
            WarningContent::NonFiniteValues { iteration } => write!(
                f,
                "The unknowns stopped being finite numbers in iteration {iteration}, so the iteration is diverging"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lints_non_dominant_system_and_wild_relaxation() {
        let system = System::from_rows(&[vec![1.0, 5.0, 1.0], vec![5.0, 1.0, 1.0]]).unwrap();
        let config = Config::default().with_relaxation_factor(2.0);
        assert_eq!(
            lint(&system, &config),
            vec![
                Warning {
                    about_row: None,
                    content: WarningContent::NotDiagonallyDominant,
                },
                Warning {
                    about_row: None,
                    content: WarningContent::RelaxationOutOfRange(2.0),
                },
            ]
        );
    }

    #[test]
    fn well_behaved_problem_has_no_lints() {
        let system = System::from_rows(&[vec![5.0, 1.0, 1.0], vec![1.0, 5.0, 1.0]]).unwrap();
        assert!(lint(&system, &Config::default()).is_empty());
    }

    #[test]
    fn display_formats_are_human_friendly() {
        let dominance = WarningContent::NotDiagonallyDominant.to_string();
        assert!(dominance.contains("diagonally dominant"));
        let relaxation = WarningContent::RelaxationOutOfRange(2.5).to_string();
        assert!(relaxation.contains("2.5"));
        let undefined = WarningContent::UndefinedRelativeError {
            iteration: 3,
            unknown: 0,
        }
        .to_string();
        assert!(undefined.contains("x_1"));
        assert!(undefined.contains("iteration 3"));
        let non_finite = WarningContent::NonFiniteValues { iteration: 512 }.to_string();
        assert!(non_finite.contains("iteration 512"));
    }
}
