use crate::{IterationRecord, Termination, Warning};

/// Data from a finished Gauss-Seidel run.
/// Returned whether or not the run converged; check [`SolveOutcome::termination`].
#[derive(Debug)]
#[cfg_attr(not(feature = "unstable-exhaustive"), non_exhaustive)]
pub struct SolveOutcome {
    /// Values of the unknowns after the last iteration.
    pub(crate) solution: Vec<f64>,
    /// One record per executed iteration, in order.
    pub(crate) history: Vec<IterationRecord>,
    /// Why the run stopped.
    pub(crate) termination: Termination,
    /// Anything suspicious either in the problem definition or while solving it.
    pub(crate) warnings: Vec<Warning>,
}

impl SolveOutcome {
    /// Values of the unknowns after the last iteration.
    pub fn solution(&self) -> &[f64] {
        &self.solution
    }

    /// One record per executed iteration, in order.
    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    /// 0-indexed number of the last iteration executed.
    /// `history().len()` is always one more than this.
    pub fn iterations_run(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Why the run stopped.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Did every unknown settle below the tolerance?
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }

    /// Anything suspicious either in the problem definition or while solving it.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Relative errors of the last iteration, if it had any.
    pub fn final_relative_errors(&self) -> Option<&[f64]> {
        self.history.last()?.relative_errors()
    }

    /// Number of unknowns.
    pub fn num_unknowns(&self) -> usize {
        self.solution.len()
    }
}
