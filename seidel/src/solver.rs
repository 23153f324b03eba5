use tracing::{debug, info};

use crate::{
    Config, Error, SolveOutcome, System,
    warnings::{Warning, WarningContent, lint},
};

pub use convergence::{fraction_below, has_converged};

/// Deciding when a run has converged.
mod convergence;

/// Everything recorded about one completed sweep over the unknowns.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    iteration: usize,
    values: Vec<f64>,
    relative_errors: Option<Vec<f64>>,
}

impl IterationRecord {
    /// 0-indexed iteration number.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Value of each unknown at the end of this iteration.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Percentage change of each unknown since the previous iteration.
    /// `None` for iteration 0, which has nothing to compare against.
    /// An entry is NaN when that unknown's new value was exactly zero.
    pub fn relative_errors(&self) -> Option<&[f64]> {
        self.relative_errors.as_deref()
    }

    /// Largest absolute relative error, ignoring undefined entries.
    pub fn max_relative_error(&self) -> Option<f64> {
        self.relative_errors
            .as_ref()?
            .iter()
            .map(|e| e.abs())
            .reduce(libm::fmax)
    }
}

/// Why the solver stopped iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every unknown's relative error fell below the tolerance.
    Converged,
    /// Ran out of iterations first. The last iteration's values are still returned.
    IterationsExhausted,
    /// The per-iteration callback asked to stop.
    Cancelled,
}

/// Returned by the per-iteration callback of [`solve_with_callback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Keep iterating.
    Continue,
    /// Stop after this iteration.
    Cancel,
}

/// Solve the system with Gauss-Seidel and successive over-relaxation,
/// starting from x = 0.
pub fn solve(system: &System, config: Config) -> Result<SolveOutcome, Error> {
    solve_with_callback(system, config, |_| Control::Continue)
}

/// Like [`solve`], but calls `on_iteration` after every completed iteration.
pub fn solve_with_callback<F>(
    system: &System,
    config: Config,
    mut on_iteration: F,
) -> Result<SolveOutcome, Error>
where
    F: FnMut(&IterationRecord) -> Control,
{
    config.validate()?;
    let mut warnings = lint(system, &config);

    let n = system.n();
    let mut history: Vec<IterationRecord> = Vec::new();
    // `previous` is x_{j-1}. `current` is the working vector for x_j,
    // seeded from x_{j-1} and overwritten in place one unknown at a time.
    let mut previous = vec![0.0; n];
    let mut current = vec![0.0; n];
    let mut iteration = 0;
    let mut diverged = false;

    let termination = loop {
        let relaxation = (iteration > 0).then_some(config.relaxation_factor);
        sweep(system, relaxation, &previous, &mut current);

        let relative_errors = (iteration > 0).then(|| percent_changes(&previous, &current));
        if relative_errors.is_some() {
            for (unknown, _) in current.iter().enumerate().filter(|(_, x)| **x == 0.0) {
                warnings.push(Warning::new(
                    Some(unknown),
                    WarningContent::UndefinedRelativeError { iteration, unknown },
                ));
            }
        }
        if !diverged && current.iter().any(|x| !x.is_finite()) {
            diverged = true;
            warnings.push(Warning::new(None, WarningContent::NonFiniteValues { iteration }));
        }
        let converged = relative_errors
            .as_deref()
            .is_some_and(|errors| has_converged(errors, config.tolerance_percent));

        let record = IterationRecord {
            iteration,
            values: current.clone(),
            relative_errors,
        };
        debug!(
            iteration,
            max_relative_error = ?record.max_relative_error(),
            "completed Gauss-Seidel sweep"
        );
        let control = on_iteration(&record);
        history.push(record);

        if converged {
            break Termination::Converged;
        }
        if control == Control::Cancel {
            break Termination::Cancelled;
        }
        if iteration + 1 == config.max_iterations {
            break Termination::IterationsExhausted;
        }
        previous.copy_from_slice(&current);
        iteration += 1;
    };

    info!(
        ?termination,
        iterations_run = iteration,
        "Gauss-Seidel finished"
    );
    Ok(SolveOutcome {
        solution: current,
        history,
        termination,
        warnings,
    })
}

/// One Gauss-Seidel pass over every unknown, in order.
/// Reads and writes `current` in place, so unknowns already updated this pass
/// feed into the ones after them.
/// With `relaxation` set, each raw update is blended with the previous iteration's value.
fn sweep(system: &System, relaxation: Option<f64>, previous: &[f64], current: &mut [f64]) {
    let n = system.n();
    for i in 0..n {
        let sum: f64 = (0..n)
            .filter(|&k| k != i)
            .map(|k| system.coefficient(i, k) * current[k])
            .sum();
        let candidate = (system.rhs(i) - sum) / system.coefficient(i, i);
        current[i] = match relaxation {
            Some(w) => w * candidate + (1.0 - w) * previous[i],
            None => candidate,
        };
    }
}

/// Percentage change of each unknown, relative to its new value.
fn percent_changes(previous: &[f64], current: &[f64]) -> Vec<f64> {
    current
        .iter()
        .zip(previous)
        .map(|(&now, &before)| {
            if now == 0.0 {
                // Zero is a legitimate value for an unknown, but the error is undefined.
                f64::NAN
            } else {
                ((now - before) / now) * 100.0
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_uses_updated_values_within_a_pass() {
        // x = 3 and x + y = 5. Reading a frozen zero vector would give y = 5,
        // but the second row must see the x = 3 computed just before it.
        let system = System::from_rows(&[vec![1.0, 0.0, 3.0], vec![1.0, 1.0, 5.0]]).unwrap();
        let previous = vec![0.0, 0.0];
        let mut current = previous.clone();
        sweep(&system, None, &previous, &mut current);
        assert_eq!(current, vec![3.0, 2.0]);
    }

    #[test]
    fn relaxation_blends_with_previous_iteration() {
        let system = System::from_rows(&[vec![2.0, 4.0]]).unwrap();
        let previous = vec![1.0];
        let mut current = previous.clone();
        sweep(&system, Some(0.5), &previous, &mut current);
        // Raw candidate is 2, halfway between that and 1.
        assert_eq!(current, vec![1.5]);
    }

    #[test]
    fn relative_error_is_percentage_of_new_value() {
        let errors = percent_changes(&[1.0, 2.0], &[2.0, 2.0]);
        assert_eq!(errors, vec![50.0, 0.0]);
    }

    #[test]
    fn relative_error_of_zero_value_is_undefined() {
        let errors = percent_changes(&[1.0, 2.0], &[0.0, 1.0]);
        assert!(errors[0].is_nan());
        assert_eq!(errors[1], -100.0);
    }

    #[test]
    fn max_relative_error_ignores_nan() {
        let record = IterationRecord {
            iteration: 1,
            values: vec![0.0, 1.0],
            relative_errors: Some(vec![f64::NAN, -3.0]),
        };
        assert_eq!(record.max_relative_error(), Some(3.0));
        let first = IterationRecord {
            relative_errors: None,
            ..record
        };
        assert_eq!(first.max_relative_error(), None);
    }
}
