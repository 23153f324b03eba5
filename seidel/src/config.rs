use crate::error::InvalidConfig;

/// Default tolerance, as a percentage.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 0.5;
/// Default iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;
/// Relaxation factor which reproduces plain Gauss-Seidel.
pub const DEFAULT_RELAXATION_FACTOR: f64 = 1.0;

/// Parameters for one solver run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Every unknown's absolute relative error (in percent) must fall below this
    /// for the run to count as converged. E.g. 0.5 means 0.5%.
    pub tolerance_percent: f64,
    /// Maximum number of sweeps over the unknowns. The solver stops after
    /// iteration `max_iterations - 1` (0-indexed) even if it hasn't converged.
    pub max_iterations: usize,
    /// Blends each raw Gauss-Seidel update with the previous iteration's value.
    /// 1.0 is unrelaxed, above 1 over-relaxes, below 1 under-relaxes.
    pub relaxation_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance_percent: DEFAULT_TOLERANCE_PERCENT,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            relaxation_factor: DEFAULT_RELAXATION_FACTOR,
        }
    }
}

impl Config {
    /// Set the convergence tolerance (percent).
    pub fn with_tolerance_percent(mut self, tolerance_percent: f64) -> Self {
        self.tolerance_percent = tolerance_percent;
        self
    }

    /// Set the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the relaxation factor.
    pub fn with_relaxation_factor(mut self, relaxation_factor: f64) -> Self {
        self.relaxation_factor = relaxation_factor;
        self
    }

    /// Check the parameters can drive a run at all.
    /// A relaxation factor outside (0, 2) is allowed here; the solver lints it instead.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !self.tolerance_percent.is_finite() || self.tolerance_percent <= 0.0 {
            return Err(InvalidConfig::Tolerance(self.tolerance_percent));
        }
        if self.max_iterations == 0 {
            return Err(InvalidConfig::ZeroIterations);
        }
        if !self.relaxation_factor.is_finite() || self.relaxation_factor <= 0.0 {
            return Err(InvalidConfig::RelaxationFactor(self.relaxation_factor));
        }
        Ok(())
    }

    /// Is the relaxation factor in the range where SOR can converge?
    pub(crate) fn relaxation_in_range(&self) -> bool {
        self.relaxation_factor > 0.0 && self.relaxation_factor < 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(Config::default().validate(), Ok(()));
    }

    #[test]
    fn builders_override_fields() {
        let config = Config::default()
            .with_tolerance_percent(1.0)
            .with_max_iterations(20)
            .with_relaxation_factor(1.25);
        assert_eq!(
            config,
            Config {
                tolerance_percent: 1.0,
                max_iterations: 20,
                relaxation_factor: 1.25,
            }
        );
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            Config::default().with_tolerance_percent(0.0).validate(),
            Err(InvalidConfig::Tolerance(0.0))
        );
        assert!(matches!(
            Config::default()
                .with_tolerance_percent(f64::NAN)
                .validate(),
            Err(InvalidConfig::Tolerance(_))
        ));
        assert_eq!(
            Config::default().with_max_iterations(0).validate(),
            Err(InvalidConfig::ZeroIterations)
        );
        assert_eq!(
            Config::default().with_relaxation_factor(-1.0).validate(),
            Err(InvalidConfig::RelaxationFactor(-1.0))
        );
    }

    #[test]
    fn over_relaxation_past_two_is_allowed_but_flagged() {
        let config = Config::default().with_relaxation_factor(2.5);
        assert_eq!(config.validate(), Ok(()));
        assert!(!config.relaxation_in_range());
        assert!(Config::default().relaxation_in_range());
    }
}
