//! SA configuration.

use crate::error::{RouteError, RouteResult};

/// Run parameters for the annealing search.
///
/// Temperature is cooled geometrically: `T_{k+1} = cooling_rate * T_k`,
/// with `iterations_per_temperature` candidates evaluated at every level.
///
/// # Examples
///
/// ```
/// use u_zoneroute::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_cooling_rate(0.9)
///     .with_min_temperature(0.01)
///     .with_iterations_per_temperature(10)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SaConfig {
    /// Starting temperature. Higher values accept more worsening moves early.
    pub initial_temperature: f64,

    /// Multiplicative cooling factor in (0, 1). Higher = slower cooling.
    pub cooling_rate: f64,

    /// The search stops once the temperature is no longer above this.
    pub min_temperature: f64,

    /// Candidates evaluated at each temperature level (`L`).
    pub iterations_per_temperature: usize,

    /// Random seed for reproducibility. `None` draws fresh entropy.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 5000.0,
            cooling_rate: 0.995,
            min_temperature: 0.001,
            iterations_per_temperature: 50,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> RouteResult<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(RouteError::InvalidConfig(format!(
                "initial_temperature must be positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(RouteError::InvalidConfig(format!(
                "cooling_rate must be in (0, 1), got {}",
                self.cooling_rate
            )));
        }
        if !self.min_temperature.is_finite() || self.min_temperature < 0.0 {
            return Err(RouteError::InvalidConfig(format!(
                "min_temperature must be non-negative, got {}",
                self.min_temperature
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(RouteError::InvalidConfig(
                "iterations_per_temperature must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert_eq!(config.initial_temperature, 5000.0);
        assert_eq!(config.cooling_rate, 0.995);
        assert_eq!(config.min_temperature, 0.001);
        assert_eq!(config.iterations_per_temperature, 50);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        assert!(SaConfig::default()
            .with_initial_temperature(0.0)
            .validate()
            .is_err());
        assert!(SaConfig::default()
            .with_initial_temperature(f64::NAN)
            .validate()
            .is_err());
        assert!(SaConfig::default()
            .with_min_temperature(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_bad_cooling_rate() {
        for rate in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let err = SaConfig::default().with_cooling_rate(rate).validate();
            assert!(
                matches!(err, Err(RouteError::InvalidConfig(_))),
                "rate {rate} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_zero_inner_loop() {
        let config = SaConfig::default().with_iterations_per_temperature(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_min_temperature_is_valid() {
        assert!(SaConfig::default().with_min_temperature(0.0).validate().is_ok());
    }
}
