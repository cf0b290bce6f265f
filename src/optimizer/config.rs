//! Optimizer configuration.

use crate::error::RouteResult;
use crate::sa::SaConfig;

/// Configuration for a multi-zone optimization run.
///
/// Passed explicitly to every run, so concurrent or repeated runs with
/// different parameters never interfere.
///
/// # Examples
///
/// ```
/// use u_zoneroute::optimizer::OptimizerConfig;
/// use u_zoneroute::sa::SaConfig;
///
/// let config = OptimizerConfig::default()
///     .with_annealing(SaConfig::default().with_seed(7))
///     .with_report_progress(false);
/// assert_eq!(config.annealing.seed, Some(7));
/// assert!(!config.report_progress);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OptimizerConfig {
    /// Annealing parameters shared by every zone.
    ///
    /// With a seed set, zone `z` is searched with seed `seed + z`.
    pub annealing: SaConfig,

    /// Emit per-zone progress events at `info` level.
    pub report_progress: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            annealing: SaConfig::default(),
            report_progress: true,
        }
    }
}

impl OptimizerConfig {
    pub fn with_annealing(mut self, annealing: SaConfig) -> Self {
        self.annealing = annealing;
        self
    }

    pub fn with_report_progress(mut self, report: bool) -> Self {
        self.report_progress = report;
        self
    }

    /// Sets the seed of the annealing parameters.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.annealing.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> RouteResult<()> {
        self.annealing.validate()
    }
}
