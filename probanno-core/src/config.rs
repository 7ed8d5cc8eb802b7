use crate::constants::{
    DEFAULT_DILUTION_PERCENT, DEFAULT_MAX_EVALUE, DEFAULT_MIN_EVALUE, DEFAULT_PSEUDO_COUNT,
    DEFAULT_SEPARATOR,
};
use crate::types::ProbannoError;

/// Configuration settings for a likelihood pipeline run.
///
/// # Examples
///
/// ## Default configuration
///
/// ```rust
/// use probanno_core::config::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.pseudo_count, 40.0);
/// assert_eq!(config.dilution_percent, 80.0);
/// ```
///
/// ## Stricter gene support with a bounded thread pool
///
/// ```rust
/// use probanno_core::config::PipelineConfig;
///
/// let config = PipelineConfig {
///     dilution_percent: 95.0,
///     num_threads: Some(4),
///     quiet: true,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Smoothing term multiplied by the best hit score of each query gene.
    ///
    /// Withholds probability mass so a single hit never yields 100%, and
    /// keeps the denominator away from zero.
    ///
    /// **Default**: `40.0`
    pub pseudo_count: f64,

    /// Cutoff, as a percentage of the maximum, for counting secondary genes
    /// (per role) and secondary complexes (per reaction) as supporting.
    ///
    /// **Default**: `80.0`
    pub dilution_percent: f64,

    /// Floor applied to e-values before the logarithm.
    ///
    /// **Default**: `1e-200`
    pub min_evalue: f64,

    /// Ceiling applied to e-values before the logarithm.
    ///
    /// Must lie within `min_evalue..=1.0`, so scores are never negative.
    ///
    /// **Default**: `1.0`
    pub max_evalue: f64,

    /// Token used to join roleset keys and multi-valued text fields.
    ///
    /// Must not occur inside any role or identifier.
    ///
    /// **Default**: `"///"`
    pub separator: String,

    /// Downgrade per-stage progress events from `info` to `debug`.
    ///
    /// **Default**: `false`
    pub quiet: bool,

    /// Number of worker threads for per-gene, per-complex and per-reaction work.
    ///
    /// **Default**: `None` (use the global rayon pool)
    pub num_threads: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pseudo_count: DEFAULT_PSEUDO_COUNT,
            dilution_percent: DEFAULT_DILUTION_PERCENT,
            min_evalue: DEFAULT_MIN_EVALUE,
            max_evalue: DEFAULT_MAX_EVALUE,
            separator: DEFAULT_SEPARATOR.to_string(),
            quiet: false,
            num_threads: None,
        }
    }
}

impl PipelineConfig {
    /// Check every field is within its documented range.
    ///
    /// # Errors
    ///
    /// Returns [`ProbannoError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ProbannoError> {
        if !self.pseudo_count.is_finite() || self.pseudo_count < 0.0 {
            return Err(ProbannoError::InvalidConfig(format!(
                "pseudo_count must be a finite non-negative number, got {}",
                self.pseudo_count
            )));
        }
        if !(0.0..=100.0).contains(&self.dilution_percent) {
            return Err(ProbannoError::InvalidConfig(format!(
                "dilution_percent must be within 0-100, got {}",
                self.dilution_percent
            )));
        }
        check_evalue_bounds(self.min_evalue, self.max_evalue)?;
        if self.separator.is_empty() || self.separator.contains(['\t', '\n', '\r']) {
            return Err(ProbannoError::InvalidConfig(
                "separator must be non-empty and free of tabs and newlines".to_string(),
            ));
        }
        if self.num_threads == Some(0) {
            return Err(ProbannoError::InvalidConfig(
                "num_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Fraction of a maximum that secondary evidence must reach.
    #[must_use]
    pub fn dilution_fraction(&self) -> f64 {
        self.dilution_percent / 100.0
    }
}

/// Check that `[min_evalue, max_evalue]` is a usable clamp range within `(0, 1]`.
pub(crate) fn check_evalue_bounds(min_evalue: f64, max_evalue: f64) -> Result<(), ProbannoError> {
    if !min_evalue.is_finite() || min_evalue <= 0.0 {
        return Err(ProbannoError::InvalidConfig(format!(
            "min_evalue must be a finite positive number, got {min_evalue}"
        )));
    }
    if !(min_evalue..=1.0).contains(&max_evalue) {
        return Err(ProbannoError::InvalidConfig(format!(
            "max_evalue must be within min_evalue-1, got {max_evalue}"
        )));
    }
    Ok(())
}
