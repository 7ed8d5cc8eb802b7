//! Default tuning parameters and fixed column positions.

/// Smoothing term in the roleset denominator.
///
/// Multiplied by the best score of the query gene, so a single hit at the
/// best score can never claim more than `1 / (1 + DEFAULT_PSEUDO_COUNT / score)`.
pub const DEFAULT_PSEUDO_COUNT: f64 = 40.0;

/// Percentage of a maximum likelihood that secondary evidence must reach
/// to still count as supporting.
pub const DEFAULT_DILUTION_PERCENT: f64 = 80.0;

/// E-values below this are floored before taking the logarithm.
pub const DEFAULT_MIN_EVALUE: f64 = 1e-200;

/// E-values above this are capped so that scores stay non-negative.
pub const DEFAULT_MAX_EVALUE: f64 = 1.0;

/// Token absent from every role and identifier.
pub const DEFAULT_SEPARATOR: &str = "///";

/// Minimum number of columns in a tabular hit record.
pub const MIN_HIT_FIELDS: usize = 11;

/// Query gene column.
pub const QUERY_FIELD: usize = 0;

/// Target gene column.
pub const TARGET_FIELD: usize = 1;

/// E-value column.
pub const EVALUE_FIELD: usize = 10;

/// Number of decimals used for probabilities in text tables.
pub const PROBABILITY_DECIMALS: usize = 4;
