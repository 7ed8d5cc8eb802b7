use std::fmt;

use thiserror::Error;

/// Functional-annotation identifier.
pub type Role = String;

/// Canonical, order-independent set of roles performed by one reference protein.
///
/// Roles are sorted and deduplicated on construction, so every permutation
/// of the same set yields an identical key.
///
/// # Examples
///
/// ```rust
/// use probanno_core::types::RolesetKey;
///
/// let a = RolesetKey::from_roles(["R2", "R1"]);
/// let b = RolesetKey::from_roles(["R1", "R2", "R1"]);
/// assert_eq!(a, b);
/// assert_eq!(a.joined("///"), "R1///R2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RolesetKey {
    roles: Vec<Role>,
}

impl RolesetKey {
    /// Build a key from any collection of roles.
    pub fn from_roles<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Role>,
    {
        let mut roles: Vec<Role> = roles.into_iter().map(Into::into).collect();
        roles.sort_unstable();
        roles.dedup();
        Self { roles }
    }

    /// Parse the joined text form produced by [`RolesetKey::joined`].
    ///
    /// Empty fragments are ignored.
    pub fn parse(text: &str, separator: &str) -> Self {
        Self::from_roles(text.split(separator).filter(|role| !role.is_empty()))
    }

    /// The constituent roles in canonical order.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    #[must_use]
    pub fn contains(&self, role: &str) -> bool {
        self.roles
            .binary_search_by(|candidate| candidate.as_str().cmp(role))
            .is_ok()
    }

    /// Text form of the key, roles joined by `separator`.
    #[must_use]
    pub fn joined(&self, separator: &str) -> String {
        self.roles.join(separator)
    }
}

/// One normalized similarity-search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Gene of the genome being annotated
    pub query_id: String,
    /// Reference gene that was hit
    pub target_id: String,
    /// `-log10` of the clamped e-value, always `>= 0`
    pub score: f64,
}

/// Reason a query gene produced no roleset probabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// The roleset denominator was zero or not finite.
    DegenerateDenominator {
        /// Offending denominator value
        denominator: f64,
    },
    /// No hit reached an annotated target with a positive score.
    NoRolesetEvidence,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateDenominator { denominator } => {
                write!(f, "degenerate denominator ({denominator})")
            }
            Self::NoRolesetEvidence => write!(f, "no annotated hits"),
        }
    }
}

/// A query gene excluded from every stage after roleset scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedGene {
    pub gene_id: String,
    pub reason: SkipReason,
    /// Hits dropped because their target had no roleset
    pub dropped_hits: usize,
}

/// Error types raised by the likelihood pipeline.
///
/// Only fatal conditions are errors. Per-gene data-quality problems are
/// reported through [`SkippedGene`] and the run summary instead.
#[derive(Error, Debug)]
pub enum ProbannoError {
    /// A hit record violates the column contract
    #[error("Malformed hit record at line {line}: {reason} (record: {record:?})")]
    MalformedInput {
        line: usize,
        record: String,
        reason: String,
    },
    /// A local reference table row could not be read
    #[error("Invalid reference table {origin} at line {line}: {reason}")]
    InvalidReference {
        origin: String,
        line: usize,
        reason: String,
    },
    /// A structural invariant between stages was violated
    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),
    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
