//! Complex likelihoods.
//!
//! A complex needs all of its roles (AND). Each required role is either
//! available (found in the organism), unavailable (known to the reference
//! set but not found) or nonexistent (no reference representative at all).
//! The likelihood of a complex with available roles is its weakest
//! available role.

use std::fmt;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::gpr::Gpr;
use crate::likelihood::organism::OrganismRoleLikelihood;
use crate::reference::ReferenceData;
use crate::types::Role;

/// Classification of a complex by where its required roles were found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexType {
    /// No required role has a reference representative
    NoReps,
    /// Every required role is known but none was found
    NotThere,
    /// Roles are a mix of unknown and not found
    NoRepsAndNotThere,
    /// Every required role was found
    Full,
    /// Only `available` of `required` roles were found
    Partial { available: usize, required: usize },
}

impl ComplexType {
    /// Whether the complex contributes a likelihood and GPR.
    #[must_use]
    pub const fn is_present(self) -> bool {
        matches!(self, Self::Full | Self::Partial { .. })
    }
}

impl fmt::Display for ComplexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoReps => write!(f, "NOREPS"),
            Self::NotThere => write!(f, "NOTTHERE"),
            Self::NoRepsAndNotThere => write!(f, "NOREPS_AND_NOTTHERE"),
            Self::Full => write!(f, "FULL"),
            Self::Partial {
                available,
                required,
            } => write!(f, "PARTIAL_{available}_of_{required}"),
        }
    }
}

/// Likelihood that the organism forms one complex.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexLikelihood {
    pub complex_id: String,
    pub likelihood: f64,
    pub complex_type: ComplexType,
    pub available_roles: Vec<Role>,
    /// Known to the reference set, not found in the organism
    pub unavailable_roles: Vec<Role>,
    /// Absent from the reference set
    pub nonexistent_roles: Vec<Role>,
    pub gpr: Option<Gpr>,
}

impl ComplexLikelihood {
    /// Number of distinct required roles.
    #[must_use]
    pub fn required_count(&self) -> usize {
        self.available_roles.len() + self.unavailable_roles.len() + self.nonexistent_roles.len()
    }
}

/// Organism role likelihoods indexed by role.
pub type OrganismRoleIndex<'a> = FxHashMap<&'a str, &'a OrganismRoleLikelihood>;

#[must_use]
pub fn index_organism_roles(roles: &[OrganismRoleLikelihood]) -> OrganismRoleIndex<'_> {
    roles.iter().map(|role| (role.role.as_str(), role)).collect()
}

/// Classify one complex and compute its likelihood and GPR.
///
/// Repeated required roles are counted once.
pub fn complex_likelihood(
    complex_id: &str,
    required_roles: &[String],
    organism: &OrganismRoleIndex<'_>,
    reference: &ReferenceData,
) -> ComplexLikelihood {
    let mut available: Vec<&OrganismRoleLikelihood> = Vec::new();
    let mut unavailable: Vec<Role> = Vec::new();
    let mut nonexistent: Vec<Role> = Vec::new();
    let mut seen: Vec<&str> = Vec::with_capacity(required_roles.len());

    for role in required_roles {
        if seen.contains(&role.as_str()) {
            continue;
        }
        seen.push(role);

        if let Some(&found) = organism.get(role.as_str()) {
            available.push(found);
        } else if reference.is_reference_role(role) {
            unavailable.push(role.clone());
        } else {
            nonexistent.push(role.clone());
        }
    }

    let required = seen.len();
    let complex_type = if nonexistent.len() == required {
        ComplexType::NoReps
    } else if unavailable.len() == required {
        ComplexType::NotThere
    } else if unavailable.len() + nonexistent.len() == required {
        ComplexType::NoRepsAndNotThere
    } else if available.len() == required {
        ComplexType::Full
    } else {
        ComplexType::Partial {
            available: available.len(),
            required,
        }
    };

    let (likelihood, gpr) = if complex_type.is_present() {
        let weakest = available
            .iter()
            .map(|role| role.likelihood)
            .fold(f64::INFINITY, f64::min);
        let gpr = Gpr::all(available.iter().filter_map(|role| role.gpr.clone()));
        (weakest, gpr)
    } else {
        (0.0, None)
    };

    ComplexLikelihood {
        complex_id: complex_id.to_string(),
        likelihood,
        complex_type,
        available_roles: available.iter().map(|role| role.role.clone()).collect(),
        unavailable_roles: unavailable,
        nonexistent_roles: nonexistent,
        gpr,
    }
}

/// Compute every complex of the reference set, in reference table order.
#[must_use]
pub fn complex_likelihoods(
    organism_roles: &[OrganismRoleLikelihood],
    reference: &ReferenceData,
) -> Vec<ComplexLikelihood> {
    let organism = index_organism_roles(organism_roles);
    reference
        .complexes()
        .entries()
        .par_iter()
        .map(|(complex_id, roles)| complex_likelihood(complex_id, roles, &organism, reference))
        .collect()
}
