//! Reaction likelihoods.
//!
//! Any catalyzing complex suffices (OR), so a reaction takes the best
//! likelihood among its known complexes. Complexes missing from the complex
//! results are left out entirely rather than counted as zero.

use std::cmp::Ordering;
use std::fmt;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::constants::PROBABILITY_DECIMALS;
use crate::gpr::Gpr;
use crate::likelihood::complex::{ComplexLikelihood, ComplexType};
use crate::reference::ReferenceData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionType {
    /// None of the listed complexes has a complex likelihood
    NoComplexes,
    HasComplexes,
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoComplexes => write!(f, "NOCOMPLEXES"),
            Self::HasComplexes => write!(f, "HASCOMPLEXES"),
        }
    }
}

/// A known catalyzing complex as listed in the complex info column.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalystSummary {
    pub complex_id: String,
    pub likelihood: f64,
    pub complex_type: ComplexType,
}

impl fmt::Display for CatalystSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.*}; {})",
            self.complex_id, PROBABILITY_DECIMALS, self.likelihood, self.complex_type
        )
    }
}

/// Likelihood that the organism catalyzes one reaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionLikelihood {
    pub reaction_id: String,
    pub likelihood: f64,
    pub reaction_type: ReactionType,
    /// Known catalyzing complexes, most likely first
    pub catalysts: Vec<CatalystSummary>,
    pub gpr: Option<Gpr>,
}

impl ReactionLikelihood {
    /// Separator-joined `complexId (likelihood; type)` text of the catalysts.
    #[must_use]
    pub fn complex_info(&self, separator: &str) -> String {
        self.catalysts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// Complex likelihoods indexed by complex id.
pub type ComplexIndex<'a> = FxHashMap<&'a str, &'a ComplexLikelihood>;

#[must_use]
pub fn index_complexes(complexes: &[ComplexLikelihood]) -> ComplexIndex<'_> {
    complexes
        .iter()
        .map(|complex| (complex.complex_id.as_str(), complex))
        .collect()
}

/// OR-combine the known catalysts of one reaction.
///
/// The GPR keeps, in listing order, the complexes whose likelihood reaches
/// `dilution_fraction` of the reaction likelihood.
///
/// # Examples
///
/// ```rust
/// use probanno_core::gpr::Gpr;
/// use probanno_core::likelihood::complex::{ComplexLikelihood, ComplexType};
/// use probanno_core::likelihood::reaction::{index_complexes, reaction_likelihood};
///
/// let complex = |id: &str, likelihood: f64, gene: &str| ComplexLikelihood {
///     complex_id: id.to_string(),
///     likelihood,
///     complex_type: ComplexType::Full,
///     available_roles: vec!["R1".to_string()],
///     unavailable_roles: Vec::new(),
///     nonexistent_roles: Vec::new(),
///     gpr: Some(Gpr::gene(gene)),
/// };
/// let complexes = vec![complex("C1", 0.3, "g1"), complex("C2", 0.9, "g2")];
/// let index = index_complexes(&complexes);
///
/// let listed = vec!["C1".to_string(), "C2".to_string()];
/// let reaction = reaction_likelihood("X", &listed, &index, 0.8);
/// assert_eq!(reaction.likelihood, 0.9);
/// assert_eq!(reaction.gpr, Some(Gpr::gene("g2")));
/// assert_eq!(
///     reaction.complex_info("///"),
///     "C2 (0.9000; FULL)///C1 (0.3000; FULL)"
/// );
/// ```
pub fn reaction_likelihood(
    reaction_id: &str,
    complex_ids: &[String],
    complexes: &ComplexIndex<'_>,
    dilution_fraction: f64,
) -> ReactionLikelihood {
    let mut known: Vec<&ComplexLikelihood> = Vec::new();
    for complex_id in complex_ids {
        if let Some(&complex) = complexes.get(complex_id.as_str()) {
            if !known.iter().any(|seen| seen.complex_id == complex.complex_id) {
                known.push(complex);
            }
        }
    }

    if known.is_empty() {
        return ReactionLikelihood {
            reaction_id: reaction_id.to_string(),
            likelihood: 0.0,
            reaction_type: ReactionType::NoComplexes,
            catalysts: Vec::new(),
            gpr: None,
        };
    }

    let likelihood = known
        .iter()
        .map(|complex| complex.likelihood)
        .fold(0.0, f64::max);
    let cutoff = dilution_fraction * likelihood;
    let gpr = Gpr::any(
        known
            .iter()
            .filter(|complex| complex.likelihood >= cutoff)
            .filter_map(|complex| complex.gpr.clone()),
    );

    let mut catalysts: Vec<CatalystSummary> = known
        .iter()
        .map(|complex| CatalystSummary {
            complex_id: complex.complex_id.clone(),
            likelihood: complex.likelihood,
            complex_type: complex.complex_type,
        })
        .collect();
    catalysts.sort_by(|a, b| descending(a.likelihood, b.likelihood));

    ReactionLikelihood {
        reaction_id: reaction_id.to_string(),
        likelihood,
        reaction_type: ReactionType::HasComplexes,
        catalysts,
        gpr,
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Compute every reaction of the reference set, in reference table order.
///
/// Reactions without an entry in the reaction table are never emitted.
#[must_use]
pub fn reaction_likelihoods(
    complexes: &[ComplexLikelihood],
    reference: &ReferenceData,
    dilution_fraction: f64,
) -> Vec<ReactionLikelihood> {
    let index = index_complexes(complexes);
    reference
        .reactions()
        .entries()
        .par_iter()
        .map(|(reaction_id, complex_ids)| {
            reaction_likelihood(reaction_id, complex_ids, &index, dilution_fraction)
        })
        .collect()
}
