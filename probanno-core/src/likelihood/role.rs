//! Per-gene role likelihoods.
//!
//! A roleset probability counts towards every role of the set. Contributions
//! are summed, never averaged, so a gene hitting both a bifunctional
//! `R1/R2` protein and a monofunctional `R1` protein ends up with more
//! support for `R1` than for `R2`. No clipping is applied.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::likelihood::roleset::GeneRolesetLikelihoods;
use crate::types::Role;

/// Probability that one query gene performs one role.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneRoleLikelihood {
    pub gene_id: String,
    pub role: Role,
    pub probability: f64,
}

/// Fan the roleset distribution of one gene out into roles, sorted by role.
#[must_use]
pub fn gene_role_likelihoods(gene: &GeneRolesetLikelihoods) -> Vec<GeneRoleLikelihood> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for likelihood in &gene.rolesets {
        for role in likelihood.roleset.roles() {
            *totals.entry(role.as_str()).or_insert(0.0) += likelihood.probability;
        }
    }

    totals
        .into_iter()
        .map(|(role, probability)| GeneRoleLikelihood {
            gene_id: gene.gene_id.clone(),
            role: role.to_string(),
            probability,
        })
        .collect()
}

/// Role likelihoods of every gene, grouped by gene in input order.
#[must_use]
pub fn role_likelihoods(genes: &[GeneRolesetLikelihoods]) -> Vec<GeneRoleLikelihood> {
    let per_gene: Vec<Vec<GeneRoleLikelihood>> =
        genes.par_iter().map(gene_role_likelihoods).collect();
    per_gene.into_iter().flatten().collect()
}
