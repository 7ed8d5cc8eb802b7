//! Whole-organism role likelihoods.
//!
//! The organism likelihood of a role is the best per-gene probability for
//! it. Every gene within the dilution cutoff of that best value supports the
//! role and joins its OR-combined GPR.

use std::collections::BTreeMap;

use crate::gpr::Gpr;
use crate::likelihood::role::GeneRoleLikelihood;
use crate::types::{ProbannoError, Role};

/// Likelihood that the organism performs a role.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganismRoleLikelihood {
    pub role: Role,
    pub likelihood: f64,
    /// Genes within the dilution cutoff, in first-seen order
    pub supporting_genes: Vec<String>,
    pub gpr: Option<Gpr>,
}

/// Reduce per-gene role likelihoods to one entry per role, sorted by role.
///
/// `dilution_fraction` is the dilution percentage divided by 100.
///
/// # Errors
///
/// Returns [`ProbannoError::InternalConsistency`] when a role ends up
/// without a maximum or without any supporting gene.
pub fn organism_role_likelihoods(
    gene_roles: &[GeneRoleLikelihood],
    dilution_fraction: f64,
) -> Result<Vec<OrganismRoleLikelihood>, ProbannoError> {
    let mut role_max: BTreeMap<&str, f64> = BTreeMap::new();
    for entry in gene_roles {
        role_max
            .entry(entry.role.as_str())
            .and_modify(|max| *max = max.max(entry.probability))
            .or_insert(entry.probability);
    }

    let mut supporting: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for entry in gene_roles {
        let max = role_max.get(entry.role.as_str()).ok_or_else(|| {
            ProbannoError::InternalConsistency(format!(
                "role {:?} missing from the role maximum table",
                entry.role
            ))
        })?;
        if entry.probability >= dilution_fraction * max {
            let genes = supporting.entry(entry.role.as_str()).or_default();
            if !genes.contains(&entry.gene_id.as_str()) {
                genes.push(&entry.gene_id);
            }
        }
    }

    role_max
        .into_iter()
        .map(|(role, likelihood)| {
            let genes = supporting.remove(role).unwrap_or_default();
            let gpr = Gpr::any(genes.iter().map(|gene| Gpr::gene(*gene))).ok_or_else(|| {
                ProbannoError::InternalConsistency(format!(
                    "role {role:?} has no supporting gene"
                ))
            })?;
            Ok(OrganismRoleLikelihood {
                role: role.to_string(),
                likelihood,
                supporting_genes: genes.into_iter().map(str::to_string).collect(),
                gpr: Some(gpr),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(gene: &str, role: &str, probability: f64) -> GeneRoleLikelihood {
        GeneRoleLikelihood {
            gene_id: gene.to_string(),
            role: role.to_string(),
            probability,
        }
    }

    #[test]
    fn test_likelihood_is_max_over_genes() {
        let roles = organism_role_likelihoods(
            &[
                triple("g1", "R1", 0.3),
                triple("g2", "R1", 0.5),
                triple("g3", "R2", 0.1),
            ],
            0.8,
        )
        .unwrap();

        assert_eq!(roles.len(), 2);
        assert_eq!(roles[0].role, "R1");
        assert_eq!(roles[0].likelihood, 0.5);
        assert_eq!(roles[0].supporting_genes, vec!["g2"]);
        assert_eq!(roles[1].role, "R2");
        assert_eq!(roles[1].likelihood, 0.1);
    }

    #[test]
    fn test_genes_within_dilution_cutoff_support_role() {
        let roles = organism_role_likelihoods(
            &[
                triple("g1", "R1", 0.42),
                triple("g2", "R1", 0.5),
                triple("g3", "R1", 0.39),
                triple("g4", "R1", 0.4),
            ],
            0.8,
        )
        .unwrap();

        assert_eq!(roles[0].supporting_genes, vec!["g1", "g2", "g4"]);
        assert_eq!(
            roles[0].gpr.as_ref().unwrap().to_string(),
            "(g1 or g2 or g4)"
        );
    }

    #[test]
    fn test_single_supporting_gene_is_not_wrapped() {
        let roles = organism_role_likelihoods(&[triple("g1", "R1", 0.4)], 0.8).unwrap();
        assert_eq!(roles[0].gpr, Some(Gpr::gene("g1")));
    }

    #[test]
    fn test_zero_dilution_keeps_every_gene() {
        let roles = organism_role_likelihoods(
            &[triple("g1", "R1", 0.9), triple("g2", "R1", 0.01)],
            0.0,
        )
        .unwrap();
        assert_eq!(roles[0].supporting_genes, vec!["g1", "g2"]);
    }

    #[test]
    fn test_repeated_gene_role_pairs_are_deduplicated() {
        let roles = organism_role_likelihoods(
            &[triple("g1", "R1", 0.4), triple("g1", "R1", 0.4)],
            0.8,
        )
        .unwrap();
        assert_eq!(roles[0].supporting_genes, vec!["g1"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(organism_role_likelihoods(&[], 0.8).unwrap().is_empty());
    }

    #[test]
    fn test_nan_probability_is_inconsistent() {
        let result = organism_role_likelihoods(&[triple("g1", "R1", f64::NAN)], 0.8);
        assert!(matches!(result, Err(ProbannoError::InternalConsistency(_))));
    }
}
