//! Per-gene roleset likelihoods ("marble-picking").
//!
//! For one query gene every hit to an annotated target contributes its
//! squared score to the roleset of that target:
//!
//! ```text
//! p(key) = sum(score^2 over hits to key) / (pseudo_count * max_score + sum over all keys)
//! ```
//!
//! The pseudocount term withholds probability mass, so the probabilities of
//! one gene do not sum to one.

use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::debug;

use crate::hits::{HitTable, QueryHits};
use crate::reference::ReferenceData;
use crate::types::{RolesetKey, SkipReason, SkippedGene};

/// Probability that a query gene performs one roleset.
#[derive(Debug, Clone, PartialEq)]
pub struct RolesetLikelihood {
    pub roleset: RolesetKey,
    pub probability: f64,
}

/// Roleset distribution of one query gene.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneRolesetLikelihoods {
    pub gene_id: String,
    /// Rolesets with positive evidence, in canonical key order
    pub rolesets: Vec<RolesetLikelihood>,
    /// Best score over every hit of the gene, annotated or not
    pub max_score: f64,
    pub denominator: f64,
    /// Hits whose target had no roleset
    pub dropped_hits: usize,
}

/// Result of marble-picking one query gene.
#[derive(Debug, Clone, PartialEq)]
pub enum RolesetOutcome {
    Scored(GeneRolesetLikelihoods),
    Skipped(SkippedGene),
}

/// Roleset likelihoods of every query gene, in hit table order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RolesetStage {
    pub genes: Vec<GeneRolesetLikelihoods>,
    pub skipped: Vec<SkippedGene>,
    /// Hits dropped over all genes, skipped ones included
    pub dropped_hits: usize,
}

/// Compute the roleset distribution of a single query gene.
///
/// # Examples
///
/// ```rust
/// use probanno_core::hits::QueryHits;
/// use probanno_core::likelihood::roleset::{marble_pick, RolesetOutcome};
/// use probanno_core::reference::{ReferenceData, ReferenceTable};
/// use probanno_core::types::SearchHit;
///
/// let targets: ReferenceTable = [("t1", vec!["R1"]), ("t2", vec!["R1", "R2"])]
///     .into_iter()
///     .collect();
/// let reference = ReferenceData::new(&targets, ReferenceTable::new(), ReferenceTable::new());
///
/// let hit = |target: &str, score: f64| SearchHit {
///     query_id: "g1".to_string(),
///     target_id: target.to_string(),
///     score,
/// };
/// let query = QueryHits {
///     query_id: "g1".to_string(),
///     hits: vec![hit("t1", 20.0), hit("t2", 10.0)],
/// };
///
/// let RolesetOutcome::Scored(gene) = marble_pick(&query, &reference, 40.0) else {
///     panic!("gene was skipped");
/// };
/// assert_eq!(gene.denominator, 1300.0);
/// assert!((gene.rolesets[0].probability - 400.0 / 1300.0).abs() < 1e-12);
/// ```
pub fn marble_pick(
    query: &QueryHits,
    reference: &ReferenceData,
    pseudo_count: f64,
) -> RolesetOutcome {
    let max_score = query.max_score();

    let mut sum_squares: BTreeMap<&RolesetKey, f64> = BTreeMap::new();
    let mut dropped_hits = 0;
    for hit in &query.hits {
        match reference.roleset_for(&hit.target_id) {
            Some(key) => *sum_squares.entry(key).or_insert(0.0) += hit.score * hit.score,
            None => dropped_hits += 1,
        }
    }
    if dropped_hits > 0 {
        debug!(
            gene = %query.query_id,
            dropped_hits,
            "dropped hits to targets without roles"
        );
    }

    let denominator = pseudo_count * max_score + sum_squares.values().sum::<f64>();
    let skip = |reason| {
        RolesetOutcome::Skipped(SkippedGene {
            gene_id: query.query_id.clone(),
            reason,
            dropped_hits,
        })
    };
    if !denominator.is_finite() || denominator <= 0.0 {
        return skip(SkipReason::DegenerateDenominator { denominator });
    }

    let rolesets: Vec<RolesetLikelihood> = sum_squares
        .into_iter()
        .filter(|&(_, squares)| squares > 0.0)
        .map(|(key, squares)| RolesetLikelihood {
            roleset: key.clone(),
            probability: squares / denominator,
        })
        .collect();
    if rolesets.is_empty() {
        return skip(SkipReason::NoRolesetEvidence);
    }

    RolesetOutcome::Scored(GeneRolesetLikelihoods {
        gene_id: query.query_id.clone(),
        rolesets,
        max_score,
        denominator,
        dropped_hits,
    })
}

/// Marble-pick every query gene of `hits`.
///
/// Genes are processed in parallel; output order follows the hit table.
pub fn roleset_likelihoods(
    hits: &HitTable,
    reference: &ReferenceData,
    pseudo_count: f64,
) -> RolesetStage {
    let outcomes: Vec<RolesetOutcome> = hits
        .queries()
        .par_iter()
        .map(|query| marble_pick(query, reference, pseudo_count))
        .collect();

    let mut stage = RolesetStage::default();
    for outcome in outcomes {
        match outcome {
            RolesetOutcome::Scored(gene) => {
                stage.dropped_hits += gene.dropped_hits;
                stage.genes.push(gene);
            }
            RolesetOutcome::Skipped(skipped) => {
                debug!(gene = %skipped.gene_id, reason = %skipped.reason, "skipped gene");
                stage.dropped_hits += skipped.dropped_hits;
                stage.skipped.push(skipped);
            }
        }
    }
    stage
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceTable;
    use crate::types::SearchHit;

    fn reference() -> ReferenceData {
        let targets: ReferenceTable = [
            ("t1", vec!["R1"]),
            ("t2", vec!["R2", "R1"]),
            ("t3", vec!["R3"]),
            ("t4", vec!["R1"]),
        ]
        .into_iter()
        .collect();
        ReferenceData::new(&targets, ReferenceTable::new(), ReferenceTable::new())
    }

    fn query(gene: &str, hits: &[(&str, f64)]) -> QueryHits {
        QueryHits {
            query_id: gene.to_string(),
            hits: hits
                .iter()
                .map(|&(target, score)| SearchHit {
                    query_id: gene.to_string(),
                    target_id: target.to_string(),
                    score,
                })
                .collect(),
        }
    }

    fn scored(outcome: RolesetOutcome) -> GeneRolesetLikelihoods {
        match outcome {
            RolesetOutcome::Scored(gene) => gene,
            RolesetOutcome::Skipped(skipped) => panic!("unexpected skip: {skipped:?}"),
        }
    }

    fn probability_of(gene: &GeneRolesetLikelihoods, roles: &[&str]) -> f64 {
        let key = RolesetKey::from_roles(roles.iter().copied());
        gene.rolesets
            .iter()
            .find(|likelihood| likelihood.roleset == key)
            .map_or(0.0, |likelihood| likelihood.probability)
    }

    #[test]
    fn test_worked_example() {
        let gene = scored(marble_pick(
            &query("g1", &[("t1", 20.0), ("t2", 10.0)]),
            &reference(),
            40.0,
        ));

        assert_eq!(gene.max_score, 20.0);
        assert_eq!(gene.denominator, 1300.0);
        assert_eq!(probability_of(&gene, &["R1"]), 400.0 / 1300.0);
        assert_eq!(probability_of(&gene, &["R1", "R2"]), 100.0 / 1300.0);
        assert!((probability_of(&gene, &["R1"]) - 0.3077).abs() < 1e-4);
        assert!((probability_of(&gene, &["R1", "R2"]) - 0.0769).abs() < 1e-4);
    }

    #[test]
    fn test_hits_to_same_roleset_accumulate() {
        let gene = scored(marble_pick(
            &query("g1", &[("t1", 3.0), ("t4", 4.0)]),
            &reference(),
            40.0,
        ));
        assert_eq!(gene.rolesets.len(), 1);
        assert_eq!(gene.denominator, 40.0 * 4.0 + 25.0);
        assert_eq!(gene.rolesets[0].probability, 25.0 / 185.0);
    }

    #[test]
    fn test_unannotated_hits_are_dropped_but_set_max_score() {
        let gene = scored(marble_pick(
            &query("g1", &[("t1", 10.0), ("unknown", 50.0)]),
            &reference(),
            40.0,
        ));
        assert_eq!(gene.dropped_hits, 1);
        assert_eq!(gene.max_score, 50.0);
        assert_eq!(gene.rolesets[0].probability, 100.0 / (40.0 * 50.0 + 100.0));
    }

    #[test]
    fn test_probabilities_withhold_mass() {
        let gene = scored(marble_pick(
            &query("g1", &[("t1", 20.0), ("t2", 10.0), ("t3", 5.0)]),
            &reference(),
            40.0,
        ));
        let total: f64 = gene.rolesets.iter().map(|l| l.probability).sum();
        assert!(total < 1.0);
        assert!(gene.rolesets.iter().all(|l| l.probability > 0.0));
    }

    #[test]
    fn test_zero_pseudo_count_single_hit_is_certain() {
        let gene = scored(marble_pick(&query("g1", &[("t1", 7.0)]), &reference(), 0.0));
        assert_eq!(gene.rolesets[0].probability, 1.0);
    }

    #[test]
    fn test_empty_hit_list_is_degenerate() {
        let outcome = marble_pick(&query("g1", &[]), &reference(), 40.0);
        match outcome {
            RolesetOutcome::Skipped(skipped) => {
                assert_eq!(skipped.gene_id, "g1");
                assert_eq!(
                    skipped.reason,
                    SkipReason::DegenerateDenominator { denominator: 0.0 }
                );
            }
            RolesetOutcome::Scored(gene) => panic!("expected skip, got {gene:?}"),
        }
    }

    #[test]
    fn test_all_zero_scores_is_degenerate() {
        let outcome = marble_pick(&query("g1", &[("t1", 0.0)]), &reference(), 40.0);
        assert!(matches!(
            outcome,
            RolesetOutcome::Skipped(SkippedGene {
                reason: SkipReason::DegenerateDenominator { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_only_unannotated_hits_is_skipped() {
        let outcome = marble_pick(&query("g1", &[("unknown", 12.0)]), &reference(), 40.0);
        match outcome {
            RolesetOutcome::Skipped(skipped) => {
                assert_eq!(skipped.reason, SkipReason::NoRolesetEvidence);
                assert_eq!(skipped.dropped_hits, 1);
            }
            RolesetOutcome::Scored(gene) => panic!("expected skip, got {gene:?}"),
        }
    }

    #[test]
    fn test_raising_score_never_lowers_probability() {
        let reference = reference();
        let mut previous = 0.0;
        for score in [1.0, 5.0, 10.0, 20.0, 40.0, 80.0] {
            let gene = scored(marble_pick(
                &query("g1", &[("t1", score), ("t3", 20.0)]),
                &reference,
                40.0,
            ));
            let probability = probability_of(&gene, &["R1"]);
            assert!(probability >= previous, "{probability} < {previous} at {score}");
            previous = probability;
        }
    }

    #[test]
    fn test_stage_preserves_order_and_counts() {
        let hits: HitTable = [
            ("g2", "t3", 30.0),
            ("g1", "t1", 20.0),
            ("g3", "unknown", 5.0),
            ("g1", "unknown", 2.0),
        ]
        .into_iter()
        .map(|(gene, target, score)| SearchHit {
            query_id: gene.to_string(),
            target_id: target.to_string(),
            score,
        })
        .collect();

        let stage = roleset_likelihoods(&hits, &reference(), 40.0);
        let genes: Vec<&str> = stage.genes.iter().map(|g| g.gene_id.as_str()).collect();
        assert_eq!(genes, vec!["g2", "g1"]);
        assert_eq!(stage.skipped.len(), 1);
        assert_eq!(stage.skipped[0].gene_id, "g3");
        assert_eq!(stage.dropped_hits, 2);
    }
}
