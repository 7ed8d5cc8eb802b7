use std::fmt;

use crate::likelihood::{
    ComplexLikelihood, ComplexType, GeneRoleLikelihood, GeneRolesetLikelihoods,
    OrganismRoleLikelihood, ReactionLikelihood, ReactionType,
};
use crate::types::SkippedGene;

/// Output of every stage of one pipeline run.
///
/// Each table keeps its stage's ordering: genes follow the hit input,
/// organism roles are sorted by role, and complexes and reactions follow
/// their reference tables.
///
/// # Examples
///
/// ```rust
/// use probanno_core::LikelihoodPipeline;
/// use probanno_core::hits::HitParser;
/// use probanno_core::reference::{ReferenceData, ReferenceTable};
///
/// let record = "g1\tt1\t99.0\t300\t3\t0\t1\t300\t1\t300\t1e-20\t550\n";
/// let hits = HitParser::default().parse(record.as_bytes())?;
///
/// let targets: ReferenceTable = [("t1", vec!["R1"])].into_iter().collect();
/// let complexes: ReferenceTable = [("C1", vec!["R1"])].into_iter().collect();
/// let reactions: ReferenceTable = [("rxn1", vec!["C1"])].into_iter().collect();
/// let reference = ReferenceData::new(&targets, complexes, reactions);
///
/// let results = LikelihoodPipeline::default().run(&hits, &reference)?;
/// assert_eq!(results.reactions.len(), 1);
/// assert_eq!(results.summary.complexes_full, 1);
/// println!("{}", results.summary);
/// # Ok::<(), probanno_core::types::ProbannoError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResults {
    /// Roleset probabilities of every scored gene
    pub rolesets: Vec<GeneRolesetLikelihoods>,
    /// Role probabilities, grouped by gene
    pub roles: Vec<GeneRoleLikelihood>,
    pub organism_roles: Vec<OrganismRoleLikelihood>,
    pub complexes: Vec<ComplexLikelihood>,
    pub reactions: Vec<ReactionLikelihood>,
    /// Genes excluded after roleset scoring
    pub skipped_genes: Vec<SkippedGene>,
    pub summary: RunSummary,
}

/// Counts surfaced at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub query_genes: usize,
    pub scored_genes: usize,
    pub skipped_genes: usize,
    /// Hits to targets without roles
    pub dropped_hits: usize,
    pub organism_roles: usize,
    pub complexes_full: usize,
    pub complexes_partial: usize,
    pub complexes_not_there: usize,
    pub complexes_no_reps: usize,
    pub complexes_no_reps_and_not_there: usize,
    pub reactions_with_complexes: usize,
    pub reactions_without_complexes: usize,
}

impl RunSummary {
    pub fn count_complexes(&mut self, complexes: &[ComplexLikelihood]) {
        for complex in complexes {
            let counter = match complex.complex_type {
                ComplexType::Full => &mut self.complexes_full,
                ComplexType::Partial { .. } => &mut self.complexes_partial,
                ComplexType::NotThere => &mut self.complexes_not_there,
                ComplexType::NoReps => &mut self.complexes_no_reps,
                ComplexType::NoRepsAndNotThere => &mut self.complexes_no_reps_and_not_there,
            };
            *counter += 1;
        }
    }

    pub fn count_reactions(&mut self, reactions: &[ReactionLikelihood]) {
        for reaction in reactions {
            match reaction.reaction_type {
                ReactionType::HasComplexes => self.reactions_with_complexes += 1,
                ReactionType::NoComplexes => self.reactions_without_complexes += 1,
            }
        }
    }

    #[must_use]
    pub fn complexes(&self) -> usize {
        self.complexes_full
            + self.complexes_partial
            + self.complexes_not_there
            + self.complexes_no_reps
            + self.complexes_no_reps_and_not_there
    }

    #[must_use]
    pub fn reactions(&self) -> usize {
        self.reactions_with_complexes + self.reactions_without_complexes
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} query genes ({} scored, {} skipped, {} hits dropped), {} roles, \
             {} complexes (FULL {}, PARTIAL {}, NOTTHERE {}, NOREPS {}, NOREPS_AND_NOTTHERE {}), \
             {} reactions ({} without complexes)",
            self.query_genes,
            self.scored_genes,
            self.skipped_genes,
            self.dropped_hits,
            self.organism_roles,
            self.complexes(),
            self.complexes_full,
            self.complexes_partial,
            self.complexes_not_there,
            self.complexes_no_reps,
            self.complexes_no_reps_and_not_there,
            self.reactions(),
            self.reactions_without_complexes,
        )
    }
}
