use tracing::warn;

use crate::config::PipelineConfig;
use crate::hits::{HitParser, HitTable};
use crate::likelihood::{
    complex_likelihoods, organism_role_likelihoods, reaction_likelihoods, role_likelihoods,
    roleset_likelihoods,
};
use crate::reference::ReferenceData;
use crate::results::{PipelineResults, RunSummary};
use crate::types::ProbannoError;

/// Stage progress at `info`, or at `debug` when the run is quiet.
macro_rules! progress {
    ($quiet:expr, $($arg:tt)+) => {
        if $quiet {
            tracing::debug!($($arg)+);
        } else {
            tracing::info!($($arg)+);
        }
    };
}

/// Runs the likelihood stages from parsed hits to reaction likelihoods.
///
/// The pipeline holds no state between runs; the same instance can score
/// any number of genomes against any reference data.
///
/// # Examples
///
/// ```rust
/// use probanno_core::LikelihoodPipeline;
/// use probanno_core::config::PipelineConfig;
/// use probanno_core::hits::HitTable;
/// use probanno_core::reference::ReferenceData;
///
/// let pipeline = LikelihoodPipeline::new(PipelineConfig {
///     num_threads: Some(2),
///     ..Default::default()
/// });
/// let results = pipeline.run(&HitTable::new(), &ReferenceData::default())?;
/// assert!(results.reactions.is_empty());
/// # Ok::<(), probanno_core::types::ProbannoError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LikelihoodPipeline {
    /// Configuration options for the run
    pub config: PipelineConfig,
}

impl LikelihoodPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Hit parser using this pipeline's e-value bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ProbannoError::InvalidConfig`] for an invalid configuration.
    pub fn hit_parser(&self) -> Result<HitParser, ProbannoError> {
        self.config.validate()?;
        HitParser::from_config(&self.config)
    }

    /// Score `hits` against `reference`.
    ///
    /// With `num_threads` set, per-key work runs on a dedicated rayon pool of
    /// that size; otherwise the global pool is used. Results are identical
    /// for any thread count.
    ///
    /// # Errors
    ///
    /// Returns [`ProbannoError::InvalidConfig`] for an invalid configuration
    /// or a thread pool that cannot be built, and
    /// [`ProbannoError::InternalConsistency`] when stage outputs disagree.
    pub fn run(
        &self,
        hits: &HitTable,
        reference: &ReferenceData,
    ) -> Result<PipelineResults, ProbannoError> {
        self.config.validate()?;

        match self.config.num_threads {
            Some(num_threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(num_threads)
                    .build()
                    .map_err(|e| {
                        ProbannoError::InvalidConfig(format!(
                            "Failed to configure thread pool: {e}"
                        ))
                    })?;
                pool.install(|| self.run_stages(hits, reference))
            }
            None => self.run_stages(hits, reference),
        }
    }

    fn run_stages(
        &self,
        hits: &HitTable,
        reference: &ReferenceData,
    ) -> Result<PipelineResults, ProbannoError> {
        let quiet = self.config.quiet;
        let dilution = self.config.dilution_fraction();

        let stage = roleset_likelihoods(hits, reference, self.config.pseudo_count);
        progress!(
            quiet,
            genes = hits.len(),
            scored = stage.genes.len(),
            skipped = stage.skipped.len(),
            dropped_hits = stage.dropped_hits,
            "computed roleset likelihoods"
        );
        if !stage.skipped.is_empty() {
            warn!(
                skipped = stage.skipped.len(),
                "query genes without roleset likelihoods were excluded"
            );
        }

        let roles = role_likelihoods(&stage.genes);
        progress!(quiet, entries = roles.len(), "computed gene role likelihoods");

        let organism_roles = organism_role_likelihoods(&roles, dilution)?;
        progress!(
            quiet,
            roles = organism_roles.len(),
            "computed organism role likelihoods"
        );

        let complexes = complex_likelihoods(&organism_roles, reference);
        progress!(quiet, complexes = complexes.len(), "computed complex likelihoods");

        let reactions = reaction_likelihoods(&complexes, reference, dilution);
        progress!(quiet, reactions = reactions.len(), "computed reaction likelihoods");

        let mut summary = RunSummary {
            query_genes: hits.len(),
            scored_genes: stage.genes.len(),
            skipped_genes: stage.skipped.len(),
            dropped_hits: stage.dropped_hits,
            organism_roles: organism_roles.len(),
            ..Default::default()
        };
        summary.count_complexes(&complexes);
        summary.count_reactions(&reactions);

        Ok(PipelineResults {
            rolesets: stage.genes,
            roles,
            organism_roles,
            complexes,
            reactions,
            skipped_genes: stage.skipped,
            summary,
        })
    }
}
