//! # probanno-core
//!
//! Probabilistic genome annotation: turns sequence-similarity hits of a
//! genome's genes into likelihoods that the organism catalyzes each reaction
//! of a reference catalog, together with gene-protein-reaction (GPR)
//! associations.
//!
//! ## Overview
//!
//! Evidence flows through functional roles and enzyme complexes:
//!
//! 1. **Hits**: tabular search records become per-gene `-log10(evalue)` scores
//! 2. **Rolesets**: "marble-picking" turns one gene's hits into a probability
//!    per roleset of the hit targets
//! 3. **Roles**: roleset probabilities are summed into each member role
//! 4. **Organism**: each role takes its best gene; genes within the dilution
//!    cutoff support it
//! 5. **Complexes**: required roles are AND-combined (weakest link)
//! 6. **Reactions**: catalyzing complexes are OR-combined (strongest link)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use probanno_core::LikelihoodPipeline;
//! use probanno_core::config::PipelineConfig;
//! use probanno_core::hits::read_hits_file;
//! use probanno_core::reference::{ReferenceData, read_table};
//!
//! let pipeline = LikelihoodPipeline::new(PipelineConfig::default());
//! let separator = &pipeline.config.separator;
//!
//! let hits = read_hits_file("genome.blastp.tsv", &pipeline.hit_parser()?)?;
//! let targets = read_table("target_roles.tsv", separator)?;
//! let complexes = read_table("complex_roles.tsv", separator)?;
//! let reactions = read_table("reaction_complexes.tsv", separator)?;
//! let reference = ReferenceData::new(&targets, complexes, reactions);
//!
//! let results = pipeline.run(&hits, &reference)?;
//! for reaction in &results.reactions {
//!     println!("{}\t{:.4}", reaction.reaction_id, reaction.likelihood);
//! }
//! # Ok::<(), probanno_core::types::ProbannoError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`config`]: Run configuration
//! - [`engine`]: The pipeline wiring every stage
//! - [`hits`]: Hit record parsing
//! - [`reference`]: Reference annotation tables
//! - [`likelihood`]: The likelihood stages
//! - [`gpr`]: Boolean GPR expressions
//! - [`results`]: Stage outputs and the run summary
//! - [`output`]: Tab-delimited table writers
//! - [`types`]: Shared domain types and errors
//!
//! ## Error Handling
//!
//! Malformed input and broken stage invariants abort a run with a
//! [`ProbannoError`](types::ProbannoError). Per-gene data problems do not:
//! hits to unannotated targets are dropped and counted, and genes without
//! usable evidence are listed in
//! [`PipelineResults::skipped_genes`](results::PipelineResults::skipped_genes).

pub mod config;
pub mod constants;
pub mod engine;
pub mod gpr;
pub mod hits;
pub mod likelihood;
pub mod output;
pub mod reference;
pub mod results;
pub mod types;

pub use engine::LikelihoodPipeline;
