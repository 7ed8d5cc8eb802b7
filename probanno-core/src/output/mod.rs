//! Tab-delimited writers for the stage tables of a run.
//!
//! ## Tables
//!
//! | table | columns | extension |
//! |-------|---------|-----------|
//! | roleset probabilities | gene, roleset, probability | `rolesetprobs` |
//! | role probabilities | gene, role, probability | `roleprobs` |
//! | organism roles | role, likelihood, GPR | `cellroleprob` |
//! | complexes | complex, likelihood, type, unavailable, nonexistent, GPR | `complexprob` |
//! | reactions | reaction, likelihood, type, complex info, GPR | `rxnprobs` |
//! | skipped genes | gene, reason | `skipped` |
//!
//! Likelihoods are written with four decimals. Multi-valued columns are
//! joined with the configured separator.
//!
//! ## Examples
//!
//! ```rust
//! use probanno_core::LikelihoodPipeline;
//! use probanno_core::hits::HitTable;
//! use probanno_core::output::{OutputTable, write_table};
//! use probanno_core::reference::{ReferenceData, ReferenceTable};
//!
//! let reactions: ReferenceTable = [("rxn1", vec!["C1"])].into_iter().collect();
//! let reference = ReferenceData::new(&ReferenceTable::new(), ReferenceTable::new(), reactions);
//! let results = LikelihoodPipeline::default().run(&HitTable::new(), &reference)?;
//!
//! let mut buffer = Vec::new();
//! write_table(&mut buffer, &results, OutputTable::Reactions, "///")?;
//! assert_eq!(String::from_utf8(buffer).unwrap(), "rxn1\t0.0000\tNOCOMPLEXES\t\t\n");
//! # Ok::<(), probanno_core::types::ProbannoError>(())
//! ```

use std::fmt;
use std::io::Write;

use crate::results::PipelineResults;
use crate::types::ProbannoError;

mod formats {
    pub mod cellroleprob;
    pub mod complexprob;
    pub mod roleprobs;
    pub mod rolesetprobs;
    pub mod rxnprobs;
    pub mod skipped;
}

use formats::{
    cellroleprob::write_cellroleprob_table, complexprob::write_complexprob_table,
    roleprobs::write_roleprobs_table, rolesetprobs::write_rolesetprobs_table,
    rxnprobs::write_rxnprobs_table, skipped::write_skipped_table,
};

/// One of the tables produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputTable {
    RolesetProbabilities,
    RoleProbabilities,
    OrganismRoles,
    Complexes,
    /// Primary result handed to downstream model building
    Reactions,
    SkippedGenes,
}

impl OutputTable {
    /// Every table, in stage order.
    pub const ALL: [Self; 6] = [
        Self::RolesetProbabilities,
        Self::RoleProbabilities,
        Self::OrganismRoles,
        Self::Complexes,
        Self::Reactions,
        Self::SkippedGenes,
    ];

    /// File extension used when the table is written to a directory.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::RolesetProbabilities => "rolesetprobs",
            Self::RoleProbabilities => "roleprobs",
            Self::OrganismRoles => "cellroleprob",
            Self::Complexes => "complexprob",
            Self::Reactions => "rxnprobs",
            Self::SkippedGenes => "skipped",
        }
    }
}

impl fmt::Display for OutputTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RolesetProbabilities => "roleset probabilities",
            Self::RoleProbabilities => "role probabilities",
            Self::OrganismRoles => "organism roles",
            Self::Complexes => "complexes",
            Self::Reactions => "reactions",
            Self::SkippedGenes => "skipped genes",
        };
        write!(f, "{name}")
    }
}

/// Writes one stage table of `results`.
///
/// # Errors
///
/// Returns [`ProbannoError::IoError`] if writing fails.
pub fn write_table<W: Write>(
    writer: &mut W,
    results: &PipelineResults,
    table: OutputTable,
    separator: &str,
) -> Result<(), ProbannoError> {
    match table {
        OutputTable::RolesetProbabilities => write_rolesetprobs_table(writer, results, separator),
        OutputTable::RoleProbabilities => write_roleprobs_table(writer, results),
        OutputTable::OrganismRoles => write_cellroleprob_table(writer, results),
        OutputTable::Complexes => write_complexprob_table(writer, results, separator),
        OutputTable::Reactions => write_rxnprobs_table(writer, results, separator),
        OutputTable::SkippedGenes => write_skipped_table(writer, results),
    }
}
