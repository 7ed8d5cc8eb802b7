use std::io::Write;

use crate::constants::PROBABILITY_DECIMALS;
use crate::results::PipelineResults;
use crate::types::ProbannoError;

/// Write roleset probabilities, one row per gene and roleset.
pub fn write_rolesetprobs_table<W: Write>(
    writer: &mut W,
    results: &PipelineResults,
    separator: &str,
) -> Result<(), ProbannoError> {
    for gene in &results.rolesets {
        for likelihood in &gene.rolesets {
            writeln!(
                writer,
                "{}\t{}\t{:.*}",
                gene.gene_id,
                likelihood.roleset.joined(separator),
                PROBABILITY_DECIMALS,
                likelihood.probability
            )?;
        }
    }
    Ok(())
}
