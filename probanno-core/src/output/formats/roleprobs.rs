use std::io::Write;

use crate::constants::PROBABILITY_DECIMALS;
use crate::results::PipelineResults;
use crate::types::ProbannoError;

/// Write per-gene role probabilities.
pub fn write_roleprobs_table<W: Write>(
    writer: &mut W,
    results: &PipelineResults,
) -> Result<(), ProbannoError> {
    for entry in &results.roles {
        writeln!(
            writer,
            "{}\t{}\t{:.*}",
            entry.gene_id, entry.role, PROBABILITY_DECIMALS, entry.probability
        )?;
    }
    Ok(())
}
