use std::io::Write;

use crate::results::PipelineResults;
use crate::types::ProbannoError;

/// Write query genes excluded after roleset scoring, with the reason.
pub fn write_skipped_table<W: Write>(
    writer: &mut W,
    results: &PipelineResults,
) -> Result<(), ProbannoError> {
    for skipped in &results.skipped_genes {
        writeln!(writer, "{}\t{}", skipped.gene_id, skipped.reason)?;
    }
    Ok(())
}
