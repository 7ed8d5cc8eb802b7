use std::io::Write;

use crate::constants::PROBABILITY_DECIMALS;
use crate::gpr::render;
use crate::results::PipelineResults;
use crate::types::ProbannoError;

/// Write reaction likelihoods in the format consumed by model building.
pub fn write_rxnprobs_table<W: Write>(
    writer: &mut W,
    results: &PipelineResults,
    separator: &str,
) -> Result<(), ProbannoError> {
    for reaction in &results.reactions {
        writeln!(
            writer,
            "{}\t{:.*}\t{}\t{}\t{}",
            reaction.reaction_id,
            PROBABILITY_DECIMALS,
            reaction.likelihood,
            reaction.reaction_type,
            reaction.complex_info(separator),
            render(reaction.gpr.as_ref())
        )?;
    }
    Ok(())
}
