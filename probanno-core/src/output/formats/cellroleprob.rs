use std::io::Write;

use crate::constants::PROBABILITY_DECIMALS;
use crate::gpr::render;
use crate::results::PipelineResults;
use crate::types::ProbannoError;

/// Write whole-organism role likelihoods with their supporting-gene GPR.
pub fn write_cellroleprob_table<W: Write>(
    writer: &mut W,
    results: &PipelineResults,
) -> Result<(), ProbannoError> {
    for role in &results.organism_roles {
        writeln!(
            writer,
            "{}\t{:.*}\t{}",
            role.role,
            PROBABILITY_DECIMALS,
            role.likelihood,
            render(role.gpr.as_ref())
        )?;
    }
    Ok(())
}
