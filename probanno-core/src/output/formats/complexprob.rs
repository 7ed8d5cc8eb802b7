use std::io::Write;

use crate::constants::PROBABILITY_DECIMALS;
use crate::gpr::render;
use crate::results::PipelineResults;
use crate::types::ProbannoError;

/// Write complex likelihoods with their role partitions.
///
/// Columns: complex, likelihood, type, unavailable roles, nonexistent roles
/// and GPR.
pub fn write_complexprob_table<W: Write>(
    writer: &mut W,
    results: &PipelineResults,
    separator: &str,
) -> Result<(), ProbannoError> {
    for complex in &results.complexes {
        writeln!(
            writer,
            "{}\t{:.*}\t{}\t{}\t{}\t{}",
            complex.complex_id,
            PROBABILITY_DECIMALS,
            complex.likelihood,
            complex.complex_type,
            complex.unavailable_roles.join(separator),
            complex.nonexistent_roles.join(separator),
            render(complex.gpr.as_ref())
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::tests::create_test_results;

    #[test]
    fn test_write_complexprob_table() {
        let mut buffer = Vec::new();
        write_complexprob_table(&mut buffer, &create_test_results(), "///").unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "C1\t0.0769\tFULL\t\t\tg1",
                "C2\t0.4286\tFULL\t\t\tg2",
                "C3\t0.3846\tPARTIAL_1_of_2\tR4\t\tg1",
                "C6\t0.0000\tNOREPS_AND_NOTTHERE\tR4\tR9\t",
            ]
        );
    }

    #[test]
    fn test_write_complexprob_joins_role_lists() {
        let mut results = create_test_results();
        results.complexes[3].unavailable_roles.push("R5".to_string());

        let mut buffer = Vec::new();
        write_complexprob_table(&mut buffer, &results, "///").unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert!(output.contains("\tR4///R5\tR9\t"));
    }
}
