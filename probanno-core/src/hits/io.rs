use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::hits::{HitParser, HitTable};
use crate::types::ProbannoError;

/// Read a tabular hit file into a [`HitTable`].
pub fn read_hits_file<P: AsRef<Path>>(
    path: P,
    parser: &HitParser,
) -> Result<HitTable, ProbannoError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = parser.parse(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        queries = table.len(),
        hits = table.total_hits(),
        "read hit table"
    );
    Ok(table)
}
