//! Local tab-delimited reference table files.
//!
//! Two-column tables hold `key \t value1<sep>value2...` per line, the layout
//! of the target-role, complex-role and reaction-complex data files. Role
//! universe files hold one role per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::reference::ReferenceTable;
use crate::types::ProbannoError;

fn is_skippable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Parse a two-column table from `reader`.
///
/// `origin` names the source in error messages. Empty value fragments are
/// dropped; repeated keys append their values. Columns past the second are
/// ignored.
///
/// # Errors
///
/// Returns [`ProbannoError::InvalidReference`] for a row without a tab, with
/// an empty key, or without any value.
pub fn parse_table<R: BufRead>(
    reader: R,
    separator: &str,
    origin: &str,
) -> Result<ReferenceTable, ProbannoError> {
    let mut table = ReferenceTable::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if is_skippable(&line) {
            continue;
        }
        let invalid = |reason: &str| ProbannoError::InvalidReference {
            origin: origin.to_string(),
            line: i + 1,
            reason: reason.to_string(),
        };

        let line = line.trim_end_matches(['\r', '\n']);
        let mut columns = line.split('\t');
        let key = columns.next().unwrap_or_default();
        let values = columns
            .next()
            .ok_or_else(|| invalid("expected two tab-separated columns"))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(invalid("empty key"));
        }
        let values: Vec<&str> = values
            .split(separator)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .collect();
        if values.is_empty() {
            return Err(invalid("no values"));
        }
        table.insert(key, values);
    }
    Ok(table)
}

/// Read a two-column table file.
pub fn read_table<P: AsRef<Path>>(
    path: P,
    separator: &str,
) -> Result<ReferenceTable, ProbannoError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let table = parse_table(
        BufReader::new(file),
        separator,
        &path.display().to_string(),
    )?;
    debug!(path = %path.display(), entries = table.len(), "read reference table");
    Ok(table)
}

/// Parse a one-role-per-line list.
pub fn parse_role_list<R: BufRead>(reader: R) -> Result<Vec<String>, ProbannoError> {
    let mut roles = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if is_skippable(&line) {
            continue;
        }
        roles.push(line.trim().to_string());
    }
    Ok(roles)
}

/// Read a role universe file.
pub fn read_role_list<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ProbannoError> {
    let file = File::open(path.as_ref())?;
    parse_role_list(BufReader::new(file))
}
