//! Tabular similarity-search hit parsing.
//!
//! Consumes BLAST-style `-outfmt 6` records: whitespace-separated, at least
//! eleven columns, of which only the query id (column 0), the target id
//! (column 1) and the e-value (column 10) are read. Each e-value becomes a
//! score `-log10(clamp(evalue, min_evalue, max_evalue))`.

pub mod io;

use std::io::BufRead;

use rustc_hash::FxHashMap;

use crate::config::{PipelineConfig, check_evalue_bounds};
use crate::constants::{
    DEFAULT_MAX_EVALUE, DEFAULT_MIN_EVALUE, EVALUE_FIELD, MIN_HIT_FIELDS, QUERY_FIELD,
    TARGET_FIELD,
};
use crate::types::{ProbannoError, SearchHit};

pub use io::read_hits_file;

/// Convert an e-value into a non-negative score.
///
/// E-values above `max_evalue` and anything scoring below zero map to `0.0`.
///
/// ```rust
/// use probanno_core::hits::score_from_evalue;
///
/// assert!((score_from_evalue(1e-20, 1e-200, 1.0) - 20.0).abs() < 1e-9);
/// assert!((score_from_evalue(0.0, 1e-200, 1.0) - 200.0).abs() < 1e-9);
/// assert_eq!(score_from_evalue(5.0, 1e-200, 1.0), 0.0);
/// ```
#[must_use]
pub fn score_from_evalue(evalue: f64, min_evalue: f64, max_evalue: f64) -> f64 {
    let score = -evalue.max(min_evalue).min(max_evalue).log10();
    if score > 0.0 { score } else { 0.0 }
}

/// All hits of one query gene, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryHits {
    pub query_id: String,
    pub hits: Vec<SearchHit>,
}

impl QueryHits {
    /// Best score over every hit, or `0.0` without hits.
    #[must_use]
    pub fn max_score(&self) -> f64 {
        self.hits.iter().map(|hit| hit.score).fold(0.0, f64::max)
    }
}

/// Hits grouped by query gene, preserving first-seen query order.
#[derive(Debug, Clone, Default)]
pub struct HitTable {
    queries: Vec<QueryHits>,
    index: FxHashMap<String, usize>,
}

impl HitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hit to its query's list.
    pub fn push(&mut self, hit: SearchHit) {
        match self.index.get(&hit.query_id) {
            Some(&i) => self.queries[i].hits.push(hit),
            None => {
                self.index.insert(hit.query_id.clone(), self.queries.len());
                self.queries.push(QueryHits {
                    query_id: hit.query_id.clone(),
                    hits: vec![hit],
                });
            }
        }
    }

    pub fn get(&self, query_id: &str) -> Option<&QueryHits> {
        self.index.get(query_id).map(|&i| &self.queries[i])
    }

    pub fn queries(&self) -> &[QueryHits] {
        &self.queries
    }

    /// Number of distinct query genes.
    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }

    pub fn total_hits(&self) -> usize {
        self.queries.iter().map(|query| query.hits.len()).sum()
    }
}

impl FromIterator<SearchHit> for HitTable {
    fn from_iter<T: IntoIterator<Item = SearchHit>>(iter: T) -> Self {
        let mut table = Self::new();
        for hit in iter {
            table.push(hit);
        }
        table
    }
}

/// Parser for tabular hit records.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitParser {
    min_evalue: f64,
    max_evalue: f64,
}

impl Default for HitParser {
    fn default() -> Self {
        Self {
            min_evalue: DEFAULT_MIN_EVALUE,
            max_evalue: DEFAULT_MAX_EVALUE,
        }
    }
}

impl HitParser {
    /// Parser clamping e-values to `[min_evalue, max_evalue]`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbannoError::InvalidConfig`] unless
    /// `0 < min_evalue <= max_evalue <= 1`.
    pub fn new(min_evalue: f64, max_evalue: f64) -> Result<Self, ProbannoError> {
        check_evalue_bounds(min_evalue, max_evalue)?;
        Ok(Self {
            min_evalue,
            max_evalue,
        })
    }

    /// Parser using the e-value bounds of `config`.
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ProbannoError> {
        Self::new(config.min_evalue, config.max_evalue)
    }

    pub fn min_evalue(&self) -> f64 {
        self.min_evalue
    }

    pub fn max_evalue(&self) -> f64 {
        self.max_evalue
    }

    /// Parse one record.
    ///
    /// Blank lines and `#` comment lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbannoError::MalformedInput`] when the record has fewer than
    /// eleven fields or its e-value is not a finite non-negative number.
    pub fn parse_record(
        &self,
        record: &str,
        line: usize,
    ) -> Result<Option<SearchHit>, ProbannoError> {
        let trimmed = record.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let malformed = |reason: String| ProbannoError::MalformedInput {
            line,
            record: record.to_string(),
            reason,
        };

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < MIN_HIT_FIELDS {
            return Err(malformed(format!(
                "expected at least {MIN_HIT_FIELDS} fields, found {}",
                fields.len()
            )));
        }

        let raw_evalue = fields[EVALUE_FIELD];
        let evalue: f64 = raw_evalue
            .parse()
            .map_err(|_| malformed(format!("non-numeric e-value {raw_evalue:?}")))?;
        if !evalue.is_finite() || evalue < 0.0 {
            return Err(malformed(format!("e-value out of range: {raw_evalue}")));
        }

        Ok(Some(SearchHit {
            query_id: fields[QUERY_FIELD].to_string(),
            target_id: fields[TARGET_FIELD].to_string(),
            score: score_from_evalue(evalue, self.min_evalue, self.max_evalue),
        }))
    }

    /// Parse every record from `reader`, stopping at the first malformed one.
    pub fn parse<R: BufRead>(&self, reader: R) -> Result<HitTable, ProbannoError> {
        let mut table = HitTable::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(hit) = self.parse_record(&line, i + 1)? {
                table.push(hit);
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn record(query: &str, target: &str, evalue: &str) -> String {
        format!("{query}\t{target}\t98.5\t300\t2\t0\t1\t300\t1\t300\t{evalue}\t550")
    }

    #[test]
    fn test_score_from_evalue_floor_and_ceiling() {
        assert!((score_from_evalue(0.0, 1e-200, 1.0) - 200.0).abs() < 1e-9);
        assert!((score_from_evalue(1e-300, 1e-200, 1.0) - 200.0).abs() < 1e-9);
        assert_eq!(score_from_evalue(10.0, 1e-200, 1.0), 0.0);
        assert!(score_from_evalue(1.0, 1e-200, 1.0).is_sign_positive());
        assert!((score_from_evalue(1e-5, 1e-200, 1.0) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_never_rises_with_evalue() {
        let evalues = [0.0, 1e-100, 1e-5, 0.2, 1.0, 5.0, 1e6];
        let scores: Vec<f64> = evalues
            .iter()
            .map(|&e| score_from_evalue(e, 1e-200, 1.0))
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
        assert!(scores.iter().all(|s| *s >= 0.0 && s.is_sign_positive()));
        assert!(score_from_evalue(5.0, 1e-200, 1.0) < score_from_evalue(0.2, 1e-200, 1.0));
    }

    #[test]
    fn test_score_with_ceiling_above_one_is_not_negative() {
        assert_eq!(score_from_evalue(5.0, 1e-200, 10.0), 0.0);
    }

    #[test]
    fn test_parser_rejects_unusable_bounds() {
        for (min_evalue, max_evalue) in [
            (2.0, 1.0),
            (1e-200, 10.0),
            (0.0, 1.0),
            (f64::NAN, 1.0),
            (1e-10, f64::NAN),
            (1e-5, 1e-10),
        ] {
            let result = HitParser::new(min_evalue, max_evalue);
            assert!(
                matches!(result, Err(ProbannoError::InvalidConfig(_))),
                "({min_evalue}, {max_evalue}) accepted"
            );
        }
    }

    #[test]
    fn test_parser_from_invalid_config() {
        let config = PipelineConfig {
            min_evalue: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            HitParser::from_config(&config),
            Err(ProbannoError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_parse_record_basic() {
        let parser = HitParser::default();
        let hit = parser
            .parse_record(&record("g1", "t1", "1e-20"), 1)
            .unwrap()
            .unwrap();
        assert_eq!(hit.query_id, "g1");
        assert_eq!(hit.target_id, "t1");
        assert!((hit.score - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_record_too_few_fields() {
        let parser = HitParser::default();
        let result = parser.parse_record("g1\tt1\t1e-5", 3);
        match result {
            Err(ProbannoError::MalformedInput { line, record, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(record, "g1\tt1\t1e-5");
            }
            other => panic!("Expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_record_non_numeric_evalue() {
        let parser = HitParser::default();
        let result = parser.parse_record(&record("g1", "t1", "abc"), 1);
        assert!(matches!(result, Err(ProbannoError::MalformedInput { .. })));
    }

    #[test]
    fn test_parse_record_rejects_nan_and_negative() {
        let parser = HitParser::default();
        for evalue in ["NaN", "inf", "-1e-5"] {
            let result = parser.parse_record(&record("g1", "t1", evalue), 1);
            assert!(result.is_err(), "{evalue} accepted");
        }
    }

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let input = format!(
            "# BLASTP 2.14.0+\n\n{}\n# Fields: query id\n{}\n",
            record("g1", "t1", "1e-10"),
            record("g2", "t2", "1e-3")
        );
        let table = HitParser::default().parse(Cursor::new(input)).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.total_hits(), 2);
    }

    #[test]
    fn test_parse_groups_by_query_preserving_order() {
        let input = [
            record("g2", "t1", "1e-10"),
            record("g1", "t2", "1e-20"),
            record("g2", "t3", "1e-30"),
        ]
        .join("\n");
        let table = HitParser::default().parse(Cursor::new(input)).unwrap();
        let ids: Vec<&str> = table.queries().iter().map(|q| q.query_id.as_str()).collect();
        assert_eq!(ids, vec!["g2", "g1"]);

        let g2 = table.get("g2").unwrap();
        let targets: Vec<&str> = g2.hits.iter().map(|h| h.target_id.as_str()).collect();
        assert_eq!(targets, vec!["t1", "t3"]);
        assert!((g2.max_score() - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_reports_offending_line_number() {
        let input = format!("{}\nbroken line\n", record("g1", "t1", "1e-10"));
        let err = HitParser::default().parse(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, ProbannoError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_space_separated_fields_accepted() {
        let line = record("g1", "t1", "1e-10").replace('\t', "  ");
        let hit = HitParser::default().parse_record(&line, 1).unwrap();
        assert!(hit.is_some());
    }

    #[test]
    fn test_custom_floor() {
        let parser = HitParser::new(1e-50, 1.0).unwrap();
        assert_eq!(parser.min_evalue(), 1e-50);
        let hit = parser
            .parse_record(&record("g1", "t1", "0.0"), 1)
            .unwrap()
            .unwrap();
        assert!((hit.score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_score_of_empty_query_is_zero() {
        let query = QueryHits {
            query_id: "g1".to_string(),
            hits: Vec::new(),
        };
        assert_eq!(query.max_score(), 0.0);
    }
}
