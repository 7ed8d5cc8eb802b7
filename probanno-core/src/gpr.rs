//! Gene-protein-reaction (GPR) boolean associations.
//!
//! Stages build GPRs structurally and only render them to text at the
//! output boundary:
//!
//! ```text
//! role      ->  g1 | (g1 or g2)
//! complex   ->  ((g1 or g2) and g3)
//! reaction  ->  (((g1 or g2) and g3) or g4)
//! ```
//!
//! Multi-term nodes are always parenthesized; a single term is never wrapped.

use std::fmt;

/// Boolean association over gene identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Gpr {
    /// A single gene
    Gene(String),
    /// Every term is required
    All(Vec<Gpr>),
    /// Any term suffices
    Any(Vec<Gpr>),
}

impl Gpr {
    pub fn gene(id: impl Into<String>) -> Self {
        Self::Gene(id.into())
    }

    /// OR-combine `terms`, dropping repeats.
    ///
    /// Returns `None` when there are no terms and the term itself when only
    /// one remains after deduplication.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use probanno_core::gpr::Gpr;
    ///
    /// let gpr = Gpr::any([Gpr::gene("g1"), Gpr::gene("g2"), Gpr::gene("g1")]).unwrap();
    /// assert_eq!(gpr.to_string(), "(g1 or g2)");
    ///
    /// let single = Gpr::any([Gpr::gene("g1")]).unwrap();
    /// assert_eq!(single.to_string(), "g1");
    /// ```
    pub fn any<I: IntoIterator<Item = Gpr>>(terms: I) -> Option<Self> {
        collapse(dedup(terms), Self::Any)
    }

    /// AND-combine `terms`, dropping repeats.
    ///
    /// Same collapsing rules as [`Gpr::any`].
    pub fn all<I: IntoIterator<Item = Gpr>>(terms: I) -> Option<Self> {
        collapse(dedup(terms), Self::All)
    }
}

fn dedup<I: IntoIterator<Item = Gpr>>(terms: I) -> Vec<Gpr> {
    let mut unique: Vec<Gpr> = Vec::new();
    for term in terms {
        if !unique.contains(&term) {
            unique.push(term);
        }
    }
    unique
}

fn collapse(mut terms: Vec<Gpr>, node: fn(Vec<Gpr>) -> Gpr) -> Option<Gpr> {
    match terms.len() {
        0 => None,
        1 => terms.pop(),
        _ => Some(node(terms)),
    }
}

impl fmt::Display for Gpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (terms, joiner) = match self {
            Self::Gene(id) => return write!(f, "{id}"),
            Self::All(terms) => (terms, " and "),
            Self::Any(terms) => (terms, " or "),
        };
        write!(f, "(")?;
        for (i, term) in terms.iter().enumerate() {
            if i > 0 {
                write!(f, "{joiner}")?;
            }
            write!(f, "{term}")?;
        }
        write!(f, ")")
    }
}

/// Render an optional GPR, empty text standing for "no association".
#[must_use]
pub fn render(gpr: Option<&Gpr>) -> String {
    gpr.map(ToString::to_string).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genes(ids: &[&str]) -> Vec<Gpr> {
        ids.iter().map(|id| Gpr::gene(*id)).collect()
    }

    #[test]
    fn test_any_empty_is_none() {
        assert_eq!(Gpr::any(Vec::new()), None);
        assert_eq!(Gpr::all(Vec::new()), None);
        assert_eq!(render(None), "");
    }

    #[test]
    fn test_single_term_not_wrapped() {
        let gpr = Gpr::all(genes(&["g1", "g1"])).unwrap();
        assert_eq!(gpr, Gpr::gene("g1"));
        assert_eq!(gpr.to_string(), "g1");
    }

    #[test]
    fn test_nested_rendering() {
        let role_a = Gpr::any(genes(&["g1", "g2"])).unwrap();
        let role_b = Gpr::gene("g3");
        let complex = Gpr::all([role_a, role_b]).unwrap();
        assert_eq!(complex.to_string(), "((g1 or g2) and g3)");

        let reaction = Gpr::any([complex, Gpr::gene("g4")]).unwrap();
        assert_eq!(reaction.to_string(), "(((g1 or g2) and g3) or g4)");
    }

    #[test]
    fn test_structural_dedup_of_subexpressions() {
        let first = Gpr::any(genes(&["g1", "g2"])).unwrap();
        let second = Gpr::any(genes(&["g1", "g2"])).unwrap();
        let combined = Gpr::all([first.clone(), second]).unwrap();
        assert_eq!(combined, first);
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let gpr = Gpr::any(genes(&["g3", "g1", "g3", "g2"])).unwrap();
        assert_eq!(gpr.to_string(), "(g3 or g1 or g2)");
    }
}
