//! Externally supplied, read-only reference annotation tables.
//!
//! A run needs four tables:
//!
//! - target gene -> roles (collapsed into a [`RolesetKey`] per target)
//! - the universe of roles known to the reference set
//! - complex -> required roles (AND)
//! - reaction -> catalyzing complexes (OR)
//!
//! [`ReferenceData`] bundles them and is passed by reference into every stage.

pub mod io;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::types::{Role, RolesetKey};

pub use io::{parse_role_list, parse_table, read_role_list, read_table};

/// One-to-many mapping that keeps first-seen key order.
///
/// Inserting an existing key appends to its values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTable {
    entries: Vec<(String, Vec<String>)>,
    index: FxHashMap<String, usize>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K, I, V>(&mut self, key: K, values: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let key = key.into();
        let values = values.into_iter().map(Into::into);
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1.extend(values),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, values.collect()));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.index
            .get(key)
            .map(|&i| self.entries[i].1.as_slice())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn entries(&self) -> &[(String, Vec<String>)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, I, V> FromIterator<(K, I)> for ReferenceTable
where
    K: Into<String>,
    I: IntoIterator<Item = V>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (key, values) in iter {
            table.insert(key, values);
        }
        table
    }
}

/// All reference data consumed by one pipeline run.
///
/// # Examples
///
/// ```rust
/// use probanno_core::reference::{ReferenceData, ReferenceTable};
///
/// let targets: ReferenceTable = [("t1", vec!["R1"]), ("t2", vec!["R2", "R1"])]
///     .into_iter()
///     .collect();
/// let complexes: ReferenceTable = [("C1", vec!["R1", "R2"])].into_iter().collect();
/// let reactions: ReferenceTable = [("rxn1", vec!["C1"])].into_iter().collect();
///
/// let reference = ReferenceData::new(&targets, complexes, reactions);
/// assert!(reference.is_reference_role("R2"));
/// assert_eq!(reference.roleset_for("t2").unwrap().joined("/"), "R1/R2");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    target_rolesets: FxHashMap<String, RolesetKey>,
    reference_roles: FxHashSet<Role>,
    complexes: ReferenceTable,
    reactions: ReferenceTable,
}

impl ReferenceData {
    /// Build reference data from its tables.
    ///
    /// The role universe is the union of every target's roles; use
    /// [`ReferenceData::with_reference_roles`] to supply it explicitly.
    pub fn new(
        target_roles: &ReferenceTable,
        complexes: ReferenceTable,
        reactions: ReferenceTable,
    ) -> Self {
        let target_rolesets: FxHashMap<String, RolesetKey> = target_roles
            .iter()
            .map(|(target, roles)| {
                (
                    target.to_string(),
                    RolesetKey::from_roles(roles.iter().cloned()),
                )
            })
            .collect();
        let reference_roles = target_rolesets
            .values()
            .flat_map(|key| key.roles().iter().cloned())
            .collect();
        Self {
            target_rolesets,
            reference_roles,
            complexes,
            reactions,
        }
    }

    /// Replace the derived role universe with an explicit set.
    #[must_use]
    pub fn with_reference_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Role>,
    {
        self.reference_roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub fn roleset_for(&self, target_id: &str) -> Option<&RolesetKey> {
        self.target_rolesets.get(target_id)
    }

    pub fn is_reference_role(&self, role: &str) -> bool {
        self.reference_roles.contains(role)
    }

    pub fn complexes(&self) -> &ReferenceTable {
        &self.complexes
    }

    pub fn reactions(&self) -> &ReferenceTable {
        &self.reactions
    }

    pub fn target_count(&self) -> usize {
        self.target_rolesets.len()
    }

    pub fn reference_role_count(&self) -> usize {
        self.reference_roles.len()
    }
}
