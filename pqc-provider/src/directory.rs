//! Name → parameter-set directory, built once and shared read-only.

use std::collections::BTreeMap;

use crate::params::{AlgorithmFamily, ParameterSet};

/// Immutable lookup table from lower-case name to [`ParameterSet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlgorithmDirectory {
    entries: BTreeMap<&'static str, ParameterSet>,
}

impl AlgorithmDirectory {
    /// Directory holding every registered parameter set.
    pub fn standard() -> Self {
        Self::with_sets(ParameterSet::ALL)
    }

    /// Directory restricted to `sets`.
    pub fn with_sets(sets: impl IntoIterator<Item = ParameterSet>) -> Self {
        Self {
            entries: sets.into_iter().map(|set| (set.name(), set)).collect(),
        }
    }

    /// Case-insensitive lookup; `None` means not found.
    pub fn resolve(&self, name: &str) -> Option<ParameterSet> {
        self.entries.get(name.to_ascii_lowercase().as_str()).copied()
    }

    /// Lookup restricted to one family.
    pub fn resolve_in(&self, family: AlgorithmFamily, name: &str) -> Option<ParameterSet> {
        self.resolve(name).filter(|set| set.family() == family)
    }

    pub fn contains(&self, set: ParameterSet) -> bool {
        self.entries.contains_key(set.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = ParameterSet> + '_ {
        self.entries.values().copied()
    }

    pub fn family(&self, family: AlgorithmFamily) -> impl Iterator<Item = ParameterSet> + '_ {
        self.iter().filter(move |set| set.family() == family)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AlgorithmDirectory {
    fn default() -> Self {
        Self::standard()
    }
}
