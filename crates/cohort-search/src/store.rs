//! Remembered invalid value-sets used to prune supersets.

use std::collections::HashSet;

use cohort_model::Value;

/// How values are identified when comparing value-sets.
///
/// With [`ValueIdentity::DimensionTagged`] every value carries the index of
/// the dimension it was drawn from, so the literal `1` in one domain never
/// matches the literal `1` in another. [`ValueIdentity::Raw`] compares bare
/// values; a rejection involving `1` from one dimension then also prunes
/// candidates that take `1` from a different dimension.
///
/// Raw identity is still typed: `Integer(1)` and `Float(1.0)` are different
/// values and never prune each other, and there is no boolean variant to
/// fold into `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ValueIdentity {
    #[default]
    DimensionTagged,
    Raw,
}

impl ValueIdentity {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueIdentity::DimensionTagged => "tagged",
            ValueIdentity::Raw => "raw",
        }
    }

    /// Canonical value-set of a value tuple drawn from `dimensions`.
    pub fn value_set(self, values: &[Value], dimensions: &[usize]) -> ValueSet {
        let keys = values
            .iter()
            .zip(dimensions)
            .map(|(value, &dimension)| PruningKey {
                dimension: match self {
                    ValueIdentity::DimensionTagged => Some(dimension),
                    ValueIdentity::Raw => None,
                },
                value: value.clone(),
            })
            .collect();
        ValueSet::from_keys(keys)
    }
}

/// One element of a value-set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PruningKey {
    pub dimension: Option<usize>,
    pub value: Value,
}

/// Sorted, de-duplicated set of pruning keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValueSet(Vec<PruningKey>);

impl ValueSet {
    pub fn from_keys(mut keys: Vec<PruningKey>) -> Self {
        keys.sort_unstable();
        keys.dedup();
        Self(keys)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> &[PruningKey] {
        &self.0
    }

    /// Merge walk over both sorted key lists.
    pub fn is_subset_of(&self, other: &ValueSet) -> bool {
        if self.len() > other.len() {
            return false;
        }
        let mut theirs = other.0.iter();
        'outer: for key in &self.0 {
            for candidate in theirs.by_ref() {
                match candidate.cmp(key) {
                    std::cmp::Ordering::Less => continue,
                    std::cmp::Ordering::Equal => continue 'outer,
                    std::cmp::Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }

    /// Subset selected by the bits of `mask`; bit `i` selects key `i`.
    fn masked(&self, mask: u64) -> ValueSet {
        let keys = self
            .0
            .iter()
            .enumerate()
            .filter(|(position, _)| mask & (1 << position) != 0)
            .map(|(_, key)| key.clone())
            .collect();
        // Already sorted and unique.
        ValueSet(keys)
    }
}

/// Largest candidate for which probing every subset is considered.
const MAX_PROBE_WIDTH: usize = 20;

/// Value-sets rejected by the oracle during one enumeration run.
///
/// The store only grows. A candidate is pruned when some stored set is a
/// subset of its value-set.
#[derive(Debug, Default)]
pub struct InvalidSubsetStore {
    sets: HashSet<ValueSet>,
}

impl InvalidSubsetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remembers `set`; returns false if it was already stored.
    pub fn insert(&mut self, set: ValueSet) -> bool {
        self.sets.insert(set)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn contains(&self, set: &ValueSet) -> bool {
        self.sets.contains(set)
    }

    /// Returns true when a stored set is contained in `candidate`.
    ///
    /// Candidates are narrow (one key per dimension) while the store can
    /// hold thousands of sets, so when `2^width` is smaller than the store
    /// every subset of the candidate is probed instead of scanning.
    pub fn prunes(&self, candidate: &ValueSet) -> bool {
        if self.sets.is_empty() || candidate.is_empty() {
            return false;
        }
        let width = candidate.len();
        if width <= MAX_PROBE_WIDTH && (1usize << width) <= self.sets.len() {
            let full = (1u64 << width) - 1;
            (1..=full).any(|mask| self.sets.contains(&candidate.masked(mask)))
        } else {
            self.sets.iter().any(|stored| stored.is_subset_of(candidate))
        }
    }
}
