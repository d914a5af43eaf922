//! The pruned combination enumerator.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use cohort_model::{Candidate, DimensionSubset, ModelError, Value};
use tracing::{debug, info, info_span, trace, warn};

use crate::combinatorics::{CartesianProduct, Combinations, search_space_size};
use crate::error::SearchError;
use crate::oracle::{ValidityOracle, Verdict};
use crate::store::{InvalidSubsetStore, ValueIdentity};

/// Shared flag a caller can raise to stop a running enumeration.
///
/// The flag is checked once per candidate. A cancelled run returns
/// [`SearchError::Cancelled`] and no results.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Options for an enumeration run.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// How values are compared for pruning.
    pub identity: ValueIdentity,
    /// Optional interruption signal.
    pub cancel: Option<CancelFlag>,
}

impl SearchOptions {
    #[must_use]
    pub fn with_identity(mut self, identity: ValueIdentity) -> Self {
        self.identity = identity;
        self
    }

    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }
}

/// Counters collected during one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidates passed to the oracle.
    pub evaluated: usize,
    pub accepted: usize,
    pub rejected: usize,
    /// Candidates skipped because they contain a rejected value-set.
    pub pruned: usize,
    /// Distinct value-sets in the invalid-subset store at the end of the run.
    pub invalid_sets: usize,
}

/// A valid candidate and the record its oracle attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted<R> {
    pub candidate: Candidate,
    pub record: Option<R>,
}

/// Valid candidates in generation order.
#[derive(Debug, Clone)]
pub struct Enumeration<R> {
    accepted: Vec<Accepted<R>>,
    stats: SearchStats,
}

impl<R> Default for Enumeration<R> {
    fn default() -> Self {
        Self {
            accepted: Vec::new(),
            stats: SearchStats::default(),
        }
    }
}

impl<R> Enumeration<R> {
    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn accepted(&self) -> &[Accepted<R>] {
        &self.accepted
    }

    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.accepted.iter().map(|entry| &entry.candidate)
    }

    /// Records of accepted candidates that carried one.
    pub fn records(&self) -> impl Iterator<Item = &R> {
        self.accepted.iter().filter_map(|entry| entry.record.as_ref())
    }

    pub fn into_records(self) -> Vec<R> {
        self.accepted
            .into_iter()
            .filter_map(|entry| entry.record)
            .collect()
    }

    pub fn into_accepted(self) -> Vec<Accepted<R>> {
        self.accepted
    }
}

/// Walks dimension subsets by increasing size and the cartesian product of
/// their domains, consulting the oracle for every candidate not pruned by a
/// previously rejected value-set.
#[derive(Debug, Clone, Default)]
pub struct Enumerator {
    options: SearchOptions,
}

impl Enumerator {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Runs one enumeration to completion.
    ///
    /// With no domains, or with any empty domain, nothing is constructible
    /// and the result is empty.
    ///
    /// # Errors
    ///
    /// Oracle failures are returned as [`SearchError::Oracle`], a raised
    /// cancel flag as [`SearchError::Cancelled`]. Either way the run is
    /// abandoned.
    pub fn run<D, O>(
        &self,
        domains: &[D],
        oracle: &mut O,
    ) -> Result<Enumeration<O::Record>, SearchError<O::Error>>
    where
        D: AsRef<[Value]>,
        O: ValidityOracle + ?Sized,
    {
        let dimension_count = domains.len();
        if dimension_count == 0 {
            debug!("no domains to enumerate");
            return Ok(Enumeration::default());
        }
        if let Some(index) = domains.iter().position(|domain| domain.as_ref().is_empty()) {
            warn!(dimension = index, "domain is empty, nothing to enumerate");
            return Ok(Enumeration::default());
        }

        let identity = self.options.identity;
        let span = info_span!(
            "enumerate",
            dimensions = dimension_count,
            identity = identity.as_str(),
            space = ?search_space_size(domains)
        );
        let _guard = span.enter();

        let mut store = InvalidSubsetStore::new();
        let mut accepted = Vec::new();
        let mut stats = SearchStats::default();

        for size in 1..=dimension_count {
            let level_start = stats;
            for subset in Combinations::new(dimension_count, size) {
                let selected: Vec<&[Value]> =
                    subset.iter().map(|&index| domains[index].as_ref()).collect();
                for values in CartesianProduct::new(&selected) {
                    self.check_cancelled(&stats)?;
                    if values.len() != subset.len() {
                        return Err(SearchError::InvariantViolation(ModelError::ArityMismatch {
                            values: values.len(),
                            dimensions: subset.len(),
                        }));
                    }

                    let value_set = identity.value_set(&values, &subset);
                    if store.prunes(&value_set) {
                        stats.pruned += 1;
                        trace!(?subset, ?values, "pruned");
                        continue;
                    }

                    let dimensions = DimensionSubset::from_sorted(&subset);
                    stats.evaluated += 1;
                    match oracle
                        .check(&values, &dimensions)
                        .map_err(SearchError::Oracle)?
                    {
                        Verdict::Accept(record) => {
                            stats.accepted += 1;
                            let candidate = Candidate::new(values, dimensions)
                                .map_err(SearchError::InvariantViolation)?;
                            accepted.push(Accepted { candidate, record });
                        }
                        Verdict::Reject => {
                            stats.rejected += 1;
                            debug!(?subset, ?values, "rejected");
                            store.insert(value_set);
                        }
                    }
                }
            }
            info!(
                size,
                accepted = stats.accepted - level_start.accepted,
                rejected = stats.rejected - level_start.rejected,
                pruned = stats.pruned - level_start.pruned,
                "finished size level"
            );
        }

        stats.invalid_sets = store.len();
        info!(
            evaluated = stats.evaluated,
            accepted = stats.accepted,
            pruned = stats.pruned,
            invalid_sets = stats.invalid_sets,
            "enumeration complete"
        );
        Ok(Enumeration { accepted, stats })
    }

    fn check_cancelled<E>(&self, stats: &SearchStats) -> Result<(), SearchError<E>>
    where
        E: std::error::Error + 'static,
    {
        match &self.options.cancel {
            Some(flag) if flag.is_cancelled() => {
                warn!(evaluated = stats.evaluated, "enumeration cancelled");
                Err(SearchError::Cancelled {
                    evaluated: stats.evaluated,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Runs an enumeration with default options.
pub fn enumerate<D, O>(
    domains: &[D],
    oracle: &mut O,
) -> Result<Enumeration<O::Record>, SearchError<O::Error>>
where
    D: AsRef<[Value]>,
    O: ValidityOracle + ?Sized,
{
    Enumerator::default().run(domains, oracle)
}
