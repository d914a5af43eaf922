//! Validity oracle contract.
//!
//! The engine asks an oracle about each candidate that survived pruning. An
//! oracle may carry state (counters, a table handle) and may produce a record
//! for each accepted candidate; records travel back through [`Verdict`]
//! instead of being pushed into shared state.
//!
//! Oracles must be anti-monotone over value-sets for pruning to be sound.

use std::convert::Infallible;

use cohort_model::{DimensionSubset, Value};

/// Outcome of one oracle call.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict<R> {
    /// The candidate is valid, optionally with a record describing it.
    Accept(Option<R>),
    /// The candidate is invalid; its supersets will be pruned.
    Reject,
}

impl<R> Verdict<R> {
    pub fn accept() -> Self {
        Verdict::Accept(None)
    }

    pub fn accept_with(record: R) -> Self {
        Verdict::Accept(Some(record))
    }

    pub fn from_bool(valid: bool) -> Self {
        if valid { Verdict::Accept(None) } else { Verdict::Reject }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept(_))
    }
}

/// Decides whether a candidate `(values, dimensions)` is valid.
///
/// `values[i]` was drawn from the domain of dimension `dimensions[i]`; both
/// slices always have the same length. Errors abort the enumeration and are
/// returned to the caller unchanged.
pub trait ValidityOracle {
    /// Record attached to accepted candidates.
    type Record;
    type Error: std::error::Error + Send + Sync + 'static;

    fn check(
        &mut self,
        values: &[Value],
        dimensions: &DimensionSubset,
    ) -> Result<Verdict<Self::Record>, Self::Error>;
}

impl<O: ValidityOracle + ?Sized> ValidityOracle for &mut O {
    type Record = O::Record;
    type Error = O::Error;

    fn check(
        &mut self,
        values: &[Value],
        dimensions: &DimensionSubset,
    ) -> Result<Verdict<Self::Record>, Self::Error> {
        (**self).check(values, dimensions)
    }
}

/// Accepts every candidate; enumerates the whole search space.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unconditional;

impl ValidityOracle for Unconditional {
    type Record = ();
    type Error = Infallible;

    fn check(&mut self, _: &[Value], _: &DimensionSubset) -> Result<Verdict<()>, Infallible> {
        Ok(Verdict::accept())
    }
}

/// Adapts an infallible boolean predicate.
pub struct PredicateOracle<F> {
    predicate: F,
}

impl<F> PredicateOracle<F>
where
    F: FnMut(&[Value], &DimensionSubset) -> bool,
{
    pub fn new(predicate: F) -> Self {
        Self { predicate }
    }
}

impl<F> ValidityOracle for PredicateOracle<F>
where
    F: FnMut(&[Value], &DimensionSubset) -> bool,
{
    type Record = ();
    type Error = Infallible;

    fn check(
        &mut self,
        values: &[Value],
        dimensions: &DimensionSubset,
    ) -> Result<Verdict<()>, Infallible> {
        Ok(Verdict::from_bool((self.predicate)(values, dimensions)))
    }
}
