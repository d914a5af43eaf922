//! Combination search engine.
//!
//! Given one value domain per dimension, the [`Enumerator`] walks every
//! subset of dimensions (smallest subsets first, lexicographic within a
//! size) and every cartesian product of the selected domains, asking a
//! [`ValidityOracle`] whether each candidate is acceptable.
//!
//! Rejected value-sets are remembered in an [`InvalidSubsetStore`]; any later
//! candidate whose value-set contains a remembered one is skipped without
//! consulting the oracle. This is only sound when the oracle is
//! anti-monotone: a value-set that fails must make every superset fail too.
//! Sample-size thresholds over conjunctive filters have that property. The
//! engine does not check it.
//!
//! # Example
//!
//! ```
//! use cohort_model::Value;
//! use cohort_search::{PredicateOracle, enumerate};
//!
//! let domains = vec![
//!     vec![Value::Integer(1), Value::Integer(2)],
//!     vec![Value::Integer(3), Value::Integer(4)],
//! ];
//! let mut oracle = PredicateOracle::new(|values, _| {
//!     !(values.contains(&Value::Integer(1)) && values.contains(&Value::Integer(3)))
//! });
//! let result = enumerate(&domains, &mut oracle).unwrap();
//!
//! // 4 singletons + 3 of the 4 pairs.
//! assert_eq!(result.len(), 7);
//! ```

pub mod catalog;
pub mod combinatorics;
pub mod enumerator;
pub mod error;
pub mod oracle;
pub mod predicate;
pub mod store;

pub use catalog::{CatalogError, DomainCatalog, DomainEntry};
pub use combinatorics::{CartesianProduct, Combinations, level_size, search_space_size};
pub use enumerator::{
    Accepted, CancelFlag, Enumeration, Enumerator, SearchOptions, SearchStats, enumerate,
};
pub use error::SearchError;
pub use oracle::{PredicateOracle, Unconditional, ValidityOracle, Verdict};
pub use predicate::{DimensionNames, FormatError, build_query, describe, format_clause};
pub use store::{InvalidSubsetStore, PruningKey, ValueIdentity, ValueSet};
