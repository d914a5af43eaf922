//! Data model shared by the cohort exploration crates.
//!
//! The model is deliberately small: a scalar [`Value`] that can be ordered
//! and hashed across domains, the [`DimensionSubset`] / [`Candidate`] pair
//! the search engine produces, and the closed sets of survey column names
//! ([`Dimension`], [`KeyColumn`]) that configuration is checked against.

pub mod candidate;
pub mod dimension;
pub mod error;
pub mod value;

pub use candidate::{Candidate, DimensionSubset};
pub use dimension::{Dimension, KeyColumn, MORTALITY_RATE_COLUMN};
pub use error::{ModelError, Result};
pub use value::Value;
