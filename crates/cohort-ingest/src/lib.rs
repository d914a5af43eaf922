//! Survey table ingestion for cohort exploration.
//!
//! Loads the women and household CSV files into polars DataFrames, joins
//! them, derives the per-row mortality rate, and turns the explored columns
//! into a trimmed [`cohort_search::DomainCatalog`]. The
//! [`SampleSignificanceOracle`] evaluates candidates against the joined
//! table.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cohort_ingest::*;
//! use cohort_model::Dimension;
//!
//! let women = read_table(Path::new("data/women.csv"))?;
//! let household = read_table(Path::new("data/household.csv"))?;
//! let joined = add_mortality_rate(&join_tables(&women, &household)?)?;
//!
//! let distinct = select_dimensions(&make_distinct_value_dict(&joined)?, &Dimension::ALL)?;
//! let counts = make_rows_per_distinct_value_dict(&joined, &distinct)?;
//! let catalog = trim_domains(&distinct, &counts, 2000)?;
//! let oracle = SampleSignificanceOracle::new(joined, &catalog, 2000)?;
//! ```

mod domains;
mod error;
mod filter;
mod oracle;
mod table;
mod values;

// === Error Types ===
pub use error::{IngestError, Result};

// === Tables ===
pub use table::{add_mortality_rate, join_tables, read_table};

// === Domains ===
pub use domains::{
    DistinctValues, ValueCounts, make_distinct_value_dict, make_rows_per_distinct_value_dict,
    select_dimensions, trim_domains,
};

// === Filtering ===
pub use filter::{build_filter, filter_table};
pub use oracle::{CohortStatistic, SampleSignificanceOracle, round_rate};
pub use values::{any_to_value, value_to_lit};
