//! Report sink for cohort exploration results.
//!
//! Both reports are plain-text grid tables, printed to the console and
//! written to files named after the sample threshold they were produced
//! with.

mod error;
mod render;
mod writer;

pub use error::{ReportError, Result};
pub use render::{
    ALL_COMBINATIONS_HEADER, render_all_combinations, render_valid_combinations, valid_headers,
};
pub use writer::{ReportPaths, write_report};
