//! Library half of the `cohort` binary: run configuration, logging setup,
//! and the explore pipeline.

pub mod config;
pub mod logging;
pub mod pipeline;
