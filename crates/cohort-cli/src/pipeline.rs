//! The explore pipeline: ingest, enumerate twice, render, write.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use cohort_ingest::{
    CohortStatistic, SampleSignificanceOracle, add_mortality_rate, join_tables,
    make_distinct_value_dict, make_rows_per_distinct_value_dict, read_table, select_dimensions,
    trim_domains,
};
use cohort_model::{DimensionSubset, Value};
use cohort_report::{ReportPaths, render_all_combinations, render_valid_combinations, write_report};
use cohort_search::{
    CancelFlag, DomainCatalog, Enumerator, SearchOptions, SearchStats, Unconditional,
    ValidityOracle, Verdict, describe, level_size, search_space_size,
};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use crate::config::RunConfig;

/// The joined table and the trimmed catalog derived from it.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub table: DataFrame,
    pub catalog: DomainCatalog,
}

/// Loads both tables and derives the domain catalog.
pub fn prepare(config: &RunConfig) -> Result<Prepared> {
    let span = info_span!(
        "ingest",
        women = %config.women_csv.display(),
        household = %config.household_csv.display()
    );
    let _guard = span.enter();

    let women = read_table(&config.women_csv).context("load women table")?;
    let household = read_table(&config.household_csv).context("load household table")?;
    let joined = join_tables(&women, &household).context("join tables")?;
    let table = add_mortality_rate(&joined).context("derive mortality rate")?;

    let distinct = make_distinct_value_dict(&table).context("collect distinct values")?;
    let distinct =
        select_dimensions(&distinct, &config.dimensions).context("select dimensions")?;
    let counts =
        make_rows_per_distinct_value_dict(&table, &distinct).context("count rows per value")?;
    let catalog =
        trim_domains(&distinct, &counts, config.sample_min).context("trim domains")?;

    info!(
        rows = table.height(),
        dimensions = catalog.len(),
        "ingest complete"
    );
    Ok(Prepared { table, catalog })
}

/// Search-space size per subset size, plus the total.
pub fn space_levels(catalog: &DomainCatalog) -> (Vec<(usize, Option<u128>)>, Option<u128>) {
    let domains = catalog.domains();
    let levels = (1..=domains.len())
        .map(|size| (size, level_size(domains, size)))
        .collect();
    (levels, search_space_size(domains))
}

#[derive(Debug, Clone, Default)]
pub struct ExploreOptions {
    pub skip_all_combinations: bool,
    /// Show a spinner on stderr when it is a terminal.
    pub progress: bool,
    pub cancel: Option<CancelFlag>,
}

#[derive(Debug, Clone)]
pub struct ExploreOutcome {
    pub catalog: DomainCatalog,
    /// Conditions of every combination, unless skipped.
    pub all_combinations: Option<Vec<String>>,
    pub all_stats: Option<SearchStats>,
    pub valid: Vec<CohortStatistic>,
    pub valid_stats: SearchStats,
}

/// Runs the unconditional and the sample-significance enumerations.
pub fn explore(
    config: &RunConfig,
    prepared: Prepared,
    options: &ExploreOptions,
) -> Result<ExploreOutcome> {
    let Prepared { table, catalog } = prepared;
    let mut search = SearchOptions::default().with_identity(config.identity.into());
    if let Some(flag) = &options.cancel {
        search = search.with_cancel_flag(flag.clone());
    }
    let enumerator = Enumerator::new(search);

    let (all_combinations, all_stats) = if options.skip_all_combinations {
        (None, None)
    } else {
        let mut oracle = ProgressOracle::new(Unconditional, spinner(options.progress, "listing"));
        let result = enumerator
            .run(catalog.domains(), &mut oracle)
            .context("enumerate all combinations")?;
        oracle.finish();
        let conditions = result
            .candidates()
            .map(|candidate| describe(candidate, &catalog))
            .collect::<Result<Vec<_>, _>>()
            .context("format combinations")?;
        (Some(conditions), Some(result.stats()))
    };

    let oracle = SampleSignificanceOracle::new(table, &catalog, config.sample_min)
        .context("prepare sample oracle")?;
    let mut oracle = ProgressOracle::new(oracle, spinner(options.progress, "evaluating"));
    let result = enumerator
        .run(catalog.domains(), &mut oracle)
        .context("enumerate significant combinations")?;
    oracle.finish();
    let valid_stats = result.stats();

    Ok(ExploreOutcome {
        catalog,
        all_combinations,
        all_stats,
        valid: result.into_records(),
        valid_stats,
    })
}

/// Rendered report texts.
#[derive(Debug, Clone)]
pub struct Reports {
    pub all_combinations: Option<String>,
    pub valid_combinations: String,
}

pub fn render_reports(outcome: &ExploreOutcome, sample_min: usize) -> Reports {
    Reports {
        all_combinations: outcome
            .all_combinations
            .as_deref()
            .map(render_all_combinations),
        valid_combinations: render_valid_combinations(&outcome.valid, sample_min),
    }
}

/// Writes the rendered reports and returns the paths written.
pub fn write_reports(reports: &Reports, config: &RunConfig) -> Result<Vec<PathBuf>> {
    let paths = ReportPaths::for_threshold(&config.output_dir, config.sample_min);
    let mut written = Vec::new();
    if let Some(text) = &reports.all_combinations {
        write_report(&paths.all_combinations, text)?;
        written.push(paths.all_combinations);
    }
    write_report(&paths.valid_combinations, &reports.valid_combinations)?;
    written.push(paths.valid_combinations);
    Ok(written)
}

fn spinner(enabled: bool, message: &'static str) -> ProgressBar {
    if !enabled || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner().with_message(message);
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}: {pos} checked [{elapsed}]") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// Counts oracle calls on a progress bar.
struct ProgressOracle<O> {
    inner: O,
    bar: ProgressBar,
}

impl<O> ProgressOracle<O> {
    fn new(inner: O, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl<O: ValidityOracle> ValidityOracle for ProgressOracle<O> {
    type Record = O::Record;
    type Error = O::Error;

    fn check(
        &mut self,
        values: &[Value],
        dimensions: &DimensionSubset,
    ) -> Result<Verdict<O::Record>, O::Error> {
        self.bar.inc(1);
        self.inner.check(values, dimensions)
    }
}
