use std::time::Instant;

use anyhow::{Context, Result};
use cohort_cli::config::RunConfig;
use cohort_cli::pipeline::{
    ExploreOptions, explore, prepare, render_reports, space_levels, write_reports,
};
use tracing::{info, info_span};

use crate::cli::{ExploreArgs, SourceArgs};
use crate::summary::{catalog_table, dimensions_table, search_table, space_table};

pub fn run_dimensions() -> Result<()> {
    println!("{}", dimensions_table());
    Ok(())
}

pub fn run_space(args: &SourceArgs) -> Result<()> {
    let config =
        RunConfig::resolve(args.config.as_deref(), args.overrides()).context("load config")?;
    let prepared = prepare(&config)?;
    println!("{}", catalog_table(&prepared.catalog));
    let (levels, total) = space_levels(&prepared.catalog);
    println!("{}", space_table(&levels, total));
    Ok(())
}

pub fn run_explore(args: &ExploreArgs) -> Result<()> {
    let config = RunConfig::resolve(args.source.config.as_deref(), args.overrides())
        .context("load config")?;
    let span = info_span!(
        "explore",
        sample_min = config.sample_min,
        identity = ?config.identity
    );
    let _guard = span.enter();
    let started = Instant::now();

    let prepared = prepare(&config)?;
    let options = ExploreOptions {
        skip_all_combinations: args.skip_all_combinations,
        progress: true,
        cancel: None,
    };
    let outcome = explore(&config, prepared, &options)?;
    let reports = render_reports(&outcome, config.sample_min);

    if let Some(text) = &reports.all_combinations {
        println!("{text}");
    }
    println!("{}", reports.valid_combinations);

    println!("{}", catalog_table(&outcome.catalog));
    let mut rows = Vec::new();
    if let Some(stats) = outcome.all_stats {
        rows.push(("All combinations", stats));
    }
    rows.push(("Sample size", outcome.valid_stats));
    println!("{}", search_table(&rows));

    if args.dry_run {
        println!("Dry run: reports not written.");
    } else {
        for path in write_reports(&reports, &config)? {
            println!("Wrote {}", path.display());
        }
    }
    info!(
        valid = outcome.valid.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "explore complete"
    );
    Ok(())
}
