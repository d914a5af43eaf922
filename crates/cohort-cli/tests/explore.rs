//! Explore pipeline against small CSV fixtures.

use std::fs;
use std::path::Path;

use cohort_cli::config::{ConfigError, ConfigOverrides, IdentityMode, RunConfig};
use cohort_cli::pipeline::{
    ExploreOptions, explore, prepare, render_reports, space_levels, write_reports,
};
use cohort_model::Dimension;
use cohort_search::CancelFlag;
use tempfile::TempDir;

const WOMEN: &str = "\
Cluster number,Household number,Total children ever born,Sons who have died,Daughters who have died
1,1,2,1,0
1,1,4,0,1
1,2,0,0,0
2,1,2,0,0
2,2,1,1,0
3,9,2,0,0
";

const HOUSEHOLD: &str = "\
Cluster number,Household number,Type of place of residence,Has electricity
1,1,Urban,1
1,2,Urban,0
2,1,Rural,0
2,2,Rural,1
";

fn fixture_config(dir: &Path) -> RunConfig {
    let women = dir.join("women.csv");
    let household = dir.join("household.csv");
    fs::write(&women, WOMEN).unwrap();
    fs::write(&household, HOUSEHOLD).unwrap();
    RunConfig {
        sample_min: 2,
        women_csv: women,
        household_csv: household,
        output_dir: dir.join("output"),
        dimensions: vec![Dimension::TypeOfPlaceOfResidence, Dimension::HasElectricity],
        identity: IdentityMode::Tagged,
    }
}

#[test]
fn explore_writes_both_reports() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(dir.path());

    let prepared = prepare(&config).expect("prepare");
    assert_eq!(prepared.catalog.len(), 2);
    let (levels, total) = space_levels(&prepared.catalog);
    assert_eq!(levels, vec![(1, Some(4)), (2, Some(4))]);
    assert_eq!(total, Some(8));

    let outcome = explore(&config, prepared, &ExploreOptions::default()).expect("explore");
    let all = outcome.all_combinations.as_ref().expect("all combinations");
    assert_eq!(all.len(), 8);
    assert_eq!(all[0], "`Type of place of residence` == 'Urban'");
    assert_eq!(outcome.valid.len(), 5);
    assert_eq!(outcome.valid_stats.rejected, 3);

    let reports = render_reports(&outcome, config.sample_min);
    let written = write_reports(&reports, &config).expect("write");
    assert_eq!(written.len(), 2);

    let all_text =
        fs::read_to_string(dir.path().join("output/all_combos_bases_on_sample_min_2.txt")).unwrap();
    assert!(all_text.contains("Condition Combination"));
    let valid_text =
        fs::read_to_string(dir.path().join("output/valid_combinations_sample_min2.txt")).unwrap();
    assert!(valid_text.contains("Conditions with sample size over 2"));
    assert!(valid_text.contains("`Has electricity` == 1"));
    assert!(valid_text.contains("0.58"));
}

#[test]
fn skipping_all_combinations_writes_one_report() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(dir.path());
    let prepared = prepare(&config).unwrap();
    let options = ExploreOptions {
        skip_all_combinations: true,
        ..ExploreOptions::default()
    };
    let outcome = explore(&config, prepared, &options).unwrap();
    assert!(outcome.all_combinations.is_none());

    let written = write_reports(&render_reports(&outcome, 2), &config).unwrap();
    assert_eq!(written, vec![dir.path().join("output/valid_combinations_sample_min2.txt")]);
}

#[test]
fn cancelled_run_returns_error() {
    let dir = TempDir::new().unwrap();
    let config = fixture_config(dir.path());
    let prepared = prepare(&config).unwrap();
    let flag = CancelFlag::new();
    flag.cancel();
    let options = ExploreOptions {
        cancel: Some(flag),
        ..ExploreOptions::default()
    };
    assert!(explore(&config, prepared, &options).is_err());
}

#[test]
fn missing_input_fails_in_prepare() {
    let dir = TempDir::new().unwrap();
    let mut config = fixture_config(dir.path());
    config.women_csv = dir.path().join("absent.csv");
    let err = prepare(&config).unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
}

#[test]
fn config_file_and_overrides_resolve() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cohort.toml");
    fs::write(
        &path,
        "sample_min = 100\ndimensions = [\"has_radio\"]\nidentity = \"raw\"\n",
    )
    .unwrap();

    let config = RunConfig::resolve(
        Some(&path),
        ConfigOverrides {
            sample_min: Some(7),
            ..ConfigOverrides::default()
        },
    )
    .unwrap();
    assert_eq!(config.sample_min, 7);
    assert_eq!(config.dimensions, vec![Dimension::HasRadio]);
    assert_eq!(config.identity, IdentityMode::Raw);

    fs::write(&path, "sample_min = \"lots\"\n").unwrap();
    assert!(matches!(
        RunConfig::resolve(Some(&path), ConfigOverrides::default()),
        Err(ConfigError::Parse { .. })
    ));
    assert!(matches!(
        RunConfig::resolve(Some(&dir.path().join("none.toml")), ConfigOverrides::default()),
        Err(ConfigError::Read { .. })
    ));
}
