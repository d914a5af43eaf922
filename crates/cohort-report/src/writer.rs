//! Report file naming and writing.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ReportError, Result};

/// Output files for one sample threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub all_combinations: PathBuf,
    pub valid_combinations: PathBuf,
}

impl ReportPaths {
    pub fn for_threshold(dir: &Path, min_sample: usize) -> Self {
        Self {
            all_combinations: dir.join(format!("all_combos_bases_on_sample_min_{min_sample}.txt")),
            valid_combinations: dir.join(format!("valid_combinations_sample_min{min_sample}.txt")),
        }
    }
}

/// Writes `text` to `path`, creating missing parent directories.
pub fn write_report(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ReportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = text.len(), "wrote report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_threshold() {
        let paths = ReportPaths::for_threshold(Path::new("out"), 2000);
        assert_eq!(
            paths.all_combinations,
            Path::new("out/all_combos_bases_on_sample_min_2000.txt")
        );
        assert_eq!(
            paths.valid_combinations,
            Path::new("out/valid_combinations_sample_min2000.txt")
        );
    }
}
