//! Loading and shaping the survey tables.

use std::path::Path;

use cohort_model::{KeyColumn, MORTALITY_RATE_COLUMN};
use polars::prelude::{
    CsvReadOptions, DataFrame, DataType, Expr, IntoLazy, JoinArgs, JoinType, MaintainOrderJoin, NULL,
    SerReader, col, lit, when,
};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Reads a CSV file with a single header row into a DataFrame.
///
/// Column types are inferred from the first 100 rows.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read table"
    );
    Ok(df)
}

fn require_columns(table: &DataFrame, columns: &[KeyColumn]) -> Result<()> {
    for column in columns {
        if table.column(column.as_str()).is_err() {
            return Err(IngestError::ColumnNotFound {
                column: column.as_str().to_string(),
            });
        }
    }
    Ok(())
}

/// Left-joins household attributes onto the women table.
///
/// Rows are matched on cluster and household number. Every women row is
/// kept in its input order. Non-key household columns that clash with a
/// women column get the `_right` suffix.
pub fn join_tables(women: &DataFrame, household: &DataFrame) -> Result<DataFrame> {
    require_columns(women, &KeyColumn::JOIN_KEYS)?;
    require_columns(household, &KeyColumn::JOIN_KEYS)?;

    let keys: Vec<Expr> = KeyColumn::JOIN_KEYS
        .iter()
        .map(|key| col(key.as_str()))
        .collect();
    let joined = women
        .clone()
        .lazy()
        .join(
            household.clone().lazy(),
            keys.clone(),
            keys,
            JoinArgs {
                maintain_order: MaintainOrderJoin::Left,
                ..JoinArgs::new(JoinType::Left)
            },
        )
        .collect()?;
    info!(
        women = women.height(),
        household = household.height(),
        rows = joined.height(),
        "joined tables"
    );
    Ok(joined)
}

/// Appends the per-row mortality rate column.
///
/// The rate is `(sons who have died + daughters who have died) / total
/// children ever born`. Rows without children, or with any input missing,
/// get a null rate.
pub fn add_mortality_rate(table: &DataFrame) -> Result<DataFrame> {
    require_columns(
        table,
        &[
            KeyColumn::TotalChildrenEverBorn,
            KeyColumn::SonsWhoHaveDied,
            KeyColumn::DaughtersWhoHaveDied,
        ],
    )?;

    let as_float = |column: KeyColumn| col(column.as_str()).cast(DataType::Float64);
    let total = as_float(KeyColumn::TotalChildrenEverBorn);
    let died = as_float(KeyColumn::SonsWhoHaveDied) + as_float(KeyColumn::DaughtersWhoHaveDied);
    let rate = when(total.clone().gt(lit(0.0)))
        .then(died / total)
        .otherwise(lit(NULL))
        .cast(DataType::Float64)
        .alias(MORTALITY_RATE_COLUMN);

    Ok(table.clone().lazy().with_column(rate).collect()?)
}
