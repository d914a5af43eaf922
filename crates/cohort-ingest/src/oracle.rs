//! Sample-size validity oracle backed by the joined table.

use cohort_model::{DimensionSubset, MORTALITY_RATE_COLUMN, Value};
use cohort_search::{DomainCatalog, ValidityOracle, Verdict, build_query};
use polars::prelude::DataFrame;
use tracing::trace;

use crate::error::{IngestError, Result};
use crate::filter::{build_filter, filter_table};

/// An accepted cohort: its condition, row count, and mean mortality rate.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortStatistic {
    pub condition: String,
    pub sample_size: usize,
    /// Mean of the non-null rates, rounded to two decimals by [`round_rate`].
    /// `None` when no row in the cohort has a defined rate.
    pub mortality_rate: Option<f64>,
}

/// Accepts a candidate when at least `min_sample` rows match it.
///
/// Shrinking a conjunctive filter's row count by adding clauses is the
/// anti-monotonicity the enumerator's pruning relies on.
#[derive(Debug, Clone)]
pub struct SampleSignificanceOracle {
    table: DataFrame,
    names: Vec<String>,
    min_sample: usize,
}

impl SampleSignificanceOracle {
    /// # Errors
    ///
    /// Fails when the table lacks the mortality rate column or a catalog
    /// dimension column.
    pub fn new(table: DataFrame, catalog: &DomainCatalog, min_sample: usize) -> Result<Self> {
        let names: Vec<String> = catalog.names().map(str::to_string).collect();
        for column in names.iter().map(String::as_str).chain([MORTALITY_RATE_COLUMN]) {
            if table.column(column).is_err() {
                return Err(IngestError::ColumnNotFound {
                    column: column.to_string(),
                });
            }
        }
        Ok(Self {
            table,
            names,
            min_sample,
        })
    }

    pub fn min_sample(&self) -> usize {
        self.min_sample
    }

    fn mean_rate(cohort: &DataFrame) -> Result<Option<f64>> {
        let mean = cohort
            .column(MORTALITY_RATE_COLUMN)?
            .as_materialized_series()
            .mean();
        Ok(mean.filter(|m| m.is_finite()).map(round_rate))
    }
}

/// Rounds a rate to two decimals, exact halves going to the even neighbour.
pub fn round_rate(rate: f64) -> f64 {
    (rate * 100.0).round_ties_even() / 100.0
}

impl ValidityOracle for SampleSignificanceOracle {
    type Record = CohortStatistic;
    type Error = IngestError;

    fn check(
        &mut self,
        values: &[Value],
        dimensions: &DimensionSubset,
    ) -> Result<Verdict<CohortStatistic>> {
        let predicate = build_filter(values, dimensions, &self.names)?;
        let cohort = filter_table(&self.table, predicate)?;
        let sample_size = cohort.height();
        trace!(?values, sample_size, "evaluated cohort");
        if sample_size < self.min_sample {
            return Ok(Verdict::Reject);
        }
        Ok(Verdict::accept_with(CohortStatistic {
            condition: build_query(values, dimensions, &self.names)?,
            sample_size,
            mortality_rate: Self::mean_rate(&cohort)?,
        }))
    }
}
