//! Conjunctive equality filters over the joined table.

use cohort_model::Value;
use cohort_search::DimensionNames;
use polars::prelude::{DataFrame, Expr, IntoLazy, col, lit};

use crate::error::{IngestError, Result};
use crate::values::value_to_lit;

/// Builds `col(name_0) == v_0 AND col(name_1) == v_1 AND ...`.
///
/// An empty tuple yields a filter that keeps every row.
pub fn build_filter<N>(values: &[Value], dimensions: &[usize], names: &N) -> Result<Expr>
where
    N: DimensionNames + ?Sized,
{
    if values.len() != dimensions.len() {
        return Err(IngestError::FilterArity {
            values: values.len(),
            dimensions: dimensions.len(),
        });
    }
    let mut clauses = values.iter().zip(dimensions).map(|(value, &index)| {
        names
            .dimension_name(index)
            .map(|name| col(name).eq(value_to_lit(value)))
            .ok_or(cohort_search::FormatError::UnknownDimension { index })
    });
    let Some(first) = clauses.next().transpose()? else {
        return Ok(lit(true));
    };
    clauses.try_fold(first, |acc, clause| -> Result<Expr> { Ok(acc.and(clause?)) })
}

/// Rows of `table` matching `predicate`.
pub fn filter_table(table: &DataFrame, predicate: Expr) -> Result<DataFrame> {
    Ok(table.clone().lazy().filter(predicate).collect()?)
}
