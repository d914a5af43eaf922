//! Per-column distinct values, row counts, and trimming into a catalog.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashSet};

use cohort_model::{Dimension, Value};
use cohort_search::DomainCatalog;
use polars::prelude::{DataFrame, Series};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};
use crate::values::any_to_value;

/// Distinct non-null values per column, columns and values in the order
/// they were first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistinctValues {
    columns: Vec<(String, Vec<Value>)>,
}

impl DistinctValues {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, values)| values.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.columns
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

/// Row count per distinct value, per column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueCounts {
    columns: Vec<(String, BTreeMap<Value, usize>)>,
}

impl ValueCounts {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: &str) -> Option<&BTreeMap<Value, usize>> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, counts)| counts)
    }

    /// Rows holding `value` in `column`; zero when either is unknown.
    pub fn count(&self, column: &str, value: &Value) -> usize {
        self.get(column)
            .and_then(|counts| counts.get(value))
            .copied()
            .unwrap_or(0)
    }
}

fn column_series<'a>(table: &'a DataFrame, name: &str) -> Result<&'a Series> {
    table
        .column(name)
        .map(|column| column.as_materialized_series())
        .map_err(|_| IngestError::ColumnNotFound {
            column: name.to_string(),
        })
}

/// Collects the distinct non-null values of every column.
pub fn make_distinct_value_dict(table: &DataFrame) -> Result<DistinctValues> {
    let mut columns = Vec::with_capacity(table.width());
    for column in table.get_columns() {
        let series = column.as_materialized_series();
        let mut seen = HashSet::new();
        let mut values = Vec::new();
        for idx in 0..series.len() {
            if let Some(value) = any_to_value(series.get(idx)?)
                && seen.insert(value.clone())
            {
                values.push(value);
            }
        }
        debug!(column = %column.name(), distinct = values.len(), "distinct values");
        columns.push((column.name().to_string(), values));
    }
    Ok(DistinctValues { columns })
}

/// Counts the rows holding each value of every column listed in `distinct`.
pub fn make_rows_per_distinct_value_dict(
    table: &DataFrame,
    distinct: &DistinctValues,
) -> Result<ValueCounts> {
    let mut columns = Vec::with_capacity(distinct.len());
    for name in distinct.names() {
        let series = column_series(table, name)?;
        let mut counts: BTreeMap<Value, usize> = BTreeMap::new();
        for idx in 0..series.len() {
            if let Some(value) = any_to_value(series.get(idx)?) {
                *counts.entry(value).or_default() += 1;
            }
        }
        columns.push((name.to_string(), counts));
    }
    Ok(ValueCounts { columns })
}

/// Keeps the explored dimensions, in the order given.
pub fn select_dimensions(
    distinct: &DistinctValues,
    dimensions: &[Dimension],
) -> Result<DistinctValues> {
    let columns = dimensions
        .iter()
        .map(|dimension| {
            let name = dimension.as_str();
            distinct
                .get(name)
                .map(|values| (name.to_string(), values.to_vec()))
                .ok_or_else(|| IngestError::ColumnNotFound {
                    column: name.to_string(),
                })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(DistinctValues { columns })
}

/// Drops values held by fewer than `min_rows` rows and builds the catalog.
///
/// Surviving values are ordered by descending row count; equal counts keep
/// their first-seen order. A dimension left without values is dropped with
/// a warning.
///
/// # Errors
///
/// Fails with [`IngestError::Catalog`] when no dimension survives.
pub fn trim_domains(
    distinct: &DistinctValues,
    counts: &ValueCounts,
    min_rows: usize,
) -> Result<DomainCatalog> {
    let mut kept = Vec::with_capacity(distinct.len());
    for (name, values) in distinct.iter() {
        let mut surviving: Vec<(usize, &Value)> = values
            .iter()
            .map(|value| (counts.count(name, value), value))
            .filter(|&(count, _)| count >= min_rows)
            .collect();
        surviving.sort_by_key(|&(count, _)| Reverse(count));
        let surviving: Vec<Value> = surviving.into_iter().map(|(_, value)| value.clone()).collect();
        if surviving.is_empty() {
            warn!(dimension = name, min_rows, "no value reaches the row minimum, dropping dimension");
            continue;
        }
        debug!(
            dimension = name,
            kept = surviving.len(),
            dropped = values.len() - surviving.len(),
            "trimmed domain"
        );
        kept.push((name.to_string(), surviving));
    }
    let catalog = DomainCatalog::new(kept)?;
    info!(dimensions = catalog.len(), min_rows, "built domain catalog");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom};

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Column::new("Has radio".into(), &[Some(1i64), Some(0), Some(1), None]),
            Column::new(
                "Type of place of residence".into(),
                &["Urban", "Rural", "Urban", "Urban"],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let distinct = make_distinct_value_dict(&sample()).unwrap();
        assert_eq!(
            distinct.get("Has radio"),
            Some([Value::Integer(1), Value::Integer(0)].as_slice())
        );
        assert_eq!(
            distinct.get("Type of place of residence"),
            Some([Value::from("Urban"), Value::from("Rural")].as_slice())
        );
    }

    #[test]
    fn counts_skip_nulls() {
        let table = sample();
        let distinct = make_distinct_value_dict(&table).unwrap();
        let counts = make_rows_per_distinct_value_dict(&table, &distinct).unwrap();
        assert_eq!(counts.count("Has radio", &Value::Integer(1)), 2);
        assert_eq!(counts.count("Has radio", &Value::Integer(0)), 1);
        assert_eq!(counts.get("Has radio").map(BTreeMap::len), Some(2));
        assert_eq!(counts.count("Type of place of residence", &Value::from("Urban")), 3);
    }

    #[test]
    fn select_follows_requested_order() {
        let distinct = make_distinct_value_dict(&sample()).unwrap();
        let selected = select_dimensions(
            &distinct,
            &[Dimension::TypeOfPlaceOfResidence, Dimension::HasRadio],
        )
        .unwrap();
        let names: Vec<&str> = selected.names().collect();
        assert_eq!(names, vec!["Type of place of residence", "Has radio"]);

        let err = select_dimensions(&distinct, &[Dimension::HasElectricity]).unwrap_err();
        assert!(matches!(err, IngestError::ColumnNotFound { column } if column == "Has electricity"));
    }

    #[test]
    fn trimming_drops_rare_values_and_empty_dimensions() {
        let table = sample();
        let distinct = make_distinct_value_dict(&table).unwrap();
        let counts = make_rows_per_distinct_value_dict(&table, &distinct).unwrap();

        let catalog = trim_domains(&distinct, &counts, 2).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.domain(0), Some([Value::Integer(1)].as_slice()));
        assert_eq!(catalog.domain(1), Some([Value::from("Urban")].as_slice()));

        let catalog = trim_domains(&distinct, &counts, 3).unwrap();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["Type of place of residence"]);

        let err = trim_domains(&distinct, &counts, 10).unwrap_err();
        assert!(matches!(err, IngestError::Catalog(_)));
    }

    #[test]
    fn trimmed_values_are_ordered_by_descending_count() {
        let table = DataFrame::new(vec![Column::new("Has radio".into(), &[0i64, 1, 1])]).unwrap();
        let distinct = make_distinct_value_dict(&table).unwrap();
        let counts = make_rows_per_distinct_value_dict(&table, &distinct).unwrap();

        let catalog = trim_domains(&distinct, &counts, 1).unwrap();
        assert_eq!(
            catalog.domain(0),
            Some([Value::Integer(1), Value::Integer(0)].as_slice())
        );
    }

    #[test]
    fn equal_counts_keep_first_seen_order() {
        let table = DataFrame::new(vec![Column::new(
            "Source of drinking water".into(),
            &["Well", "River", "Piped", "River", "Piped", "Rain", "Piped"],
        )])
        .unwrap();
        let distinct = make_distinct_value_dict(&table).unwrap();
        let counts = make_rows_per_distinct_value_dict(&table, &distinct).unwrap();

        let catalog = trim_domains(&distinct, &counts, 1).unwrap();
        assert_eq!(
            catalog.domain(0),
            Some(
                [
                    Value::from("Piped"),
                    Value::from("River"),
                    Value::from("Well"),
                    Value::from("Rain"),
                ]
                .as_slice()
            )
        );

        let catalog = trim_domains(&distinct, &counts, 2).unwrap();
        assert_eq!(
            catalog.domain(0),
            Some([Value::from("Piped"), Value::from("River")].as_slice())
        );
    }
}
