//! Human-readable conjunctive conditions for accepted candidates.
//!
//! A candidate `(values, dimensions)` reads as one equality clause per
//! dimension joined with `&`. Dimension names are wrapped in backticks so
//! names containing spaces stay unambiguous; text values are single-quoted,
//! numeric values are not:
//!
//! ```text
//! `Has electricity` == 1 & `Type of toilet facility` == 'Pit latrine'
//! ```

use std::collections::{BTreeMap, HashMap};

use cohort_model::{Candidate, Value};
use thiserror::Error;

use crate::catalog::DomainCatalog;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("{values} values cannot be paired with {dimensions} dimensions")]
    ArityMismatch { values: usize, dimensions: usize },
    #[error("no name known for dimension index {index}")]
    UnknownDimension { index: usize },
}

/// Maps a dimension index to its display name.
pub trait DimensionNames {
    fn dimension_name(&self, index: usize) -> Option<&str>;
}

impl DimensionNames for DomainCatalog {
    fn dimension_name(&self, index: usize) -> Option<&str> {
        self.name_of(index)
    }
}

impl<S: AsRef<str>> DimensionNames for [S] {
    fn dimension_name(&self, index: usize) -> Option<&str> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> DimensionNames for Vec<S> {
    fn dimension_name(&self, index: usize) -> Option<&str> {
        self.as_slice().dimension_name(index)
    }
}

impl<S: AsRef<str>> DimensionNames for BTreeMap<usize, S> {
    fn dimension_name(&self, index: usize) -> Option<&str> {
        self.get(&index).map(AsRef::as_ref)
    }
}

impl<S: AsRef<str>> DimensionNames for HashMap<usize, S> {
    fn dimension_name(&self, index: usize) -> Option<&str> {
        self.get(&index).map(AsRef::as_ref)
    }
}

/// Formats one `` `name` == value `` clause.
pub fn format_clause(name: &str, value: &Value) -> String {
    match value {
        Value::Text(text) => format!("`{name}` == '{text}'"),
        numeric => format!("`{name}` == {numeric}"),
    }
}

/// Formats the conjunction for a value tuple drawn from `dimensions`.
///
/// # Errors
///
/// Fails when the slices differ in length or an index has no name.
pub fn build_query<N>(
    values: &[Value],
    dimensions: &[usize],
    names: &N,
) -> Result<String, FormatError>
where
    N: DimensionNames + ?Sized,
{
    if values.len() != dimensions.len() {
        return Err(FormatError::ArityMismatch {
            values: values.len(),
            dimensions: dimensions.len(),
        });
    }
    let clauses = values
        .iter()
        .zip(dimensions)
        .map(|(value, &index)| {
            names
                .dimension_name(index)
                .map(|name| format_clause(name, value))
                .ok_or(FormatError::UnknownDimension { index })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(clauses.join(" & "))
}

/// Formats an accepted candidate.
pub fn describe<N>(candidate: &Candidate, names: &N) -> Result<String, FormatError>
where
    N: DimensionNames + ?Sized,
{
    build_query(candidate.values(), candidate.dimensions(), names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_clause_quoting() {
        assert_eq!(
            format_clause("name_of_dimension", &Value::Integer(33)),
            "`name_of_dimension` == 33"
        );
        assert_eq!(
            format_clause("name_of_dimension", &Value::Float(33.0)),
            "`name_of_dimension` == 33.0"
        );
        assert_eq!(
            format_clause("name_of_dimension", &Value::from("fish")),
            "`name_of_dimension` == 'fish'"
        );
    }

    #[test]
    fn test_many_clauses() {
        let names = ["dim_1", "dim_2", "dim_3", "dim_4"];
        let values = vec![
            Value::Integer(33),
            Value::from("a"),
            Value::Float(25.0),
            Value::from("b"),
        ];
        let query = build_query(&values, &[0, 1, 2, 3], names.as_slice()).unwrap();
        assert_eq!(
            query,
            "`dim_1` == 33 & `dim_2` == 'a' & `dim_3` == 25.0 & `dim_4` == 'b'"
        );
    }

    #[test]
    fn test_index_map_lookup() {
        let index_map: BTreeMap<usize, &str> =
            [(0, "a"), (1, "b"), (2, "c"), (3, "d"), (4, "e")].into_iter().collect();
        let values: Vec<Value> = (1..=5).map(Value::Integer).collect();
        let query = build_query(&values, &[0, 1, 2, 3, 4], &index_map).unwrap();
        assert_eq!(query, "`a` == 1 & `b` == 2 & `c` == 3 & `d` == 4 & `e` == 5");
    }

    #[test]
    fn test_sparse_subset_uses_dimension_names() {
        let names = vec!["Has electricity".to_string(), "Has radio".to_string(), "Age".to_string()];
        let query = build_query(&[Value::Integer(1), Value::Integer(45)], &[0, 2], &names).unwrap();
        assert_eq!(query, "`Has electricity` == 1 & `Age` == 45");
    }

    #[test]
    fn test_errors() {
        let names = ["a"];
        assert_eq!(
            build_query(&[Value::Integer(1)], &[0, 1], names.as_slice()),
            Err(FormatError::ArityMismatch {
                values: 1,
                dimensions: 2
            })
        );
        assert_eq!(
            build_query(&[Value::Integer(1)], &[3], names.as_slice()),
            Err(FormatError::UnknownDimension { index: 3 })
        );
    }
}
