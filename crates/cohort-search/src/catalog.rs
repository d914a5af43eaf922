//! Named value domains handed to the enumerator.

use std::collections::BTreeSet;

use cohort_model::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("domain catalog has no dimensions")]
    Empty,
    #[error("domain for dimension '{name}' has no values")]
    EmptyDomain { name: String },
    #[error("dimension '{name}' appears more than once")]
    DuplicateName { name: String },
}

/// One dimension: its name and its ordered distinct values.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainEntry {
    pub name: String,
    pub values: Vec<Value>,
}

impl AsRef<[Value]> for DomainEntry {
    fn as_ref(&self) -> &[Value] {
        &self.values
    }
}

/// Ordered per-dimension domains. The position of an entry is its
/// dimension index during enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainCatalog {
    entries: Vec<DomainEntry>,
}

impl DomainCatalog {
    /// Validates and builds a catalog.
    ///
    /// # Errors
    ///
    /// Rejects an empty catalog, empty domains, and repeated names.
    pub fn new<I, S>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (S, Vec<Value>)>,
        S: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let mut built = Vec::new();
        for (name, values) in entries {
            let name = name.into();
            if values.is_empty() {
                return Err(CatalogError::EmptyDomain { name });
            }
            if !seen.insert(name.clone()) {
                return Err(CatalogError::DuplicateName { name });
            }
            built.push(DomainEntry { name, values });
        }
        if built.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { entries: built })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in dimension-index order; usable directly as enumerator input.
    pub fn domains(&self) -> &[DomainEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|entry| entry.name.as_str())
    }

    pub fn domain(&self, index: usize) -> Option<&[Value]> {
        self.entries.get(index).map(|entry| entry.values.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_in_order() {
        let catalog = DomainCatalog::new(vec![
            ("Has radio", vec![Value::Integer(0), Value::Integer(1)]),
            ("Type of place of residence", vec![Value::from("Urban")]),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.name_of(1), Some("Type of place of residence"));
        assert_eq!(catalog.name_of(2), None);
        assert_eq!(catalog.domain(0).map(<[Value]>::len), Some(2));
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["Has radio", "Type of place of residence"]);
    }

    #[test]
    fn rejects_invalid_catalogs() {
        let none: Vec<(String, Vec<Value>)> = Vec::new();
        assert_eq!(DomainCatalog::new(none), Err(CatalogError::Empty));
        assert_eq!(
            DomainCatalog::new(vec![("Has radio", Vec::new())]),
            Err(CatalogError::EmptyDomain {
                name: "Has radio".to_string()
            })
        );
        assert_eq!(
            DomainCatalog::new(vec![
                ("Has radio", vec![Value::Integer(1)]),
                ("Has radio", vec![Value::Integer(0)]),
            ]),
            Err(CatalogError::DuplicateName {
                name: "Has radio".to_string()
            })
        );
    }
}
