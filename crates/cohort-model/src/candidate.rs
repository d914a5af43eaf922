use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::value::Value;

/// Strictly increasing dimension indices participating in a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct DimensionSubset(Vec<usize>);

impl DimensionSubset {
    pub fn new(indices: Vec<usize>) -> Result<Self> {
        if indices.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ModelError::UnorderedSubset { indices });
        }
        Ok(Self(indices))
    }

    /// Builds a subset from indices produced by an ordered generator.
    ///
    /// Callers guarantee the order; it is checked in debug builds only.
    pub fn from_sorted(indices: &[usize]) -> Self {
        debug_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        Self(indices.to_vec())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl Deref for DimensionSubset {
    type Target = [usize];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<usize>> for DimensionSubset {
    type Error = ModelError;

    fn try_from(indices: Vec<usize>) -> Result<Self> {
        Self::new(indices)
    }
}

impl From<DimensionSubset> for Vec<usize> {
    fn from(subset: DimensionSubset) -> Self {
        subset.0
    }
}

impl fmt::Display for DimensionSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (pos, index) in self.0.iter().enumerate() {
            if pos > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{index}")?;
        }
        f.write_str(")")
    }
}

/// One value per participating dimension, in subset order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    values: Vec<Value>,
    dimensions: DimensionSubset,
}

impl Candidate {
    pub fn new(values: Vec<Value>, dimensions: DimensionSubset) -> Result<Self> {
        if values.len() != dimensions.len() {
            return Err(ModelError::ArityMismatch {
                values: values.len(),
                dimensions: dimensions.len(),
            });
        }
        Ok(Self { values, dimensions })
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn dimensions(&self) -> &DimensionSubset {
        &self.dimensions
    }

    /// Number of participating dimensions.
    pub fn size(&self) -> usize {
        self.dimensions.len()
    }

    /// Iterates `(dimension index, value)` pairs in subset order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, &Value)> {
        self.dimensions.iter().copied().zip(self.values.iter())
    }

    pub fn into_parts(self) -> (Vec<Value>, DimensionSubset) {
        (self.values, self.dimensions)
    }
}
