use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("value tuple has {values} values but dimension subset has {dimensions} dimensions")]
    ArityMismatch { values: usize, dimensions: usize },
    #[error("dimension subset {indices:?} is not strictly increasing")]
    UnorderedSubset { indices: Vec<usize> },
    #[error("unknown dimension: {0}")]
    UnknownDimension(String),
    #[error("unknown key column: {0}")]
    UnknownKeyColumn(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
