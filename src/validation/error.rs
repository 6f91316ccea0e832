use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("Derived column '{0}' is missing. Rows can only be classified after line resolution and duration derivation.")]
    MissingDerivedColumn(String),
    #[error(transparent)]
    PolarsError(#[from] PolarsError),
}
