use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Column '{0}' is required for the cohort report but is missing from the clean table.")]
    MissingColumn(String),
    #[error(transparent)]
    PolarsError(#[from] PolarsError),
}
