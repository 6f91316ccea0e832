use polars::prelude::PolarsError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid cohort filter: {0}")]
    InvalidConfig(#[from] ValidationErrors),
    #[error(transparent)]
    PolarsError(#[from] PolarsError),
}
