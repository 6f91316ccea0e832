use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
#[allow(clippy::enum_variant_names)]
pub enum StrategyError {
    #[error("Strategy '{strategy_name}' could not write the column '{column}': {source}")]
    ColumnWriteError {
        strategy_name: String,
        column: String,
        source: PolarsError,
    },
    #[error(transparent)]
    PolarsError(#[from] PolarsError),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Strategy '{strategy_name}' changed the number of rows from {before} to {after}.")]
    RowCountChanged {
        strategy_name: String,
        before: usize,
        after: usize,
    },
    #[error(transparent)]
    StrategyError(#[from] StrategyError),
}
