use crate::extract::error::ExtractionError;
use polars::prelude::DataFrame;

/// A trait for types that can be extracted into a raw patient `DataFrame`.
pub trait Extractable: std::fmt::Debug {
    fn extract(&self) -> Result<DataFrame, ExtractionError>;
}
