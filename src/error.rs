use crate::analysis::error::AnalysisError;
use crate::extract::error::ExtractionError;
use crate::filter::error::FilterError;
use crate::load::error::LoadError;
use crate::transform::error::TransformError;
use crate::validation::error::ClassificationError;
use config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("Could not find config file at '{0}'")]
    NoConfigFileFound(PathBuf),
    #[error("Label table '{table}' contains the code '{code}', which is not an integer.")]
    InvalidLabelCode { table: String, code: String },
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Filter(#[from] FilterError),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Load(#[from] LoadError),
}
