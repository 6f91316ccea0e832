use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not create the output directory: {reason}")]
    NoStorage { reason: String },
    #[error("Could not store '{file}': {reason}")]
    CantStore { file: String, reason: String },
    #[error("Could not convert '{file}' to {format}: {reason}")]
    ConversionError {
        file: String,
        format: String,
        reason: String,
    },
}
