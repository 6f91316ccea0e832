pub(crate) mod config_validation;
pub mod error;
pub mod validity_classifier;

pub use validity_classifier::{ClassifiedTables, ValidityClassifier};
