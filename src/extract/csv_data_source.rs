use crate::config::datasource_config::CsvConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Defines a CSV file as a data source.
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
pub struct CsvDataSource {
    /// The file path to the CSV source.
    pub source: PathBuf,
    /// The character used to separate fields in the CSV file (e.g., ',').
    pub separator: Option<char>,
    /// Zero based index of the row holding the column names.
    pub header_row: usize,
}

impl CsvDataSource {
    pub fn new(source: PathBuf, separator: Option<char>, header_row: usize) -> Self {
        Self {
            source,
            separator,
            header_row,
        }
    }
}

impl From<CsvConfig> for CsvDataSource {
    fn from(config: CsvConfig) -> Self {
        CsvDataSource::new(config.source, config.separator, config.header_row)
    }
}
