use crate::config::datasource_config::ExcelWorkbookConfig;
use crate::extract::extraction_config::ExtractionConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Defines a worksheet of an Excel workbook as a data source.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExcelDataSource {
    /// The file path to the Excel workbook.
    pub(crate) source: PathBuf,
    /// Which worksheet to read and where its header row sits.
    pub(crate) extraction_config: ExtractionConfig,
}

impl ExcelDataSource {
    pub fn new(source: PathBuf, extraction_config: ExtractionConfig) -> Self {
        ExcelDataSource {
            source,
            extraction_config,
        }
    }
}

impl From<ExcelWorkbookConfig> for ExcelDataSource {
    fn from(config: ExcelWorkbookConfig) -> Self {
        ExcelDataSource::new(
            config.source,
            ExtractionConfig::new(config.sheet_name, config.header_row),
        )
    }
}
