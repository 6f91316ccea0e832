use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub enum DataSourceConfig {
    Csv(CsvConfig),
    Excel(ExcelWorkbookConfig),
}

impl DataSourceConfig {
    pub fn source(&self) -> &PathBuf {
        match self {
            DataSourceConfig::Csv(csv) => &csv.source,
            DataSourceConfig::Excel(excel) => &excel.source,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CsvConfig {
    pub source: PathBuf,
    #[serde(default)]
    pub separator: Option<char>,
    /// Zero based index of the row holding the column names.
    #[serde(default)]
    pub header_row: usize,
}

impl CsvConfig {
    pub fn new(source: PathBuf, separator: Option<char>, header_row: usize) -> Self {
        Self {
            source,
            separator,
            header_row,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExcelWorkbookConfig {
    pub source: PathBuf,
    /// The worksheet to read. The first worksheet of the workbook is used when omitted.
    #[serde(default)]
    pub sheet_name: Option<String>,
    /// Zero based index of the row holding the column names.
    #[serde(default)]
    pub header_row: usize,
}

impl ExcelWorkbookConfig {
    pub fn new(source: PathBuf, sheet_name: Option<String>, header_row: usize) -> Self {
        Self {
            source,
            sheet_name,
            header_row,
        }
    }
}
