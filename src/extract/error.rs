use calamine::XlsxError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Out of bounds index when loading vector {0} in {1}.")]
    ExcelIndexing(usize, String),
    #[error("Workbook '{0}' does not contain any worksheets.")]
    EmptyWorkbook(String),
    #[error("Could not find Excel Worksheet with the name '{0}'.")]
    SheetNotFound(String),
    #[error("Table {0} was empty.")]
    EmptyTable(String),
    #[error("Table {table} has no header row at index {header_row}.")]
    MissingHeaderRow { table: String, header_row: usize },
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Calamine(#[from] XlsxError),
}
