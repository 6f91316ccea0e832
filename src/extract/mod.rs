pub mod csv_data_source;
pub use csv_data_source::CsvDataSource;
pub mod data_source;
pub use data_source::DataSource;
pub mod error;
pub mod excel_data_source;
pub use excel_data_source::ExcelDataSource;
mod excel_range_reader;
pub mod extraction_config;
pub mod patient_table;
pub use patient_table::PatientTable;
pub mod traits;
mod utils;
