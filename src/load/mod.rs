pub mod error;
mod report_loader;
pub use report_loader::ReportLoader;
pub mod traits;
