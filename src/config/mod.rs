mod config_loader;
pub use self::config_loader::ConfigLoader;
pub mod column_schema;
pub use self::column_schema::ColumnSchema;
pub mod datasource_config;
pub use self::datasource_config::DataSourceConfig;
pub mod derivation_config;
pub use self::derivation_config::DerivationConfig;
pub mod filter_config;
pub use self::filter_config::{DateRange, FilterConfig};
pub mod label_config;
pub use self::label_config::{LabelConfig, LabelTable};
pub mod loader_config;
pub use self::loader_config::LoaderConfig;
pub mod oncoxtract_config;
pub use self::oncoxtract_config::OncoXtractConfig;
