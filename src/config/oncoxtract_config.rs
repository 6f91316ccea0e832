use crate::config::column_schema::ColumnSchema;
use crate::config::datasource_config::DataSourceConfig;
use crate::config::derivation_config::DerivationConfig;
use crate::config::filter_config::FilterConfig;
use crate::config::label_config::LabelConfig;
use crate::config::loader_config::LoaderConfig;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Represents all necessary data to construct and run the cohort pipeline.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OncoXtractConfig {
    pub data_source: DataSourceConfig,
    #[serde(default)]
    pub columns: ColumnSchema,
    #[serde(default)]
    pub labels: LabelConfig,
    #[serde(default)]
    #[validate(nested)]
    pub derivation: DerivationConfig,
    #[serde(default)]
    #[validate(nested)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub output: LoaderConfig,
}

impl OncoXtractConfig {
    pub fn new(data_source: DataSourceConfig) -> Self {
        Self {
            data_source,
            columns: ColumnSchema::default(),
            labels: LabelConfig::default(),
            derivation: DerivationConfig::default(),
            filter: FilterConfig::default(),
            output: LoaderConfig::default(),
        }
    }

    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_output(mut self, output: LoaderConfig) -> Self {
        self.output = output;
        self
    }
}
