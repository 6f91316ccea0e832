use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the report of a run is written to.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    pub output_dir: PathBuf,
    /// If true the full output path is created when missing.
    #[serde(default)]
    pub create_dir: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("oncoxtract_output"),
            create_dir: true,
        }
    }
}
