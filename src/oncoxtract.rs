use crate::Pipeline;
use crate::config::{ConfigLoader, OncoXtractConfig};
use crate::error::{ConstructionError, PipelineError};
use crate::extract::DataSource;
use crate::pipeline::PipelineOutput;
use log::info;
use std::path::Path;

/// A configured pipeline bound to the data source it reads from.
#[derive(Debug)]
pub struct OncoXtract {
    pipeline: Pipeline,
    data_source: DataSource,
}

impl OncoXtract {
    pub fn from_config_file(config_path: &Path) -> Result<Self, ConstructionError> {
        if !config_path.exists() {
            return Err(ConstructionError::NoConfigFileFound(
                config_path.to_path_buf(),
            ));
        }
        info!("Loading config from {}", config_path.display());
        let config: OncoXtractConfig = ConfigLoader::load(config_path)?;
        Self::try_from(config)
    }

    pub fn run(&self, write: bool) -> Result<PipelineOutput, PipelineError> {
        self.pipeline.run(&self.data_source, write)
    }
}

impl TryFrom<OncoXtractConfig> for OncoXtract {
    type Error = ConstructionError;

    fn try_from(config: OncoXtractConfig) -> Result<Self, Self::Error> {
        let data_source = DataSource::from(config.data_source.clone());
        let pipeline = Pipeline::try_from(config)?;
        Ok(Self {
            pipeline,
            data_source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_missing_config_file() {
        let result = OncoXtract::from_config_file(Path::new("does/not/exist.yaml"));
        assert!(matches!(
            result,
            Err(ConstructionError::NoConfigFileFound(_))
        ));
    }
}
