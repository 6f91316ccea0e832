use crate::config::LoaderConfig;
use crate::extract::PatientTable;
use crate::load::error::LoadError;
use crate::load::traits::Loadable;
use crate::pipeline::PipelineOutput;
use log::{debug, info};
use polars::prelude::{CsvWriter, SerWriter};
use std::fs;
use std::fs::File;
use std::path::PathBuf;

pub const CLEAN_TABLE_FILE: &str = "clean.csv";
pub const FLAGGED_TABLE_FILE: &str = "flagged.csv";
pub const REPORT_FILE: &str = "report.json";

/// A loader that writes the outcome of a run to a directory on the local file system.
///
/// The clean and flagged partitions become `clean.csv` and `flagged.csv`, the aggregates
/// are serialized as pretty printed JSON into `report.json`. Existing files are overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLoader {
    /// The directory the three files are written to.
    output_dir: PathBuf,
    /// If true will create the full output path
    create_dir: bool,
}

impl ReportLoader {
    pub fn new(output_dir: PathBuf, create_dir: bool) -> Self {
        Self {
            output_dir,
            create_dir,
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }

    fn write_table(&self, table: &PatientTable, file_name: &str) -> Result<(), LoadError> {
        let path = self.output_dir.join(file_name);
        let mut file = File::create(&path).map_err(|err| LoadError::CantStore {
            file: file_name.to_string(),
            reason: err.to_string(),
        })?;

        debug!("Storing table to: {}", path.display());
        let mut data = table.data().clone();
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut data)
            .map_err(|err| LoadError::ConversionError {
                file: file_name.to_string(),
                format: "csv".to_string(),
                reason: err.to_string(),
            })
    }
}

impl From<LoaderConfig> for ReportLoader {
    fn from(config: LoaderConfig) -> Self {
        ReportLoader::new(config.output_dir, config.create_dir)
    }
}

impl Loadable for ReportLoader {
    fn load(&self, output: &PipelineOutput) -> Result<(), LoadError> {
        if self.create_dir {
            fs::create_dir_all(self.output_dir.as_path()).map_err(|err| LoadError::NoStorage {
                reason: err.to_string(),
            })?;
        }

        self.write_table(&output.classified.clean, CLEAN_TABLE_FILE)?;
        self.write_table(&output.classified.flagged, FLAGGED_TABLE_FILE)?;

        let report_value =
            serde_json::to_value(&output.report).map_err(|err| LoadError::ConversionError {
                file: REPORT_FILE.to_string(),
                format: "json".to_string(),
                reason: err.to_string(),
            })?;
        let report_file =
            File::create(self.output_dir.join(REPORT_FILE)).map_err(|err| LoadError::CantStore {
                file: REPORT_FILE.to_string(),
                reason: err.to_string(),
            })?;
        serde_json::to_writer_pretty(report_file, &report_value).map_err(|err| {
            LoadError::CantStore {
                file: REPORT_FILE.to_string(),
                reason: err.to_string(),
            }
        })?;

        info!("Stored report of run to {}", self.output_dir.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::CohortReport;
    use crate::config::{ColumnSchema, FilterConfig, LabelTable};
    use crate::transform::TransformerModule;
    use crate::transform::strategies::{DurationStrategy, LineResolutionStrategy};
    use crate::validation::ValidityClassifier;
    use polars::df;
    use rstest::{fixture, rstest};
    use serde_json::Value;
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temporary directory")
    }

    #[fixture]
    fn output() -> PipelineOutput {
        let df = df!(
            "1L_Fecha inicio" => &[Some("2020-01-01"), None],
            "1L_Fecha progresión" => &[Some("2020-07-01"), None],
            "Fecha Fallecimiento" => &[Some("2021-01-01"), None],
        )
        .unwrap();
        let mut table = PatientTable::new(ColumnSchema::default(), df).unwrap();
        TransformerModule::new(vec![
            Box::new(LineResolutionStrategy::new()),
            Box::new(DurationStrategy::new()),
        ])
        .run(&mut table)
        .unwrap();

        let classified = ValidityClassifier::new().classify(&table).unwrap();
        let report = CohortReport::build(
            &classified.clean,
            classified.flagged.height(),
            &LabelTable::default_sex(),
            &FilterConfig::default(),
        )
        .unwrap();
        PipelineOutput { classified, report }
    }

    #[rstest]
    fn test_report_loader_writes_files(temp_dir: TempDir, output: PipelineOutput) {
        let out_dir = temp_dir.path().join("nested").join("run");
        let loader = ReportLoader::new(out_dir.clone(), true);

        loader.load(&output).expect("load should succeed");

        let clean = fs::read_to_string(out_dir.join(CLEAN_TABLE_FILE)).unwrap();
        assert!(clean.lines().next().unwrap().contains("last_line_reached"));
        assert_eq!(clean.lines().count(), 2);

        let flagged = fs::read_to_string(out_dir.join(FLAGGED_TABLE_FILE)).unwrap();
        assert!(flagged.contains("no treatment line could be resolved"));

        let report: Value =
            serde_json::from_str(&fs::read_to_string(out_dir.join(REPORT_FILE)).unwrap()).unwrap();
        assert_eq!(report["flagged_patients"], 1);
        assert_eq!(report["summary"]["total_patients"], 1);
    }

    #[rstest]
    fn test_report_loader_without_directory(temp_dir: TempDir, output: PipelineOutput) {
        let loader = ReportLoader::new(temp_dir.path().join("missing"), false);

        assert!(matches!(
            loader.load(&output),
            Err(LoadError::CantStore { file, .. }) if file == CLEAN_TABLE_FILE
        ));
    }
}
