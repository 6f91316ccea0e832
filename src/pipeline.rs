use crate::analysis::CohortReport;
use crate::config::{ColumnSchema, LabelTable, OncoXtractConfig};
use crate::error::{ConstructionError, PipelineError};
use crate::extract::PatientTable;
use crate::extract::error::ExtractionError;
use crate::extract::traits::Extractable;
use crate::filter::CohortFilter;
use crate::load::ReportLoader;
use crate::load::traits::Loadable;
use crate::transform::TransformerModule;
use crate::transform::strategies::{
    CodeLabelStrategy, CodedField, DurationStrategy, LineResolutionStrategy,
    MetastaticStatusStrategy, TumorMarkerStatusStrategy,
};
use crate::transform::traits::Strategy;
use crate::validation::{ClassifiedTables, ValidityClassifier};
use log::info;
use validator::Validate;

/// Everything a single run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub classified: ClassifiedTables,
    pub report: CohortReport,
}

/// The forward pass from a raw table to classified tables and a report.
///
/// extract -> transform -> filter -> classify -> analyze -> load
#[derive(Debug)]
pub struct Pipeline {
    pub(crate) schema: ColumnSchema,
    pub(crate) transformer_module: TransformerModule,
    pub(crate) cohort_filter: CohortFilter,
    pub(crate) classifier: ValidityClassifier,
    pub(crate) sex_table: LabelTable,
    pub(crate) loader_module: Box<dyn Loadable>,
}

impl Pipeline {
    pub fn new(
        schema: ColumnSchema,
        transformer_module: TransformerModule,
        cohort_filter: CohortFilter,
        sex_table: LabelTable,
        loader_module: Box<dyn Loadable>,
    ) -> Pipeline {
        Pipeline {
            schema,
            transformer_module,
            cohort_filter,
            classifier: ValidityClassifier::new(),
            sex_table,
            loader_module,
        }
    }

    pub fn add_strategy(&mut self, strategy: Box<dyn Strategy>) {
        self.transformer_module.add_strategy(strategy);
    }

    /// Runs every stage. The output is only written when `write` is set.
    pub fn run(
        &self,
        extractable: &impl Extractable,
        write: bool,
    ) -> Result<PipelineOutput, PipelineError> {
        let mut table = self.extract(extractable)?;
        self.transform(&mut table)?;
        let cohort = self.filter(&table)?;
        let classified = self.classify(&cohort)?;
        let report = self.analyze(&classified)?;

        let output = PipelineOutput { classified, report };
        if write {
            self.load(&output)?;
        } else {
            info!("Skipping loading. Nothing was written.");
        }
        Ok(output)
    }

    pub fn extract(&self, extractable: &impl Extractable) -> Result<PatientTable, PipelineError> {
        info!("Starting extract");
        let data = extractable.extract()?;
        let table =
            PatientTable::new(self.schema.clone(), data).map_err(ExtractionError::from)?;
        info!(
            "Concluded extraction. Extracted {} patients with {} columns",
            table.height(),
            table.data().width()
        );
        Ok(table)
    }

    pub fn transform(&self, table: &mut PatientTable) -> Result<(), PipelineError> {
        info!(
            "Starting Transformation with {} strategies",
            self.transformer_module.len()
        );
        self.transformer_module.run(table)?;
        info!("Concluded Transformation");
        Ok(())
    }

    pub fn filter(&self, table: &PatientTable) -> Result<PatientTable, PipelineError> {
        Ok(self.cohort_filter.apply(table)?)
    }

    pub fn classify(&self, table: &PatientTable) -> Result<ClassifiedTables, PipelineError> {
        Ok(self.classifier.classify(table)?)
    }

    pub fn analyze(&self, classified: &ClassifiedTables) -> Result<CohortReport, PipelineError> {
        let report = CohortReport::build(
            &classified.clean,
            classified.flagged.height(),
            &self.sex_table,
            self.cohort_filter.config(),
        )?;
        info!("Concluded analysis");
        Ok(report)
    }

    pub fn load(&self, output: &PipelineOutput) -> Result<(), PipelineError> {
        self.loader_module.load(output)?;
        info!("Concluded Loading");
        Ok(())
    }
}

impl TryFrom<OncoXtractConfig> for Pipeline {
    type Error = ConstructionError;

    fn try_from(config: OncoXtractConfig) -> Result<Self, Self::Error> {
        config.validate()?;

        let regimen_table = config.labels.regimen_table()?;
        let sex_table = config.labels.sex_table()?;

        let strategies: Vec<Box<dyn Strategy>> = vec![
            Box::new(CodeLabelStrategy::new(CodedField::Regimen, regimen_table)),
            Box::new(CodeLabelStrategy::new(CodedField::Sex, sex_table.clone())),
            Box::new(MetastaticStatusStrategy::new()),
            Box::new(TumorMarkerStatusStrategy::new(
                config.derivation.tumor_marker_threshold,
            )),
            Box::new(LineResolutionStrategy::new()),
            Box::new(DurationStrategy::new()),
        ];

        Ok(Pipeline::new(
            config.columns,
            TransformerModule::new(strategies),
            CohortFilter::new(config.filter)?,
            sex_table,
            Box::new(ReportLoader::from(config.output)),
        ))
    }
}

impl PartialEq for Pipeline {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema
            && self.transformer_module == other.transformer_module
            && self.cohort_filter == other.cohort_filter
            && self.sex_table == other.sex_table
            && format!("{:?}", self.loader_module) == format!("{:?}", other.loader_module)
    }
}
