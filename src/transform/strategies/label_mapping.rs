use crate::config::{ColumnSchema, LabelTable};
use crate::constants::TREATMENT_LINES;
use crate::extract::PatientTable;
use crate::transform::error::StrategyError;
use crate::transform::strategies::utils::write_column;
use crate::transform::traits::Strategy;
use crate::utils::{any_value_to_code, any_value_to_string};
use log::{debug, info, warn};
use polars::prelude::{AnyValue, NamedFrom, Series};
use strum_macros::Display;

/// The coded categorical fields of the patient table that carry a label table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CodedField {
    Regimen,
    Sex,
}

impl CodedField {
    pub fn columns(&self, schema: &ColumnSchema) -> Vec<String> {
        match self {
            CodedField::Regimen => TREATMENT_LINES
                .iter()
                .map(|line| schema.line_regimen_col(*line))
                .collect(),
            CodedField::Sex => vec![schema.sex.clone()],
        }
    }
}

/// Replaces integer codes with the labels of a `LabelTable`.
///
/// Codes that are absent from the table are kept as their integer text, values that are not
/// codes at all are kept verbatim and nulls stay null. Mapping an already mapped column
/// therefore changes nothing.
///
/// ```ignore
/// let strategy = CodeLabelStrategy::new(CodedField::Regimen, LabelTable::default_regimens());
/// strategy.transform(&mut table)?;
/// // "1L_Esquema": [1, 4, 99, null] -> ["FFX", "FOLFOX", "99", null]
/// ```
#[derive(Debug)]
pub struct CodeLabelStrategy {
    field: CodedField,
    labels: LabelTable,
}

impl CodeLabelStrategy {
    pub fn new(field: CodedField, labels: LabelTable) -> Self {
        Self { field, labels }
    }

    pub fn map_value(&self, value: &AnyValue) -> Option<String> {
        map_code(value, &self.labels)
    }
}

/// Maps a single cell through the label table, falling back to the cell itself.
pub fn map_code(value: &AnyValue, labels: &LabelTable) -> Option<String> {
    match any_value_to_code(value) {
        Some(code) => Some(
            labels
                .get(code)
                .map(str::to_string)
                .unwrap_or_else(|| code.to_string()),
        ),
        None => any_value_to_string(value),
    }
}

impl Strategy for CodeLabelStrategy {
    fn is_valid(&self, table: &PatientTable) -> bool {
        let columns = self.field.columns(table.schema());
        let is_valid = columns.iter().any(|col_name| table.has_column(col_name));
        if !is_valid {
            warn!(
                "None of the {} columns {:?} were found. Label table '{}' was not applied.",
                self.field,
                columns,
                self.labels.name()
            );
        }
        is_valid
    }

    fn internal_transform(&self, table: &mut PatientTable) -> Result<(), StrategyError> {
        info!(
            "Applying label table '{}' to {} columns.",
            self.labels.name(),
            self.field
        );

        for col_name in self.field.columns(table.schema()) {
            let Ok(column) = table.data().column(&col_name) else {
                debug!("Column '{col_name}' is absent. Skipping label mapping for it.");
                continue;
            };

            let mapped: Vec<Option<String>> = column
                .as_materialized_series()
                .rechunk()
                .iter()
                .map(|value| self.map_value(&value))
                .collect();

            write_column::<Self>(table, Series::new(col_name.as_str().into(), mapped))?;
        }
        Ok(())
    }
}
