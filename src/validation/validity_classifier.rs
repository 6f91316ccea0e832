use crate::constants::{
    FLAG_REASONS, LAST_LINE_REACHED, OVERALL_SURVIVAL_DAYS, TREATMENT_LINES, pfs_days_col,
};
use crate::extract::PatientTable;
use crate::validation::error::ClassificationError;
use log::{info, warn};
use polars::prelude::{NamedFrom, Series};

/// The two disjoint partitions of the patient table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedTables {
    pub clean: PatientTable,
    /// Carries an additional `flag_reasons` column.
    pub flagged: PatientTable,
}

/// Splits rows with impossible derived values from the rest.
///
/// A row is flagged when no treatment line could be resolved, when any line has a negative
/// progression free duration or when overall survival is negative. Missing durations never flag a row.
#[derive(Debug, Default)]
pub struct ValidityClassifier;

impl ValidityClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Every reason that applies to a single patient. Empty for a valid row.
    pub fn flag_reasons(
        last_line_reached: Option<i64>,
        pfs_days: &[Option<i64>],
        overall_survival_days: Option<i64>,
    ) -> Vec<String> {
        let mut reasons = vec![];
        if last_line_reached.unwrap_or(0) == 0 {
            reasons.push("no treatment line could be resolved".to_string());
        }
        for (days, line) in pfs_days.iter().zip(TREATMENT_LINES) {
            if days.is_some_and(|days| days < 0) {
                reasons.push(format!("negative progression free duration on line {line}"));
            }
        }
        if overall_survival_days.is_some_and(|days| days < 0) {
            reasons.push("negative overall survival".to_string());
        }
        reasons
    }

    pub fn classify(&self, table: &PatientTable) -> Result<ClassifiedTables, ClassificationError> {
        let last_lines = Self::derived_column(table, LAST_LINE_REACHED)?;
        let overall_survival = Self::derived_column(table, OVERALL_SURVIVAL_DAYS)?;
        let pfs_per_line = TREATMENT_LINES
            .iter()
            .map(|line| Self::derived_column(table, &pfs_days_col(*line)))
            .collect::<Result<Vec<_>, _>>()?;

        let reasons: Vec<Vec<String>> = (0..table.height())
            .map(|row| {
                let row_pfs: Vec<Option<i64>> =
                    pfs_per_line.iter().map(|pfs| pfs[row]).collect();
                Self::flag_reasons(last_lines[row], &row_pfs, overall_survival[row])
            })
            .collect();

        let is_flagged: Vec<bool> = reasons.iter().map(|r| !r.is_empty()).collect();
        let is_clean: Vec<bool> = is_flagged.iter().map(|flagged| !flagged).collect();

        let clean = table.filter_rows(&is_clean)?;
        let mut flagged = table.filter_rows(&is_flagged)?;
        let flagged_reasons: Vec<String> = reasons
            .into_iter()
            .filter(|r| !r.is_empty())
            .map(|r| r.join("; "))
            .collect();
        flagged.upsert_column(Series::new(FLAG_REASONS.into(), flagged_reasons))?;

        if flagged.height() > 0 {
            warn!(
                "{} of {} patients were flagged and are excluded from the aggregates.",
                flagged.height(),
                table.height()
            );
        }
        info!(
            "Classified {} patients: {} clean, {} flagged.",
            table.height(),
            clean.height(),
            flagged.height()
        );

        Ok(ClassifiedTables { clean, flagged })
    }

    fn derived_column(
        table: &PatientTable,
        col_name: &str,
    ) -> Result<Vec<Option<i64>>, ClassificationError> {
        if !table.has_column(col_name) {
            return Err(ClassificationError::MissingDerivedColumn(col_name.to_string()));
        }
        Ok(table.derived_i64(col_name)?)
    }
}
