use crate::constants::{LAST_LINE_REACHED, TREATMENT_LINES};
use crate::extract::PatientTable;
use crate::transform::error::StrategyError;
use crate::transform::strategies::utils::write_column;
use crate::transform::traits::Strategy;
use chrono::NaiveDate;
use log::{info, warn};
use polars::prelude::{NamedFrom, Series};

/// Derives `last_line_reached`: the highest treatment line with a start date.
///
/// Lines are examined from the fourth down to the first and the first line whose start
/// date parses wins. Patients without any start date get `0`, which marks them as unresolved.
#[derive(Debug, Default)]
pub struct LineResolutionStrategy;

impl LineResolutionStrategy {
    pub fn new() -> Self {
        Self
    }
}

/// `start_dates[i]` is the start date of line `i + 1`.
pub fn resolve_last_line(start_dates: &[Option<NaiveDate>]) -> i64 {
    start_dates
        .iter()
        .zip(TREATMENT_LINES)
        .rev()
        .find_map(|(start, line)| start.map(|_| line as i64))
        .unwrap_or(0)
}

impl Strategy for LineResolutionStrategy {
    fn is_valid(&self, table: &PatientTable) -> bool {
        let start_columns_present = TREATMENT_LINES
            .iter()
            .any(|line| table.has_column(&table.schema().line_start_col(*line)));
        if !start_columns_present {
            warn!("No treatment line start column was found. Every patient will be unresolved.");
        }
        true
    }

    fn internal_transform(&self, table: &mut PatientTable) -> Result<(), StrategyError> {
        info!("Applying LineResolution strategy.");

        let starts_per_line: Vec<Vec<Option<NaiveDate>>> = TREATMENT_LINES
            .iter()
            .map(|line| table.dates(&table.schema().line_start_col(*line)))
            .collect();

        let last_lines: Vec<i64> = (0..table.height())
            .map(|row| {
                let row_starts: Vec<Option<NaiveDate>> =
                    starts_per_line.iter().map(|starts| starts[row]).collect();
                resolve_last_line(&row_starts)
            })
            .collect();

        let unresolved = last_lines.iter().filter(|line| **line == 0).count();
        if unresolved > 0 {
            warn!("{unresolved} patients have no treatment line with a start date.");
        }

        write_column::<Self>(table, Series::new(LAST_LINE_REACHED.into(), last_lines))
    }
}
