use crate::extract::PatientTable;
use crate::transform::error::StrategyError;
use std::fmt::Debug;

/// A single derivation step over the patient table.
///
/// Strategies read source columns through the table's `ColumnSchema` and only ever
/// add or replace columns. They never add, drop or reorder rows.
pub trait Strategy: Debug {
    fn transform(&self, table: &mut PatientTable) -> Result<(), StrategyError> {
        match self.is_valid(table) {
            true => self.internal_transform(table),
            false => Ok(()),
        }
    }

    fn is_valid(&self, table: &PatientTable) -> bool;

    fn internal_transform(&self, table: &mut PatientTable) -> Result<(), StrategyError>;
}
