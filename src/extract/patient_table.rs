use crate::config::ColumnSchema;
use crate::constants::ROW_INDEX;
use crate::utils::{
    any_value_to_code, any_value_to_date, any_value_to_f64, any_value_to_label,
    any_value_to_string,
};
use chrono::NaiveDate;
use log::warn;
use polars::prelude::{
    AnyValue, BooleanChunked, DataFrame, IntoColumn, NamedFrom, NewChunkedArray, PolarsError,
    Series,
};

/// A structure that combines the patient `DataFrame` with the `ColumnSchema` naming its source columns.
///
/// Every row is one patient. Rows are identified by the `row_index` column, which is
/// attached on construction and survives every later filter or partition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatientTable {
    schema: ColumnSchema,
    data: DataFrame,
}

impl PatientTable {
    pub fn new(schema: ColumnSchema, mut data: DataFrame) -> Result<Self, PolarsError> {
        if data.column(ROW_INDEX).is_err() {
            let row_index: Vec<u32> = (0..data.height() as u32).collect();
            data.with_column(Series::new(ROW_INDEX.into(), row_index))?;
        }
        Ok(PatientTable { schema, data })
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    pub fn into_data(self) -> DataFrame {
        self.data
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn has_column(&self, col_name: &str) -> bool {
        self.data.column(col_name).is_ok()
    }

    /// Zero based row indices of the patients in this table.
    pub fn row_indices(&self) -> Result<Vec<u32>, PolarsError> {
        Ok(self
            .data
            .column(ROW_INDEX)?
            .u32()?
            .into_iter()
            .flatten()
            .collect())
    }

    /// Parses every cell of a column as a date.
    ///
    /// Unparseable cells become `None`. A column that does not exist yields a vector of `None`.
    pub fn dates(&self, col_name: &str) -> Vec<Option<NaiveDate>> {
        self.map_cells(col_name, any_value_to_date)
    }

    pub fn numbers(&self, col_name: &str) -> Vec<Option<f64>> {
        self.map_cells(col_name, any_value_to_f64)
    }

    pub fn codes(&self, col_name: &str) -> Vec<Option<i64>> {
        self.map_cells(col_name, any_value_to_code)
    }

    pub fn strings(&self, col_name: &str) -> Vec<Option<String>> {
        self.map_cells(col_name, any_value_to_string)
    }

    /// Reads a categorical column as text, rendering integer codes without a decimal part.
    pub fn labels(&self, col_name: &str) -> Vec<Option<String>> {
        self.map_cells(col_name, any_value_to_label)
    }

    /// Reads a column the pipeline derived itself. Unlike the source readers this fails on absence.
    pub fn derived_i64(&self, col_name: &str) -> Result<Vec<Option<i64>>, PolarsError> {
        Ok(self.data.column(col_name)?.i64()?.into_iter().collect())
    }

    pub fn derived_f64(&self, col_name: &str) -> Result<Vec<Option<f64>>, PolarsError> {
        Ok(self.data.column(col_name)?.f64()?.into_iter().collect())
    }

    pub fn derived_bool(&self, col_name: &str) -> Result<Vec<Option<bool>>, PolarsError> {
        Ok(self.data.column(col_name)?.bool()?.into_iter().collect())
    }

    pub fn derived_str(&self, col_name: &str) -> Result<Vec<Option<String>>, PolarsError> {
        Ok(self
            .data
            .column(col_name)?
            .str()?
            .into_iter()
            .map(|s| s.map(str::to_string))
            .collect())
    }

    /// Adds the series as a new column, or replaces the column of the same name in place.
    pub fn upsert_column(&mut self, series: Series) -> Result<&mut Self, PolarsError> {
        self.data.with_column(series.into_column())?;
        Ok(self)
    }

    /// Returns a new table containing only the rows where `mask` is true.
    pub fn filter_rows(&self, mask: &[bool]) -> Result<PatientTable, PolarsError> {
        let mask = BooleanChunked::from_slice("mask".into(), mask);
        Ok(PatientTable {
            schema: self.schema.clone(),
            data: self.data.filter(&mask)?,
        })
    }

    fn map_cells<T: Clone>(
        &self,
        col_name: &str,
        convert: impl Fn(&AnyValue) -> Option<T>,
    ) -> Vec<Option<T>> {
        match self.data.column(col_name) {
            // Series::iter requires a single chunk. The CSV reader yields several.
            Ok(column) => column
                .as_materialized_series()
                .rechunk()
                .iter()
                .map(|value| convert(&value))
                .collect(),
            Err(_) => {
                warn!("Column '{col_name}' was not found in the patient table. Treating it as empty.");
                vec![None; self.height()]
            }
        }
    }
}
