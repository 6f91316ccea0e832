use crate::extract::error::ExtractionError;
use crate::extract::extraction_config::ExtractionConfig;
use crate::extract::utils::resolve_headers;
use calamine::{Data, Range};
use log::{debug, info, warn};
use polars::datatypes::AnyValue;
use polars::frame::DataFrame;
use polars::prelude::TimeUnit::Milliseconds;
use polars::prelude::{Column, IntoColumn, NamedFrom, Series};

pub struct ExcelRangeReader {
    pub range: Range<Data>,
    pub extraction_config: ExtractionConfig,
}

impl ExcelRangeReader {
    pub(crate) fn new(range: Range<Data>, extraction_config: ExtractionConfig) -> Self {
        ExcelRangeReader {
            range,
            extraction_config,
        }
    }

    pub fn extract_to_df(&self) -> Result<DataFrame, ExtractionError> {
        let sheet_name = self.extraction_config.display_name().to_string();
        if self.range.is_empty() {
            return Err(ExtractionError::EmptyTable(sheet_name));
        }

        let mut rows = self.range.rows().skip(self.rows_above_header());
        let header_cells = rows.next().ok_or(ExtractionError::MissingHeaderRow {
            table: sheet_name.clone(),
            header_row: self.extraction_config.header_row,
        })?;
        let headers = resolve_headers(
            header_cells.iter().map(Self::header_cell_to_string).collect(),
            &sheet_name,
        );

        let mut loading_vectors = self.create_loading_vectors(headers.len());
        self.load_data_to_vectors(rows, &mut loading_vectors)?;
        let columns = self.convert_vectors_to_columns(headers, loading_vectors);
        let dataframe = DataFrame::new(columns)?;
        Ok(dataframe)
    }

    /// The configured header row is an absolute sheet row, while the range starts at
    /// the first non-empty cell of the worksheet.
    fn rows_above_header(&self) -> usize {
        let range_start_row = self.range.start().map(|(row, _)| row as usize).unwrap_or(0);
        self.extraction_config
            .header_row
            .saturating_sub(range_start_row)
    }

    fn create_loading_vectors(&'_ self, number_of_vecs: usize) -> Vec<Vec<AnyValue<'_>>> {
        let loading_vector_capacity = self.range.height();
        (0..number_of_vecs)
            .map(|_| Vec::with_capacity(loading_vector_capacity))
            .collect()
    }

    fn load_data_to_vectors<'a>(
        &'a self,
        rows: impl Iterator<Item = &'a [Data]>,
        loading_vectors: &mut [Vec<AnyValue<'a>>],
    ) -> Result<(), ExtractionError> {
        let sheet_name = self.extraction_config.display_name();
        for (row_index, row) in rows.enumerate() {
            if row.iter().all(|cell| matches!(cell, Data::Empty)) {
                debug!("Skipping empty row {row_index} in Excel Worksheet {sheet_name}.");
                continue;
            }

            for (col_index, cell_data) in row.iter().enumerate() {
                let vector_to_load = loading_vectors
                    .get_mut(col_index)
                    .ok_or(ExtractionError::ExcelIndexing(col_index, sheet_name.to_string()))?;

                let value = match *cell_data {
                    Data::Empty => AnyValue::Null,
                    Data::Int(ref i) => AnyValue::Int64(*i),
                    Data::Bool(ref b) => AnyValue::Boolean(*b),
                    Data::Error(ref e) => {
                        warn!(
                            "An error {e} in Excel Worksheet {sheet_name} was found at row {row_index}, column {col_index}."
                        );
                        AnyValue::Null
                    }
                    Data::Float(ref f) => AnyValue::Float64(*f),
                    Data::DateTime(ref d) => match d.as_datetime() {
                        Some(dt) if d.is_datetime() => {
                            AnyValue::Datetime(dt.and_utc().timestamp_millis(), Milliseconds, None)
                        }
                        _ => {
                            warn!(
                                "Could not interpret Excel DateTime in worksheet {sheet_name} at row {row_index}, column {col_index}. Entry converted to f64."
                            );
                            AnyValue::Float64(d.as_f64())
                        }
                    },
                    Data::String(ref s) | Data::DateTimeIso(ref s) | Data::DurationIso(ref s) => {
                        AnyValue::String(s)
                    }
                };
                vector_to_load.push(value);
            }
        }

        Ok(())
    }

    fn convert_vectors_to_columns(
        &self,
        headers: Vec<String>,
        loading_vectors: Vec<Vec<AnyValue>>,
    ) -> Vec<Column> {
        headers
            .into_iter()
            .zip(loading_vectors.iter())
            .map(|(header, data)| {
                let series_result = if Self::has_mixed_kinds(data) {
                    Err(())
                } else {
                    Series::from_any_values(header.clone().into(), data, false).map_err(|_| ())
                };

                //if the values can not be converted to a single type
                //we stringify the data to create the series
                let series = series_result.unwrap_or_else(|_| {
                    info!(
                        "Column {} in Excel Worksheet {} contained multiple data types. These have been turned into strings.",
                        header,
                        self.extraction_config.display_name()
                    );
                    let stringified_col_data: Vec<Option<String>> = data
                        .iter()
                        .map(|d| match d {
                            AnyValue::Null => None,
                            AnyValue::String(s) => Some(s.to_string()),
                            other => Some(other.to_string()),
                        })
                        .collect();
                    Series::new(header.into(), stringified_col_data)
                });

                series.into_column()
            })
            .collect()
    }

    /// True if a column mixes text, numbers, booleans or timestamps.
    fn has_mixed_kinds(data: &[AnyValue]) -> bool {
        let mut kinds = data.iter().filter_map(|value| match value {
            AnyValue::Null => None,
            AnyValue::String(_) => Some(0u8),
            AnyValue::Int64(_) | AnyValue::Float64(_) => Some(1),
            AnyValue::Boolean(_) => Some(2),
            _ => Some(3),
        });
        match kinds.next() {
            Some(first) => kinds.any(|kind| kind != first),
            None => false,
        }
    }

    fn header_cell_to_string(cell: &Data) -> Option<String> {
        match cell {
            Data::Empty | Data::Error(_) => None,
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
            Data::Int(i) => Some(i.to_string()),
            Data::Float(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
            Data::Float(f) => Some(f.to_string()),
            Data::Bool(b) => Some(b.to_string()),
            Data::DateTime(d) => d.as_datetime().map(|dt| dt.date().to_string()),
        }
    }
}
