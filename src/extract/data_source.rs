use crate::config::DataSourceConfig;
use crate::extract::csv_data_source::CsvDataSource;
use crate::extract::error::ExtractionError;
use crate::extract::excel_data_source::ExcelDataSource;
use crate::extract::excel_range_reader::ExcelRangeReader;
use crate::extract::traits::Extractable;
use calamine::{Reader, Xlsx, open_workbook};
use log::info;
use polars::io::SerReader;
use polars::prelude::{CsvReadOptions, DataFrame};
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

/// An enumeration of all supported data source types.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    Csv(CsvDataSource),
    Excel(ExcelDataSource),
}

impl From<DataSourceConfig> for DataSource {
    fn from(config: DataSourceConfig) -> Self {
        match config {
            DataSourceConfig::Csv(csv) => DataSource::Csv(csv.into()),
            DataSourceConfig::Excel(excel) => DataSource::Excel(excel.into()),
        }
    }
}

impl DataSource {
    fn extract_csv(csv_source: &CsvDataSource) -> Result<DataFrame, ExtractionError> {
        info!(
            "Attempting to extract CSV data from: {}",
            csv_source.source.display()
        );

        // Every column is read as text. Cells are coerced leniently by the patient table.
        let mut csv_read_options = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_skip_rows(csv_source.header_row);

        if let Some(sep) = csv_source.separator {
            let new_parse_options = (*csv_read_options.parse_options)
                .clone()
                .with_separator(sep as u8);
            csv_read_options.parse_options = Arc::from(new_parse_options);
        }

        let csv_data = csv_read_options
            .try_into_reader_with_file_path(Some(csv_source.source.clone()))?
            .finish()?;

        if csv_data.width() == 0 {
            return Err(ExtractionError::EmptyTable(
                csv_source.source.display().to_string(),
            ));
        }

        info!(
            "Extracted {} rows of CSV data from {}",
            csv_data.height(),
            csv_source.source.display()
        );
        Ok(csv_data)
    }

    fn extract_excel(excel_source: &ExcelDataSource) -> Result<DataFrame, ExtractionError> {
        info!(
            "Attempting to extract Excel data from: {}",
            excel_source.source.display()
        );

        let mut workbook: Xlsx<BufReader<File>> = open_workbook(excel_source.source.clone())?;

        let sheet_name = match &excel_source.extraction_config.name {
            Some(name) => name.clone(),
            None => workbook.sheet_names().first().cloned().ok_or_else(|| {
                ExtractionError::EmptyWorkbook(excel_source.source.display().to_string())
            })?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|_| ExtractionError::SheetNotFound(sheet_name.clone()))?;

        let mut extraction_config = excel_source.extraction_config.clone();
        extraction_config.name = Some(sheet_name.clone());

        let sheet_data = ExcelRangeReader::new(range, extraction_config).extract_to_df()?;

        info!(
            "Extracted {} rows from Excel Worksheet {} in Excel Workbook {}",
            sheet_data.height(),
            sheet_name,
            excel_source.source.display()
        );
        Ok(sheet_data)
    }
}

impl Extractable for DataSource {
    fn extract(&self) -> Result<DataFrame, ExtractionError> {
        match self {
            DataSource::Csv(csv_source) => Self::extract_csv(csv_source),
            DataSource::Excel(excel_source) => Self::extract_excel(excel_source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extraction_config::ExtractionConfig;
    use rstest::{fixture, rstest};
    use rust_xlsxwriter::Workbook;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    #[fixture]
    fn temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temporary directory")
    }

    #[rstest]
    fn test_extract_csv_with_title_row(temp_dir: TempDir) {
        let file_path = temp_dir.path().join("patients.csv");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(
            "Cohort export 2023\n1L_Fecha inicio;1L_Esquema;PS\n2020-01-01;1;0\n2021-05-03;2;1\n"
                .as_bytes(),
        )
        .unwrap();

        let source = DataSource::Csv(CsvDataSource::new(file_path, Some(';'), 1));
        let df = source.extract().unwrap();

        assert_eq!(df.get_column_names(), ["1L_Fecha inicio", "1L_Esquema", "PS"]);
        assert_eq!(df.height(), 2);
    }

    #[rstest]
    fn test_extract_csv_with_late_text_in_numeric_column(temp_dir: TempDir) {
        let file_path = temp_dir.path().join("patients.csv");
        let mut content = String::from("1L_Fecha inicio,1L_Esquema,CA 19-9 basal (U/mL)\n");
        for _ in 0..150 {
            content.push_str("2020-01-01,1,12\n");
        }
        content.push_str("2020-01-01,NA,>1000\n");
        std::fs::write(&file_path, content).unwrap();

        let source = DataSource::Csv(CsvDataSource::new(file_path, None, 0));
        let df = source.extract().unwrap();

        assert_eq!(df.height(), 151);
        let regimens = df.column("1L_Esquema").unwrap().str().unwrap();
        assert_eq!(regimens.get(0), Some("1"));
        assert_eq!(regimens.get(150), Some("NA"));
    }

    #[rstest]
    fn test_extract_excel_first_sheet(temp_dir: TempDir) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet().set_name("Hoja1").unwrap();
        worksheet.write_row(0, 0, ["Sexo", "PS"]).unwrap();
        worksheet.write_row(1, 0, [1, 0]).unwrap();
        worksheet.write_row(2, 0, [2, 1]).unwrap();
        let file_path = temp_dir.path().join("patients.xlsx");
        workbook.save(&file_path).unwrap();

        let source = DataSource::Excel(ExcelDataSource::new(file_path, ExtractionConfig::default()));
        let df = source.extract().unwrap();

        assert_eq!(df.get_column_names(), ["Sexo", "PS"]);
        assert_eq!(df.height(), 2);
    }

    #[rstest]
    fn test_extract_excel_missing_sheet(temp_dir: TempDir) {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name("Hoja1").unwrap();
        let file_path = temp_dir.path().join("patients.xlsx");
        workbook.save(&file_path).unwrap();

        let source = DataSource::Excel(ExcelDataSource::new(
            file_path,
            ExtractionConfig::new(Some("Sheet42".to_string()), 0),
        ));

        assert!(matches!(
            source.extract(),
            Err(ExtractionError::SheetNotFound(name)) if name == "Sheet42"
        ));
    }

    #[rstest]
    fn test_extract_missing_workbook(temp_dir: TempDir) {
        let source = DataSource::Excel(ExcelDataSource::new(
            temp_dir.path().join("nothing_here.xlsx"),
            ExtractionConfig::default(),
        ));
        assert!(source.extract().is_err());
    }
}
