use crate::config::FilterConfig;
use crate::extract::PatientTable;
use crate::filter::error::FilterError;
use chrono::NaiveDate;
use log::info;
use validator::Validate;

/// Restricts the patient table to the cohort described by a `FilterConfig`.
///
/// The filter is applied to the derived table, so regimen selection compares against
/// normalized labels. Filtering only ever removes rows.
#[derive(Debug, Clone, PartialEq)]
pub struct CohortFilter {
    config: FilterConfig,
}

impl CohortFilter {
    pub fn new(config: FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn keeps(&self, metastatic_diagnosis: Option<NaiveDate>, line1_regimen: Option<&str>) -> bool {
        let in_range = match &self.config.date_range {
            Some(range) => metastatic_diagnosis.is_some_and(|date| range.contains(&date)),
            None => true,
        };
        let selected = match &self.config.selected_regimens {
            Some(regimens) => line1_regimen.is_some_and(|regimen| regimens.contains(regimen)),
            None => true,
        };
        in_range && selected
    }

    pub fn apply(&self, table: &PatientTable) -> Result<PatientTable, FilterError> {
        if self.config.is_unrestricted() {
            return Ok(table.clone());
        }

        let schema = table.schema();
        let diagnoses = table.dates(&schema.metastatic_diagnosis_date);
        let regimens = table.strings(&schema.line_regimen_col(1));

        let mask: Vec<bool> = diagnoses
            .iter()
            .zip(&regimens)
            .map(|(diagnosis, regimen)| self.keeps(*diagnosis, regimen.as_deref()))
            .collect();

        let filtered = table.filter_rows(&mask)?;
        info!(
            "Cohort filter kept {} of {} patients.",
            filtered.height(),
            table.height()
        );
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnSchema, DateRange};
    use polars::df;
    use rstest::{fixture, rstest};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[fixture]
    fn table() -> PatientTable {
        let df = df!(
            "Fecha Diagnostico Mts" => &[Some("2018-03-01"), Some("2016-05-01"), None, Some("2020-01-01")],
            "1L_Esquema" => &[Some("FFX"), Some("FFX"), Some("Gem-Nab"), None],
        )
        .unwrap();
        PatientTable::new(ColumnSchema::default(), df).unwrap()
    }

    #[rstest]
    fn test_unrestricted_keeps_everything(table: PatientTable) {
        let filter = CohortFilter::new(FilterConfig::default()).unwrap();
        assert_eq!(filter.apply(&table).unwrap(), table);
    }

    #[rstest]
    fn test_date_range_drops_missing_dates(table: PatientTable) {
        let filter = CohortFilter::new(
            FilterConfig::default()
                .with_date_range(DateRange::new(date(2017, 1, 1), date(2022, 12, 31))),
        )
        .unwrap();

        let filtered = filter.apply(&table).unwrap();
        assert_eq!(filtered.row_indices().unwrap(), vec![0, 3]);
    }

    #[rstest]
    fn test_selected_regimens(table: PatientTable) {
        let filter =
            CohortFilter::new(FilterConfig::default().with_selected_regimens(["Gem-Nab"])).unwrap();

        let filtered = filter.apply(&table).unwrap();
        assert_eq!(filtered.row_indices().unwrap(), vec![2]);
    }

    #[rstest]
    fn test_both_restrictions(table: PatientTable) {
        let filter = CohortFilter::new(
            FilterConfig::default()
                .with_date_range(DateRange::new(date(2015, 1, 1), date(2019, 1, 1)))
                .with_selected_regimens(["FFX", "GEMOX"]),
        )
        .unwrap();

        let filtered = filter.apply(&table).unwrap();
        assert_eq!(filtered.row_indices().unwrap(), vec![0, 1]);
        assert!(filtered.height() <= table.height());
    }

    #[rstest]
    fn test_inverted_range_is_rejected() {
        let result = CohortFilter::new(
            FilterConfig::default()
                .with_date_range(DateRange::new(date(2022, 1, 1), date(2017, 1, 1))),
        );
        assert!(matches!(result, Err(FilterError::InvalidConfig(_))));
    }
}
