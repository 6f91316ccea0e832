use crate::constants::{
    AGE, DAYS_PER_MONTH, DAYS_PER_YEAR, FINAL_CONTACT, IS_DEAD, LINE1_PFS_MONTHS,
    OVERALL_SURVIVAL_DAYS, TREATMENT_LINES, pfs_days_col, survival_months_col,
};
use crate::extract::PatientTable;
use crate::transform::error::StrategyError;
use crate::transform::strategies::utils::write_column;
use crate::transform::traits::Strategy;
use chrono::NaiveDate;
use log::info;
use polars::prelude::{NamedFrom, Series};

/// Whole days from `start` to `end`. Negative when `end` precedes `start`.
pub fn days_between(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Option<i64> {
    Some((end? - start?).num_days())
}

/// Days from the first line start to death.
///
/// Patients without a death date get exactly `0`. A death date without a first line start
/// yields `None`.
pub fn overall_survival_days(
    line1_start: Option<NaiveDate>,
    death: Option<NaiveDate>,
) -> Option<i64> {
    match death {
        None => Some(0),
        Some(_) => days_between(line1_start, death),
    }
}

pub fn final_contact(death: Option<NaiveDate>, last_contact: Option<NaiveDate>) -> Option<NaiveDate> {
    death.or(last_contact)
}

pub fn days_to_months(days: Option<i64>) -> Option<f64> {
    days.map(|days| days as f64 / DAYS_PER_MONTH)
}

pub fn age_in_years(birth: Option<NaiveDate>, diagnosis: Option<NaiveDate>) -> Option<f64> {
    days_between(birth, diagnosis).map(|days| days as f64 / DAYS_PER_YEAR)
}

/// Derives every duration column of the patient table from the source date columns.
///
/// Per line this writes the progression free days and the months from the line start to the
/// final contact. Per patient it writes overall survival, vital status, the final contact
/// date, first line progression free months (censored at the final contact) and age at
/// diagnosis.
#[derive(Debug, Default)]
pub struct DurationStrategy;

impl DurationStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for DurationStrategy {
    fn is_valid(&self, _table: &PatientTable) -> bool {
        true
    }

    fn internal_transform(&self, table: &mut PatientTable) -> Result<(), StrategyError> {
        info!("Applying Duration strategy.");
        let schema = table.schema().clone();

        let deaths = table.dates(&schema.death_date);
        let last_contacts = table.dates(&schema.last_contact_date);
        let final_contacts: Vec<Option<NaiveDate>> = deaths
            .iter()
            .zip(&last_contacts)
            .map(|(death, last_contact)| final_contact(*death, *last_contact))
            .collect();

        let mut line1_starts = vec![None; table.height()];
        let mut line1_progressions = vec![None; table.height()];

        for line in TREATMENT_LINES {
            let starts = table.dates(&schema.line_start_col(line));
            let progressions = table.dates(&schema.line_progression_col(line));

            let pfs_days: Vec<Option<i64>> = starts
                .iter()
                .zip(&progressions)
                .map(|(start, progression)| days_between(*start, *progression))
                .collect();
            let survival_months: Vec<Option<f64>> = starts
                .iter()
                .zip(&final_contacts)
                .map(|(start, contact)| days_to_months(days_between(*start, *contact)))
                .collect();

            write_column::<Self>(table, Series::new(pfs_days_col(line).into(), pfs_days))?;
            write_column::<Self>(
                table,
                Series::new(survival_months_col(line).into(), survival_months),
            )?;

            if line == 1 {
                line1_starts = starts;
                line1_progressions = progressions;
            }
        }

        let overall_survival: Vec<Option<i64>> = line1_starts
            .iter()
            .zip(&deaths)
            .map(|(start, death)| overall_survival_days(*start, *death))
            .collect();
        let is_dead: Vec<bool> = deaths.iter().map(Option::is_some).collect();
        let final_contact_text: Vec<Option<String>> = final_contacts
            .iter()
            .map(|contact| contact.map(|date| date.format("%Y-%m-%d").to_string()))
            .collect();
        let line1_pfs_months: Vec<Option<f64>> = line1_starts
            .iter()
            .zip(line1_progressions.iter().zip(&final_contacts))
            .map(|(start, (progression, contact))| {
                days_to_months(days_between(*start, progression.or(*contact)))
            })
            .collect();

        let births = table.dates(&schema.birth_date);
        let diagnoses = table.dates(&schema.diagnosis_date);
        let ages: Vec<Option<f64>> = births
            .iter()
            .zip(&diagnoses)
            .map(|(birth, diagnosis)| age_in_years(*birth, *diagnosis))
            .collect();

        write_column::<Self>(table, Series::new(OVERALL_SURVIVAL_DAYS.into(), overall_survival))?;
        write_column::<Self>(table, Series::new(IS_DEAD.into(), is_dead))?;
        write_column::<Self>(table, Series::new(FINAL_CONTACT.into(), final_contact_text))?;
        write_column::<Self>(table, Series::new(LINE1_PFS_MONTHS.into(), line1_pfs_months))?;
        write_column::<Self>(table, Series::new(AGE.into(), ages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSchema;
    use polars::df;
    use rstest::{fixture, rstest};

    fn d(y: i32, m: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, day)
    }

    #[rstest]
    fn test_days_between() {
        assert_eq!(days_between(d(2020, 1, 1), d(2020, 7, 1)), Some(182));
        assert_eq!(days_between(d(2020, 7, 1), d(2020, 1, 1)), Some(-182));
        assert_eq!(days_between(d(2020, 1, 1), None), None);
        assert_eq!(days_between(None, d(2020, 1, 1)), None);
    }

    #[rstest]
    #[case(d(2020, 1, 1), d(2021, 1, 1), Some(366))]
    #[case(d(2020, 1, 1), None, Some(0))]
    #[case(None, None, Some(0))]
    #[case(None, d(2021, 1, 1), None)]
    #[case(d(2021, 1, 1), d(2020, 12, 1), Some(-31))]
    fn test_overall_survival_days(
        #[case] start: Option<NaiveDate>,
        #[case] death: Option<NaiveDate>,
        #[case] expected: Option<i64>,
    ) {
        assert_eq!(overall_survival_days(start, death), expected);
    }

    #[rstest]
    fn test_age_in_years() {
        assert_eq!(age_in_years(d(1950, 1, 1), d(1950, 1, 1)), Some(0.0));
        assert_eq!(age_in_years(d(1960, 1, 1), d(1960, 12, 31)), Some(1.0));
        assert_eq!(age_in_years(None, d(2020, 1, 1)), None);
    }

    #[fixture]
    fn table() -> PatientTable {
        let df = df!(
            "1L_Fecha inicio" => &[Some("2020-01-01"), Some("2020-01-01"), None],
            "1L_Fecha progresión" => &[Some("2020-07-01"), None, None],
            "2L_Fecha inicio" => &[Some("2020-08-01"), None, None],
            "2L_Fecha progresión" => &[Some("2020-06-01"), None, None],
            "Fecha Fallecimiento" => &[Some("2021-01-01"), None, Some("2021-01-01")],
            "Fecha ultimo contacto" => &[None, Some("15/03/2020"), None],
            "Fecha Nacimiento" => &[Some("1950-01-01"), None, None],
            "Fecha Diagnostico" => &[Some("2019-12-27"), None, None],
        )
        .unwrap();
        PatientTable::new(ColumnSchema::default(), df).unwrap()
    }

    #[rstest]
    fn test_duration_columns(mut table: PatientTable) {
        DurationStrategy::new().transform(&mut table).unwrap();

        assert_eq!(
            table.derived_i64(&pfs_days_col(1)).unwrap(),
            vec![Some(182), None, None]
        );
        assert_eq!(
            table.derived_i64(&pfs_days_col(2)).unwrap(),
            vec![Some(-61), None, None]
        );
        assert_eq!(
            table.derived_i64(&pfs_days_col(4)).unwrap(),
            vec![None, None, None]
        );
        assert_eq!(
            table.derived_i64(OVERALL_SURVIVAL_DAYS).unwrap(),
            vec![Some(366), Some(0), None]
        );
        assert_eq!(
            table.derived_bool(IS_DEAD).unwrap(),
            vec![Some(true), Some(false), Some(true)]
        );
        assert_eq!(
            table.derived_str(FINAL_CONTACT).unwrap(),
            vec![
                Some("2021-01-01".to_string()),
                Some("2020-03-15".to_string()),
                Some("2021-01-01".to_string())
            ]
        );
    }

    #[rstest]
    fn test_month_and_age_columns(mut table: PatientTable) {
        DurationStrategy::new().transform(&mut table).unwrap();

        let line1_survival = table.derived_f64(&survival_months_col(1)).unwrap();
        assert_eq!(line1_survival[0], Some(366.0 / DAYS_PER_MONTH));
        assert_eq!(line1_survival[1], Some(74.0 / DAYS_PER_MONTH));
        assert_eq!(line1_survival[2], None);

        let line1_pfs = table.derived_f64(LINE1_PFS_MONTHS).unwrap();
        assert_eq!(line1_pfs[0], Some(182.0 / DAYS_PER_MONTH));
        assert_eq!(line1_pfs[1], Some(74.0 / DAYS_PER_MONTH));
        assert_eq!(line1_pfs[2], None);

        let ages = table.derived_f64(AGE).unwrap();
        assert_eq!(ages[0], Some(25562.0 / DAYS_PER_YEAR));
        assert_eq!(ages[1], None);
    }
}
