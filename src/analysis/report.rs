use crate::analysis::counts::{CategoryShare, CrossTab, LineReach, category_shares, cross_tab, line_reach};
use crate::analysis::distribution::{BoxSummary, GroupedBoxSummary, box_summary, box_summary_by_group};
use crate::analysis::error::AnalysisError;
use crate::analysis::summary::{CohortSummary, cohort_summary};
use crate::analysis::survival::{GroupCurve, KaplanMeierCurve, kaplan_meier, survival_by_group};
use crate::config::{FilterConfig, LabelTable};
use crate::constants::{
    AGE, IS_DEAD, LAST_LINE_REACHED, LINE1_PFS_MONTHS, METASTATIC_STATUS, OVERALL_SURVIVAL_DAYS,
    TREATMENT_LINES, TUMOR_MARKER_STATUS, pfs_days_col, survival_months_col,
};
use crate::extract::PatientTable;
use log::info;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineBoxSummary {
    pub line: u8,
    pub summary: Option<BoxSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineShares {
    pub line: u8,
    pub shares: Vec<CategoryShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSurvival {
    pub line: u8,
    pub curve: KaplanMeierCurve,
}

/// Every chart input of one run, computed over the clean partition.
///
/// Durations in box summaries are days. Survival curves run on months.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortReport {
    pub summary: CohortSummary,
    pub flagged_patients: usize,
    pub filter: FilterConfig,
    pub line_reach: Vec<LineReach>,
    pub line_by_performance_status: CrossTab,
    pub line_by_first_regimen: CrossTab,
    pub regimen_shares: Vec<LineShares>,
    pub performance_status_shares: Vec<CategoryShare>,
    pub metastatic_shares: Vec<CategoryShare>,
    pub tumor_marker_shares: Vec<CategoryShare>,
    pub progression_free_days: Vec<LineBoxSummary>,
    pub overall_survival_days_by_performance_status: Vec<GroupedBoxSummary>,
    pub survival_from_line: Vec<LineSurvival>,
    pub survival_by_first_regimen: Vec<GroupCurve>,
    pub first_line_pfs_by_regimen: Vec<GroupCurve>,
}

impl CohortReport {
    pub fn build(
        clean: &PatientTable,
        flagged_patients: usize,
        sex_table: &LabelTable,
        filter: &FilterConfig,
    ) -> Result<Self, AnalysisError> {
        info!("Building cohort report over {} clean patients.", clean.height());
        let schema = clean.schema();

        let last_lines = Self::require(clean, LAST_LINE_REACHED, PatientTable::derived_i64)?;
        let is_dead: Vec<bool> = Self::require(clean, IS_DEAD, PatientTable::derived_bool)?
            .into_iter()
            .map(|dead| dead.unwrap_or(false))
            .collect();
        let overall_survival: Vec<Option<f64>> =
            Self::require(clean, OVERALL_SURVIVAL_DAYS, PatientTable::derived_i64)?
                .into_iter()
                .map(|days| days.map(|d| d as f64))
                .collect();
        let ages = Self::require(clean, AGE, PatientTable::derived_f64)?;

        let performance_status = clean.labels(&schema.performance_status);
        let first_regimen = clean.labels(&schema.line_regimen_col(1));

        let mut regimen_shares = vec![];
        let mut progression_free_days = vec![];
        let mut survival_from_line = vec![];
        for line in TREATMENT_LINES {
            regimen_shares.push(LineShares {
                line,
                shares: category_shares(&clean.labels(&schema.line_regimen_col(line)), true),
            });

            let pfs_days: Vec<Option<f64>> =
                Self::require(clean, &pfs_days_col(line), PatientTable::derived_i64)?
                    .into_iter()
                    .map(|days| days.map(|d| d as f64))
                    .collect();
            progression_free_days.push(LineBoxSummary {
                line,
                summary: box_summary(&pfs_days),
            });

            let months = Self::require(clean, &survival_months_col(line), PatientTable::derived_f64)?;
            let observations: Vec<(Option<f64>, bool)> =
                months.into_iter().zip(is_dead.iter().copied()).collect();
            survival_from_line.push(LineSurvival {
                line,
                curve: kaplan_meier(&observations),
            });
        }

        let deceased_survival: Vec<Option<f64>> = overall_survival
            .iter()
            .zip(&is_dead)
            .map(|(days, dead)| if *dead { *days } else { None })
            .collect();

        let line1_survival_months =
            Self::require(clean, &survival_months_col(1), PatientTable::derived_f64)?;
        let line1_pfs_months = Self::require(clean, LINE1_PFS_MONTHS, PatientTable::derived_f64)?;
        let line1_progressed: Vec<bool> = clean
            .dates(&schema.line_progression_col(1))
            .iter()
            .map(Option::is_some)
            .collect();

        Ok(CohortReport {
            summary: cohort_summary(&ages, &clean.labels(&schema.sex), sex_table),
            flagged_patients,
            filter: filter.clone(),
            line_reach: line_reach(&last_lines),
            line_by_performance_status: cross_tab(&last_lines, &performance_status),
            line_by_first_regimen: cross_tab(&last_lines, &first_regimen),
            regimen_shares,
            performance_status_shares: category_shares(&performance_status, false),
            metastatic_shares: category_shares(&clean.labels(METASTATIC_STATUS), false),
            tumor_marker_shares: category_shares(&clean.labels(TUMOR_MARKER_STATUS), false),
            progression_free_days,
            overall_survival_days_by_performance_status: box_summary_by_group(
                &deceased_survival,
                &performance_status,
            ),
            survival_from_line,
            survival_by_first_regimen: survival_by_group(
                &line1_survival_months,
                &is_dead,
                &first_regimen,
            ),
            first_line_pfs_by_regimen: survival_by_group(
                &line1_pfs_months,
                &line1_progressed,
                &first_regimen,
            ),
        })
    }

    fn require<T>(
        table: &PatientTable,
        col_name: &str,
        read: impl Fn(&PatientTable, &str) -> Result<Vec<Option<T>>, polars::prelude::PolarsError>,
    ) -> Result<Vec<Option<T>>, AnalysisError> {
        if !table.has_column(col_name) {
            return Err(AnalysisError::MissingColumn(col_name.to_string()));
        }
        Ok(read(table, col_name)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSchema;
    use crate::transform::TransformerModule;
    use crate::transform::strategies::{
        CodeLabelStrategy, CodedField, DurationStrategy, LineResolutionStrategy,
        MetastaticStatusStrategy, TumorMarkerStatusStrategy,
    };
    use polars::df;
    use rstest::{fixture, rstest};

    #[fixture]
    fn derived_table() -> PatientTable {
        let df = df!(
            "1L_Fecha inicio" => &[Some("2020-01-01"), Some("2020-02-01"), Some("2020-03-01")],
            "1L_Fecha progresión" => &[Some("2020-07-01"), None, Some("2020-05-01")],
            "1L_Esquema" => &[Some(1i64), Some(1), Some(2)],
            "2L_Fecha inicio" => &[Some("2020-08-01"), None, None],
            "2L_Esquema" => &[Some(4i64), None, None],
            "Fecha Fallecimiento" => &[Some("2021-01-01"), None, Some("2020-09-01")],
            "Fecha ultimo contacto" => &[None, Some("2020-12-01"), None],
            "Fecha Nacimiento" => &[Some("1950-01-01"), Some("1960-01-01"), Some("1955-01-01")],
            "Fecha Diagnostico" => &[Some("2019-12-01"), Some("2020-01-15"), Some("2020-02-01")],
            "Sexo" => &[Some(1i64), Some(2), Some(1)],
            "PS" => &[Some(0i64), Some(1), Some(1)],
            "Sitio metastasis" => &[Some(0i64), Some(1), Some(2)],
            "CA 19-9 basal (U/mL)" => &[Some(12.0), Some(80.0), None],
        )
        .unwrap();
        let mut table = PatientTable::new(ColumnSchema::default(), df).unwrap();
        TransformerModule::new(vec![
            Box::new(CodeLabelStrategy::new(
                CodedField::Regimen,
                LabelTable::default_regimens(),
            )),
            Box::new(CodeLabelStrategy::new(CodedField::Sex, LabelTable::default_sex())),
            Box::new(MetastaticStatusStrategy::new()),
            Box::new(TumorMarkerStatusStrategy::new(34.0)),
            Box::new(LineResolutionStrategy::new()),
            Box::new(DurationStrategy::new()),
        ])
        .run(&mut table)
        .unwrap();
        table
    }

    #[rstest]
    fn test_report_over_derived_table(derived_table: PatientTable) {
        let report = CohortReport::build(
            &derived_table,
            0,
            &LabelTable::default_sex(),
            &FilterConfig::default(),
        )
        .unwrap();

        assert_eq!(report.summary.total_patients, 3);
        assert_eq!(report.summary.female, 2);
        assert_eq!(report.summary.male, 1);

        assert_eq!(report.line_reach.len(), 2);
        assert_eq!(report.line_reach[0].reached_at_least, 3);
        assert_eq!(report.line_reach[1].reached_at_least, 1);

        assert_eq!(report.line_by_first_regimen.count(1, "FFX"), 1);
        assert_eq!(report.line_by_first_regimen.count(2, "FFX"), 1);
        assert_eq!(report.line_by_performance_status.count(1, "1"), 2);

        let ps_shares = &report.performance_status_shares;
        assert_eq!(ps_shares.len(), 2);
        let ps1_share = ps_shares.iter().find(|share| share.label == "1").unwrap();
        assert_eq!(ps1_share.count, 2);

        let first_line_shares = &report.regimen_shares[0].shares;
        assert_eq!(first_line_shares[0].label, "FFX");
        assert_eq!(first_line_shares[0].count, 2);

        assert_eq!(report.progression_free_days[0].summary.as_ref().unwrap().max, 182.0);
        assert_eq!(report.progression_free_days[3].summary, None);

        let ps1 = &report.overall_survival_days_by_performance_status;
        assert_eq!(ps1.len(), 2);
        assert_eq!(ps1[1].group, "1");
        assert_eq!(ps1[1].summary.count, 1);

        assert_eq!(report.survival_by_first_regimen.len(), 2);
        assert_eq!(report.first_line_pfs_by_regimen[0].group, "FFX");
        assert_eq!(report.first_line_pfs_by_regimen[0].curve.events, 1);
    }

    #[rstest]
    fn test_report_requires_derived_columns() {
        let table =
            PatientTable::new(ColumnSchema::default(), df!("PS" => &[0i64]).unwrap()).unwrap();

        let result = CohortReport::build(
            &table,
            0,
            &LabelTable::default_sex(),
            &FilterConfig::default(),
        );

        assert!(matches!(
            result,
            Err(AnalysisError::MissingColumn(col)) if col == LAST_LINE_REACHED
        ));
    }

    #[rstest]
    fn test_report_serializes(derived_table: PatientTable) {
        let report = CohortReport::build(
            &derived_table,
            2,
            &LabelTable::default_sex(),
            &FilterConfig::default(),
        )
        .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["flagged_patients"], 2);
        assert_eq!(json["summary"]["total_patients"], 3);
        assert!(json["survival_from_line"][0]["curve"]["points"].is_array());
        assert!(json["performance_status_shares"].is_array());
    }
}
