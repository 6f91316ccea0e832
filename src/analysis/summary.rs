use crate::analysis::distribution::median;
use crate::config::LabelTable;
use crate::constants::{FEMALE_CODE, MALE_CODE};
use serde::Serialize;

/// Headline figures of a cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortSummary {
    pub total_patients: usize,
    pub median_age: Option<f64>,
    pub female: usize,
    pub male: usize,
}

/// `sex` holds the labels written by the sex label table, which also decides what counts as female or male.
pub fn cohort_summary(ages: &[Option<f64>], sex: &[Option<String>], sex_table: &LabelTable) -> CohortSummary {
    let count_label = |code: i64| -> usize {
        let label = sex_table
            .get(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string());
        sex.iter()
            .filter(|value| value.as_deref() == Some(label.as_str()))
            .count()
    };

    CohortSummary {
        total_patients: ages.len(),
        median_age: median(ages),
        female: count_label(FEMALE_CODE),
        male: count_label(MALE_CODE),
    }
}
