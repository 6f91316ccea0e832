use crate::constants::{
    LOCALLY_ADVANCED, MARKER_ELEVATED, MARKER_NORMAL, METASTATIC, METASTATIC_STATUS,
    TUMOR_MARKER_STATUS,
};
use crate::extract::PatientTable;
use crate::transform::error::StrategyError;
use crate::transform::strategies::utils::write_column;
use crate::transform::traits::Strategy;
use log::info;
use polars::prelude::{NamedFrom, Series};

/// Labels each patient as locally advanced (metastasis site code 0) or metastatic (any other code).
#[derive(Debug, Default)]
pub struct MetastaticStatusStrategy;

impl MetastaticStatusStrategy {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(site_code: Option<i64>) -> Option<&'static str> {
        match site_code? {
            0 => Some(LOCALLY_ADVANCED),
            _ => Some(METASTATIC),
        }
    }
}

impl Strategy for MetastaticStatusStrategy {
    fn is_valid(&self, _table: &PatientTable) -> bool {
        true
    }

    fn internal_transform(&self, table: &mut PatientTable) -> Result<(), StrategyError> {
        info!("Applying MetastaticStatus strategy.");
        let site_col = table.schema().metastasis_site.clone();
        let labels: Vec<Option<&str>> = table
            .codes(&site_col)
            .into_iter()
            .map(Self::classify)
            .collect();
        write_column::<Self>(table, Series::new(METASTATIC_STATUS.into(), labels))
    }
}

/// Labels the baseline CA 19-9 value as normal or elevated against a fixed threshold.
#[derive(Debug)]
pub struct TumorMarkerStatusStrategy {
    threshold: f64,
}

impl TumorMarkerStatusStrategy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn classify(&self, value: Option<f64>) -> Option<&'static str> {
        let value = value?;
        if value < self.threshold {
            Some(MARKER_NORMAL)
        } else {
            Some(MARKER_ELEVATED)
        }
    }
}

impl Strategy for TumorMarkerStatusStrategy {
    fn is_valid(&self, _table: &PatientTable) -> bool {
        true
    }

    fn internal_transform(&self, table: &mut PatientTable) -> Result<(), StrategyError> {
        info!(
            "Applying TumorMarkerStatus strategy with a threshold of {}.",
            self.threshold
        );
        let marker_col = table.schema().tumor_marker.clone();
        let labels: Vec<Option<&str>> = table
            .numbers(&marker_col)
            .into_iter()
            .map(|value| self.classify(value))
            .collect();
        write_column::<Self>(table, Series::new(TUMOR_MARKER_STATUS.into(), labels))
    }
}
