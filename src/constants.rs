/// Treatment lines tracked per patient, in ascending order.
pub const TREATMENT_LINES: [u8; 4] = [1, 2, 3, 4];

/// Mean number of days per month, used to rescale durations for survival curves.
pub const DAYS_PER_MONTH: f64 = 30.44;
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Baseline CA 19-9 upper limit of normal in U/mL.
pub const DEFAULT_TUMOR_MARKER_THRESHOLD: f64 = 34.0;

/// The label that marks a missing regimen in the source data.
pub const NOT_AVAILABLE_LABEL: &str = "NA";

/// Source codes of the sex column.
pub const FEMALE_CODE: i64 = 1;
pub const MALE_CODE: i64 = 2;

pub const ROW_INDEX: &str = "row_index";
pub const LAST_LINE_REACHED: &str = "last_line_reached";
pub const OVERALL_SURVIVAL_DAYS: &str = "overall_survival_days";
pub const FINAL_CONTACT: &str = "final_contact";
pub const IS_DEAD: &str = "is_dead";
pub const AGE: &str = "age";
pub const LINE1_PFS_MONTHS: &str = "line1_pfs_months";
pub const METASTATIC_STATUS: &str = "metastatic_status";
pub const TUMOR_MARKER_STATUS: &str = "tumor_marker_status";
pub const FLAG_REASONS: &str = "flag_reasons";

pub const LOCALLY_ADVANCED: &str = "Locally Advanced";
pub const METASTATIC: &str = "Metastasic";
pub const MARKER_NORMAL: &str = "Normal";
pub const MARKER_ELEVATED: &str = "Elevated";

pub fn pfs_days_col(line: u8) -> String {
    format!("line{line}_pfs_days")
}

pub fn survival_months_col(line: u8) -> String {
    format!("line{line}_survival_months")
}
