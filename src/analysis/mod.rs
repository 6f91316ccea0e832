//! Aggregates computed over the clean partition of the patient table.

pub mod counts;
pub mod distribution;
pub mod error;
pub mod report;
pub mod summary;
pub mod survival;

pub use counts::{CategoryShare, CrossTab, LineReach, category_shares, cross_tab, line_reach};
pub use distribution::{BoxSummary, GroupedBoxSummary, box_summary, box_summary_by_group};
pub use report::CohortReport;
pub use summary::{CohortSummary, cohort_summary};
pub use survival::{GroupCurve, KaplanMeierCurve, KaplanMeierPoint, kaplan_meier, survival_by_group};
