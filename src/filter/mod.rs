mod cohort_filter;
pub use cohort_filter::CohortFilter;
pub mod error;
