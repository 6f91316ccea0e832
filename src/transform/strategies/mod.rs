pub mod clinical_labels;
pub use clinical_labels::{MetastaticStatusStrategy, TumorMarkerStatusStrategy};
pub mod durations;
pub use durations::DurationStrategy;
pub mod label_mapping;
pub use label_mapping::{CodeLabelStrategy, CodedField};
pub mod line_resolution;
pub use line_resolution::LineResolutionStrategy;

pub(crate) mod utils;
