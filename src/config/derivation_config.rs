use crate::constants::DEFAULT_TUMOR_MARKER_THRESHOLD;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DerivationConfig {
    /// CA 19-9 values strictly below this threshold are labelled as normal.
    #[validate(range(min = 0.0))]
    pub tumor_marker_threshold: f64,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            tumor_marker_threshold: DEFAULT_TUMOR_MARKER_THRESHOLD,
        }
    }
}
