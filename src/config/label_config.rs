use crate::constants::{FEMALE_CODE, MALE_CODE};
use crate::error::ConstructionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// User supplied label overrides. Keys are integer codes written as strings.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    pub regimens: BTreeMap<String, String>,
    pub sex: BTreeMap<String, String>,
}

impl LabelConfig {
    pub fn regimen_table(&self) -> Result<LabelTable, ConstructionError> {
        LabelTable::default_regimens().with_overrides(&self.regimens)
    }

    pub fn sex_table(&self) -> Result<LabelTable, ConstructionError> {
        LabelTable::default_sex().with_overrides(&self.sex)
    }
}

/// A static mapping from small integer codes to display labels.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    name: String,
    labels: BTreeMap<i64, String>,
}

impl LabelTable {
    pub fn new<S: Into<String>>(name: &str, labels: impl IntoIterator<Item = (i64, S)>) -> Self {
        Self {
            name: name.to_string(),
            labels: labels
                .into_iter()
                .map(|(code, label)| (code, label.into()))
                .collect(),
        }
    }

    pub fn default_regimens() -> Self {
        Self::new(
            "regimens",
            [
                (1, "FFX"),
                (2, "Gem-Nab"),
                (3, "Gemcitabine"),
                (4, "FOLFOX"),
                (5, "FOLFIRI"),
                (6, "Nal-IRI-5FU"),
                (7, "Capecitabine"),
                (8, "Gem-Cape"),
                (9, "GEMOX"),
                (10, "Clinical Trial"),
                (11, "Olaparib"),
                (12, "Other"),
                (13, "NA"),
            ],
        )
    }

    pub fn default_sex() -> Self {
        Self::new("sex", [(FEMALE_CODE, "Female"), (MALE_CODE, "Male")])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, code: i64) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Result<Self, ConstructionError> {
        for (code, label) in overrides {
            let parsed = code
                .trim()
                .parse::<i64>()
                .map_err(|_| ConstructionError::InvalidLabelCode {
                    table: self.name.clone(),
                    code: code.clone(),
                })?;
            self.labels.insert(parsed, label.clone());
        }
        Ok(self)
    }
}
