use crate::validation::config_validation::validate_date_range;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// An inclusive range of calendar dates.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, Copy, PartialEq, Eq)]
#[validate(schema(function = "validate_date_range"))]
#[serde(deny_unknown_fields)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.start <= *date && *date <= self.end
    }
}

/// Restricts which patients enter the aggregation stage.
///
/// Every field left as `None` imposes no restriction.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Applied to the date of metastatic diagnosis.
    #[validate(nested)]
    pub date_range: Option<DateRange>,
    /// Applied to the normalized first line regimen label.
    pub selected_regimens: Option<BTreeSet<String>>,
}

impl FilterConfig {
    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = Some(date_range);
        self
    }

    pub fn with_selected_regimens<I, S>(mut self, regimens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_regimens = Some(regimens.into_iter().map(Into::into).collect());
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.date_range.is_none() && self.selected_regimens.is_none()
    }
}
