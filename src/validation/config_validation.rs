use crate::config::DateRange;
use std::borrow::Cow;
use validator::ValidationError;

pub(crate) fn validate_date_range(range: &DateRange) -> Result<(), ValidationError> {
    if range.start <= range.end {
        Ok(())
    } else {
        let mut error = ValidationError::new("inverted_date_range");
        error.add_param(Cow::from("start"), &range.start.to_string());
        error.add_param(Cow::from("end"), &range.end.to_string());
        Err(error.with_message(Cow::Owned(
            "The start of a date range must not lie after its end.".to_string(),
        )))
    }
}
