use serde::{Deserialize, Serialize};

/// Describes where the patient table sits inside a file.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ExtractionConfig {
    /// The name of the worksheet. `None` selects the first worksheet.
    pub name: Option<String>,
    /// Zero based index of the row holding the column names. All rows above it are skipped.
    pub header_row: usize,
}

impl ExtractionConfig {
    pub fn new(name: Option<String>, header_row: usize) -> Self {
        ExtractionConfig { name, header_row }
    }

    pub(crate) fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<first sheet>")
    }
}
