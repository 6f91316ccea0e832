use serde::{Deserialize, Serialize};

const LINE_PLACEHOLDER: &str = "{n}";

/// Names of the source columns the pipeline reads.
///
/// Per-line columns are given as templates in which `{n}` is replaced by the
/// line number, e.g. `{n}L_Fecha inicio` resolves to `3L_Fecha inicio` for the third line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnSchema {
    pub line_start: String,
    pub line_progression: String,
    pub line_regimen: String,
    pub death_date: String,
    pub last_contact_date: String,
    pub diagnosis_date: String,
    pub birth_date: String,
    pub metastatic_diagnosis_date: String,
    pub sex: String,
    pub metastasis_site: String,
    pub tumor_marker: String,
    pub performance_status: String,
}

impl Default for ColumnSchema {
    fn default() -> Self {
        Self {
            line_start: "{n}L_Fecha inicio".to_string(),
            line_progression: "{n}L_Fecha progresión".to_string(),
            line_regimen: "{n}L_Esquema".to_string(),
            death_date: "Fecha Fallecimiento".to_string(),
            last_contact_date: "Fecha ultimo contacto".to_string(),
            diagnosis_date: "Fecha Diagnostico".to_string(),
            birth_date: "Fecha Nacimiento".to_string(),
            metastatic_diagnosis_date: "Fecha Diagnostico Mts".to_string(),
            sex: "Sexo".to_string(),
            metastasis_site: "Sitio metastasis".to_string(),
            tumor_marker: "CA 19-9 basal (U/mL)".to_string(),
            performance_status: "PS".to_string(),
        }
    }
}

impl ColumnSchema {
    pub fn line_start_col(&self, line: u8) -> String {
        Self::resolve_line_template(&self.line_start, line)
    }

    pub fn line_progression_col(&self, line: u8) -> String {
        Self::resolve_line_template(&self.line_progression, line)
    }

    pub fn line_regimen_col(&self, line: u8) -> String {
        Self::resolve_line_template(&self.line_regimen, line)
    }

    fn resolve_line_template(template: &str, line: u8) -> String {
        template.replace(LINE_PLACEHOLDER, &line.to_string())
    }
}
