use log::warn;
use std::collections::HashSet;

pub(crate) fn generate_default_column_name(index: usize) -> String {
    format!("column_{}", index + 1)
}

/// Replaces missing header cells by a positional default name and makes
/// duplicated names unique by appending a numeric suffix.
pub(crate) fn resolve_headers(raw_headers: Vec<Option<String>>, table_name: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();

    raw_headers
        .into_iter()
        .enumerate()
        .map(|(index, header)| {
            let header = match header.map(|h| h.trim().to_string()) {
                Some(h) if !h.is_empty() => h,
                _ => generate_default_column_name(index),
            };

            let mut unique = header.clone();
            let mut suffix = 2;
            while !seen.insert(unique.clone()) {
                unique = format!("{header}_{suffix}");
                suffix += 1;
            }
            if unique != header {
                warn!("Duplicate column '{header}' in table {table_name} was renamed to '{unique}'.");
            }
            unique
        })
        .collect()
}
