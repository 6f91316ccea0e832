use crate::constants::NOT_AVAILABLE_LABEL;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// How many patients stopped at a line, and how many got at least that far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineReach {
    pub line: i64,
    pub patients: usize,
    pub reached_at_least: usize,
    pub percentage: f64,
}

/// Counts per value of `last_line_reached`, in ascending order of the line.
///
/// `reached_at_least` is cumulative from the top, so it never increases from one line to the next.
pub fn line_reach(last_lines: &[Option<i64>]) -> Vec<LineReach> {
    let mut per_line: BTreeMap<i64, usize> = BTreeMap::new();
    for line in last_lines.iter().flatten() {
        *per_line.entry(*line).or_default() += 1;
    }
    let total: usize = per_line.values().sum();

    let mut remaining = total;
    per_line
        .into_iter()
        .map(|(line, patients)| {
            let reach = LineReach {
                line,
                patients,
                reached_at_least: remaining,
                percentage: percentage(remaining, total),
            };
            remaining -= patients;
            reach
        })
        .collect()
}

/// Patient counts per (`last_line_reached`, category) pair.
///
/// Rows where either value is missing are not counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub lines: Vec<i64>,
    pub categories: Vec<String>,
    /// `counts[i][j]` belongs to `lines[i]` and `categories[j]`.
    pub counts: Vec<Vec<usize>>,
    /// Every row of `counts` as a percentage of its row total.
    pub row_percentages: Vec<Vec<f64>>,
}

impl CrossTab {
    pub fn count(&self, line: i64, category: &str) -> usize {
        let row = self.lines.iter().position(|l| *l == line);
        let col = self.categories.iter().position(|c| c == category);
        match (row, col) {
            (Some(row), Some(col)) => self.counts[row][col],
            _ => 0,
        }
    }
}

pub fn cross_tab(lines: &[Option<i64>], categories: &[Option<String>]) -> CrossTab {
    let pairs: Vec<(i64, &str)> = lines
        .iter()
        .zip(categories)
        .filter_map(|(line, category)| Some(((*line)?, category.as_deref()?)))
        .collect();

    let row_labels: Vec<i64> = pairs
        .iter()
        .map(|(line, _)| *line)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let col_labels: Vec<String> = pairs
        .iter()
        .map(|(_, category)| category.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut counts = vec![vec![0usize; col_labels.len()]; row_labels.len()];
    for (line, category) in &pairs {
        let row = row_labels.iter().position(|l| l == line);
        let col = col_labels.iter().position(|c| c == category);
        if let (Some(row), Some(col)) = (row, col) {
            counts[row][col] += 1;
        }
    }

    let row_percentages = counts
        .iter()
        .map(|row| {
            let row_total: usize = row.iter().sum();
            row.iter()
                .map(|count| percentage(*count, row_total))
                .collect()
        })
        .collect();

    CrossTab {
        lines: row_labels,
        categories: col_labels,
        counts,
        row_percentages,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// Count and share of every label in a column, ordered by label.
///
/// With `exclude_na` both nulls and the `NA` label are left out, otherwise nulls are counted as `NA`.
pub fn category_shares(values: &[Option<String>], exclude_na: bool) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        let label = value.as_deref().unwrap_or(NOT_AVAILABLE_LABEL);
        if exclude_na && label == NOT_AVAILABLE_LABEL {
            continue;
        }
        *counts.entry(label).or_default() += 1;
    }
    let total: usize = counts.values().sum();

    counts
        .into_iter()
        .map(|(label, count)| CategoryShare {
            label: label.to_string(),
            count,
            percentage: percentage(count, total),
        })
        .collect()
}

fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}
