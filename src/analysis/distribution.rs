use crate::constants::NOT_AVAILABLE_LABEL;
use serde::Serialize;
use std::collections::BTreeMap;

/// Five number summary of a sample, as drawn by a box plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedBoxSummary {
    pub group: String,
    pub summary: BoxSummary,
}

/// Quantile of an ascending sample with linear interpolation between the closest ranks.
///
/// `sorted` must not be empty.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

fn sorted_finite(values: &[Option<f64>]) -> Vec<f64> {
    let mut sample: Vec<f64> = values
        .iter()
        .flatten()
        .copied()
        .filter(|v| v.is_finite())
        .collect();
    sample.sort_by(f64::total_cmp);
    sample
}

pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let sample = sorted_finite(values);
    if sample.is_empty() {
        return None;
    }
    Some(quantile(&sample, 0.5))
}

/// `None` when there is not a single finite value to summarize.
pub fn box_summary(values: &[Option<f64>]) -> Option<BoxSummary> {
    let sample = sorted_finite(values);
    let (min, max) = (*sample.first()?, *sample.last()?);
    Some(BoxSummary {
        count: sample.len(),
        min,
        q1: quantile(&sample, 0.25),
        median: quantile(&sample, 0.5),
        q3: quantile(&sample, 0.75),
        max,
    })
}

/// One summary per group label. Missing and `NA` groups are left out.
pub fn box_summary_by_group(
    values: &[Option<f64>],
    groups: &[Option<String>],
) -> Vec<GroupedBoxSummary> {
    let mut grouped: BTreeMap<&str, Vec<Option<f64>>> = BTreeMap::new();
    for (value, group) in values.iter().zip(groups) {
        match group.as_deref() {
            None | Some(NOT_AVAILABLE_LABEL) => continue,
            Some(group) => grouped.entry(group).or_default().push(*value),
        }
    }

    grouped
        .into_iter()
        .filter_map(|(group, values)| {
            box_summary(&values).map(|summary| GroupedBoxSummary {
                group: group.to_string(),
                summary,
            })
        })
        .collect()
}
