use crate::constants::NOT_AVAILABLE_LABEL;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

/// One step of a Kaplan-Meier curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KaplanMeierPoint {
    pub time: f64,
    pub at_risk: usize,
    pub events: usize,
    pub censored: usize,
    pub survival: f64,
}

/// A right-continuous step function starting at `(0, 1.0)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KaplanMeierCurve {
    pub subjects: usize,
    pub events: usize,
    /// First time at which survival drops to one half or below. `None` if it never does.
    pub median_survival: Option<f64>,
    pub points: Vec<KaplanMeierPoint>,
}

impl KaplanMeierCurve {
    /// Survival probability at `time`, i.e. the value of the last step at or before it.
    pub fn survival_at(&self, time: f64) -> f64 {
        self.points
            .iter()
            .take_while(|point| point.time <= time)
            .last()
            .map(|point| point.survival)
            .unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupCurve {
    pub group: String,
    pub curve: KaplanMeierCurve,
}

/// Product limit estimate over `(duration, event)` pairs.
///
/// Pairs with a missing, non-finite or negative duration are dropped. At every distinct time
/// the survival is multiplied by `1 - d/n`, where `d` are the events at that time and `n` the
/// subjects still at risk. Censored subjects leave the risk set after their time without a drop.
pub fn kaplan_meier(observations: &[(Option<f64>, bool)]) -> KaplanMeierCurve {
    let mut usable: Vec<(f64, bool)> = observations
        .iter()
        .filter_map(|(duration, event)| {
            duration
                .filter(|d| d.is_finite() && *d >= 0.0)
                .map(|d| (d, *event))
        })
        .collect();
    let dropped = observations.len() - usable.len();
    if dropped > 0 {
        debug!("Dropped {dropped} observations without a usable duration.");
    }
    usable.sort_by(|a, b| a.0.total_cmp(&b.0));

    let subjects = usable.len();
    let mut points = vec![KaplanMeierPoint {
        time: 0.0,
        at_risk: subjects,
        events: 0,
        censored: 0,
        survival: 1.0,
    }];

    let mut at_risk = subjects;
    let mut survival = 1.0;
    let mut total_events = 0;
    let mut median_survival = None;

    let mut idx = 0;
    while idx < usable.len() {
        let time = usable[idx].0;
        let mut events = 0;
        let mut censored = 0;
        while idx < usable.len() && usable[idx].0 == time {
            if usable[idx].1 {
                events += 1;
            } else {
                censored += 1;
            }
            idx += 1;
        }

        if events > 0 {
            survival *= 1.0 - events as f64 / at_risk as f64;
        }
        if median_survival.is_none() && survival <= 0.5 {
            median_survival = Some(time);
        }
        points.push(KaplanMeierPoint {
            time,
            at_risk,
            events,
            censored,
            survival,
        });

        total_events += events;
        at_risk -= events + censored;
    }

    KaplanMeierCurve {
        subjects,
        events: total_events,
        median_survival,
        points,
    }
}

/// One curve per group label. Missing and `NA` groups are left out.
pub fn survival_by_group(
    durations: &[Option<f64>],
    events: &[bool],
    groups: &[Option<String>],
) -> Vec<GroupCurve> {
    let mut grouped: BTreeMap<&str, Vec<(Option<f64>, bool)>> = BTreeMap::new();
    for ((duration, event), group) in durations.iter().zip(events).zip(groups) {
        match group.as_deref() {
            None | Some(NOT_AVAILABLE_LABEL) => continue,
            Some(group) => grouped.entry(group).or_default().push((*duration, *event)),
        }
    }

    grouped
        .into_iter()
        .map(|(group, observations)| GroupCurve {
            group: group.to_string(),
            curve: kaplan_meier(&observations),
        })
        .collect()
}
