//! Rule-based recommendations derived from an [`AnalyticsSnapshot`].
//!
//! Rules run in the order of [`RULES`]. Each one looks at the snapshot and
//! the lines produced so far and either adds lines and continues, or adds
//! lines and halts evaluation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analytics::AnalyticsSnapshot;

/// A day counts as highly variable when its max exceeds the mean by this factor.
pub const VARIABILITY_FACTOR: f64 = 1.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// No hourly data at all: report it and stop.
    NoData,
    /// List every peak hour in one line.
    PeakShifting,
    /// Max day well above the daily mean.
    DailyVariability,
    /// One line per peak hour that actually used energy.
    PeakHourHints,
    /// Mean hourly usage as a standby baseline.
    StandbyBaseline,
    /// Nothing else had anything to say.
    Balanced,
}

pub const RULES: [Rule; 6] = [
    Rule::NoData,
    Rule::PeakShifting,
    Rule::DailyVariability,
    Rule::PeakHourHints,
    Rule::StandbyBaseline,
    Rule::Balanced,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(Vec<String>),
    Halt(Vec<String>),
}

impl Rule {
    pub fn evaluate(self, analytics: &AnalyticsSnapshot, emitted: &[String]) -> Step {
        match self {
            Rule::NoData => {
                if analytics.hourly_usage.is_empty() {
                    Step::Halt(vec!["No data available to generate recommendations.".to_string()])
                } else {
                    Step::Continue(Vec::new())
                }
            }
            Rule::PeakShifting => {
                if analytics.peak_hours.is_empty() {
                    Step::Continue(Vec::new())
                } else {
                    Step::Continue(vec![format!(
                        "Consider shifting non-essential loads away from peak hour(s): {:?}",
                        analytics.peak_hours
                    )])
                }
            }
            Rule::DailyVariability => {
                if analytics.max_daily_usage > analytics.average_daily_usage * VARIABILITY_FACTOR {
                    Step::Continue(vec![
                        "Daily usage variability is high. Explore staggering equipment startup and using timers."
                            .to_string(),
                    ])
                } else {
                    Step::Continue(Vec::new())
                }
            }
            Rule::PeakHourHints => Step::Continue(
                analytics
                    .peak_hours
                    .iter()
                    .filter(|hour| analytics.hourly_usage.get(*hour).copied().unwrap_or(0.0) > 0.0)
                    .map(|hour| {
                        format!(
                            "Hour {hour}: schedule dishwasher/ice machine defrost outside this hour if possible."
                        )
                    })
                    .collect(),
            ),
            Rule::StandbyBaseline => {
                let hourly = &analytics.hourly_usage;
                let baseline = if hourly.is_empty() {
                    0.0
                } else {
                    hourly.values().sum::<f64>() / hourly.len() as f64
                };
                if baseline > 0.0 {
                    Step::Continue(vec![format!(
                        "Review overnight standby loads; baseline hourly usage is ~{baseline:.2} kWh."
                    )])
                } else {
                    Step::Continue(Vec::new())
                }
            }
            Rule::Balanced => {
                if emitted.is_empty() {
                    Step::Continue(vec![
                        "Usage appears balanced. Maintain current practices and monitor periodically."
                            .to_string(),
                    ])
                } else {
                    Step::Continue(Vec::new())
                }
            }
        }
    }
}

pub fn generate_recommendations(analytics: &AnalyticsSnapshot) -> Vec<String> {
    let mut recs = Vec::new();
    for rule in RULES {
        match rule.evaluate(analytics, &recs) {
            Step::Continue(lines) => recs.extend(lines),
            Step::Halt(lines) => {
                recs.extend(lines);
                break;
            }
        }
    }
    recs
}

/// Insights payload returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub cafe_id: i64,
    pub hourly_usage: BTreeMap<u8, f64>,
    /// Keyed by ISO date (`2025-01-31`).
    pub daily_usage: BTreeMap<String, f64>,
    pub peak_hours: Vec<u8>,
    pub average_daily_usage: f64,
    pub max_daily_usage: f64,
    pub recommendations: Vec<String>,
}

pub fn generate_insights(analytics: &AnalyticsSnapshot) -> InsightsResponse {
    InsightsResponse {
        cafe_id: analytics.cafe_id,
        hourly_usage: analytics.hourly_usage.clone(),
        daily_usage: analytics
            .daily_usage
            .iter()
            .map(|(day, kwh)| (day.to_string(), *kwh))
            .collect(),
        peak_hours: analytics.peak_hours.clone(),
        average_daily_usage: analytics.average_daily_usage,
        max_daily_usage: analytics.max_daily_usage,
        recommendations: generate_recommendations(analytics),
    }
}
