use cafe_client::domain::EnergyReading;

use super::{
    aggregate::{daily_usage, hourly_usage, DailyUsage, HourlyUsage},
    peaks::find_peaks,
};

/// Derived analytics for one café at one point in time. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSnapshot {
    pub cafe_id: i64,
    pub hourly_usage: HourlyUsage,
    pub daily_usage: DailyUsage,
    /// Highest usage first, no duplicates.
    pub peak_hours: Vec<u8>,
    pub average_daily_usage: f64,
    pub max_daily_usage: f64,
}

impl AnalyticsSnapshot {
    /// Build from already-aggregated parts. Daily average and maximum are
    /// `0.0` when there is no daily data.
    pub fn new(
        cafe_id: i64,
        hourly_usage: HourlyUsage,
        daily_usage: DailyUsage,
        peak_hours: Vec<u8>,
    ) -> Self {
        let (average_daily_usage, max_daily_usage) = if daily_usage.is_empty() {
            (0.0, 0.0)
        } else {
            let total: f64 = daily_usage.values().sum();
            let max = daily_usage.values().copied().fold(f64::NEG_INFINITY, f64::max);
            (total / daily_usage.len() as f64, max)
        };

        Self {
            cafe_id,
            hourly_usage,
            daily_usage,
            peak_hours,
            average_daily_usage,
            max_daily_usage,
        }
    }

    pub fn from_readings(cafe_id: i64, readings: &[EnergyReading]) -> Self {
        let hourly = hourly_usage(readings);
        let daily = daily_usage(readings);
        let peaks = find_peaks(&hourly);
        Self::new(cafe_id, hourly, daily, peaks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::aggregate::tests::sample_readings;
    use time::macros::date;

    #[test]
    fn from_readings_computes_average_and_max() {
        let snapshot = AnalyticsSnapshot::from_readings(1, &sample_readings());

        assert_eq!(snapshot.cafe_id, 1);
        assert_eq!(snapshot.daily_usage.len(), 2);
        assert_eq!(snapshot.hourly_usage.len(), 24);
        assert_eq!(snapshot.peak_hours, vec![8, 10, 9]);
        assert_eq!(snapshot.average_daily_usage, 11.0);
        assert_eq!(snapshot.max_daily_usage, 15.0);
    }

    #[test]
    fn empty_daily_usage_defaults_to_zero() {
        let snapshot = AnalyticsSnapshot::new(3, HourlyUsage::new(), DailyUsage::new(), Vec::new());

        assert_eq!(snapshot.average_daily_usage, 0.0);
        assert_eq!(snapshot.max_daily_usage, 0.0);
    }

    #[test]
    fn variable_days_report_mean_and_peak_day() {
        let daily = DailyUsage::from([(date!(2025-01-01), 7.0), (date!(2025-01-02), 13.0)]);
        let snapshot = AnalyticsSnapshot::new(1, HourlyUsage::new(), daily, Vec::new());

        assert_eq!(snapshot.average_daily_usage, 10.0);
        assert_eq!(snapshot.max_daily_usage, 13.0);
    }
}
