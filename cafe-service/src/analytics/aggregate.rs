use std::collections::BTreeMap;

use cafe_client::domain::EnergyReading;
use time::Date;

/// Summed kWh per hour-of-day (0–23), across all dates.
pub type HourlyUsage = BTreeMap<u8, f64>;

/// Summed kWh per calendar date, oldest first.
pub type DailyUsage = BTreeMap<Date, f64>;

pub const HOURS_PER_DAY: u8 = 24;

/// Sum readings by hour-of-day. Every hour 0–23 is present; hours without
/// readings hold `0.0`.
pub fn hourly_usage(readings: &[EnergyReading]) -> HourlyUsage {
    let mut hourly: HourlyUsage = (0..HOURS_PER_DAY).map(|h| (h, 0.0)).collect();
    for r in readings {
        *hourly.entry(r.ts.hour()).or_insert(0.0) += r.kwh;
    }
    hourly
}

/// Sum readings by the date part of their timestamp.
pub fn daily_usage(readings: &[EnergyReading]) -> DailyUsage {
    let mut daily = DailyUsage::new();
    for r in readings {
        *daily.entry(r.ts.date()).or_insert(0.0) += r.kwh;
    }
    daily
}
