use super::aggregate::HourlyUsage;

/// How many hours the fallback surfaces when nothing clears the threshold.
pub const FALLBACK_PEAK_COUNT: usize = 3;

/// Mean and population standard deviation of a set of values.
pub fn mean_and_stddev<'a>(values: impl ExactSizeIterator<Item = &'a f64> + Clone) -> (f64, f64) {
    let n = values.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let n = n as f64;
    let mean = values.clone().sum::<f64>() / n;
    let variance = values.map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Hours whose usage is at least `mean + 1σ`, highest first.
///
/// When no hour clears the threshold, the [`FALLBACK_PEAK_COUNT`] busiest
/// hours are returned instead. Equal usage keeps ascending hour order.
pub fn find_peaks(hourly: &HourlyUsage) -> Vec<u8> {
    if hourly.is_empty() {
        return Vec::new();
    }

    let (mean, stddev) = mean_and_stddev(hourly.values());
    let threshold = mean + stddev;

    let mut ranked: Vec<(u8, f64)> = hourly.iter().map(|(&h, &kwh)| (h, kwh)).collect();
    // Stable sort: ties stay in hour order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let peaks: Vec<u8> = ranked
        .iter()
        .filter(|(_, kwh)| *kwh >= threshold)
        .map(|(h, _)| *h)
        .collect();

    if !peaks.is_empty() {
        return peaks;
    }

    tracing::debug!(threshold, "no hour cleared the peak threshold, using top hours");
    ranked
        .into_iter()
        .take(FALLBACK_PEAK_COUNT)
        .map(|(h, _)| h)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly(values: &[(u8, f64)]) -> HourlyUsage {
        let mut map: HourlyUsage = (0..24).map(|h| (h, 0.0)).collect();
        map.extend(values.iter().copied());
        map
    }

    #[test]
    fn three_busy_hours_rank_by_usage() {
        let peaks = find_peaks(&hourly(&[(8, 10.0), (9, 5.0), (10, 7.0)]));
        assert_eq!(peaks, vec![8, 10, 9]);
    }

    #[test]
    fn only_hours_above_threshold_are_returned() {
        // mean ≈ 2.33, σ ≈ 8.0: only the 40 kWh hour clears it.
        let peaks = find_peaks(&hourly(&[(17, 40.0), (12, 4.0), (13, 4.0), (14, 4.0), (15, 4.0)]));
        assert_eq!(peaks, vec![17]);
    }

    #[test]
    fn falls_back_to_top_three_when_nothing_clears_threshold() {
        // Twenty similar busy hours and four idle ones: mean + σ sits above
        // every observed value.
        let busy: Vec<(u8, f64)> = (4..24).map(|h| (h, 10.0 + f64::from(h) * 0.01)).collect();
        let peaks = find_peaks(&hourly(&busy));
        assert_eq!(peaks, vec![23, 22, 21]);
    }

    #[test]
    fn flat_usage_marks_every_hour_in_hour_order() {
        let flat: HourlyUsage = (0..24).map(|h| (h, 2.0)).collect();
        let peaks = find_peaks(&flat);
        assert_eq!(peaks, (0..24).collect::<Vec<u8>>());
    }

    #[test]
    fn empty_usage_has_no_peaks() {
        assert!(find_peaks(&HourlyUsage::new()).is_empty());
    }

    #[test]
    fn stddev_is_population_stddev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let (mean, stddev) = mean_and_stddev(values.iter());
        assert_eq!(mean, 5.0);
        assert_eq!(stddev, 2.0);
    }
}
