//! Collapses the 3-hour forecast into one entry per calendar day.

use crate::model::ForecastSample;

/// Number of days shown in the daily forecast.
pub const MAX_FORECAST_DAYS: usize = 5;

/// First sample seen for a calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyForecastEntry<'a> {
    pub day: &'a str,
    pub sample: &'a ForecastSample,
}

/// One entry per distinct day, in the order days first appear, at most
/// [`MAX_FORECAST_DAYS`] long.
///
/// The entry for a day is whichever slot the provider listed first for it,
/// not an aggregate.
pub fn daily_forecast(samples: &[ForecastSample]) -> Vec<DailyForecastEntry<'_>> {
    let mut days: Vec<DailyForecastEntry<'_>> = Vec::with_capacity(MAX_FORECAST_DAYS + 1);

    for sample in samples {
        let day = sample.day_key();
        if days.iter().any(|entry| entry.day == day) {
            continue;
        }
        days.push(DailyForecastEntry { day, sample });
    }

    days.truncate(MAX_FORECAST_DAYS);
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Condition;

    fn sample(day: &str, hour: u32, temp: f64) -> ForecastSample {
        ForecastSample {
            timestamp: i64::from(hour) * 3600,
            day_stamp: format!("{day} {hour:02}:00:00"),
            temperature_c: temp,
            feels_like_c: temp,
            humidity_pct: 50,
            condition: Condition::default(),
        }
    }

    fn three_hourly(days: &[&str]) -> Vec<ForecastSample> {
        days.iter()
            .flat_map(|day| (0..8).map(move |slot| sample(day, slot * 3, f64::from(slot))))
            .collect()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(daily_forecast(&[]).is_empty());
    }

    #[test]
    fn seven_days_truncated_to_first_five() {
        let days = [
            "2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04", "2024-03-05", "2024-03-06",
            "2024-03-07",
        ];
        let samples = three_hourly(&days);

        let daily = daily_forecast(&samples);

        let keys: Vec<&str> = daily.iter().map(|e| e.day).collect();
        assert_eq!(keys, &days[..5]);
    }

    #[test]
    fn first_sample_of_the_day_wins() {
        let samples = vec![sample("2024-03-01", 12, 10.0), sample("2024-03-01", 15, 25.0)];

        let daily = daily_forecast(&samples);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].sample.temperature_c, 10.0);
    }

    #[test]
    fn fewer_days_than_limit_are_not_padded() {
        let samples = vec![
            sample("2024-03-01", 21, 1.0),
            sample("2024-03-02", 0, 2.0),
            sample("2024-03-02", 3, 3.0),
        ];

        let daily = daily_forecast(&samples);

        assert_eq!(daily.len(), 2);
        assert_eq!(daily[0].sample.day_stamp, "2024-03-01 21:00:00");
        assert_eq!(daily[1].sample.day_stamp, "2024-03-02 00:00:00");
    }

    #[test]
    fn entries_match_their_day_and_keep_first_seen_order() {
        // A typical provider window starts mid-day and spills into a sixth day.
        let mut samples = vec![sample("2024-03-01", 18, 0.0), sample("2024-03-01", 21, 0.0)];
        samples.extend(three_hourly(&[
            "2024-03-02", "2024-03-03", "2024-03-04", "2024-03-05", "2024-03-06",
        ]));

        let daily = daily_forecast(&samples);

        assert_eq!(daily.len(), MAX_FORECAST_DAYS);
        assert_eq!(daily[0].day, "2024-03-01");
        assert_eq!(daily[0].sample.day_stamp, "2024-03-01 18:00:00");
        for entry in &daily {
            assert_eq!(entry.sample.day_key(), entry.day);
        }
        for pair in daily.windows(2) {
            assert!(pair[0].day < pair[1].day);
        }
    }

    #[test]
    fn output_length_is_min_of_limit_and_distinct_days() {
        let all = [
            "2024-03-01", "2024-03-02", "2024-03-03", "2024-03-04", "2024-03-05", "2024-03-06",
        ];
        for n in 1..=all.len() {
            let samples = three_hourly(&all[..n]);
            assert_eq!(daily_forecast(&samples).len(), n.min(MAX_FORECAST_DAYS));
        }
    }
}
