//! Forecast and history aggregation

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};

use crate::weather::model::{DailySummary, ForecastPoint, MonthlySummary};

/// Group forecast points by calendar day, in order of first appearance.
///
/// Each day keeps the lowest and highest temperature and its most frequent
/// description; ties go to the description that reached the top count first.
pub fn weekly_summary(points: &[ForecastPoint]) -> Vec<DailySummary> {
    let mut days: Vec<(NaiveDate, Vec<&ForecastPoint>)> = Vec::new();
    for point in points {
        let date = point.time.date();
        match days.iter_mut().find(|(d, _)| *d == date) {
            Some((_, bucket)) => bucket.push(point),
            None => days.push((date, vec![point])),
        }
    }

    days.into_iter()
        .map(|(date, bucket)| {
            let min = bucket
                .iter()
                .map(|p| p.temperature)
                .fold(f64::INFINITY, f64::min);
            let max = bucket
                .iter()
                .map(|p| p.temperature)
                .fold(f64::NEG_INFINITY, f64::max);
            DailySummary {
                date,
                min,
                max,
                description: dominant_description(&bucket),
            }
        })
        .collect()
}

fn dominant_description(bucket: &[&ForecastPoint]) -> String {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for point in bucket {
        let desc = point.description.as_str();
        let count = counts.entry(desc).or_insert(0);
        if *count == 0 {
            order.push(desc);
        }
        *count += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for desc in order {
        let count = counts[desc];
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((desc, count));
        }
    }
    best.map(|(desc, _)| desc.to_string()).unwrap_or_default()
}

/// Calendar window covering the `months` whole months before `today`'s month
pub fn lookback_window(today: NaiveDate, months: u32) -> (NaiveDate, NaiveDate) {
    let months = months.max(1);
    let this_month = today.with_day(1).unwrap_or(today);
    let start = this_month
        .checked_sub_months(Months::new(months))
        .unwrap_or(this_month);
    let end = this_month.pred_opt().unwrap_or(this_month);
    (start, end)
}

/// Fold daily extremes into per-month extremes, in chronological order.
///
/// Days with a missing reading are skipped; a month with no readings at all
/// is left out.
pub fn monthly_summary(days: &[(NaiveDate, Option<f64>, Option<f64>)]) -> Vec<MonthlySummary> {
    let mut months: Vec<MonthlySummary> = Vec::new();
    for (date, max, min) in days {
        let Some(month) = date.with_day(1) else {
            continue;
        };
        let (Some(max), Some(min)) = (max, min) else {
            continue;
        };
        match months.iter_mut().find(|m| m.month == month) {
            Some(entry) => {
                entry.min = entry.min.min(*min);
                entry.max = entry.max.max(*max);
            }
            None => months.push(MonthlySummary {
                month,
                min: *min,
                max: *max,
            }),
        }
    }
    months.sort_by_key(|m| m.month);
    months
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn point(time: &str, temperature: f64, description: &str) -> ForecastPoint {
        ForecastPoint {
            time: NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M:%S").unwrap(),
            temperature,
            description: description.to_string(),
            wind_speed: 3.0,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekly_groups_by_day() {
        let points = vec![
            point("2024-05-01 12:00:00", 18.0, "light rain"),
            point("2024-05-01 15:00:00", 21.5, "clear sky"),
            point("2024-05-01 18:00:00", 16.0, "light rain"),
            point("2024-05-02 00:00:00", 11.0, "overcast clouds"),
            point("2024-05-02 03:00:00", 9.5, "overcast clouds"),
        ];

        let days = weekly_summary(&points);
        assert_eq!(days.len(), 2);

        assert_eq!(days[0].date, date(2024, 5, 1));
        assert_eq!(days[0].min, 16.0);
        assert_eq!(days[0].max, 21.5);
        assert_eq!(days[0].description, "light rain");

        assert_eq!(days[1].date, date(2024, 5, 2));
        assert_eq!(days[1].min, 9.5);
        assert_eq!(days[1].max, 11.0);
    }

    #[test]
    fn test_weekly_tie_keeps_first_description() {
        let points = vec![
            point("2024-05-01 00:00:00", 10.0, "few clouds"),
            point("2024-05-01 03:00:00", 10.0, "mist"),
            point("2024-05-01 06:00:00", 10.0, "mist"),
            point("2024-05-01 09:00:00", 10.0, "few clouds"),
        ];
        let days = weekly_summary(&points);
        assert_eq!(days[0].description, "few clouds");
    }

    #[test]
    fn test_weekly_empty() {
        assert!(weekly_summary(&[]).is_empty());
    }

    #[test]
    fn test_lookback_previous_month() {
        let (start, end) = lookback_window(date(2024, 3, 15), 1);
        assert_eq!(start, date(2024, 2, 1));
        assert_eq!(end, date(2024, 2, 29));
    }

    #[test]
    fn test_lookback_crosses_year() {
        let (start, end) = lookback_window(date(2025, 1, 1), 3);
        assert_eq!(start, date(2024, 10, 1));
        assert_eq!(end, date(2024, 12, 31));
    }

    #[test]
    fn test_lookback_zero_months_means_one() {
        assert_eq!(
            lookback_window(date(2024, 7, 4), 0),
            lookback_window(date(2024, 7, 4), 1)
        );
    }

    #[test]
    fn test_monthly_folds_days() {
        let days = vec![
            (date(2024, 1, 30), Some(5.0), Some(-2.0)),
            (date(2024, 1, 31), Some(7.5), Some(0.5)),
            (date(2024, 2, 1), Some(9.0), Some(1.0)),
            (date(2024, 2, 2), None, Some(-8.0)),
        ];
        let months = monthly_summary(&days);
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, date(2024, 1, 1));
        assert_eq!(months[0].min, -2.0);
        assert_eq!(months[0].max, 7.5);
        assert_eq!(months[1].month, date(2024, 2, 1));
        assert_eq!(months[1].min, 1.0);
        assert_eq!(months[1].max, 9.0);
    }
}
