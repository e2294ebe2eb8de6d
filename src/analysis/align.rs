use crate::analysis::resample::resample_weekly;
use crate::types::frames::trend_series::TrendSeries;
use crate::types::frames::weather_table::{WeatherTable, DATE_COLUMN};
use chrono::NaiveDate;
use polars::df;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Weekly weather and trend tables restricted to the dates both series share.
#[derive(Debug, Clone)]
pub struct AlignedPair {
    /// Common dates, ascending.
    pub dates: Vec<NaiveDate>,
    /// Weekly means of every measurement, one row per common date.
    pub weather: DataFrame,
    /// Trend rows, one per common date.
    pub trend: DataFrame,
}

/// Sorted intersection of two date indices. Duplicates collapse.
pub fn common_dates(left: &[NaiveDate], right: &[NaiveDate]) -> Vec<NaiveDate> {
    let right: BTreeSet<NaiveDate> = right.iter().copied().collect();
    left.iter()
        .copied()
        .filter(|date| right.contains(date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Returns exactly one row of `frame` per entry of `dates`, in that order.
///
/// Dates absent from `frame` produce a row of nulls, never an interpolated value.
pub fn restrict_to_dates(frame: LazyFrame, dates: &[NaiveDate]) -> PolarsResult<DataFrame> {
    let index = df!(DATE_COLUMN => dates)?;
    index
        .lazy()
        .join(
            frame,
            [col(DATE_COLUMN)],
            [col(DATE_COLUMN)],
            JoinArgs::new(JoinType::Left),
        )
        .sort([DATE_COLUMN], SortMultipleOptions::default())
        .collect()
}

/// Resamples the weather table to weeks and restricts both series to their common dates.
///
/// The common dates are taken against the *daily* weather index, so a trend week counts
/// only if its own date was observed at the station.
pub fn align(weather: &WeatherTable, trend: &TrendSeries) -> PolarsResult<AlignedPair> {
    let weekly = resample_weekly(weather)?;
    let dates = common_dates(&trend.dates()?, &weather.dates()?);

    Ok(AlignedPair {
        weather: restrict_to_dates(weekly.lazy(), &dates)?,
        trend: restrict_to_dates(trend.lazy(), &dates)?,
        dates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date_values;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn intersection_is_sorted_and_unique() {
        let left = vec![date(2020, 1, 19), date(2020, 1, 5), date(2020, 1, 5), date(2020, 2, 2)];
        let right = vec![date(2020, 1, 5), date(2020, 1, 19), date(2020, 1, 26)];

        let common = common_dates(&left, &right);

        assert_eq!(common, vec![date(2020, 1, 5), date(2020, 1, 19)]);
        assert_eq!(common_dates(&common, &right), common, "re-intersecting is idempotent");
        assert_eq!(common_dates(&common, &left), common);
    }

    #[test]
    fn disjoint_indices_share_nothing() {
        assert!(common_dates(&[date(2020, 1, 5)], &[date(2021, 1, 5)]).is_empty());
    }

    #[test]
    fn restriction_keeps_requested_dates_only() -> PolarsResult<()> {
        let frame = df!(
            "date" => [date(2020, 1, 5), date(2020, 1, 12), date(2020, 1, 19)],
            "value" => [1.0, 2.0, 3.0],
        )?;
        let wanted = vec![date(2020, 1, 5), date(2020, 1, 19), date(2020, 1, 26)];

        let restricted = restrict_to_dates(frame.lazy(), &wanted)?;

        assert_eq!(
            date_values(&restricted, "date")?,
            wanted.iter().copied().map(Some).collect::<Vec<_>>()
        );
        let values: Vec<Option<f64>> = restricted.column("value")?.f64()?.into_iter().collect();
        assert_eq!(values, vec![Some(1.0), Some(3.0), None]);
        Ok(())
    }

    #[test]
    fn aligned_dates_are_a_subset_of_both_inputs() -> Result<(), Box<dyn std::error::Error>> {
        let start = date(2021, 6, 1);
        let days: Vec<NaiveDate> = (0..60).map(|i| start + Duration::days(i)).collect();
        let n = days.len();
        let weather = WeatherTable::new(df!(
            "date" => days.clone(),
            "rain" => vec![0.0; n],
            "maxTemp" => (0..n).map(|i| i as f64).collect::<Vec<_>>(),
            "minTemp" => vec![1.0; n],
            "maxRH" => vec![50.0; n],
            "minRH" => vec![20.0; n],
            "wind" => vec![3.0; n],
            "radiation" => vec![15.0; n],
        )?);
        // Weekly Sundays running past the end of the weather record.
        let sundays: Vec<NaiveDate> = (0..15)
            .map(|i| date(2021, 5, 30) + Duration::weeks(i))
            .collect();
        let trend = TrendSeries::new(
            "firewood",
            df!("date" => sundays.clone(), "interest" => vec![50i64; sundays.len()])?,
        );

        let pair = align(&weather, &trend)?;

        assert!(!pair.dates.is_empty());
        assert!(pair.dates.iter().all(|d| days.contains(d) && sundays.contains(d)));
        assert_eq!(pair.weather.height(), pair.dates.len());
        assert_eq!(pair.trend.height(), pair.dates.len());
        Ok(())
    }
}
