//! Ties the alignment, smoothing, correlation and spectral steps together.

use crate::analysis::align::align;
use crate::analysis::correlation::pearson;
use crate::analysis::error::AnalysisError;
use crate::analysis::periodogram::{welch, Periodogram, SEGMENT_LENGTH, WEEKLY_SAMPLES_PER_YEAR};
use crate::analysis::smooth::centered_rolling_mean;
use crate::error::UsageError;
use crate::types::frames::trend_series::{TrendSeries, INTEREST_COLUMN};
use crate::types::frames::weather_table::WeatherTable;
use crate::types::weather_variable::WeatherVariable;
use crate::utils::float_values;
use chrono::NaiveDate;
use log::{info, warn};
use polars::prelude::DataFrame;

/// Result of correlating one weather variable with one keyword's search interest.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub keyword: String,
    pub weather_variable: WeatherVariable,
    /// Centered rolling-mean window in weeks; 1 means unsmoothed.
    pub smoothing_window: usize,
    /// Dates present in both the trend series and the daily weather record, ascending.
    pub common_dates: Vec<NaiveDate>,
    /// Weekly means of every measurement at the common dates.
    pub weekly_weather: DataFrame,
    /// Trend rows at the common dates.
    pub trend: DataFrame,
    /// Weekly mean of the selected variable at the common dates, unsmoothed.
    pub weather: Vec<Option<f64>>,
    /// Search interest at the common dates, unsmoothed.
    pub interest: Vec<Option<f64>>,
    pub smoothed_weather: Vec<Option<f64>>,
    pub smoothed_interest: Vec<Option<f64>>,
    /// Pearson coefficient of the smoothed series. NaN when undefined.
    pub correlation: f64,
    /// Periodogram of the unsmoothed weekly weather variable.
    pub weather_spectrum: Periodogram,
    /// Periodogram of the unsmoothed search interest.
    pub interest_spectrum: Periodogram,
}

fn column(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, AnalysisError> {
    float_values(frame, name).map_err(|e| AnalysisError::ColumnNotFound(name.to_string(), e))
}

fn as_samples(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

/// Aligns `weather` with `trend`, smooths both with a `smoothing_window`-week centered
/// rolling mean when the window exceeds one, and correlates `variable` with the keyword.
///
/// # Errors
///
/// [`UsageError::InvalidSmoothingWindow`] for a zero window; [`AnalysisError::ColumnNotFound`]
/// when either frame lacks the requested column.
pub fn analyse(
    weather: &WeatherTable,
    trend: &TrendSeries,
    variable: WeatherVariable,
    smoothing_window: usize,
) -> Result<Analysis, AnalysisError> {
    if smoothing_window == 0 {
        return Err(UsageError::InvalidSmoothingWindow(smoothing_window).into());
    }

    let pair = align(weather, trend)?;
    info!(
        "{} common weekly dates between '{}' and {}",
        pair.dates.len(),
        trend.keyword,
        variable
    );

    let weather_values = column(&pair.weather, variable.column_name())?;
    let interest_values = column(&pair.trend, INTEREST_COLUMN)?;

    let (smoothed_weather, smoothed_interest) = if smoothing_window > 1 {
        (
            centered_rolling_mean(&weather_values, smoothing_window),
            centered_rolling_mean(&interest_values, smoothing_window),
        )
    } else {
        (weather_values.clone(), interest_values.clone())
    };

    let correlation = pearson(&smoothed_weather, &smoothed_interest);
    if correlation.is_nan() {
        warn!("Correlation is undefined for the {} common dates", pair.dates.len());
    } else {
        info!("Correlation between {} and '{}': {:.3}", variable, trend.keyword, correlation);
    }

    let weather_spectrum = welch(
        &as_samples(&weather_values),
        SEGMENT_LENGTH,
        WEEKLY_SAMPLES_PER_YEAR,
    );
    let interest_spectrum = welch(
        &as_samples(&interest_values),
        SEGMENT_LENGTH,
        WEEKLY_SAMPLES_PER_YEAR,
    );

    Ok(Analysis {
        keyword: trend.keyword.clone(),
        weather_variable: variable,
        smoothing_window,
        common_dates: pair.dates,
        weekly_weather: pair.weather,
        trend: pair.trend,
        weather: weather_values,
        interest: interest_values,
        smoothed_weather,
        smoothed_interest,
        correlation,
        weather_spectrum,
        interest_spectrum,
    })
}
