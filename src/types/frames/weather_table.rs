//! Contains the `WeatherTable` wrapper around a daily station-observation `DataFrame`.

use crate::types::weather_variable::WeatherVariable;
use crate::utils::{date_values, float_values};
use chrono::NaiveDate;
use polars::prelude::{DataFrame, IntoLazy, LazyFrame, PolarsResult};

/// Name of the date column shared by every frame in the crate.
pub const DATE_COLUMN: &str = "date";

/// Daily weather observations for one state's reference station.
///
/// The wrapped frame has a `date` column of type `Date` (unique, ascending) followed by one
/// nullable `Float64` column per [`WeatherVariable`]. Instances come from
/// [`crate::WeatherTrends::weather`] or from parsing archive files directly.
#[derive(Debug, Clone)]
pub struct WeatherTable {
    /// The underlying Polars frame.
    pub frame: DataFrame,
}

impl WeatherTable {
    pub fn new(frame: DataFrame) -> Self {
        Self { frame }
    }

    /// Number of observation days.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    /// Observation dates in row order. Rows without a date are skipped.
    pub fn dates(&self) -> PolarsResult<Vec<NaiveDate>> {
        Ok(date_values(&self.frame, DATE_COLUMN)?
            .into_iter()
            .flatten()
            .collect())
    }

    /// Values of one measurement in row order, `None` where missing.
    pub fn values(&self, variable: WeatherVariable) -> PolarsResult<Vec<Option<f64>>> {
        float_values(&self.frame, variable.column_name())
    }
}
