use crate::types::frames::weather_table::DATE_COLUMN;
use crate::utils::{date_values, float_values};
use chrono::NaiveDate;
use polars::prelude::{DataFrame, IntoLazy, LazyFrame, PolarsResult};

/// Column holding the search-interest index. The keyword itself is free text and may clash
/// with any column name, so it is kept on [`TrendSeries::keyword`] only.
pub const INTEREST_COLUMN: &str = "interest";

/// Weekly search-interest index (0-100) for a single keyword.
///
/// The wrapped frame has a `date` column of type `Date` and an `Int64` [`INTEREST_COLUMN`].
#[derive(Debug, Clone)]
pub struct TrendSeries {
    pub keyword: String,
    pub frame: DataFrame,
}

impl TrendSeries {
    pub fn new(keyword: impl Into<String>, frame: DataFrame) -> Self {
        Self {
            keyword: keyword.into(),
            frame,
        }
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn lazy(&self) -> LazyFrame {
        self.frame.clone().lazy()
    }

    pub fn dates(&self) -> PolarsResult<Vec<NaiveDate>> {
        Ok(date_values(&self.frame, DATE_COLUMN)?
            .into_iter()
            .flatten()
            .collect())
    }

    /// Interest values as floats, ready for averaging and correlation.
    pub fn values(&self) -> PolarsResult<Vec<Option<f64>>> {
        float_values(&self.frame, INTEREST_COLUMN)
    }
}
