use crate::types::frames::weather_table::{WeatherTable, DATE_COLUMN};
use crate::types::weather_variable::WeatherVariable;
use polars::prelude::*;

const WEEK_END_COLUMN: &str = "week_end";

/// The Sunday closing the week that contains `date` (the date itself if it is a Sunday).
fn week_ending_sunday(date: Expr) -> Expr {
    // weekday() counts Monday = 1 through Sunday = 7.
    let days_to_sunday = lit(7i32) - date.clone().dt().weekday().cast(DataType::Int32);
    (date.cast(DataType::Int32) + days_to_sunday).cast(DataType::Date)
}

/// Averages daily observations into weeks ending on Sunday, labelled by that Sunday.
///
/// Missing observations are ignored by the mean; a week with no observation of a variable
/// yields a missing value for it.
pub fn resample_weekly(table: &WeatherTable) -> PolarsResult<DataFrame> {
    let means: Vec<Expr> = WeatherVariable::column_names()
        .into_iter()
        .map(|name| col(name).mean())
        .collect();

    table
        .lazy()
        .with_column(week_ending_sunday(col(DATE_COLUMN)).alias(WEEK_END_COLUMN))
        .group_by_stable([col(WEEK_END_COLUMN)])
        .agg(means)
        .rename([WEEK_END_COLUMN], [DATE_COLUMN], true)
        .sort([DATE_COLUMN], SortMultipleOptions::default())
        .collect()
}
