pub mod trend_series;
pub mod weather_table;
