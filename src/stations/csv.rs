//! Parsing of the archive's daily-observation CSV tables.
//!
//! Each file covers one month for one station. It opens with a free-text preamble and a
//! column-title line, and ends with a one-line footer, so the tabular part has to be cut
//! out before it can be handed to the CSV reader.

use crate::stations::error::StationDataError;
use crate::types::frames::weather_table::DATE_COLUMN;
use crate::types::weather_variable::WeatherVariable;
use polars::prelude::*;
use std::io::Cursor;

/// Non-blank lines preceding the first data row: ten preamble lines and the column titles.
pub(crate) const HEADER_LINES: usize = 11;
/// Non-blank lines following the last data row.
pub(crate) const FOOTER_LINES: usize = 1;
/// Columns a data row must have for every field below to exist.
pub(crate) const MIN_COLUMNS: usize = 11;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Zero-based source column of each field kept from the archive layout.
const STATION_COLUMNS: [(usize, &str); 8] = [
    (1, DATE_COLUMN),
    (3, "rain"),
    (5, "maxTemp"),
    (6, "minTemp"),
    (7, "maxRH"),
    (8, "minRH"),
    (9, "wind"),
    (10, "radiation"),
];

/// Cuts the data rows out of a raw archive file.
///
/// The files carry Latin-1 symbols (degree signs) so decoding is lossy. Blank lines do not
/// count towards the header or footer. Field splitting and quoting are left to the CSV
/// reader.
fn table_body(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let end = lines.len().saturating_sub(FOOTER_LINES);
    lines
        .get(HEADER_LINES..end)
        .unwrap_or_default()
        .join("\n")
}

/// An empty frame with the weather table schema.
pub fn empty_weather_frame() -> PolarsResult<DataFrame> {
    let mut columns = vec![Column::from(Series::new_empty(
        DATE_COLUMN.into(),
        &DataType::Date,
    ))];
    columns.extend(
        WeatherVariable::column_names()
            .into_iter()
            .map(|name| Column::from(Series::new_empty(name.into(), &DataType::Float64))),
    );
    DataFrame::new(columns)
}

/// Parses one archive file into a frame with a `Date` column and the seven measurements.
///
/// Measurement fields that are not numbers become nulls, as do dates that do not parse as
/// `dd/mm/yyyy`; rows without a date are then dropped.
pub fn parse_station_csv(bytes: &[u8], file: &str) -> Result<DataFrame, StationDataError> {
    let body = table_body(bytes);
    if body.is_empty() {
        return Ok(empty_weather_frame()?);
    }

    let raw = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(body.into_bytes()))
        .finish()
        .map_err(|e| StationDataError::CsvReadPolars {
            file: file.to_string(),
            source: e,
        })?;

    if raw.width() < MIN_COLUMNS {
        return Err(StationDataError::SchemaMismatch {
            file: file.to_string(),
            expected: MIN_COLUMNS,
            found: raw.width(),
        });
    }

    let generic_names: Vec<String> = STATION_COLUMNS
        .iter()
        .map(|(index, _)| format!("column_{}", index + 1))
        .collect();
    let names: Vec<&str> = STATION_COLUMNS.iter().map(|(_, name)| *name).collect();

    let mut coercions = vec![col(DATE_COLUMN).str().to_date(StrptimeOptions {
        format: Some(DATE_FORMAT.into()),
        strict: false,
        exact: true,
        cache: true,
    })];
    coercions.extend(
        WeatherVariable::column_names()
            .into_iter()
            .map(|name| col(name).cast(DataType::Float64)),
    );

    raw.lazy()
        .select(
            generic_names
                .iter()
                .map(|name| col(name.as_str()).str().strip_chars(lit(NULL)))
                .collect::<Vec<_>>(),
        )
        .rename(&generic_names, &names, true)
        .with_columns(coercions)
        .filter(col(DATE_COLUMN).is_not_null())
        .collect()
        .map_err(|e| StationDataError::CsvReadPolars {
            file: file.to_string(),
            source: e,
        })
}

/// Concatenates per-file frames into one table keyed by unique, ascending dates.
///
/// When several files report the same date, the row from the later file wins.
pub fn combine_station_frames(frames: Vec<DataFrame>) -> PolarsResult<DataFrame> {
    if frames.is_empty() {
        return empty_weather_frame();
    }
    let lazy_frames: Vec<LazyFrame> = frames.into_iter().map(IntoLazy::lazy).collect();
    let measurements: Vec<Expr> = WeatherVariable::column_names()
        .into_iter()
        .map(|name| col(name).last())
        .collect();

    concat(lazy_frames, UnionArgs::default())?
        .group_by_stable([col(DATE_COLUMN)])
        .agg(measurements)
        .sort([DATE_COLUMN], SortMultipleOptions::default())
        .collect()
}
