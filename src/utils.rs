use chrono::{Duration, NaiveDate};
use log::info;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use polars::prelude::{DataFrame, DataType, PolarsResult};
use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = "weather_trends_cache";

/// Bytes escaped in file-name components: everything but ASCII letters, digits and `-`.
const FILE_NAME_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-');

pub fn get_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|p| p.join(CACHE_DIR_NAME))
}

pub fn ensure_dir_exists(path: &Path) -> io::Result<()> {
    match std::fs::metadata(path) {
        Ok(metadata) => {
            if !metadata.is_dir() {
                return Err(io::Error::other(format!(
                    "Path exists but is not a directory: {}",
                    path.display()
                )));
            }
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!("Creating directory: {}", path.display());
            std::fs::create_dir_all(path)
        }
        Err(e) => Err(e),
    }
}

/// Turns free text into a single file-name component.
///
/// Spaces become `_`; every other byte outside `[A-Za-z0-9-]`, including `_`, `/` and `%`,
/// is percent-encoded, so distinct inputs never share a name.
pub fn file_name_component(text: &str) -> String {
    text.split(' ')
        .map(|word| utf8_percent_encode(word, FILE_NAME_ESCAPES).to_string())
        .collect::<Vec<_>>()
        .join("_")
}

fn epoch() -> NaiveDate {
    NaiveDate::default()
}

/// Converts a polars `Date` physical value (days since 1970-01-01) to a `NaiveDate`.
pub fn date_from_days(days: i32) -> Option<NaiveDate> {
    epoch().checked_add_signed(Duration::days(i64::from(days)))
}

/// Reads a `Date` column as calendar dates, preserving nulls and row order.
pub fn date_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<NaiveDate>>> {
    let days = df.column(name)?.cast(&DataType::Int32)?;
    Ok(days
        .i32()?
        .into_iter()
        .map(|value| value.and_then(date_from_days))
        .collect())
}

/// Reads any numeric column as `f64`, preserving nulls and row order.
pub fn float_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let values = df.column(name)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}
