mod analysis;
mod cache;
mod error;
mod plot;
mod stations;
mod trends;
mod types;
mod utils;
mod weather_trends;

pub use error::{UsageError, WeatherTrendsError};
pub use weather_trends::*;

pub use types::country::Country;
pub use types::state::State;
pub use types::weather_variable::WeatherVariable;
pub use types::frames::trend_series::{TrendSeries, INTEREST_COLUMN};
pub use types::frames::weather_table::{WeatherTable, DATE_COLUMN};

pub use stations::csv::{combine_station_frames, parse_station_csv};
pub use stations::reader::{FtpSettings, StationDataReader};
pub use trends::client::{TrendDataReader, TrendsSettings};
pub use trends::timeline::parse_timeline;
pub use cache::snapshot::{SnapshotCache, SnapshotKey};

pub use analysis::align::{align, common_dates, AlignedPair};
pub use analysis::correlation::pearson;
pub use analysis::engine::{analyse, Analysis};
pub use analysis::periodogram::{welch, Periodogram, SEGMENT_LENGTH, WEEKLY_SAMPLES_PER_YEAR};
pub use analysis::resample::resample_weekly;
pub use analysis::smooth::centered_rolling_mean;
pub use plot::renderer::PlotRenderer;

pub use analysis::error::AnalysisError;
pub use cache::error::CacheError;
pub use plot::error::PlotError;
pub use stations::error::StationDataError;
pub use trends::error::TrendDataError;
