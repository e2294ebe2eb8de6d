use crate::analysis::error::AnalysisError;
use crate::cache::error::CacheError;
use crate::plot::error::PlotError;
use crate::stations::error::StationDataError;
use crate::trends::error::TrendDataError;
use thiserror::Error;

/// Invalid input supplied by the caller, reported before any remote I/O happens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("state must be 'VIC', 'NSW', 'QLD', 'ACT', 'SA', 'WA', 'NT' or 'TAS', got '{0}'")]
    UnknownState(String),

    #[error("country must be 'AU', got '{0}'")]
    UnknownCountry(String),

    #[error(
        "weather variable must be 'rain', 'maxTemp', 'minTemp', 'maxRH', 'minRH', 'wind' or 'radiation', got '{0}'"
    )]
    UnknownWeatherVariable(String),

    #[error("smoothing window must be a positive integer, got {0}")]
    InvalidSmoothingWindow(usize),
}

#[derive(Debug, Error)]
pub enum WeatherTrendsError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    StationData(#[from] StationDataError),

    #[error(transparent)]
    TrendData(#[from] TrendDataError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("Failed to determine cache directory")]
    CacheDirResolution,
}
