//! Main entry point: fetches station observations and search interest, with snapshot
//! caching, and runs the correlation analysis on them.

use crate::analysis::engine::{analyse, Analysis};
use crate::cache::error::CacheError;
use crate::cache::snapshot::{SnapshotCache, SnapshotKey};
use crate::error::WeatherTrendsError;
use crate::stations::reader::{FtpSettings, StationDataReader};
use crate::trends::client::{TrendDataReader, TrendsSettings};
use crate::types::country::Country;
use crate::types::frames::trend_series::TrendSeries;
use crate::types::frames::weather_table::WeatherTable;
use crate::types::state::State;
use crate::types::weather_variable::WeatherVariable;
use crate::utils::{ensure_dir_exists, get_cache_dir};
use bon::bon;
use log::info;
use std::path::{Path, PathBuf};

/// Default centered rolling-mean window, in weeks.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 4;

/// Client tying the station archive, the trends service and the snapshot cache together.
///
/// Every fetch first looks for a snapshot under the cache folder and only goes to the
/// network when none exists. Fresh downloads are written back unless snapshot writing is
/// disabled with [`WeatherTrends::write_snapshots`].
///
/// # Examples
///
/// ```no_run
/// # use weather_trends::{State, WeatherTrends, WeatherTrendsError, WeatherVariable};
/// # fn run() -> Result<(), WeatherTrendsError> {
/// let client = WeatherTrends::new()?;
/// let analysis = client
///     .analyse()
///     .keyword("depression")
///     .state(State::Vic)
///     .weather_variable(WeatherVariable::Radiation)
///     .call()?;
/// println!("ρ = {:.2}", analysis.correlation);
/// # Ok(())
/// # }
/// ```
pub struct WeatherTrends {
    cache: SnapshotCache,
    stations: StationDataReader,
    trends: TrendDataReader,
}

#[bon]
impl WeatherTrends {
    /// Creates a client that keeps its snapshots in `cache_folder`, creating it if needed.
    ///
    /// # Errors
    ///
    /// [`CacheError::CacheDirCreation`] if the folder cannot be created, or a
    /// [`TrendDataError`](crate::TrendDataError) if the HTTP client cannot be built.
    pub fn with_cache_folder(cache_folder: PathBuf) -> Result<Self, WeatherTrendsError> {
        Self::with_settings(cache_folder, FtpSettings::default(), TrendsSettings::default())
    }

    /// Like [`WeatherTrends::with_cache_folder`], with explicit archive and trends settings.
    pub fn with_settings(
        cache_folder: PathBuf,
        ftp: FtpSettings,
        trends: TrendsSettings,
    ) -> Result<Self, WeatherTrendsError> {
        ensure_dir_exists(&cache_folder)
            .map_err(|e| CacheError::CacheDirCreation(cache_folder.clone(), e))?;
        Ok(Self {
            cache: SnapshotCache::new(&cache_folder),
            stations: StationDataReader::new(ftp),
            trends: TrendDataReader::new(trends)?,
        })
    }

    /// Creates a client using the platform cache directory, e.g. `~/.cache/weather_trends_cache`.
    ///
    /// # Errors
    ///
    /// [`WeatherTrendsError::CacheDirResolution`] when the platform has no cache directory.
    pub fn new() -> Result<Self, WeatherTrendsError> {
        let cache_folder = get_cache_dir().ok_or(WeatherTrendsError::CacheDirResolution)?;
        Self::with_cache_folder(cache_folder)
    }

    /// Enables or disables writing freshly downloaded data back to the cache.
    pub fn write_snapshots(mut self, enabled: bool) -> Self {
        self.cache = self.cache.with_writes(enabled);
        self
    }

    pub fn cache_folder(&self) -> &Path {
        self.cache.root()
    }

    /// Daily observations of the reference station of `state`.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.state(State)`: **Required.**
    /// * `.country(Country)`: Optional. Defaults to [`Country::Australia`].
    #[builder]
    pub fn weather(
        &self,
        state: State,
        country: Option<Country>,
    ) -> Result<WeatherTable, WeatherTrendsError> {
        let country = country.unwrap_or_default();
        let key = SnapshotKey::weather(country, state);
        let frame = self.cache.get_or_fetch(&key, || {
            Ok::<_, WeatherTrendsError>(self.stations.read(state)?.frame)
        })?;
        Ok(WeatherTable::new(frame))
    }

    /// Weekly search interest for `keyword` in `state`.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.keyword(&str)`: **Required.** The search term.
    /// * `.state(State)`: **Required.**
    /// * `.country(Country)`: Optional. Defaults to [`Country::Australia`].
    #[builder]
    pub fn trend(
        &self,
        keyword: &str,
        state: State,
        country: Option<Country>,
    ) -> Result<TrendSeries, WeatherTrendsError> {
        let country = country.unwrap_or_default();
        let key = SnapshotKey::trend(keyword, country, state);
        let frame = self.cache.get_or_fetch(&key, || {
            Ok::<_, WeatherTrendsError>(self.trends.read(keyword, country, state)?.frame)
        })?;
        Ok(TrendSeries::new(keyword, frame))
    }

    /// Fetches both series and correlates `weather_variable` with search interest in `keyword`.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.keyword(&str)`: **Required.**
    /// * `.state(State)`: **Required.**
    /// * `.weather_variable(WeatherVariable)`: **Required.**
    /// * `.country(Country)`: Optional. Defaults to [`Country::Australia`].
    /// * `.smoothing_window(usize)`: Optional. Weeks in the centered rolling mean, defaults
    ///   to [`DEFAULT_SMOOTHING_WINDOW`]. Must be positive.
    #[builder]
    pub fn analyse(
        &self,
        keyword: &str,
        state: State,
        weather_variable: WeatherVariable,
        country: Option<Country>,
        smoothing_window: Option<usize>,
    ) -> Result<Analysis, WeatherTrendsError> {
        let country = country.unwrap_or_default();
        let smoothing_window = smoothing_window.unwrap_or(DEFAULT_SMOOTHING_WINDOW);

        let trend = self
            .trend()
            .keyword(keyword)
            .state(state)
            .country(country)
            .call()?;
        let weather = self.weather().state(state).country(country).call()?;
        info!(
            "Analysing '{}' against {} for {} with a {}-week window",
            keyword,
            weather_variable,
            country.geo_code(state),
            smoothing_window
        );

        Ok(analyse(&weather, &trend, weather_variable, smoothing_window)?)
    }
}
