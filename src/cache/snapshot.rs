//! On-disk snapshots of fetched tables.
//!
//! A snapshot is a Parquet file whose name is derived from the query that produced it.
//! Snapshots never expire; deleting the file is the only way to force a refetch.

use crate::cache::error::CacheError;
use crate::types::country::Country;
use crate::types::state::State;
use crate::utils::{ensure_dir_exists, file_name_component};
use log::{info, warn};
use polars::prelude::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// Identifies a snapshot by the query parameters of the table it holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    Trend {
        keyword: String,
        country: Country,
        state: State,
    },
    Weather {
        country: Country,
        state: State,
    },
}

impl SnapshotKey {
    pub fn trend(keyword: &str, country: Country, state: State) -> Self {
        SnapshotKey::Trend {
            keyword: keyword.to_string(),
            country,
            state,
        }
    }

    pub fn weather(country: Country, state: State) -> Self {
        SnapshotKey::Weather { country, state }
    }

    /// Subdirectory of the cache root holding snapshots of this kind.
    pub fn namespace(&self) -> &'static str {
        match self {
            SnapshotKey::Trend { .. } => "trend_data",
            SnapshotKey::Weather { .. } => "station_data",
        }
    }

    pub fn file_name(&self) -> String {
        match self {
            SnapshotKey::Trend {
                keyword,
                country,
                state,
            } => format!(
                "trend_{}_{}_{}.parquet",
                file_name_component(keyword),
                country,
                state
            ),
            SnapshotKey::Weather { country, state } => {
                format!("weather_{}_{}.parquet", country, state)
            }
        }
    }
}

pub struct SnapshotCache {
    root: PathBuf,
    write_enabled: bool,
}

impl SnapshotCache {
    /// Creates a cache rooted at `root`. Snapshot writing is enabled.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            write_enabled: true,
        }
    }

    /// Enables or disables persisting fetched tables. Reading is unaffected.
    pub fn with_writes(mut self, enabled: bool) -> Self {
        self.write_enabled = enabled;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, key: &SnapshotKey) -> PathBuf {
        self.root.join(key.namespace()).join(key.file_name())
    }

    /// Reads a snapshot back. A missing file is `Ok(None)`; anything else that goes wrong
    /// is an error, so a damaged snapshot is never mistaken for an absent one.
    pub fn load(&self, key: &SnapshotKey) -> Result<Option<DataFrame>, CacheError> {
        let path = self.path(key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::SnapshotOpen(path, e)),
        };
        let frame = ParquetReader::new(file)
            .finish()
            .map_err(|e| CacheError::ParquetRead(path, e))?;
        Ok(Some(frame))
    }

    /// Writes `frame` as the snapshot for `key`, replacing any previous one.
    pub fn store(&self, key: &SnapshotKey, frame: &mut DataFrame) -> Result<PathBuf, CacheError> {
        let directory = self.root.join(key.namespace());
        ensure_dir_exists(&directory).map_err(|e| CacheError::CacheDirCreation(directory, e))?;

        let path = self.path(key);
        let file =
            File::create(&path).map_err(|e| CacheError::ParquetWriteIo(path.clone(), e))?;
        ParquetWriter::new(file)
            .with_compression(ParquetCompression::Snappy)
            .finish(frame)
            .map_err(|e| CacheError::ParquetWritePolars(path.clone(), e))?;
        Ok(path)
    }

    /// Returns the snapshot for `key`, or runs `fetch` exactly once when there is none and
    /// persists its result if writing is enabled.
    pub fn get_or_fetch<E, F>(&self, key: &SnapshotKey, fetch: F) -> Result<DataFrame, E>
    where
        F: FnOnce() -> Result<DataFrame, E>,
        E: From<CacheError>,
    {
        if let Some(frame) = self.load(key)? {
            info!("Cache hit for {} at {:?}", key.file_name(), self.path(key));
            return Ok(frame);
        }

        warn!("Cache miss for {}. Fetching.", key.file_name());
        let mut frame = fetch()?;
        if self.write_enabled {
            let path = self.store(key, &mut frame)?;
            info!("Cached {} rows to {:?}", frame.height(), path);
        }
        Ok(frame)
    }
}
