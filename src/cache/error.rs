use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Failed to create cache directory '{0}'")]
    CacheDirCreation(PathBuf, #[source] std::io::Error),

    #[error("Failed to open snapshot '{0}'")]
    SnapshotOpen(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode snapshot '{0}'")]
    ParquetRead(PathBuf, #[source] PolarsError),

    #[error("I/O error writing snapshot '{0}'")]
    ParquetWriteIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing snapshot '{0}'")]
    ParquetWritePolars(PathBuf, #[source] PolarsError),
}
