use polars::error::PolarsError;
use suppaftp::FtpError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationDataError {
    #[error("Failed to connect to archive at {0}")]
    Connect(String, #[source] FtpError),

    #[error("Anonymous login to {0} was refused")]
    Login(String, #[source] FtpError),

    #[error("Failed to open archive directory '{0}'")]
    ChangeDirectory(String, #[source] FtpError),

    #[error("Failed to list station files in '{0}'")]
    ListFiles(String, #[source] FtpError),

    #[error("No station files found in '{0}'")]
    NoStationFiles(String),

    #[error("Failed to download station file '{file}'")]
    Download {
        file: String,
        #[source]
        source: FtpError,
    },

    #[error("Parsing error processing CSV data in '{file}'")]
    CsvReadPolars {
        file: String,
        #[source]
        source: PolarsError,
    },

    #[error("CSV column count ({found}) is below the expected {expected} in '{file}'")]
    SchemaMismatch {
        file: String,
        expected: usize,
        found: usize,
    },

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),
}
