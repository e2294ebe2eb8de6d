use crate::stations::csv::{combine_station_frames, parse_station_csv};
use crate::stations::error::StationDataError;
use crate::types::frames::weather_table::WeatherTable;
use crate::types::state::State;
use log::{info, warn};
use suppaftp::FtpStream;

/// Connection settings for the station archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    /// Anonymous logins conventionally pass an e-mail address here.
    pub password: String,
}

impl Default for FtpSettings {
    fn default() -> Self {
        Self {
            host: "ftp2.bom.gov.au".to_string(),
            port: 21,
            user: "anonymous".to_string(),
            password: "anonymous@".to_string(),
        }
    }
}

/// Downloads and parses the daily observation tables of a state's reference station.
pub struct StationDataReader {
    settings: FtpSettings,
}

impl StationDataReader {
    pub fn new(settings: FtpSettings) -> Self {
        Self { settings }
    }

    /// Reads every monthly table available for `state` into one [`WeatherTable`].
    pub fn read(&self, state: State) -> Result<WeatherTable, StationDataError> {
        let files = self.download(state)?;
        let frames = files
            .iter()
            .map(|(name, bytes)| {
                info!("Reading {}", name);
                parse_station_csv(bytes, name)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let table = WeatherTable::new(combine_station_frames(frames)?);
        info!(
            "Read {} days of observations for {} from {} files",
            table.height(),
            state,
            files.len()
        );
        Ok(table)
    }

    /// Fetches all `*.csv` files of the state's directory in a single session, sorted by name.
    fn download(&self, state: State) -> Result<Vec<(String, Vec<u8>)>, StationDataError> {
        let address = format!("{}:{}", self.settings.host, self.settings.port);
        let mut ftp = FtpStream::connect(address.as_str())
            .map_err(|e| StationDataError::Connect(address.clone(), e))?;
        ftp.login(&self.settings.user, &self.settings.password)
            .map_err(|e| StationDataError::Login(address.clone(), e))?;

        let directory = state.archive_path();
        ftp.cwd(&directory)
            .map_err(|e| StationDataError::ChangeDirectory(directory.clone(), e))?;
        info!("Accessed {}/{}", self.settings.host, directory);

        let mut names = ftp
            .nlst(Some("*.csv"))
            .map_err(|e| StationDataError::ListFiles(directory.clone(), e))?;
        if names.is_empty() {
            return Err(StationDataError::NoStationFiles(directory));
        }
        names.sort();

        let mut files = Vec::with_capacity(names.len());
        for name in names {
            let buffer = ftp
                .retr_as_buffer(&name)
                .map_err(|e| StationDataError::Download {
                    file: name.clone(),
                    source: e,
                })?;
            files.push((name, buffer.into_inner()));
        }

        if let Err(e) = ftp.quit() {
            warn!("Failed to close archive session cleanly: {}", e);
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_log_in_anonymously() {
        let settings = FtpSettings::default();
        assert_eq!(settings.user, "anonymous");
        assert_eq!(settings.port, 21);
    }

    #[test]
    #[ignore = "requires network access to the station archive"]
    fn reads_melbourne_airport_tables() -> Result<(), StationDataError> {
        let reader = StationDataReader::new(FtpSettings::default());
        let table = reader.read(State::Vic)?;
        assert!(table.height() > 28, "expected at least a month of observations");
        Ok(())
    }
}
