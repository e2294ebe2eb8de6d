//! Australian states and territories covered by the station archive, and the fixed
//! table mapping each one to the directory holding its reference station's CSV files.

use crate::error::UsageError;
use std::fmt;
use std::str::FromStr;

/// Directory on the archive below which every per-state station directory lives.
pub(crate) const ARCHIVE_BASE_DIRECTORY: &str = "anon/gen/clim_data/IDCKWCDEA0/tables/";

/// An Australian state or territory.
///
/// Each state is served by a single reference station (usually the capital's airport),
/// so the state code is enough to locate the weather data.
///
/// # Examples
///
/// ```
/// use weather_trends::State;
///
/// let state: State = "QLD".parse().unwrap();
/// assert_eq!(state, State::Qld);
/// assert_eq!(state.station_directory(), "qld/brisbane_aero/");
/// assert!("Queensland".parse::<State>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum State {
    Vic,
    Nsw,
    Qld,
    Act,
    Sa,
    Wa,
    Nt,
    Tas,
}

impl State {
    /// Every supported state, in the order the archive documents them.
    pub const ALL: [State; 8] = [
        State::Vic,
        State::Nsw,
        State::Qld,
        State::Act,
        State::Sa,
        State::Wa,
        State::Nt,
        State::Tas,
    ];

    /// The upper-case code used on the command line and in geography codes.
    pub fn code(&self) -> &'static str {
        match self {
            State::Vic => "VIC",
            State::Nsw => "NSW",
            State::Qld => "QLD",
            State::Act => "ACT",
            State::Sa => "SA",
            State::Wa => "WA",
            State::Nt => "NT",
            State::Tas => "TAS",
        }
    }

    /// Directory of the state's reference station, relative to the archive's table root.
    ///
    /// The ACT has no table of its own; Canberra Airport is filed under NSW.
    pub fn station_directory(&self) -> &'static str {
        match self {
            State::Vic => "vic/melbourne_airport/",
            State::Nsw => "nsw/sydney_airport_amo/",
            State::Qld => "qld/brisbane_aero/",
            State::Act => "nsw/canberra_airport/",
            State::Sa => "sa/adelaide_airport/",
            State::Wa => "wa/perth_airport/",
            State::Nt => "nt/darwin_airport/",
            State::Tas => "tas/hobart_airport/",
        }
    }

    /// Full directory path on the archive, ready for a `cwd`.
    pub fn archive_path(&self) -> String {
        format!("{}{}", ARCHIVE_BASE_DIRECTORY, self.station_directory())
    }
}

impl FromStr for State {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        State::ALL
            .into_iter()
            .find(|state| state.code() == s)
            .ok_or_else(|| UsageError::UnknownState(s.to_string()))
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
