//! The daily measurements recorded in the station archive's tables.

use crate::error::UsageError;
use std::fmt;
use std::str::FromStr;

/// One measurement column of a [`crate::WeatherTable`].
///
/// The string form (used on the command line, as the column name and in output file names)
/// keeps the archive's camel-case spelling, e.g. `maxTemp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherVariable {
    /// Daily rainfall.
    Rain,
    MaxTemp,
    MinTemp,
    /// Maximum relative humidity.
    MaxRh,
    /// Minimum relative humidity.
    MinRh,
    /// Average wind speed.
    Wind,
    /// Solar radiation.
    Radiation,
}

impl WeatherVariable {
    pub const ALL: [WeatherVariable; 7] = [
        WeatherVariable::Rain,
        WeatherVariable::MaxTemp,
        WeatherVariable::MinTemp,
        WeatherVariable::MaxRh,
        WeatherVariable::MinRh,
        WeatherVariable::Wind,
        WeatherVariable::Radiation,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            WeatherVariable::Rain => "rain",
            WeatherVariable::MaxTemp => "maxTemp",
            WeatherVariable::MinTemp => "minTemp",
            WeatherVariable::MaxRh => "maxRH",
            WeatherVariable::MinRh => "minRH",
            WeatherVariable::Wind => "wind",
            WeatherVariable::Radiation => "radiation",
        }
    }

    /// Unit label used on plot axes.
    pub fn unit(&self) -> &'static str {
        match self {
            WeatherVariable::Rain => "mm/day",
            WeatherVariable::MaxTemp | WeatherVariable::MinTemp => "°C",
            WeatherVariable::MaxRh | WeatherVariable::MinRh => "%",
            WeatherVariable::Wind => "m/s",
            WeatherVariable::Radiation => "MJ/m²",
        }
    }

    /// Column names of all measurements, in archive order.
    pub fn column_names() -> Vec<&'static str> {
        WeatherVariable::ALL
            .iter()
            .map(WeatherVariable::column_name)
            .collect()
    }
}

impl FromStr for WeatherVariable {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WeatherVariable::ALL
            .into_iter()
            .find(|variable| variable.column_name() == s)
            .ok_or_else(|| UsageError::UnknownWeatherVariable(s.to_string()))
    }
}

impl fmt::Display for WeatherVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for variable in WeatherVariable::ALL {
            assert_eq!(variable.to_string().parse::<WeatherVariable>(), Ok(variable));
        }
    }

    #[test]
    fn lower_case_spelling_is_rejected() {
        assert!("maxtemp".parse::<WeatherVariable>().is_err());
        assert!("evaporation".parse::<WeatherVariable>().is_err());
    }
}
