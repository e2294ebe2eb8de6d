use crate::error::UsageError;
use crate::types::state::State;
use std::fmt;
use std::str::FromStr;

/// Country scope of a query. Only Australia is served by the station archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Country {
    #[default]
    Australia,
}

impl Country {
    pub fn code(&self) -> &'static str {
        match self {
            Country::Australia => "AU",
        }
    }

    /// Geography code understood by the trends service, e.g. `AU-VIC`.
    pub fn geo_code(&self, state: State) -> String {
        format!("{}-{}", self.code(), state.code())
    }
}

impl FromStr for Country {
    type Err = UsageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AU" => Ok(Country::Australia),
            other => Err(UsageError::UnknownCountry(other.to_string())),
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_australia_is_accepted() {
        assert_eq!("AU".parse::<Country>(), Ok(Country::Australia));
        assert_eq!(
            "AUS".parse::<Country>(),
            Err(UsageError::UnknownCountry("AUS".to_string()))
        );
    }

    #[test]
    fn geo_code_joins_country_and_state() {
        assert_eq!(Country::Australia.geo_code(State::Tas), "AU-TAS");
    }
}
