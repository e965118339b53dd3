use serde::{Serialize, Deserialize};
use std::fmt;

use crate::validation::{validate_round_id, RoundIdError};

/// Opaque round identifier taken from the request path.
///
/// Only obviously malformed tokens are rejected; everything else is handed
/// to the store as a bound parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoundId(String);

impl RoundId {
    pub fn parse(raw: &str) -> Result<Self, RoundIdError> {
        validate_round_id(raw)?;
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RoundId {
    type Err = RoundIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One row of a round's results: an option and how many votes reference it.
#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionTally {
    pub option_id: String,
    pub label: String,
    pub votes: i64,
}

impl OptionTally {
    pub fn new(option_id: impl Into<String>, label: impl Into<String>, votes: i64) -> Self {
        Self {
            option_id: option_id.into(),
            label: label.into(),
            votes,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub ok: bool,
}

impl HealthStatus {
    pub const fn ok() -> Self {
        Self { ok: true }
    }
}

// Backend-specific Rocket implementation
#[cfg(feature = "backend")]
mod backend_impl {
    use super::*;
    use rocket::request::FromParam;

    impl<'a> FromParam<'a> for RoundId {
        type Error = RoundIdError;

        fn from_param(param: &'a str) -> Result<Self, Self::Error> {
            RoundId::parse(param)
        }
    }
}
