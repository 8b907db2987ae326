//! Search radius and lookback window.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Default search radius in meters (about 160 feet).
pub const DEFAULT_RADIUS_METERS: f64 = 48.8;

/// Default lookback window in days.
pub const DEFAULT_LOOKBACK_DAYS: u32 = 90;

/// A validated search radius in meters.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Radius(f64);

impl Radius {
    /// Create a radius, rejecting non-finite and non-positive values.
    pub fn new(meters: f64) -> Result<Self, Error> {
        if !meters.is_finite() || meters <= 0.0 {
            return Err(InvalidInputError::Radius {
                value: meters.to_string(),
                reason: "must be a finite number of meters greater than zero".to_string(),
            }
            .into());
        }
        Ok(Self(meters))
    }

    /// Returns the radius in meters.
    pub fn meters(&self) -> f64 {
        self.0
    }

    /// Returns the radius in feet, rounded to the nearest foot.
    pub fn feet(&self) -> u32 {
        (self.0 / 0.3048).round() as u32
    }
}

impl Default for Radius {
    fn default() -> Self {
        Self(DEFAULT_RADIUS_METERS)
    }
}

impl TryFrom<f64> for Radius {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Radius> for f64 {
    fn from(radius: Radius) -> Self {
        radius.0
    }
}

impl FromStr for Radius {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let meters: f64 = s.trim().parse().map_err(|_| InvalidInputError::Radius {
            value: s.to_string(),
            reason: "not a number".to_string(),
        })?;
        Self::new(meters)
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} m", self.0)
    }
}

/// A rolling lookback window measured in whole days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Lookback(u32);

impl Lookback {
    /// Create a window of at least one day.
    pub fn days(days: u32) -> Result<Self, Error> {
        if days == 0 {
            return Err(InvalidInputError::Lookback {
                value: days.to_string(),
                reason: "must be at least one day".to_string(),
            }
            .into());
        }
        Ok(Self(days))
    }

    /// Returns the window length in days.
    pub fn as_days(&self) -> u32 {
        self.0
    }

    /// Returns the window as a chrono duration.
    pub fn duration(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::days(i64::from(self.0))
    }
}

impl Default for Lookback {
    fn default() -> Self {
        Self(DEFAULT_LOOKBACK_DAYS)
    }
}

impl TryFrom<u32> for Lookback {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::days(value)
    }
}

impl From<Lookback> for u32 {
    fn from(lookback: Lookback) -> Self {
        lookback.0
    }
}

impl fmt::Display for Lookback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} days", self.0)
    }
}
