//! Target site type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Name of the built-in target site.
pub const DEFAULT_SITE_NAME: &str = "My Block";

/// Latitude of the built-in target site.
pub const DEFAULT_SITE_LAT: f64 = 37.779_357_084_642_53;

/// Longitude of the built-in target site.
pub const DEFAULT_SITE_LON: f64 = -122.406_489_342_071_2;

/// A fixed target coordinate.
///
/// Coordinates are checked at construction, so every `Site` prints as a
/// plain finite decimal and is safe to interpolate into a filter expression.
///
/// # Example
///
/// ```
/// use radius_core::Site;
///
/// let site: Site = "Corner=37.78,-122.41".parse().unwrap();
/// assert_eq!(site.name(), "Corner");
/// assert_eq!(site.lat(), 37.78);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSite")]
pub struct Site {
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawSite {
    name: String,
    lat: f64,
    lon: f64,
}

impl TryFrom<RawSite> for Site {
    type Error = Error;

    fn try_from(raw: RawSite) -> Result<Self, Self::Error> {
        Site::new(raw.name, raw.lat, raw.lon)
    }
}

impl Site {
    /// Create a new site, validating the coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if either coordinate is not finite or out of range.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Result<Self, Error> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidInputError::Latitude {
                value: lat.to_string(),
                reason: "must be a finite number between -90 and 90".to_string(),
            }
            .into());
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidInputError::Longitude {
                value: lon.to_string(),
                reason: "must be a finite number between -180 and 180".to_string(),
            }
            .into());
        }

        Ok(Self {
            name: name.into(),
            lat,
            lon,
        })
    }

    /// Returns the display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Returns the longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl Default for Site {
    fn default() -> Self {
        Self {
            name: DEFAULT_SITE_NAME.to_string(),
            lat: DEFAULT_SITE_LAT,
            lon: DEFAULT_SITE_LON,
        }
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.lat, self.lon)
    }
}

/// Parses `NAME=LAT,LON` or `LAT,LON`.
impl FromStr for Site {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::Site {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let (name, coords) = match s.split_once('=') {
            Some((name, coords)) => (Some(name.trim()), coords),
            None => (None, s),
        };

        let (lat, lon) = coords
            .split_once(',')
            .ok_or_else(|| invalid("expected NAME=LAT,LON or LAT,LON"))?;

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| invalid("latitude is not a number"))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| invalid("longitude is not a number"))?;

        let name = match name {
            Some("") => return Err(invalid("name cannot be empty")),
            Some(name) => name.to_string(),
            None => format!("{}, {}", lat, lon),
        };

        Site::new(name, lat, lon)
    }
}
