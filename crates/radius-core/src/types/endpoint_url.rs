//! SODA resource endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// The default SODA resource: San Francisco 311 cases.
pub const DEFAULT_ENDPOINT: &str = "https://data.sfgov.org/resource/vw6y-z8j6.json";

/// A validated SODA resource URL, e.g. `https://<domain>/resource/<id>.json`.
///
/// Only the JSON rendering of a resource is accepted, since records are
/// decoded as JSON. The URL may not carry a query string of its own; the
/// query parameters belong to [`QuerySpec`](crate::QuerySpec). Plain HTTP
/// is accepted for loopback hosts only.
///
/// # Example
///
/// ```
/// use radius_core::EndpointUrl;
///
/// let endpoint: EndpointUrl = "https://data.sfgov.org/resource/vw6y-z8j6.json".parse().unwrap();
/// assert_eq!(endpoint.dataset_id(), Some("vw6y-z8j6"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct EndpointUrl(Url);

impl EndpointUrl {
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let raw = s.as_ref();
        let reject = |reason: &str| -> Error {
            InvalidInputError::Url {
                value: raw.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        let url = Url::parse(raw).map_err(|e| reject(&e.to_string()))?;

        let Some(host) = url.host_str() else {
            return Err(reject("must have a host"));
        };
        let loopback = matches!(host, "localhost" | "127.0.0.1" | "[::1]");
        match url.scheme() {
            "https" => {}
            "http" if loopback => {}
            _ => return Err(reject("must use https (http only for localhost)")),
        }
        if url.query().is_some() {
            return Err(reject("must not carry a query string"));
        }
        if !url.path().ends_with(".json") {
            return Err(reject("must point at a .json resource"));
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Socrata dataset identifier, the file stem of the resource path.
    pub fn dataset_id(&self) -> Option<&str> {
        self.0
            .path_segments()?
            .next_back()?
            .strip_suffix(".json")
            .filter(|id| !id.is_empty())
    }
}

impl Default for EndpointUrl {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT).expect("default endpoint is valid")
    }
}

impl fmt::Display for EndpointUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for EndpointUrl {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EndpointUrl {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
