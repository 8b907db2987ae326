//! Error types for radius-watch.
//!
//! One error type is shared by every crate in the workspace.

use std::fmt;
use thiserror::Error;

/// The unified error type for radius-watch operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The upstream answered with a non-success status.
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// The upstream body could not be decoded.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Input validation errors (coordinates, radius, URLs, column names).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Configuration errors that make a query impossible to build.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    /// Returns true for failures caused by the network or the upstream,
    /// as opposed to local misconfiguration.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Upstream(_) | Error::Decode { .. }
        )
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Redirect loop or too many redirects.
    #[error("redirect error: {message}")]
    Redirect { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A non-success HTTP response from the data endpoint.
#[derive(Debug)]
pub struct UpstreamError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server, if it sent a SODA error body.
    pub message: Option<String>,
}

impl UpstreamError {
    /// Create a new upstream error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for UpstreamError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Latitude outside [-90, 90] or not finite.
    #[error("invalid latitude '{value}': {reason}")]
    Latitude { value: String, reason: String },

    /// Longitude outside [-180, 180] or not finite.
    #[error("invalid longitude '{value}': {reason}")]
    Longitude { value: String, reason: String },

    /// Radius not finite or not positive.
    #[error("invalid radius '{value}': {reason}")]
    Radius { value: String, reason: String },

    /// Lookback window of zero days.
    #[error("invalid lookback window '{value}': {reason}")]
    Lookback { value: String, reason: String },

    /// Row limit of zero.
    #[error("invalid limit '{value}': {reason}")]
    Limit { value: String, reason: String },

    /// Malformed site specification.
    #[error("invalid site '{value}': {reason}")]
    Site { value: String, reason: String },

    /// Column name that is not a plain identifier.
    #[error("invalid column name '{value}': {reason}")]
    Column { value: String, reason: String },

    /// App token that cannot be sent as a header.
    #[error("invalid app token: {reason}")]
    AppToken { reason: String },

    /// Invalid endpoint or probe URL.
    #[error("invalid URL '{value}': {reason}")]
    Url { value: String, reason: String },
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The query builder was given no sites.
    #[error("at least one site is required to build a geo filter")]
    NoSites,
}
