//! Mapping of reqwest failures onto the shared error type.

use radius_core::error::{Error, TransportError};

/// Convert a reqwest error into a transport error.
pub(crate) fn transport(err: reqwest::Error) -> Error {
    let message = err.to_string();
    let transport = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else if err.is_redirect() {
        TransportError::Redirect { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(transport)
}
