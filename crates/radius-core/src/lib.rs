//! radius-core - Core types for the radius-watch dashboards.
//!
//! Everything here is pure: query construction, record parsing, media link
//! classification and feed/probe selection. Network access lives in
//! `radius-socrata`.

pub mod classify;
pub mod error;
pub mod feed;
pub mod probe;
pub mod query;
pub mod record;
pub mod session;
pub mod traits;
pub mod types;

pub use classify::{MediaClassification, classify, classify_url};
pub use error::Error;
pub use feed::{Card, FeedView};
pub use probe::{ProbeReport, ProbeTarget, ProbeView};
pub use query::{QueryBuilder, QuerySpec};
pub use record::{MediaField, Record};
pub use session::SessionLimit;
pub use traits::RecordSource;
pub use types::{EndpointUrl, Lookback, Radius, Site};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
