//! radius-socrata - Socrata (SODA) backend for radius-watch.
//!
//! Provides the network side of the dashboards: the record fetcher, a
//! time-expiring cache that can wrap it, and the diagnostic link prober.

mod cache;
mod client;
mod error;
mod probe;

pub use cache::{CachedSource, DEFAULT_TTL, TtlCache};
pub use client::{DEFAULT_FETCH_TIMEOUT, SocrataClient};
pub use probe::{BROWSER_USER_AGENT, DEFAULT_PROBE_TIMEOUT, PROBE_REFERER, Prober};
