//! Core value types.
//!
//! These types enforce their invariants at construction time, so anything
//! that reaches the query builder is already safe to interpolate.

mod endpoint_url;
mod site;
mod window;

pub use endpoint_url::{DEFAULT_ENDPOINT, EndpointUrl};
pub use site::{DEFAULT_SITE_LAT, DEFAULT_SITE_LON, DEFAULT_SITE_NAME, Site};
pub use window::{DEFAULT_LOOKBACK_DAYS, DEFAULT_RADIUS_METERS, Lookback, Radius};
