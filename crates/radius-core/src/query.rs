//! SoQL query construction.
//!
//! [`QueryBuilder`] turns a set of sites, a radius and a lookback window into
//! the `$where` / `$order` / `$limit` parameters understood by a Socrata
//! (SODA) resource endpoint.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use radius_core::{Lookback, QueryBuilder, Radius, Site};
//!
//! let builder = QueryBuilder::new(vec![Site::default()], Radius::default(), Lookback::default()).unwrap();
//! let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 30, 0).unwrap();
//! let query = builder.build_at(now, 800).unwrap();
//!
//! assert_eq!(
//!     query.filter_clause,
//!     "within_circle(point, 37.77935708464253, -122.4064893420712, 48.8) \
//!      AND requested_datetime > '2024-03-03T08:30:00' AND media_url IS NOT NULL"
//! );
//! assert_eq!(query.order_clause, "requested_datetime DESC");
//! ```

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{ConfigError, Error, InvalidInputError};
use crate::types::{Lookback, Radius, Site};

/// Format used for the lower time bound.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Default location column.
pub const GEO_COLUMN: &str = "point";

/// Default request timestamp column.
pub const TIME_COLUMN: &str = "requested_datetime";

/// Default media link column.
pub const MEDIA_COLUMN: &str = "media_url";

/// A fully rendered query, ready to be sent as request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuerySpec {
    /// Value of `$where`.
    pub filter_clause: String,
    /// Value of `$order`.
    pub order_clause: String,
    /// Value of `$limit`.
    pub limit: u32,
}

impl QuerySpec {
    /// Returns the SODA request parameters in a stable order.
    pub fn params(&self) -> [(&'static str, String); 3] {
        [
            ("$where", self.filter_clause.clone()),
            ("$order", self.order_clause.clone()),
            ("$limit", self.limit.to_string()),
        ]
    }
}

/// Builds [`QuerySpec`]s for a fixed set of sites.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    sites: Vec<Site>,
    radius: Radius,
    lookback: Lookback,
    geo_column: String,
    time_column: String,
    media_column: String,
}

impl QueryBuilder {
    /// Create a builder for the given sites.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSites`] if `sites` is empty.
    pub fn new(sites: Vec<Site>, radius: Radius, lookback: Lookback) -> Result<Self, Error> {
        if sites.is_empty() {
            return Err(ConfigError::NoSites.into());
        }

        Ok(Self {
            sites,
            radius,
            lookback,
            geo_column: GEO_COLUMN.to_string(),
            time_column: TIME_COLUMN.to_string(),
            media_column: MEDIA_COLUMN.to_string(),
        })
    }

    /// Override the location column.
    pub fn geo_column(mut self, column: impl Into<String>) -> Result<Self, Error> {
        self.geo_column = validate_identifier(column.into())?;
        Ok(self)
    }

    /// Override the request timestamp column.
    pub fn time_column(mut self, column: impl Into<String>) -> Result<Self, Error> {
        self.time_column = validate_identifier(column.into())?;
        Ok(self)
    }

    /// Override the media link column.
    pub fn media_column(mut self, column: impl Into<String>) -> Result<Self, Error> {
        self.media_column = validate_identifier(column.into())?;
        Ok(self)
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn radius(&self) -> Radius {
        self.radius
    }

    pub fn lookback(&self) -> Lookback {
        self.lookback
    }

    /// Build a query using the local wall clock.
    pub fn build(&self, limit: u32) -> Result<QuerySpec, Error> {
        self.build_at(chrono::Local::now().naive_local(), limit)
    }

    /// Build a query relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if `limit` is zero or the window reaches past the
    /// earliest representable date.
    pub fn build_at(&self, now: NaiveDateTime, limit: u32) -> Result<QuerySpec, Error> {
        if limit == 0 {
            return Err(InvalidInputError::Limit {
                value: limit.to_string(),
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let since = now
            .checked_sub_signed(self.lookback.duration())
            .ok_or_else(|| InvalidInputError::Lookback {
                value: self.lookback.as_days().to_string(),
                reason: "reaches before the earliest representable date".to_string(),
            })?
            .format(TIMESTAMP_FORMAT)
            .to_string();

        let filter_clause = format!(
            "{} AND {} > {} AND {} IS NOT NULL",
            self.geo_clause(),
            self.time_column,
            quote_literal(&since),
            self.media_column
        );

        Ok(QuerySpec {
            filter_clause,
            order_clause: format!("{} DESC", self.time_column),
            limit,
        })
    }

    fn geo_clause(&self) -> String {
        let circles: Vec<String> = self
            .sites
            .iter()
            .map(|site| {
                format!(
                    "within_circle({}, {}, {}, {})",
                    self.geo_column,
                    site.lat(),
                    site.lon(),
                    self.radius.meters()
                )
            })
            .collect();

        match circles.as_slice() {
            [single] => single.clone(),
            many => format!("({})", many.join(" OR ")),
        }
    }
}

/// Quote a SoQL string literal, doubling embedded single quotes.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn validate_identifier(name: String) -> Result<String, Error> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if !valid {
        return Err(InvalidInputError::Column {
            value: name,
            reason: "must match [A-Za-z_][A-Za-z0-9_]*".to_string(),
        }
        .into());
    }
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn default_builder() -> QueryBuilder {
        QueryBuilder::new(vec![Site::default()], Radius::default(), Lookback::default()).unwrap()
    }

    #[test]
    fn single_site_matches_plain_expression() {
        let query = default_builder().build_at(noon(2024, 6, 1), 800).unwrap();
        assert_eq!(
            query.filter_clause,
            "within_circle(point, 37.77935708464253, -122.4064893420712, 48.8) \
             AND requested_datetime > '2024-03-03T12:00:00' AND media_url IS NOT NULL"
        );
        assert_eq!(query.order_clause, "requested_datetime DESC");
        assert_eq!(query.limit, 800);
    }

    #[test]
    fn multiple_sites_are_ored_and_grouped() {
        let sites = vec![
            Site::new("a", 1.5, 2.5).unwrap(),
            Site::new("b", -3.0, 4.0).unwrap(),
        ];
        let builder =
            QueryBuilder::new(sites, Radius::new(10.0).unwrap(), Lookback::days(1).unwrap())
                .unwrap();
        let query = builder.build_at(noon(2024, 1, 2), 5).unwrap();
        assert_eq!(
            query.filter_clause,
            "(within_circle(point, 1.5, 2.5, 10) OR within_circle(point, -3, 4, 10)) \
             AND requested_datetime > '2024-01-01T12:00:00' AND media_url IS NOT NULL"
        );
    }

    #[test]
    fn no_sites_is_a_config_error() {
        let err = QueryBuilder::new(vec![], Radius::default(), Lookback::default()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NoSites)));
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(default_builder().build_at(noon(2024, 6, 1), 0).is_err());
    }

    #[test]
    fn oversized_lookback_is_an_error() {
        for days in [200_000_000, u32::MAX] {
            let builder = QueryBuilder::new(
                vec![Site::default()],
                Radius::default(),
                Lookback::days(days).unwrap(),
            )
            .unwrap();
            let err = builder.build_at(noon(2024, 6, 1), 800).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidInput(InvalidInputError::Lookback { .. })
            ));
        }

        let wide = QueryBuilder::new(
            vec![Site::default()],
            Radius::default(),
            Lookback::days(36_500).unwrap(),
        )
        .unwrap();
        assert!(wide.build_at(noon(2024, 6, 1), 800).is_ok());
    }

    #[test]
    fn timestamp_truncated_to_seconds() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_milli_opt(9, 15, 30, 999)
            .unwrap();
        let query = default_builder().build_at(now, 1).unwrap();
        assert!(query.filter_clause.contains("'2024-03-03T09:15:30'"));
    }

    #[test]
    fn same_inputs_same_query() {
        let builder = default_builder();
        let now = noon(2025, 2, 28);
        assert_eq!(builder.build_at(now, 50).unwrap(), builder.build_at(now, 50).unwrap());
    }

    #[test]
    fn params_use_soda_names() {
        let query = default_builder().build_at(noon(2024, 6, 1), 1100).unwrap();
        let params = query.params();
        assert_eq!(params[0].0, "$where");
        assert_eq!(params[1], ("$order", "requested_datetime DESC".to_string()));
        assert_eq!(params[2], ("$limit", "1100".to_string()));
    }

    #[test]
    fn custom_columns_are_validated() {
        let builder = default_builder()
            .geo_column("location")
            .unwrap()
            .time_column("opened")
            .unwrap()
            .media_column("photo")
            .unwrap();
        let query = builder.build_at(noon(2024, 6, 1), 1).unwrap();
        assert!(query.filter_clause.starts_with("within_circle(location, "));
        assert!(query.filter_clause.contains("opened > '"));
        assert!(query.filter_clause.ends_with("photo IS NOT NULL"));
        assert_eq!(query.order_clause, "opened DESC");

        assert!(default_builder().geo_column("point) OR (1=1").is_err());
        assert!(default_builder().media_column("").is_err());
        assert!(default_builder().time_column("9lives").is_err());
    }

    #[test]
    fn literals_are_quoted() {
        assert_eq!(quote_literal("it's"), "'it''s'");
    }
}
