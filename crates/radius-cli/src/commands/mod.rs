//! Subcommand implementations.

pub mod feed;
pub mod probe;

use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;

use radius_core::types::{DEFAULT_ENDPOINT, DEFAULT_LOOKBACK_DAYS, DEFAULT_RADIUS_METERS};
use radius_core::session::LOAD_MORE_STEP;
use radius_core::{EndpointUrl, Lookback, QueryBuilder, Radius, SessionLimit, Site};
use radius_socrata::{CachedSource, SocrataClient};

use crate::prompt;
use crate::render::Dashboard;

/// Query flags shared by every dashboard.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Site to watch, as NAME=LAT,LON or LAT,LON (repeatable; defaults to "My Block")
    #[arg(long = "site", value_name = "SITE")]
    pub sites: Vec<Site>,

    /// Search radius in meters
    #[arg(long, default_value_t = DEFAULT_RADIUS_METERS)]
    pub radius: f64,

    /// Lookback window in days
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
    pub days: u32,

    /// Initial row limit (defaults per dashboard)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Rows added by each "load more"
    #[arg(long, default_value_t = LOAD_MORE_STEP)]
    pub step: u32,

    /// SODA resource endpoint
    #[arg(long, env = "RADIUS_WATCH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Socrata app token
    #[arg(long, env = "RADIUS_WATCH_APP_TOKEN", hide_env_values = true)]
    pub app_token: Option<String>,

    /// Fetch timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    pub timeout: u64,

    /// How long fetched rows are reused, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 300)]
    pub cache_ttl: u64,
}

impl QueryArgs {
    /// Sites to query, falling back to the default site.
    pub fn sites(&self) -> Vec<Site> {
        if self.sites.is_empty() {
            vec![Site::default()]
        } else {
            self.sites.clone()
        }
    }

    pub fn builder(&self) -> Result<QueryBuilder> {
        let radius = Radius::new(self.radius).context("Invalid --radius")?;
        let lookback = Lookback::days(self.days).context("Invalid --days")?;
        QueryBuilder::new(self.sites(), radius, lookback).context("Invalid query")
    }

    pub fn session_limit(&self, default_initial: u32) -> SessionLimit {
        SessionLimit::new(self.limit.unwrap_or(default_initial), self.step)
    }

    /// Build the cached record source for this process.
    pub fn source(&self) -> Result<Arc<CachedSource<SocrataClient>>> {
        let endpoint = EndpointUrl::new(&self.endpoint).context("Invalid --endpoint")?;
        let client = SocrataClient::with_options(
            endpoint,
            Duration::from_secs(self.timeout),
            self.app_token.as_deref(),
        )
        .context("Failed to create SODA client")?;

        Ok(Arc::new(CachedSource::new(
            client,
            Duration::from_secs(self.cache_ttl),
        )))
    }
}

/// Page facts for one render of `builder` at `limit`, stamped now.
fn dashboard(builder: &QueryBuilder, limit: u32) -> Dashboard<'_> {
    Dashboard {
        sites: builder.sites(),
        radius: builder.radius(),
        lookback: builder.lookback(),
        limit,
        generated_at: Local::now().naive_local(),
    }
}

/// Whether to offer "load more" after a render.
///
/// Only when the user asked for it, someone is at the keyboard and the last
/// fetch returned something.
fn can_load_more(once: bool, fetched: usize) -> bool {
    !once && fetched > 0 && io::stdin().is_terminal()
}

fn ask_load_more(current: u32) -> Result<bool> {
    prompt::ask_load_more(&mut io::stdin().lock(), &mut io::stdout().lock(), current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        query: QueryArgs,
    }

    fn parse(args: &[&str]) -> QueryArgs {
        let argv = std::iter::once("test").chain(args.iter().copied());
        Harness::try_parse_from(argv).unwrap().query
    }

    #[test]
    fn defaults_match_the_dashboard() {
        let query = parse(&[]);
        assert_eq!(query.sites(), vec![Site::default()]);
        assert_eq!(query.radius, 48.8);
        assert_eq!(query.days, 90);
        assert_eq!(query.session_limit(800).current(), 800);
        assert_eq!(query.session_limit(800).step(), 300);
        assert_eq!(query.cache_ttl, 300);
    }

    #[test]
    fn explicit_limit_wins() {
        let query = parse(&["--limit", "20", "--step", "5"]);
        let limit = query.session_limit(50);
        assert_eq!(limit.current(), 20);
        assert_eq!(limit.step(), 5);
    }

    #[test]
    fn zero_limit_is_rejected_by_the_parser() {
        let argv = ["test", "--limit", "0"];
        assert!(Harness::try_parse_from(argv).is_err());
        assert_eq!(parse(&["--limit", "1"]).limit, Some(1));
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(parse(&["--radius=-1"]).builder().is_err());
        assert!(parse(&["--days", "0"]).builder().is_err());
        assert!(
            parse(&["--endpoint", "ftp://example.com/x.json"])
                .source()
                .is_err()
        );
    }
}
