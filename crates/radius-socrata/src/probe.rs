//! Diagnostic fetch of a portal link.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use tracing::{debug, instrument};

use radius_core::error::InvalidInputError;
use radius_core::probe::select_target;
use radius_core::record::Record;
use radius_core::{ProbeReport, ProbeView, Result};

use crate::error::transport;

/// User agent sent by the prober, matching a desktop browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Referer sent by the prober.
pub const PROBE_REFERER: &str = "https://mobile311.sfgov.org/";

/// Bound on one diagnostic fetch.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Performs one browser-like GET and summarises the response.
///
/// Unlike the feed fetcher, failures are returned to the caller so they can
/// be shown verbatim.
#[derive(Debug, Clone)]
pub struct Prober {
    client: reqwest::Client,
}

impl Prober {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_static(PROBE_REFERER));

        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(transport)?;

        Ok(Self { client })
    }

    /// Fetch `url`, following redirects, and report what came back.
    ///
    /// Any status is reported; only transport failures are errors.
    #[instrument(skip(self))]
    pub async fn probe(&self, url: &str) -> Result<ProbeReport> {
        let target = reqwest::Url::parse(url).map_err(|e| InvalidInputError::Url {
            value: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(target.scheme(), "http" | "https") {
            return Err(InvalidInputError::Url {
                value: url.to_string(),
                reason: "only http and https links can be probed".to_string(),
            }
            .into());
        }

        debug!("probing link");
        let response = self.client.get(target).send().await.map_err(transport)?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let body = response.text().await.map_err(transport)?;

        debug!(status, %final_url, bytes = body.len(), "probe response");
        Ok(ProbeReport::from_body(url, &final_url, status, &body))
    }

    /// Probe the first portal link in `records`.
    ///
    /// Only the first qualifying record is fetched.
    pub async fn run(&self, records: &[Record]) -> ProbeView {
        if records.is_empty() {
            return ProbeView::NoRecords;
        }

        let Some(target) = select_target(records) else {
            return ProbeView::NoPortalLinks {
                scanned: records.len(),
            };
        };

        match self.probe(&target.url).await {
            Ok(report) => ProbeView::Probed { target, report },
            Err(e) => ProbeView::Failed {
                target,
                error: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_non_http_links() {
        let prober = Prober::new(DEFAULT_PROBE_TIMEOUT).unwrap();
        assert!(prober.probe("ftp://x/case?caseid=1").await.is_err());
        assert!(prober.probe("not a url").await.is_err());
    }

    #[tokio::test]
    async fn run_without_records_or_portal_links() {
        let prober = Prober::new(DEFAULT_PROBE_TIMEOUT).unwrap();
        assert!(matches!(prober.run(&[]).await, ProbeView::NoRecords));

        let records = vec![Record {
            media_url: Some("https://cdn.example/a.jpg".into()),
            ..Default::default()
        }];
        assert!(matches!(
            prober.run(&records).await,
            ProbeView::NoPortalLinks { scanned: 1 }
        ));
    }

    #[tokio::test]
    async fn run_reports_bad_link_as_failure() {
        let prober = Prober::new(DEFAULT_PROBE_TIMEOUT).unwrap();
        let records = vec![Record {
            media_url: Some("mailto:caseid@example.org".into()),
            ..Default::default()
        }];
        match prober.run(&records).await {
            ProbeView::Failed { target, error } => {
                assert_eq!(target.index, 0);
                assert!(error.contains("only http and https"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }
}
