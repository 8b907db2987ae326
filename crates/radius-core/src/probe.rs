//! Diagnostic probe types.
//!
//! Probe mode picks the first portal-style media link out of a fetch and
//! records what a browser would see when opening it.

use serde::Serialize;

use crate::record::Record;

/// Substring that marks a portal case link.
pub const PORTAL_MARKER: &str = "caseid";

/// Body marker of the portal's form reference.
pub const FORMREF_MARKER: &str = "formref";

/// Body marker of the portal's CSRF token.
pub const CSRF_MARKER: &str = "_csrf_token";

/// Number of body characters kept in a report.
pub const PREVIEW_CHARS: usize = 500;

/// The record chosen for probing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeTarget {
    /// Position of the record in the fetched sequence.
    pub index: usize,
    pub url: String,
    pub request_id: Option<String>,
}

/// Find the first record whose media URL contains [`PORTAL_MARKER`].
pub fn select_target(records: &[Record]) -> Option<ProbeTarget> {
    records.iter().enumerate().find_map(|(index, record)| {
        let url = record.media_link()?;
        url.contains(PORTAL_MARKER).then(|| ProbeTarget {
            index,
            url: url.to_string(),
            request_id: record.service_request_id.clone(),
        })
    })
}

/// What one diagnostic fetch returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub requested_url: String,
    /// URL after redirects.
    pub final_url: String,
    pub status: u16,
    /// Body length in characters.
    pub body_length: usize,
    pub has_formref: bool,
    pub has_csrf_token: bool,
    /// The first [`PREVIEW_CHARS`] characters of the body.
    pub preview: String,
}

impl ProbeReport {
    /// Summarise a response body.
    pub fn from_body(requested_url: &str, final_url: &str, status: u16, body: &str) -> Self {
        Self {
            requested_url: requested_url.to_string(),
            final_url: final_url.to_string(),
            status,
            body_length: body.chars().count(),
            has_formref: body.contains(FORMREF_MARKER),
            has_csrf_token: body.contains(CSRF_MARKER),
            preview: body.chars().take(PREVIEW_CHARS).collect(),
        }
    }
}

/// Outcome of one probe cycle.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeView {
    /// The fetch returned nothing.
    NoRecords,
    /// Records came back but none linked to the portal.
    NoPortalLinks { scanned: usize },
    /// The diagnostic request itself failed.
    Failed { target: ProbeTarget, error: String },
    Probed {
        target: ProbeTarget,
        report: ProbeReport,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MediaField;
    use serde_json::json;

    fn with_media(value: serde_json::Value) -> Record {
        Record {
            media_url: Some(serde_json::from_value::<MediaField>(value).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn picks_first_portal_link_only() {
        let records = vec![
            with_media(json!("http://x/a.jpg")),
            Record::default(),
            with_media(json!({"url": "http://x/case?caseid=55"})),
            with_media(json!("http://x/case?caseid=56")),
        ];

        let target = select_target(&records).unwrap();
        assert_eq!(target.index, 2);
        assert_eq!(target.url, "http://x/case?caseid=55");
    }

    #[test]
    fn no_portal_links() {
        let records = vec![with_media(json!("http://x/a.jpg")), Record::default()];
        assert_eq!(select_target(&records), None);
        assert_eq!(select_target(&[]), None);
    }

    #[test]
    fn report_summarises_body() {
        let body = format!("<form name=\"formref\"><input name=\"_csrf_token\">{}", "é".repeat(600));
        let report = ProbeReport::from_body("http://a", "http://b", 200, &body);

        assert_eq!(report.final_url, "http://b");
        assert!(report.has_formref);
        assert!(report.has_csrf_token);
        assert_eq!(report.body_length, body.chars().count());
        assert_eq!(report.preview.chars().count(), PREVIEW_CHARS);
    }

    #[test]
    fn report_without_markers() {
        let report = ProbeReport::from_body("http://a", "http://a", 403, "denied");
        assert!(!report.has_formref);
        assert!(!report.has_csrf_token);
        assert_eq!(report.preview, "denied");
        assert_eq!(report.body_length, 6);
    }
}
