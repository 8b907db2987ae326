//! Service request records as returned by the data endpoint.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One row of the upstream response.
///
/// Only the fields the dashboards read are typed. Scalar fields are read
/// leniently so that one oddly typed value never rejects the whole response;
/// everything else is kept verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "lenient_string")]
    pub service_request_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub requested_datetime: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub status_notes: Option<String>,

    #[serde(default)]
    pub media_url: Option<MediaField>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub service_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,

    /// Passthrough fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Returns true if the status notes mark this record as a duplicate.
    pub fn is_duplicate(&self) -> bool {
        self.status_notes
            .as_deref()
            .is_some_and(|notes| notes.to_lowercase().contains("duplicate"))
    }

    /// Returns the raw media URL, unwrapping the object form.
    pub fn media_link(&self) -> Option<&str> {
        self.media_url.as_ref().and_then(MediaField::url)
    }
}

/// The media field of a record.
///
/// SODA exposes URL columns either as a bare string or as an object with a
/// `url` key (and sometimes a `description`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaField {
    Url(String),
    Object {
        #[serde(default, deserialize_with = "lenient_string")]
        url: Option<String>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    },
    /// Any other JSON shape; never yields a URL.
    Other(Value),
}

impl MediaField {
    /// Returns the URL, or `None` when absent or empty.
    pub fn url(&self) -> Option<&str> {
        let url = match self {
            MediaField::Url(url) => url.as_str(),
            MediaField::Object { url, .. } => url.as_deref()?,
            MediaField::Other(_) => return None,
        };
        (!url.is_empty()).then_some(url)
    }
}

impl From<&str> for MediaField {
    fn from(url: &str) -> Self {
        MediaField::Url(url.to_string())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// Parse a JSON array response into records, in response order.
pub fn parse_records(body: &[u8]) -> Result<Vec<Record>, serde_json::Error> {
    serde_json::from_slice(body)
}
