//! Feed assembly: turns fetched records into a paged card grid.
//!
//! This module decides *what* the feed shows. Presentation (terminal, HTML,
//! JSON) lives in the binary.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::classify::classify;
use crate::record::Record;

/// Number of columns cards are dealt into.
pub const COLUMN_COUNT: usize = 4;

/// Label used when a timestamp is missing or unparseable.
pub const UNKNOWN_TIME: &str = "?";

/// Label used when a record has no category.
pub const UNKNOWN_CATEGORY: &str = "Unknown Issue";

/// Label used when a record has no address.
pub const UNKNOWN_ADDRESS: &str = "Location N/A";

/// Map search URL prefix; the encoded address is appended.
pub const MAP_URL_PREFIX: &str = "https://www.google.com/maps?q=";

/// One rendered feed entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub image_url: String,
    pub timestamp: String,
    pub category: String,
    pub address: String,
    pub map_url: String,
    pub request_id: Option<String>,
    /// Column this card is placed in, `0..COLUMN_COUNT`.
    pub column: usize,
}

/// What the feed shows for one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedView {
    /// The upstream returned nothing (or failed).
    NoRecords,
    /// Records came back, but none carried a viewable image.
    NoViewableImages { scanned: usize },
    /// At least one card passed the filter.
    Cards { scanned: usize, cards: Vec<Card> },
}

impl FeedView {
    /// Filter and lay out `records`, preserving their order.
    ///
    /// Records whose notes mention "duplicate" are dropped, as are records
    /// without a viewable image link. Accepted cards are dealt round-robin
    /// into columns by their accepted position, not their raw index.
    pub fn build(records: &[Record]) -> Self {
        if records.is_empty() {
            return FeedView::NoRecords;
        }

        let mut cards = Vec::new();
        for record in records {
            if record.is_duplicate() {
                continue;
            }

            let media = classify(record.media_url.as_ref());
            let Some(image_url) = media.image_url() else {
                continue;
            };

            let column = cards.len() % COLUMN_COUNT;
            cards.push(Card::from_record(record, image_url, column));
        }

        if cards.is_empty() {
            FeedView::NoViewableImages {
                scanned: records.len(),
            }
        } else {
            FeedView::Cards {
                scanned: records.len(),
                cards,
            }
        }
    }

    /// Returns the accepted cards, if any.
    pub fn cards(&self) -> &[Card] {
        match self {
            FeedView::Cards { cards, .. } => cards,
            _ => &[],
        }
    }

    /// Groups cards by column, keeping their order within each column.
    pub fn columns(&self) -> [Vec<&Card>; COLUMN_COUNT] {
        let mut columns: [Vec<&Card>; COLUMN_COUNT] = Default::default();
        for card in self.cards() {
            columns[card.column].push(card);
        }
        columns
    }
}

impl Card {
    fn from_record(record: &Record, image_url: &str, column: usize) -> Self {
        let address = non_blank(record.address.as_deref())
            .unwrap_or(UNKNOWN_ADDRESS)
            .to_string();
        let category = non_blank(record.service_name.as_deref())
            .unwrap_or(UNKNOWN_CATEGORY)
            .to_string();

        Self {
            image_url: image_url.to_string(),
            timestamp: format_timestamp(record.requested_datetime.as_deref()),
            category,
            map_url: map_url(&address),
            address,
            request_id: record.service_request_id.clone(),
            column,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse an upstream timestamp.
///
/// SODA floating timestamps look like `2024-05-01T14:05:00.000`; offsets and
/// bare dates are accepted too.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Format a timestamp as `Mon DD, HH:MM AM/PM`, or `?`.
pub fn format_timestamp(raw: Option<&str>) -> String {
    raw.and_then(parse_timestamp)
        .map(|ts| ts.format("%b %d, %I:%M %p").to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// Build a map search link for an address.
///
/// Spaces become `+`. Unlike a plain space substitution, other reserved
/// characters are percent-encoded too, so `Location N/A` becomes
/// `Location+N%2FA` and an address cannot break out of the `q` parameter.
pub fn map_url(address: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(address.as_bytes()).collect();
    format!("{}{}", MAP_URL_PREFIX, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MediaField;

    fn image(url: &str) -> Record {
        Record {
            media_url: Some(MediaField::from(url)),
            ..Default::default()
        }
    }

    #[test]
    fn empty_input_is_no_records() {
        assert_eq!(FeedView::build(&[]), FeedView::NoRecords);
    }

    #[test]
    fn duplicate_is_excluded_even_with_image() {
        let record = Record {
            status_notes: Some("Marked as Duplicate".into()),
            ..image("http://x/a.png")
        };
        assert_eq!(
            FeedView::build(&[record]),
            FeedView::NoViewableImages { scanned: 1 }
        );
    }

    #[test]
    fn portal_links_are_never_shown() {
        let records = vec![
            Record {
                media_url: Some(
                    serde_json::from_value(serde_json::json!({"url": "http://x/case?caseid=55"}))
                        .unwrap(),
                ),
                ..Default::default()
            },
            Record::default(),
        ];
        assert_eq!(
            FeedView::build(&records),
            FeedView::NoViewableImages { scanned: 2 }
        );
    }

    #[test]
    fn columns_follow_accepted_count() {
        let records = vec![
            image("http://x/0.jpg"),
            image("http://x/portal"),
            image("http://x/1.jpg"),
            Record {
                status_notes: Some("duplicate".into()),
                ..image("http://x/dup.jpg")
            },
            image("http://x/2.jpg"),
            image("http://x/3.jpg"),
            image("http://x/4.jpg"),
        ];

        let view = FeedView::build(&records);
        let placed: Vec<(&str, usize)> = view
            .cards()
            .iter()
            .map(|c| (c.image_url.as_str(), c.column))
            .collect();

        assert_eq!(
            placed,
            [
                ("http://x/0.jpg", 0),
                ("http://x/1.jpg", 1),
                ("http://x/2.jpg", 2),
                ("http://x/3.jpg", 3),
                ("http://x/4.jpg", 0),
            ]
        );

        let columns = view.columns();
        assert_eq!(columns[0].len(), 2);
        assert_eq!(columns[3].len(), 1);
    }

    #[test]
    fn card_fields_and_fallbacks() {
        let full = Record {
            requested_datetime: Some("2024-05-01T14:05:00.000".into()),
            service_name: Some("Street and Sidewalk Cleaning".into()),
            address: Some("1 Market St".into()),
            service_request_id: Some("42".into()),
            ..image("http://x/a.jpeg")
        };
        let bare = Record {
            requested_datetime: Some("yesterday".into()),
            service_name: Some("  ".into()),
            ..image("http://x/b.gif")
        };

        let view = FeedView::build(&[full, bare]);
        let cards = view.cards();

        assert_eq!(cards[0].timestamp, "May 01, 02:05 PM");
        assert_eq!(cards[0].category, "Street and Sidewalk Cleaning");
        assert_eq!(cards[0].map_url, "https://www.google.com/maps?q=1+Market+St");
        assert_eq!(cards[0].request_id.as_deref(), Some("42"));

        assert_eq!(cards[1].timestamp, UNKNOWN_TIME);
        assert_eq!(cards[1].category, UNKNOWN_CATEGORY);
        assert_eq!(cards[1].address, UNKNOWN_ADDRESS);
        assert_eq!(cards[1].map_url, "https://www.google.com/maps?q=Location+N%2FA");
    }

    #[test]
    fn timestamp_formats() {
        assert_eq!(format_timestamp(None), "?");
        assert_eq!(format_timestamp(Some("2024-12-25T00:30:00")), "Dec 25, 12:30 AM");
        assert_eq!(
            format_timestamp(Some("2024-07-04T18:00:00-07:00")),
            "Jul 04, 06:00 PM"
        );
        assert_eq!(format_timestamp(Some("2024-03-09")), "Mar 09, 12:00 AM");
    }

    #[test]
    fn map_url_escapes_reserved_characters() {
        assert_eq!(
            map_url("Market St & 5th St"),
            "https://www.google.com/maps?q=Market+St+%26+5th+St"
        );
    }
}
