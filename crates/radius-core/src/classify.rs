//! Media link classification.
//!
//! A media link is either a directly embeddable image hosted on public
//! storage or a portal page that needs an authenticated session. The only
//! signal is the file extension of the path: redirects are not followed and
//! content types are not inspected, so an image served without an extension
//! classifies as a portal link.

use serde::Serialize;

use crate::record::MediaField;

/// Extensions treated as directly viewable images.
pub const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp"];

/// Result of classifying one media field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaClassification {
    /// The URL as received, query string included.
    pub url: Option<String>,
    pub is_viewable_image: bool,
}

impl MediaClassification {
    fn absent() -> Self {
        Self {
            url: None,
            is_viewable_image: false,
        }
    }

    /// Returns the URL if it is a viewable image.
    pub fn image_url(&self) -> Option<&str> {
        match (&self.url, self.is_viewable_image) {
            (Some(url), true) => Some(url),
            _ => None,
        }
    }
}

/// Classify a record's media field.
pub fn classify(media: Option<&MediaField>) -> MediaClassification {
    match media.and_then(MediaField::url) {
        Some(url) => classify_url(url),
        None => MediaClassification::absent(),
    }
}

/// Classify a bare URL string.
pub fn classify_url(url: &str) -> MediaClassification {
    if url.is_empty() {
        return MediaClassification::absent();
    }

    let path = url.split('?').next().unwrap_or(url).to_lowercase();
    let is_viewable_image = IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext));

    MediaClassification {
        url: Some(url.to_string()),
        is_viewable_image,
    }
}
