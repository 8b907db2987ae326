//! Dashboard renderers.
//!
//! Renderers only present what `radius_core` decided; they never filter.

pub mod html;
pub mod text;

use chrono::NaiveDateTime;
use serde::Serialize;

use radius_core::{FeedView, Lookback, ProbeView, Radius, Site};

/// Where the records come from, shown in the footer.
pub const DATA_SOURCE_LABEL: &str = "DataSF | Open Data Portal";

/// Landing page of the default dataset.
pub const DATA_SOURCE_URL: &str =
    "https://data.sfgov.org/City-Infrastructure/311-Cases/vw6y-z8j6/about_data";

/// Message shown when records came back but none had a viewable image.
pub const NO_VIEWABLE_IMAGES: &str =
    "No viewable images found in this radius (Web Portal links hidden).";

/// Invitation shown under the feed blurb.
pub const REPORT_APP_NOTE: &str =
    "Download the Solve SF App to report your concerns to the City of San Francisco.";

/// Store links for the reporting app, as `(label, url)`.
pub const REPORT_APP_LINKS: [(&str, &str); 2] = [
    ("iOS", "https://apps.apple.com/us/app/solve-sf/id6737751237"),
    (
        "Android",
        "https://play.google.com/store/apps/details?id=com.woahfinally.solvesf",
    ),
];

/// Page-level facts shared by every renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard<'a> {
    pub sites: &'a [Site],
    pub radius: Radius,
    pub lookback: Lookback,
    pub limit: u32,
    pub generated_at: NaiveDateTime,
}

impl Dashboard<'_> {
    pub fn title(&self) -> String {
        let name = match self.sites {
            [] => "Nowhere".to_string(),
            [site] => site.name().to_string(),
            [site, rest @ ..] => format!("{} + {} more", site.name(), rest.len()),
        };
        format!("{}: {}ft Radius", name, self.radius.feet())
    }

    pub fn blurb(&self) -> String {
        format!(
            "Daily feed of ALL 311 reports within ~{} feet of the target location.",
            self.radius.feet()
        )
    }

    /// The reporting-app invitation with its store links, as plain text.
    pub fn report_app(&self) -> String {
        let links: Vec<String> = REPORT_APP_LINKS
            .iter()
            .map(|(label, url)| format!("{}: {}", label, url))
            .collect();
        format!("{} ({})", REPORT_APP_NOTE, links.join(" | "))
    }

    /// Coordinates of every site, as `lat, lon` joined by `; `.
    pub fn coordinates(&self) -> String {
        self.sites
            .iter()
            .map(|site| format!("{}, {}", site.lat(), site.lon()))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn no_records_message(&self) -> String {
        format!(
            "No records found within {}ft of {} in the last {} days.",
            self.radius.feet(),
            self.coordinates(),
            self.lookback.as_days()
        )
    }

    /// Methodology notes, one line each.
    pub fn methodology(&self) -> Vec<String> {
        vec![
            format!(
                "Location: within {} feet ({} meters) of {}.",
                self.radius.feet(),
                self.radius.meters(),
                self.coordinates()
            ),
            "Categories: ALL (no category filter applied).".to_string(),
            format!("Timeframe: rolling {}-day window.", self.lookback.as_days()),
            "Only reports with publicly accessible images are shown. Reports submitted \
             through the web portal are excluded because their images require a login."
                .to_string(),
        ]
    }
}

/// JSON document for the feed.
#[derive(Debug, Serialize)]
pub struct FeedDocument<'a> {
    pub title: String,
    #[serde(flatten)]
    pub dashboard: &'a Dashboard<'a>,
    pub view: &'a FeedView,
}

impl<'a> FeedDocument<'a> {
    pub fn new(dashboard: &'a Dashboard<'a>, view: &'a FeedView) -> Self {
        Self {
            title: dashboard.title(),
            dashboard,
            view,
        }
    }
}

/// JSON document for the probe.
#[derive(Debug, Serialize)]
pub struct ProbeDocument<'a> {
    #[serde(flatten)]
    pub dashboard: &'a Dashboard<'a>,
    pub view: &'a ProbeView,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub(crate) fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    pub(crate) fn dashboard(sites: &[Site]) -> Dashboard<'_> {
        Dashboard {
            sites,
            radius: Radius::default(),
            lookback: Lookback::default(),
            limit: 800,
            generated_at: generated_at(),
        }
    }

    #[test]
    fn title_and_messages() {
        let sites = [Site::default()];
        let dashboard = dashboard(&sites);

        assert_eq!(dashboard.title(), "My Block: 160ft Radius");
        assert!(dashboard.report_app().starts_with(REPORT_APP_NOTE));
        assert!(
            dashboard
                .report_app()
                .ends_with("| Android: https://play.google.com/store/apps/details?id=com.woahfinally.solvesf)")
        );
        assert_eq!(
            dashboard.no_records_message(),
            "No records found within 160ft of 37.77935708464253, -122.4064893420712 \
             in the last 90 days."
        );
    }

    #[test]
    fn multiple_sites_listed() {
        let sites = [Site::default(), Site::new("Park", 1.0, 2.0).unwrap()];
        let dashboard = dashboard(&sites);

        assert_eq!(dashboard.title(), "My Block + 1 more: 160ft Radius");
        assert!(dashboard.coordinates().ends_with("; 1, 2"));
    }

    #[test]
    fn feed_document_shape() {
        let sites = [Site::default()];
        let dashboard = dashboard(&sites);
        let view = FeedView::NoRecords;
        let value = serde_json::to_value(FeedDocument::new(&dashboard, &view)).unwrap();

        assert_eq!(value["title"], "My Block: 160ft Radius");
        assert_eq!(value["limit"], 800);
        assert_eq!(value["lookback"], 90);
        assert_eq!(value["view"]["kind"], "no_records");
    }
}
