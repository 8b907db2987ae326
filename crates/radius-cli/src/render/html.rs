//! Static HTML page rendering.
//!
//! Produces one self-contained page with the cards laid out in
//! [`COLUMN_COUNT`] columns. Every interpolated value is escaped.

use std::io::Write;

use anyhow::Result;

use radius_core::feed::COLUMN_COUNT;
use radius_core::{Card, FeedView};

use super::{
    DATA_SOURCE_LABEL, DATA_SOURCE_URL, Dashboard, NO_VIEWABLE_IMAGES, REPORT_APP_LINKS,
    REPORT_APP_NOTE,
};

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; margin: 1.5rem; }
.grid { display: grid; gap: 0.75rem; }
.column { display: flex; flex-direction: column; gap: 0.75rem; }
.card { border: 1px solid #ddd; border-radius: 0.5rem; padding: 0.5rem; }
.card img { width: 100%; border-radius: 0.25rem; }
.card p { font-size: 0.9rem; margin: 0.2rem 0; }
.notice { background: #eef5ff; padding: 0.75rem; border-radius: 0.5rem; }
footer { color: #666; font-size: 0.85rem; }
";

/// Escape text for use in HTML content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn card(out: &mut impl Write, card: &Card) -> Result<()> {
    writeln!(out, "      <div class=\"card\">")?;
    writeln!(
        out,
        "        <img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
        escape(&card.image_url),
        escape(&card.category)
    )?;
    writeln!(out, "        <p><strong>{}</strong></p>", escape(&card.category))?;
    writeln!(
        out,
        "        <p>{} | <a href=\"{}\">{}</a></p>",
        escape(&card.timestamp),
        escape(&card.map_url),
        escape(&card.address)
    )?;
    writeln!(out, "      </div>")?;
    Ok(())
}

/// Render the feed as a standalone HTML page.
pub fn feed(out: &mut impl Write, dashboard: &Dashboard<'_>, view: &FeedView) -> Result<()> {
    let title = escape(&dashboard.title());

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "  <meta charset=\"utf-8\">")?;
    writeln!(out, "  <meta name=\"robots\" content=\"noindex, nofollow\">")?;
    writeln!(out, "  <title>{}</title>", title)?;
    writeln!(
        out,
        "  <style>\n{}.grid {{ grid-template-columns: repeat({}, 1fr); }}\n  </style>",
        STYLE, COLUMN_COUNT
    )?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "  <h1>📍 {}</h1>", title)?;
    writeln!(out, "  <p>{}</p>", escape(&dashboard.blurb()))?;
    let links: Vec<String> = REPORT_APP_LINKS
        .iter()
        .map(|(label, url)| format!("<a href=\"{}\">{}</a>", escape(url), escape(label)))
        .collect();
    writeln!(
        out,
        "  <p>{} ({})</p>",
        escape(REPORT_APP_NOTE),
        links.join(" | ")
    )?;
    writeln!(
        out,
        "  <p><small>Updated {}</small></p>",
        dashboard.generated_at.format("%b %d, %I:%M %p")
    )?;
    writeln!(out, "  <hr>")?;

    match view {
        FeedView::NoRecords => writeln!(
            out,
            "  <p class=\"notice\">{}</p>",
            escape(&dashboard.no_records_message())
        )?,
        FeedView::NoViewableImages { .. } => writeln!(
            out,
            "  <p class=\"notice\">{}</p>",
            escape(NO_VIEWABLE_IMAGES)
        )?,
        FeedView::Cards { scanned, cards } => {
            writeln!(out, "  <div class=\"grid\">")?;
            for column in view.columns() {
                writeln!(out, "    <div class=\"column\">")?;
                for c in column {
                    card(out, c)?;
                }
                writeln!(out, "    </div>")?;
            }
            writeln!(out, "  </div>")?;
            writeln!(
                out,
                "  <p><small>{} images from {} records (limit {})</small></p>",
                cards.len(),
                scanned,
                dashboard.limit
            )?;
        }
    }

    writeln!(out, "  <hr>")?;
    writeln!(out, "  <footer>")?;
    writeln!(
        out,
        "    <p>Data source: <a href=\"{}\">{}</a></p>",
        escape(DATA_SOURCE_URL),
        escape(DATA_SOURCE_LABEL)
    )?;
    writeln!(out, "    <ul>")?;
    for note in dashboard.methodology() {
        writeln!(out, "      <li>{}</li>", escape(&note))?;
    }
    writeln!(out, "    </ul>")?;
    writeln!(out, "  </footer>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;

    Ok(())
}
