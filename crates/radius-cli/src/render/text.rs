//! Terminal rendering.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;

use radius_core::probe::PREVIEW_CHARS;
use radius_core::{Card, FeedView, ProbeView};

use super::{DATA_SOURCE_LABEL, DATA_SOURCE_URL, Dashboard, NO_VIEWABLE_IMAGES};
use crate::output;

fn header(
    out: &mut impl Write,
    dashboard: &Dashboard<'_>,
    subtitle: &str,
    note: Option<&str>,
) -> Result<()> {
    writeln!(out, "{} {}", "📍".bold(), dashboard.title().bold())?;
    writeln!(out, "{}", subtitle)?;
    if let Some(note) = note {
        writeln!(out, "{}", note.dimmed())?;
    }
    writeln!(
        out,
        "{}",
        format!(
            "Updated {}",
            dashboard.generated_at.format("%b %d, %I:%M %p")
        )
        .dimmed()
    )?;
    output::rule(out)
}

fn footer(out: &mut impl Write, dashboard: &Dashboard<'_>) -> Result<()> {
    output::rule(out)?;
    writeln!(
        out,
        "{} {} ({})",
        "Data source:".dimmed(),
        DATA_SOURCE_LABEL,
        DATA_SOURCE_URL
    )?;
    for note in dashboard.methodology() {
        writeln!(out, "  {} {}", "•".dimmed(), note.dimmed())?;
    }
    Ok(())
}

fn card(out: &mut impl Write, card: &Card) -> Result<()> {
    let badge = format!("[col {}]", card.column + 1);
    writeln!(out, "{} {}", badge.cyan(), card.category.bold())?;
    writeln!(out, "        {} | {}", card.timestamp, card.address)?;
    if let Some(id) = &card.request_id {
        writeln!(out, "        {} {}", "case:".dimmed(), id)?;
    }
    writeln!(out, "        {} {}", "image:".dimmed(), card.image_url)?;
    writeln!(out, "        {} {}", "map:".dimmed(), card.map_url)?;
    writeln!(out)?;
    Ok(())
}

/// Render the feed for a terminal.
pub fn feed(out: &mut impl Write, dashboard: &Dashboard<'_>, view: &FeedView) -> Result<()> {
    header(
        out,
        dashboard,
        &dashboard.blurb(),
        Some(&dashboard.report_app()),
    )?;

    match view {
        FeedView::NoRecords => output::info(out, &dashboard.no_records_message())?,
        FeedView::NoViewableImages { .. } => output::info(out, NO_VIEWABLE_IMAGES)?,
        FeedView::Cards { scanned, cards } => {
            for c in cards {
                card(out, c)?;
            }
            writeln!(
                out,
                "{}",
                format!(
                    "{} images from {} records (limit {})",
                    cards.len(),
                    scanned,
                    dashboard.limit
                )
                .dimmed()
            )?;
        }
    }

    footer(out, dashboard)
}

/// Render a probe result for a terminal.
///
/// Probe failures are printed verbatim.
pub fn probe(out: &mut impl Write, dashboard: &Dashboard<'_>, view: &ProbeView) -> Result<()> {
    let subtitle = format!(
        "Portal link diagnostics for reports within ~{} feet (limit {}).",
        dashboard.radius.feet(),
        dashboard.limit
    );
    header(out, dashboard, &subtitle, None)?;

    match view {
        ProbeView::NoRecords => output::error(
            out,
            &format!(
                "No records returned for {} (limit {}).",
                dashboard.coordinates(),
                dashboard.limit
            ),
        )?,
        ProbeView::NoPortalLinks { scanned } => output::warning(
            out,
            &format!("No portal links (caseid) found in {} records.", scanned),
        )?,
        ProbeView::Failed { target, error } => {
            output::field(out, "Record", &target.index.to_string())?;
            output::field(out, "URL", &target.url)?;
            output::error(out, error)?;
        }
        ProbeView::Probed { target, report } => {
            output::field(out, "Record", &target.index.to_string())?;
            if let Some(id) = &target.request_id {
                output::field(out, "Case", id)?;
            }
            output::field(out, "URL", &report.requested_url)?;
            output::field(out, "Final URL", &report.final_url)?;
            output::field(out, "Status", &report.status.to_string())?;
            output::field(out, "Body length", &report.body_length.to_string())?;
            output::field(out, "formref", yes_no(report.has_formref))?;
            output::field(out, "_csrf_token", yes_no(report.has_csrf_token))?;
            writeln!(
                out,
                "{}",
                format!("--- first {} characters ---", PREVIEW_CHARS).dimmed()
            )?;
            writeln!(out, "{}", report.preview)?;
        }
    }

    output::rule(out)
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
