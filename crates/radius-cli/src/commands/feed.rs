//! Feed command implementation.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use tracing::info;

use radius_core::FeedView;
use radius_core::session::FEED_INITIAL_LIMIT;

use super::{QueryArgs, ask_load_more, can_load_more, dashboard};
use crate::output;
use crate::render::{self, Dashboard, FeedDocument};
use crate::session::DashboardSession;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
    Html,
}

#[derive(Args, Debug)]
pub struct FeedArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Write to a file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Render once and exit without offering to load more
    #[arg(long)]
    pub once: bool,
}

pub async fn run(args: FeedArgs) -> Result<()> {
    let builder = args.query.builder()?;
    let source = args.query.source()?;
    let mut session = DashboardSession::new(
        builder,
        source,
        args.query.session_limit(FEED_INITIAL_LIMIT),
    );

    // Prompting only makes sense when the feed itself went to the terminal.
    let once = args.once || args.format != Format::Text || args.output.is_some();

    loop {
        let limit = session.limit().current();
        let records = session.fetch().await?;
        let view = FeedView::build(&records);
        info!(
            limit,
            records = records.len(),
            cards = view.cards().len(),
            "feed built"
        );

        render(&args, &dashboard(session.builder(), limit), &view)?;

        if !can_load_more(once, records.len()) || !ask_load_more(limit)? {
            return Ok(());
        }
        session.load_more();
    }
}

fn render(args: &FeedArgs, dashboard: &Dashboard<'_>, view: &FeedView) -> Result<()> {
    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    match args.format {
        Format::Text => render::text::feed(&mut out, dashboard, view)?,
        Format::Json => output::json_pretty(&mut out, &FeedDocument::new(dashboard, view))?,
        Format::Html => render::html::feed(&mut out, dashboard, view)?,
    }
    out.flush()?;

    if let Some(path) = &args.output {
        eprintln!("{} {}", "Wrote".green(), path.display());
    }
    Ok(())
}
