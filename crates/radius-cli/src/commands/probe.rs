//! Probe command implementation.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use radius_core::ProbeView;
use radius_core::session::PROBE_INITIAL_LIMIT;
use radius_socrata::Prober;

use super::{QueryArgs, ask_load_more, can_load_more, dashboard};
use crate::output;
use crate::render::{self, ProbeDocument};
use crate::session::DashboardSession;

#[derive(Args, Debug)]
pub struct ProbeArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Timeout for the diagnostic request, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub probe_timeout: u64,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Probe once and exit without offering to load more
    #[arg(long)]
    pub once: bool,
}

pub async fn run(args: ProbeArgs) -> Result<()> {
    let builder = args.query.builder()?;
    let source = args.query.source()?;
    let prober = Prober::new(Duration::from_secs(args.probe_timeout))
        .context("Failed to create probe client")?;
    let mut session = DashboardSession::new(
        builder,
        source,
        args.query.session_limit(PROBE_INITIAL_LIMIT),
    );

    let once = args.once || args.json;

    loop {
        let limit = session.limit().current();
        let records = session.fetch().await?;
        let view = prober.run(&records).await;
        if let ProbeView::Probed { report, .. } = &view {
            info!(status = report.status, final_url = %report.final_url, "probe finished");
        }

        let dashboard = dashboard(session.builder(), limit);
        let mut out = io::stdout().lock();
        if args.json {
            let document = ProbeDocument {
                dashboard: &dashboard,
                view: &view,
            };
            output::json_pretty(&mut out, &document)?;
        } else {
            render::text::probe(&mut out, &dashboard, &view)?;
        }
        drop(out);

        if !can_load_more(once, records.len()) || !ask_load_more(limit)? {
            return Ok(());
        }
        session.load_more();
    }
}
