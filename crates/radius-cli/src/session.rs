//! Per-session dashboard state.

use radius_core::record::Record;
use radius_core::{QueryBuilder, RecordSource, Result, SessionLimit};

/// One user session of a dashboard.
///
/// Holds the only state that survives between interactions: the row limit.
/// The record source is typically shared between sessions so that its cache
/// is process-wide.
pub struct DashboardSession<S> {
    builder: QueryBuilder,
    source: S,
    limit: SessionLimit,
}

impl<S: RecordSource> DashboardSession<S> {
    pub fn new(builder: QueryBuilder, source: S, limit: SessionLimit) -> Self {
        Self {
            builder,
            source,
            limit,
        }
    }

    pub fn builder(&self) -> &QueryBuilder {
        &self.builder
    }

    pub fn limit(&self) -> SessionLimit {
        self.limit
    }

    /// Build the query for the current limit and fetch it.
    ///
    /// Fetch failures come back as an empty result; only a query that
    /// cannot be built is an error.
    pub async fn fetch(&self) -> Result<Vec<Record>> {
        let query = self.builder.build(self.limit.current())?;
        Ok(self.source.fetch(&query).await)
    }

    /// Raise the limit by one step.
    pub fn load_more(&mut self) -> u32 {
        self.limit.load_more()
    }
}
