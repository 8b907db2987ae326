//! Record source trait.

use async_trait::async_trait;
use tracing::warn;

use crate::Result;
use crate::query::QuerySpec;
use crate::record::Record;

/// Something that can answer a [`QuerySpec`] with records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Run the query, reporting every failure.
    async fn try_fetch(&self, query: &QuerySpec) -> Result<Vec<Record>>;

    /// Run the query, collapsing every failure into an empty result.
    ///
    /// The failure is still emitted on the tracing channel.
    async fn fetch(&self, query: &QuerySpec) -> Vec<Record> {
        match self.try_fetch(query).await {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, limit = query.limit, "fetch failed, showing empty result");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl<S: RecordSource + ?Sized> RecordSource for std::sync::Arc<S> {
    async fn try_fetch(&self, query: &QuerySpec) -> Result<Vec<Record>> {
        (**self).try_fetch(query).await
    }
}
