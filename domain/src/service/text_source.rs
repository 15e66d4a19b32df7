use crate::model::vo::Query;

/// Acquires the captured output of one query.
///
/// Implementations own process invocation, remoting and timeouts. The parsers
/// only ever see the returned text.
#[async_trait::async_trait]
pub trait TextSource: Send + Sync {
    async fn fetch(&self, query: &Query) -> anyhow::Result<String>;
}
