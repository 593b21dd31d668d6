use async_trait::async_trait;

use crate::models::RestockEvent;
use crate::Result;

/// An independent alert channel (console, webhook, history file, ...).
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Plugin metadata
    fn name(&self) -> &str;
    fn sink_type(&self) -> &str;

    /// Deliver one restock event. Errors are reported to the dispatcher, which isolates them.
    async fn notify(&self, event: &RestockEvent) -> Result<()>;
}
