use anyhow::Result;
use async_trait::async_trait;

/// Where an acknowledged record was written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub partition: i32,
    pub offset: i64,
}

/// Destination for serialized notifications.
///
/// `send` resolves only after the broker acknowledged the record or failed
/// to. Implementations are shared across request tasks and must tolerate
/// concurrent callers.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, key: &str, payload: &[u8]) -> Result<DeliveryReceipt>;

    /// Topic the sink writes to
    fn topic(&self) -> &str;
}
