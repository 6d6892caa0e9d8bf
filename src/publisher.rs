// ============================================================================
// Notification Publisher
// ============================================================================
//
// Resolves sender and recipient, builds the notification record and hands it
// to the sink keyed by recipient id. One call, one record, no retries.
//
// ============================================================================

use std::sync::Arc;
use tracing::{debug, info};

use crate::directory::UserDirectory;
use crate::error::PublishError;
use crate::kafka::{DeliveryReceipt, NotificationSink};
use crate::models::{Notification, UserId};

pub struct NotificationPublisher {
    directory: Arc<dyn UserDirectory>,
    sink: Arc<dyn NotificationSink>,
}

impl NotificationPublisher {
    pub fn new(directory: Arc<dyn UserDirectory>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { directory, sink }
    }

    /// Publish `message` from `from_id` to `to_id`.
    ///
    /// Returns once the broker acknowledged the record. An unknown id fails
    /// before anything is serialized or sent. Calling twice with the same
    /// arguments sends two records.
    pub async fn publish(
        &self,
        from_id: UserId,
        to_id: UserId,
        message: String,
    ) -> Result<DeliveryReceipt, PublishError> {
        let from = self
            .directory
            .resolve(from_id)
            .ok_or(PublishError::UserNotFound(from_id))?;
        let to = self
            .directory
            .resolve(to_id)
            .ok_or(PublishError::UserNotFound(to_id))?;

        let notification = Notification { from, to, message };
        let payload = notification.to_json()?;
        let key = notification.routing_key();

        debug!(
            from_id = from_id,
            to_id = to_id,
            topic = %self.sink.topic(),
            payload_bytes = payload.len(),
            "Publishing notification"
        );

        let receipt = self
            .sink
            .send(&key, &payload)
            .await
            .map_err(PublishError::Broker)?;

        info!(
            from_id = from_id,
            to_id = to_id,
            partition = receipt.partition,
            offset = receipt.offset,
            "Notification published"
        );

        Ok(receipt)
    }
}
