// Kafka module for notification publishing
//
// The publisher depends only on `NotificationSink`; the rdkafka-backed
// producer is wired in at startup.

pub mod config;
pub mod metrics;
pub mod producer;
pub mod sink;

// Re-export commonly used types
pub use producer::KafkaNotificationProducer;
pub use sink::{DeliveryReceipt, NotificationSink};
