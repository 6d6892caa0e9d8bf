use anyhow::{Context, Result};
use async_trait::async_trait;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use super::config::create_producer_config;
use super::metrics;
use super::sink::{DeliveryReceipt, NotificationSink};
use crate::config::KafkaConfig;

/// Kafka producer for notification records
///
/// Every send waits for the broker acknowledgment. Delivery is at-least-once:
/// a timeout after the broker stored the record is still reported as a
/// failure, and idempotence stays off unless configured.
///
/// One instance serves the whole process; `FutureProducer` is safe to share
/// across tasks.
#[derive(Clone)]
pub struct KafkaNotificationProducer {
    producer: Arc<FutureProducer>,
    topic: String,
}

impl KafkaNotificationProducer {
    /// Create the producer. No network traffic happens here; see
    /// [`KafkaNotificationProducer::verify_connection`].
    pub fn new(config: &KafkaConfig) -> Result<Self> {
        info!(brokers = %config.brokers, "Initializing Kafka producer...");

        let producer: FutureProducer = create_producer_config(config)
            .create()
            .context("Failed to create Kafka producer")?;

        Ok(Self {
            producer: Arc::new(producer),
            topic: config.topic.clone(),
        })
    }

    /// Create the producer and make sure the brokers answer before returning.
    pub async fn connect(config: &KafkaConfig) -> Result<Self> {
        let producer = Self::new(config)?;
        producer.verify_connection(config.connect_timeout).await?;
        Ok(producer)
    }

    /// Fetch cluster metadata for the topic, failing if no broker responds
    /// within `timeout`.
    pub async fn verify_connection(&self, timeout: Duration) -> Result<()> {
        let producer = Arc::clone(&self.producer);
        let topic = self.topic.clone();

        let brokers = tokio::task::spawn_blocking(move || {
            producer
                .client()
                .fetch_metadata(Some(&topic), Timeout::After(timeout))
                .map(|metadata| metadata.brokers().len())
        })
        .await
        .context("Kafka metadata request panicked")?
        .context("Failed to reach Kafka brokers")?;

        if brokers == 0 {
            anyhow::bail!("Kafka cluster reported no brokers");
        }

        info!(
            brokers = brokers,
            topic = %self.topic,
            "Kafka producer connected"
        );
        Ok(())
    }

    /// Flush pending records (for graceful shutdown)
    ///
    /// librdkafka blocks the calling thread while flushing, so the wait runs
    /// on the blocking pool.
    pub async fn flush(&self, timeout: Duration) -> Result<()> {
        info!("Flushing Kafka producer (timeout: {:?})", timeout);

        let producer = Arc::clone(&self.producer);
        tokio::task::spawn_blocking(move || producer.flush(Timeout::After(timeout)))
            .await
            .context("Kafka flush panicked")?
            .context("Failed to flush Kafka producer")?;

        info!("Kafka producer flushed successfully");
        Ok(())
    }
}

#[async_trait]
impl NotificationSink for KafkaNotificationProducer {
    async fn send(&self, key: &str, payload: &[u8]) -> Result<DeliveryReceipt> {
        let record = FutureRecord::to(&self.topic).key(key).payload(payload);
        let start = Instant::now();

        // Timeout::Never only bounds the local enqueue; delivery.timeout.ms
        // bounds the wait for the acknowledgment.
        match self.producer.send(record, Timeout::Never).await {
            Ok((partition, offset)) => {
                let latency = start.elapsed();
                metrics::record_acked(&self.topic, latency.as_secs_f64());

                info!(
                    partition = partition,
                    offset = offset,
                    key = %key,
                    latency_ms = latency.as_millis(),
                    "Notification persisted to Kafka"
                );

                Ok(DeliveryReceipt { partition, offset })
            }
            Err((kafka_err, _)) => {
                let latency = start.elapsed();
                metrics::record_failed(&self.topic, latency.as_secs_f64());

                error!(
                    error = %kafka_err,
                    key = %key,
                    topic = %self.topic,
                    latency_ms = latency.as_millis(),
                    "Failed to send notification to Kafka"
                );

                Err(anyhow::anyhow!("Kafka send failed: {}", kafka_err))
            }
        }
    }

    fn topic(&self) -> &str {
        &self.topic
    }
}
