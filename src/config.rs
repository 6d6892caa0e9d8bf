use anyhow::Result;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

// ============================================================================
// Configuration Constants
// ============================================================================

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
const DEFAULT_RUST_LOG: &str = "info";

const DEFAULT_KAFKA_BROKERS: &str = "localhost:9092";
const DEFAULT_KAFKA_TOPIC: &str = "notification";

// Producer defaults: leader-only acks and no idempotence, so a send is
// at-least-once and never deduplicated
const DEFAULT_PRODUCER_ACKS: &str = "1";
const DEFAULT_PRODUCER_COMPRESSION: &str = "none";
const DEFAULT_PRODUCER_LINGER_MS: u32 = 0;
const DEFAULT_PRODUCER_RETRIES: u32 = 3;
const DEFAULT_PRODUCER_REQUEST_TIMEOUT_MS: u32 = 30_000;
const DEFAULT_PRODUCER_DELIVERY_TIMEOUT_MS: u32 = 120_000;

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_FLUSH_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// Configuration Structures
// ============================================================================

/// Kafka connection and producer settings
#[derive(Clone, Debug)]
pub struct KafkaConfig {
    /// Comma-separated list of Kafka brokers (e.g., "kafka1:9092,kafka2:9092")
    pub brokers: String,
    /// Topic every notification is published to
    pub topic: String,
    pub ssl_enabled: bool,
    /// SASL mechanism (e.g., "SCRAM-SHA-256", "PLAIN")
    pub sasl_mechanism: Option<String>,
    pub sasl_username: Option<String>,
    pub sasl_password: Option<String>,
    // producer-specific settings
    pub producer_acks: String,        // "all" | "1" | "-1" | "0"
    pub producer_compression: String, // "zstd" | "snappy" | "gzip" | "lz4" | "none"
    pub producer_linger_ms: u32,
    pub producer_retries: u32,
    pub producer_request_timeout_ms: u32,
    pub producer_delivery_timeout_ms: u32,
    pub producer_enable_idempotence: bool,
    /// Upper bound for the startup metadata request
    pub connect_timeout: Duration,
    /// Upper bound for draining in-flight records at shutdown
    pub flush_timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub rust_log: String,
    /// JSON roster replacing the built-in users
    pub user_roster_path: Option<PathBuf>,
    pub kafka: KafkaConfig,
}

impl Config {
    /// Load configuration from `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| parsed(&lookup, key).unwrap_or(false);
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let brokers =
            lookup("KAFKA_BROKERS").unwrap_or_else(|| DEFAULT_KAFKA_BROKERS.to_string());
        if brokers.trim().is_empty() {
            anyhow::bail!("KAFKA_BROKERS must not be empty");
        }
        let topic = lookup("KAFKA_TOPIC").unwrap_or_else(|| DEFAULT_KAFKA_TOPIC.to_string());
        if topic.trim().is_empty() {
            anyhow::bail!("KAFKA_TOPIC must not be empty");
        }

        let kafka = KafkaConfig {
            brokers,
            topic,
            ssl_enabled: flag("KAFKA_SSL_ENABLED"),
            sasl_mechanism: non_empty("KAFKA_SASL_MECHANISM"),
            sasl_username: non_empty("KAFKA_SASL_USERNAME"),
            sasl_password: non_empty("KAFKA_SASL_PASSWORD"),
            producer_acks: non_empty("KAFKA_PRODUCER_ACKS")
                .unwrap_or_else(|| DEFAULT_PRODUCER_ACKS.to_string()),
            producer_compression: non_empty("KAFKA_PRODUCER_COMPRESSION")
                .unwrap_or_else(|| DEFAULT_PRODUCER_COMPRESSION.to_string()),
            producer_linger_ms: parsed(&lookup, "KAFKA_PRODUCER_LINGER_MS")
                .unwrap_or(DEFAULT_PRODUCER_LINGER_MS),
            producer_retries: parsed(&lookup, "KAFKA_PRODUCER_RETRIES")
                .unwrap_or(DEFAULT_PRODUCER_RETRIES),
            producer_request_timeout_ms: parsed(&lookup, "KAFKA_PRODUCER_REQUEST_TIMEOUT_MS")
                .unwrap_or(DEFAULT_PRODUCER_REQUEST_TIMEOUT_MS),
            producer_delivery_timeout_ms: parsed(&lookup, "KAFKA_PRODUCER_DELIVERY_TIMEOUT_MS")
                .unwrap_or(DEFAULT_PRODUCER_DELIVERY_TIMEOUT_MS),
            producer_enable_idempotence: flag("KAFKA_PRODUCER_ENABLE_IDEMPOTENCE"),
            connect_timeout: Duration::from_secs(
                parsed(&lookup, "KAFKA_CONNECT_TIMEOUT_SECS")
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            flush_timeout: Duration::from_secs(
                parsed(&lookup, "KAFKA_FLUSH_TIMEOUT_SECS")
                    .unwrap_or(DEFAULT_FLUSH_TIMEOUT_SECS),
            ),
        };

        Ok(Self {
            port: parsed(&lookup, "PORT").unwrap_or(DEFAULT_PORT),
            bind_address: non_empty("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            rust_log: non_empty("RUST_LOG").unwrap_or_else(|| DEFAULT_RUST_LOG.to_string()),
            user_roster_path: non_empty("USER_ROSTER_PATH").map(PathBuf::from),
            kafka,
        })
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}
