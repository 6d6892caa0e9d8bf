use rdkafka::config::ClientConfig;
use tracing::info;

use crate::config::KafkaConfig;

/// Builds the librdkafka client configuration shared by every Kafka client
/// this service creates: bootstrap servers, TLS, and SASL credentials.
///
/// SASL is applied only when mechanism, username and password are all set.
pub fn create_client_config(config: &KafkaConfig) -> ClientConfig {
    let mut client_config = ClientConfig::new();
    client_config.set("bootstrap.servers", &config.brokers);
    client_config.set("security.protocol", "plaintext");

    if config.ssl_enabled {
        info!("Enabling SSL/TLS for Kafka connection");
        client_config.set("security.protocol", "ssl");
    }

    if let (Some(mechanism), Some(username), Some(password)) = (
        &config.sasl_mechanism,
        &config.sasl_username,
        &config.sasl_password,
    ) {
        info!(sasl_mechanism = %mechanism, "Configuring SASL authentication");
        client_config
            .set("sasl.mechanism", mechanism)
            .set("sasl.username", username)
            .set("sasl.password", password);

        if config.ssl_enabled {
            client_config.set("security.protocol", "sasl_ssl");
        } else {
            client_config.set("security.protocol", "sasl_plaintext");
        }
    }

    client_config
}

/// Adds the producer settings on top of [`create_client_config`].
pub fn create_producer_config(config: &KafkaConfig) -> ClientConfig {
    let mut client_config = create_client_config(config);
    client_config
        .set("acks", &config.producer_acks)
        .set(
            "enable.idempotence",
            if config.producer_enable_idempotence {
                "true"
            } else {
                "false"
            },
        )
        .set("retries", config.producer_retries.to_string())
        .set("compression.type", &config.producer_compression)
        .set("linger.ms", config.producer_linger_ms.to_string())
        .set(
            "request.timeout.ms",
            config.producer_request_timeout_ms.to_string(),
        )
        .set(
            "delivery.timeout.ms",
            config.producer_delivery_timeout_ms.to_string(),
        );
    client_config
}
