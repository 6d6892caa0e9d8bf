use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};

/// Notifications acknowledged by the broker, per topic
pub static NOTIFY_PRODUCE_ACKED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "notify_produce_acked_total",
        "Notifications acknowledged by Kafka",
        &["topic"]
    )
    .expect("Failed to register notify_produce_acked_total metric")
});

/// Notifications the broker rejected or never acknowledged, per topic
pub static NOTIFY_PRODUCE_FAILED: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "notify_produce_failed_total",
        "Notifications Kafka rejected or did not acknowledge",
        &["topic"]
    )
    .expect("Failed to register notify_produce_failed_total metric")
});

/// Time from handing a notification to the producer until the broker answered
pub static NOTIFY_PRODUCE_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "notify_produce_seconds",
        "Time until Kafka acknowledged or failed a notification",
        &["topic"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 30.0, 120.0]
    )
    .expect("Failed to register notify_produce_seconds metric")
});

pub fn record_acked(topic: &str, seconds: f64) {
    NOTIFY_PRODUCE_ACKED.with_label_values(&[topic]).inc();
    NOTIFY_PRODUCE_SECONDS
        .with_label_values(&[topic])
        .observe(seconds);
}

pub fn record_failed(topic: &str, seconds: f64) {
    NOTIFY_PRODUCE_FAILED.with_label_values(&[topic]).inc();
    NOTIFY_PRODUCE_SECONDS
        .with_label_values(&[topic])
        .observe(seconds);
}
