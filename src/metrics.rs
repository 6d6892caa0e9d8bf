use anyhow::Result;
use once_cell::sync::Lazy;
use prometheus::{opts, register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};

/// Finished `/send` requests by outcome: ok, bad_request, not_found, internal
pub static NOTIFY_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        opts!(
            "notify_requests_total",
            "Total number of notification requests by outcome"
        ),
        &["outcome"]
    )
    .unwrap()
});

pub fn record_outcome(outcome: &str) {
    NOTIFY_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn gather_metrics() -> Result<String> {
    // Touch lazily-registered metrics so they show up before first use
    Lazy::force(&NOTIFY_REQUESTS_TOTAL);
    Lazy::force(&crate::kafka::metrics::NOTIFY_PRODUCE_ACKED);
    Lazy::force(&crate::kafka::metrics::NOTIFY_PRODUCE_FAILED);
    Lazy::force(&crate::kafka::metrics::NOTIFY_PRODUCE_SECONDS);

    let mut buffer = vec![];
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder.encode(&metric_families, &mut buffer)?;

    Ok(String::from_utf8(buffer)?)
}
