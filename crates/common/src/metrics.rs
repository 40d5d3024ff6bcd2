use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Encoder, Histogram,
    IntCounter, IntCounterVec, TextEncoder,
};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "seller_panel_requests_total",
        "Total HTTP requests handled by the seller panel"
    )
    .expect("register requests_total")
});

pub static RESPONSES_BY_STATUS: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "seller_panel_responses_total",
        "HTTP responses by status class",
        &["class"]
    )
    .expect("register responses_total")
});

pub static REQUEST_DURATION: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "seller_panel_request_duration_seconds",
        "Request duration in seconds",
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register request_duration")
});

pub static SESSIONS_COMMITTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "seller_panel_sessions_committed_total",
        "Database sessions released with a commit"
    )
    .expect("register sessions_committed_total")
});

pub static SESSIONS_ROLLED_BACK_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "seller_panel_sessions_rolled_back_total",
        "Database sessions released with a rollback"
    )
    .expect("register sessions_rolled_back_total")
});

/// Record one finished request.
pub fn observe_response(status: u16, elapsed_secs: f64) {
    REQUESTS_TOTAL.inc();
    REQUEST_DURATION.observe(elapsed_secs);
    let class = match status {
        200..=299 => "2xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };
    RESPONSES_BY_STATUS.with_label_values(&[class]).inc();
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
