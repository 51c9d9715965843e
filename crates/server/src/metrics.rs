use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec, TextEncoder};

// Prometheus metrics (default registry)
pub static LOGINS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!("tailor_logins_total", "Login attempts by outcome", &["outcome"])
        .expect("register logins_total")
});

pub static ITEM_TRANSITIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "tailor_item_status_transitions_total",
        "Order item status changes by target status",
        &["status"]
    )
    .expect("register item_status_transitions_total")
});

pub static FILES_STORED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("tailor_files_stored_total", "Uploaded files accepted through the API")
        .expect("register files_stored_total")
});

pub fn record_login(outcome: &str) {
    LOGINS_TOTAL.with_label_values(&[outcome]).inc();
}

pub fn record_transition(status: &str) {
    ITEM_TRANSITIONS_TOTAL.with_label_values(&[status]).inc();
}

pub fn record_files_stored(n: usize) {
    FILES_STORED_TOTAL.inc_by(n as u64);
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_the_text_output() {
        record_login("success");
        record_transition("Cutting");
        record_files_stored(2);
        let (status, body) = encode_metrics();
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("tailor_logins_total"));
        assert!(body.contains("status=\"Cutting\""));
        assert!(body.contains("tailor_files_stored_total"));
    }
}
