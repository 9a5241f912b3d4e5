//! Shared harness for API client tests.
//!
//! Serves an in-process axum router on an ephemeral port and returns
//! the base URL, so tests exercise the real reqwest path end to end.

use axum::Router;
use serde_json::json;

/// Bind the router on an ephemeral local port and return its base URL.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock backend");
    });

    format!("http://{addr}")
}

/// A small but fully-shaped comparison report payload.
pub fn sample_report() -> serde_json::Value {
    json!({
        "summary": {
            "matched": 400,
            "corrected": 50,
            "added": 100,
            "deleted": 50,
            "total_old": 500,
            "total_new": 550
        },
        "wards": [
            {"ward": "W1", "matched": 250, "corrected": 30, "added": 60, "deleted": 30},
            {"ward": "W2", "matched": 150, "corrected": 20, "added": 40, "deleted": 20}
        ]
    })
}
