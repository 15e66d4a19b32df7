//! The scrape endpoint. It serves the last rendered snapshot, so scrapes
//! never run the Slurm tools themselves.

use std::net::SocketAddr;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

/// Latest snapshot text. Empty until the first cycle has finished.
pub type Snapshot = Arc<ArcSwapOption<String>>;

async fn metrics_handler(State(snapshot): State<Snapshot>) -> Response {
    match snapshot.load_full() {
        Some(text) => {
            ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], String::clone(&text)).into_response()
        }
        None => (StatusCode::SERVICE_UNAVAILABLE, "No snapshot collected yet").into_response(),
    }
}

pub fn metrics_router(snapshot: Snapshot) -> Router {
    Router::new().route("/metrics", get(metrics_handler)).with_state(snapshot)
}

pub async fn serve(addr: SocketAddr, snapshot: Snapshot) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Serving metrics");
    axum::serve(listener, metrics_router(snapshot)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn scrape(snapshot: &Snapshot) -> (StatusCode, String) {
        let response = metrics_handler(State(snapshot.clone())).await;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn unavailable_before_first_snapshot() {
        let snapshot = Snapshot::default();
        let (status, _) = scrape(&snapshot).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn serves_latest_snapshot() {
        let snapshot = Snapshot::default();
        snapshot.store(Some(Arc::new("slurm_cpus_idle 1\n".to_owned())));
        snapshot.store(Some(Arc::new("slurm_cpus_idle 2\n".to_owned())));

        let response = metrics_handler(State(snapshot.clone())).await;
        assert_eq!(response.headers()[header::CONTENT_TYPE], prometheus::TEXT_FORMAT);

        let (status, body) = scrape(&snapshot).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "slurm_cpus_idle 2\n");
    }
}
