use std::{io, net::SocketAddr, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::cache::TtlCache;
use crate::error::Error;
use crate::pipeline::Pipeline;
use crate::source::LineSource;

pub struct AppState<S> {
    pipeline: Pipeline<S>,
    cache: TtlCache<Bytes>,
}

impl<S> AppState<S> {
    pub fn new(pipeline: Pipeline<S>, cache: TtlCache<Bytes>) -> Self {
        Self { pipeline, cache }
    }
}

pub fn router<S>(state: Arc<AppState<S>>) -> Router
where
    S: LineSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handle_calendar::<S>))
        .fallback(|| async { Redirect::permanent(env!("CARGO_PKG_REPOSITORY")) })
        .with_state(state)
}

pub async fn serve<S>(addr: SocketAddr, state: AppState<S>) -> io::Result<()>
where
    S: LineSource + Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!("Listening at http://{addr}");

    axum::serve(listener, router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
        return;
    }

    info!("shutting down");
}

async fn handle_calendar<S>(State(state): State<Arc<AppState<S>>>) -> Response
where
    S: LineSource + Send + Sync + 'static,
{
    let pipeline = &state.pipeline;

    let calendar = state
        .cache
        .get_or_compute(move || async move {
            match pipeline.run().await {
                Ok(bytes) => Some(Bytes::from(bytes)),
                Err(Error::Parse(err)) => {
                    error!(kind = ?err.kind(), error = %err, "failed to parse schedule");
                    None
                }
                Err(err) => {
                    error!(error = %err, "failed to build calendar");
                    None
                }
            }
        })
        .await;

    let Some(calendar) = calendar else {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    (
        [(header::CONTENT_TYPE, "text/calendar; charset=utf-8")],
        Bytes::clone(&calendar),
    )
        .into_response()
}
