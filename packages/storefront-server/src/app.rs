use crate::routes;
use crate::state::AppState;
use axum::Router;
use std::sync::Arc;
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub(crate) fn axum_app(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/auth", routes::auth::router(Arc::clone(&state)))
        .nest("/products", routes::products::router(Arc::clone(&state)))
        .nest("/orders", routes::orders::router(Arc::clone(&state)))
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
}
