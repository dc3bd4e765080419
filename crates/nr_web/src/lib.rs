use axum::{middleware, routing::get, Router};
use nr_core::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    let state = Arc::new(state);
    let cors = CorsLayer::permissive();

    let protected = Router::new()
        .route("/fetch-source", get(handlers::fetch_source))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer));

    Router::new()
        .merge(protected)
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve the fetch service until the process exits.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Fetch service listening");
    axum::serve(listener, create_app(state)).await?;
    Ok(())
}

pub mod prelude {
    pub use nr_core::{FetchedArticle, Result, Error};
    pub use crate::{create_app, serve, AppState};
}
