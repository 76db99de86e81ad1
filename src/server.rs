use std::sync::Arc;

use axum::{
    Extension, Router,
    routing::{get, post},
};

use crate::{
    Res,
    api::{self, CallbackState, GatewayState},
    info,
};

/// Router of the interaction webhook server.
pub fn gateway_router(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(
            "/interactions",
            post(api::interactions).layer(Extension(state)),
        )
}

/// Router of the temporary server receiving the OAuth redirect on `path`,
/// the path component of the configured redirect URI.
pub fn callback_router(path: &str, state: Arc<CallbackState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route(path, get(api::callback).layer(Extension(state)))
}

pub async fn start_gateway_server(addr: &str, state: Arc<GatewayState>) -> Res<()> {
    serve(addr, gateway_router(state)).await
}

pub async fn start_callback_server(
    addr: &str,
    path: &str,
    state: Arc<CallbackState>,
) -> Res<()> {
    serve(addr, callback_router(path, state)).await
}

async fn serve(addr: &str, app: Router) -> Res<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
