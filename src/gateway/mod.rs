//! HTTP surface: router assembly and server startup.

pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

/// Build the full application router: two role-scoped route groups plus
/// health and API docs.
pub fn router(state: Arc<AppState>) -> Router {
    let client_routes = Router::new()
        .route("/solicita-ted", post(handlers::client::solicita_ted))
        .route("/lista-ted/{cliente_id}", get(handlers::client::lista_ted))
        .route("/cancela-ted/{id}", put(handlers::client::cancela_ted));

    let admin_routes = Router::new()
        .route("/lista-ted", get(handlers::admin::lista_ted))
        .route("/aprova-ted/{id}", put(handlers::admin::aprova_ted))
        .route("/reprova-ted/{id}", put(handlers::admin::reprova_ted))
        .route(
            "/atualiza-limite-ted",
            put(handlers::admin::atualiza_limite_ted),
        )
        .route("/obtem-limite-ted", get(handlers::admin::obtem_limite_ted));

    Router::new()
        .route("/api/v1/health", get(handlers::health_check))
        .nest("/api/v1/cliente", client_routes)
        .nest("/api/v1/admin", admin_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()))
}

/// Start the HTTP gateway server.
pub async fn run_server(host: &str, port: u16, state: Arc<AppState>) {
    let app = router(state);

    let addr = format!("{}:{}", host, port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API docs at http://{}/docs", addr);

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
