//! OpenAPI / Swagger UI documentation.
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::types::{HealthResponse, Notification, RejectTedRequest, TedResponse};
use crate::ted::{SubmitTedRequest, TedLimit};

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TED API",
        version = "0.1.0",
        description = "Back-office API for TED wire-transfer requests: limit-checked admission, settlement submission, administrative review.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        // Client endpoints
        crate::gateway::handlers::client::solicita_ted,
        crate::gateway::handlers::client::lista_ted,
        crate::gateway::handlers::client::cancela_ted,
        // Admin endpoints
        crate::gateway::handlers::admin::lista_ted,
        crate::gateway::handlers::admin::aprova_ted,
        crate::gateway::handlers::admin::reprova_ted,
        crate::gateway::handlers::admin::atualiza_limite_ted,
        crate::gateway::handlers::admin::obtem_limite_ted,
    ),
    components(
        schemas(
            HealthResponse,
            Notification,
            SubmitTedRequest,
            TedResponse,
            RejectTedRequest,
            TedLimit,
        )
    ),
    tags(
        (name = "Cliente", description = "Client-facing TED operations"),
        (name = "Admin", description = "Administrative review and limit policy"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;
