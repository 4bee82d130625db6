pub mod info;
pub mod products;
pub mod users;

use axum::{
    extract::rejection::JsonRejection,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use service::validation::{PayloadValidator, ValidationReport};

use crate::errors::ApiError;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Build the full application router: static info routes, the two resource
/// route groups and, when enabled, the Swagger UI.
pub fn build_router(state: AppState, cors: CorsLayer, docs_enabled: bool) -> Router {
    let info_routes = Router::new()
        .route("/health", get(info::health))
        .route("/hello", get(info::hello))
        .route("/v1", get(info::v1))
        .route("/v2", get(info::v2));

    let user_routes = Router::new()
        .route("/users", axum::routing::post(users::create))
        .route("/users/:id", get(users::get).post(users::update));

    let product_routes = Router::new()
        .route("/productos/:id", get(products::get).put(products::replace).delete(products::delete));

    let mut app = Router::new().merge(info_routes).merge(user_routes).merge(product_routes);
    if docs_enabled {
        app = app.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app.fallback(info::not_found)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

/// Unwrap a JSON body, turning extractor rejections (bad content type,
/// malformed JSON) into a plain 400.
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(v)| v).map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Run a boundary gate over `payload`, coercing it in place. The report is
/// handed back on rejection so the caller can decide whether a 404 outranks it.
pub(crate) fn run_gate(
    gate: &dyn PayloadValidator,
    route: &'static str,
    payload: &mut Value,
) -> Result<(), ValidationReport> {
    let report = gate.validate(payload);
    if report.is_valid() {
        return Ok(());
    }
    warn!(route, gate = gate.name(), violations = report.len(), "request body rejected");
    Err(report)
}
