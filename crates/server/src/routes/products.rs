use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::info;

use models::product::Product;
use service::validation::{check_product, ValidationReport};

use crate::errors::ApiError;
use crate::routes::{json_body, run_gate};
use crate::state::AppState;

/// A gate rejection still reports every product rule. Fields the gate already
/// flagged keep the gate's message; the rules fill in the rest.
fn gate_and_rules(mut gate_report: ValidationReport, payload: &Value) -> Vec<String> {
    gate_report.merge(check_product(payload));
    gate_report.into_errors()
}

#[utoipa::path(
    get, path = "/productos/{id}", tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Found", body = crate::openapi::ProductDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>, ApiError> {
    let product = state.products.get_by_id(&id).await?;
    Ok(Json(product))
}

/// Full replace. `ratings` in the body is ignored; the stored ratings are kept.
#[utoipa::path(
    put, path = "/productos/{id}", tag = "products",
    params(("id" = String, Path, description = "Product id")),
    request_body = crate::openapi::ProductInputDoc,
    responses(
        (status = 200, description = "Replaced", body = crate::openapi::ProductDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ValidationErrorDoc),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let mut payload = json_body(body)?;
    if let Err(report) = run_gate(state.product_gate.as_ref(), "PUT /productos/{id}", &mut payload) {
        state.products.get_by_id(&id).await?;
        return Err(ApiError::validation(gate_and_rules(report, &payload)));
    }
    let product = state.products.replace(&id, payload).await?;
    info!(id = %product.id, "product replaced");
    Ok(Json(product))
}

#[utoipa::path(
    delete, path = "/productos/{id}", tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found", body = crate::openapi::MessageDoc)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    state.products.delete(&id).await?;
    info!(id = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use service::validation::{product_schema, PayloadValidator, SchemaValidator};

    fn gated(mut body: Value) -> Vec<String> {
        let report = SchemaValidator::new(product_schema()).validate(&mut body);
        assert!(!report.is_valid());
        gate_and_rules(report, &body)
    }

    #[test]
    fn structural_and_rule_violations_are_reported_together() {
        let errors = gated(json!({"name": "L", "price": "abc", "category": ["toys"]}));
        assert_eq!(
            errors,
            [
                "price must be a number",
                "name must be between 2 and 40 characters",
                "category values must be one of: electronics, books, clothes, food",
            ]
        );
    }

    #[test]
    fn missing_fields_are_not_reported_twice() {
        let errors = gated(json!({"name": "Refactoring"}));
        assert_eq!(
            errors,
            ["must have required property 'price'", "must have required property 'category'"]
        );
    }
}
