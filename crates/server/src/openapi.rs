use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct VersionInfoDoc { pub version: String, pub message: String }

#[derive(ToSchema)]
pub struct ValidationErrorDoc { pub message: String, pub errors: Vec<String> }

#[derive(ToSchema)]
pub struct UserInputDoc { pub name: String, pub age: f64, pub email: String }

/// Create response; `id` is the decimal string form of the stored integer.
#[derive(ToSchema)]
pub struct UserCreatedDoc { pub id: String, pub name: String, pub age: f64, pub email: String }

#[derive(ToSchema)]
pub struct UserSummaryDoc { pub id: u64, pub name: String }

#[derive(ToSchema)]
pub struct UserDoc { pub id: u64, pub name: String, pub age: f64, pub email: String }

#[derive(Serialize, ToSchema)]
pub struct RatingDoc { pub score: f64, pub comment: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductInputDoc {
    /// 2 to 40 characters.
    pub name: String,
    pub description: Option<String>,
    /// Non-negative, at most two decimal places.
    pub price: f64,
    /// One or more of `electronics`, `books`, `clothes`, `food`.
    pub category: Vec<String>,
    pub tags: Option<Vec<String>>,
    pub in_stock: Option<bool>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDoc {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Vec<String>,
    pub tags: Option<Vec<String>>,
    pub in_stock: Option<bool>,
    pub ratings: Vec<RatingDoc>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::info::health,
        crate::routes::info::hello,
        crate::routes::info::v1,
        crate::routes::info::v2,
        crate::routes::users::create,
        crate::routes::users::get,
        crate::routes::users::update,
        crate::routes::products::get,
        crate::routes::products::replace,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            VersionInfoDoc,
            ValidationErrorDoc,
            UserInputDoc,
            UserCreatedDoc,
            UserSummaryDoc,
            UserDoc,
            RatingDoc,
            ProductInputDoc,
            ProductDoc,
        )
    ),
    tags(
        (name = "info"),
        (name = "users"),
        (name = "products")
    )
)]
pub struct ApiDoc;
