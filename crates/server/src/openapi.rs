use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct PersonDoc {
    /// 32 lowercase hex digits
    pub id: String,
    pub email: String,
}

/// Any `id` field in the body is ignored.
#[derive(ToSchema)]
pub struct PersonInputDoc { pub email: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String, pub message: Option<String> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::person::create,
        crate::routes::person::find,
        crate::routes::person::update,
        crate::routes::person::delete,
    ),
    components(
        schemas(
            HealthResponse,
            PersonDoc,
            PersonInputDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "person")
    )
)]
pub struct ApiDoc;
