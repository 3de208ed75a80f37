//! OpenAPI document served at `/api-docs/openapi.json`.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{IntoParams, Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CredentialsRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AuthTokenResponse { pub token: String, pub expires_in: u64 }

#[derive(ToSchema)]
pub struct CreateUserRequest { pub email: String, pub password: String }

#[derive(ToSchema)]
pub struct UpdateUserRequest { pub email: Option<String>, pub password: Option<String> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    pub addresses: Option<Vec<AddressResponse>>,
}

#[derive(ToSchema)]
pub struct CreateAddressRequest {
    pub alias: String,
    pub address: String,
    pub number: Option<i64>,
    pub cep: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(ToSchema)]
pub struct UpdateAddressRequest {
    pub alias: Option<String>,
    pub address: Option<String>,
    pub number: Option<i64>,
    pub cep: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: Uuid,
    pub alias: String,
    pub address: String,
    pub number: Option<i64>,
    pub cep: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub user_id: Uuid,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct MutationResponse { pub affected: u64 }

#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct PageParams {
    /// 1-based page index
    pub page: Option<u32>,
    /// Items per page, at most 100
    pub per_page: Option<u32>,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddressQuery {
    pub id: Option<Uuid>,
    pub alias: Option<String>,
    pub cep: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme("bearer", SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)));
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::sign_in,
        crate::routes::users::create,
        crate::routes::users::find_all,
        crate::routes::users::find_one,
        crate::routes::users::update,
        crate::routes::users::remove,
        crate::routes::addresses::create,
        crate::routes::addresses::find_all,
        crate::routes::addresses::update,
        crate::routes::addresses::remove,
    ),
    components(
        schemas(
            HealthResponse,
            CredentialsRequest,
            AuthTokenResponse,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            CreateAddressRequest,
            UpdateAddressRequest,
            AddressResponse,
            MutationResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "users"),
        (name = "addresses")
    )
)]
pub struct ApiDoc;
