use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use models::user;
use service::{
    domain::MutationResult,
    errors::ServiceError,
    ownership::ensure_self,
    pagination::Pagination,
    token::AuthClaims,
    users::domain::{CreateUser, UpdateUser, UserWithAddresses},
};

use crate::{
    errors::JsonApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::ServerState,
};

#[utoipa::path(
    post, path = "/users", tag = "users",
    request_body = crate::openapi::CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::UserResponse),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<CreateUser>) -> Result<(StatusCode, Json<user::Model>), JsonApiError> {
    let created = state.users.create(input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/users", tag = "users",
    params(crate::openapi::PageParams),
    security(("bearer" = [])),
    responses((status = 200, description = "OK", body = [crate::openapi::UserResponse]), (status = 401, description = "Unauthorized"))
)]
pub async fn find_all(State(state): State<ServerState>, ApiQuery(page): ApiQuery<Pagination>) -> Result<Json<Vec<user::Model>>, JsonApiError> {
    Ok(Json(state.users.find_all(page).await?))
}

#[utoipa::path(
    get, path = "/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "OK", body = crate::openapi::UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn find_one(State(state): State<ServerState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<UserWithAddresses>, JsonApiError> {
    match state.users.find_one(id).await? {
        Some(found) => Ok(Json(found)),
        None => Err(ServiceError::NotFound(format!("user not found: {}", id)).into()),
    }
}

#[utoipa::path(
    patch, path = "/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = crate::openapi::UpdateUserRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MutationResponse),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Not your account"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(claims): Extension<AuthClaims>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateUser>,
) -> Result<Json<MutationResult>, JsonApiError> {
    ensure_self(claims.sub, id, "user")?;
    Ok(Json(state.users.update(id, input).await?))
}

#[utoipa::path(
    delete, path = "/users/{id}", tag = "users",
    params(("id" = Uuid, Path, description = "User id")),
    security(("bearer" = [])),
    responses((status = 200, description = "Deleted", body = crate::openapi::MutationResponse), (status = 401, description = "Not your account"))
)]
pub async fn remove(
    State(state): State<ServerState>,
    Extension(claims): Extension<AuthClaims>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MutationResult>, JsonApiError> {
    ensure_self(claims.sub, id, "user")?;
    Ok(Json(state.users.remove(id).await?))
}
