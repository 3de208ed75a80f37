use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use models::address;
use service::{
    addresses::domain::{AddressFilter, CreateAddress, UpdateAddress},
    domain::MutationResult,
    token::AuthClaims,
};

use crate::{
    errors::JsonApiError,
    extract::{ApiJson, ApiPath, ApiQuery},
    state::ServerState,
};

#[utoipa::path(
    post, path = "/addresses", tag = "addresses",
    request_body = crate::openapi::CreateAddressRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Created", body = crate::openapi::AddressResponse),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Extension(claims): Extension<AuthClaims>,
    ApiJson(input): ApiJson<CreateAddress>,
) -> Result<(StatusCode, Json<address::Model>), JsonApiError> {
    let created = state.addresses.create(input, claims.sub).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/addresses", tag = "addresses",
    params(crate::openapi::AddressQuery),
    security(("bearer" = [])),
    responses((status = 200, description = "OK", body = [crate::openapi::AddressResponse]), (status = 401, description = "Unauthorized"))
)]
pub async fn find_all(
    State(state): State<ServerState>,
    Extension(claims): Extension<AuthClaims>,
    ApiQuery(filter): ApiQuery<AddressFilter>,
) -> Result<Json<Vec<address::Model>>, JsonApiError> {
    Ok(Json(state.addresses.find_all(claims.sub, filter).await?))
}

#[utoipa::path(
    patch, path = "/addresses/{id}", tag = "addresses",
    params(("id" = Uuid, Path, description = "Address id")),
    request_body = crate::openapi::UpdateAddressRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::MutationResponse),
        (status = 401, description = "Address belongs to another user"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Extension(claims): Extension<AuthClaims>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateAddress>,
) -> Result<Json<MutationResult>, JsonApiError> {
    Ok(Json(state.addresses.update(id, claims.sub, input).await?))
}

#[utoipa::path(
    delete, path = "/addresses/{id}", tag = "addresses",
    params(("id" = Uuid, Path, description = "Address id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Deleted", body = crate::openapi::MutationResponse),
        (status = 401, description = "Address belongs to another user"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn remove(
    State(state): State<ServerState>,
    Extension(claims): Extension<AuthClaims>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MutationResult>, JsonApiError> {
    Ok(Json(state.addresses.remove(id, claims.sub).await?))
}
