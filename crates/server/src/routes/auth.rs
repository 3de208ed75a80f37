use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Json,
};
use tracing::warn;

use service::auth::domain::{AuthToken, SignInInput};

use crate::{
    errors::JsonApiError,
    extract::ApiJson,
    state::ServerState,
};

#[utoipa::path(
    post, path = "/auth/credentials", tag = "auth",
    request_body = crate::openapi::CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = crate::openapi::AuthTokenResponse),
        (status = 400, description = "Validation Error"),
        (status = 401, description = "Invalid credentials"),
        (status = 404, description = "Unknown email")
    )
)]
pub async fn sign_in(State(state): State<ServerState>, ApiJson(input): ApiJson<SignInInput>) -> Result<Json<AuthToken>, JsonApiError> {
    let token = state.auth.sign_in_with_credentials(input).await?;
    Ok(Json(token))
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Auth Guard: requires `Authorization: Bearer <token>`, verifies it and
/// attaches the decoded `AuthClaims` to the request for downstream handlers.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, JsonApiError> {
    let path = req.uri().path().to_string();
    let Some(token) = bearer_token(&req) else {
        warn!(path = %path, "missing or malformed Authorization header");
        return Err(JsonApiError::unauthorized("missing bearer token"));
    };

    match state.tokens.decode(token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!(path = %path, err = %e, "token validation failed");
            Err(JsonApiError::unauthorized(e.to_string()))
        }
    }
}
