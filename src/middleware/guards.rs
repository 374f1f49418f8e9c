use std::sync::Arc;

use axum::{extract::FromRequestParts, http::header};
use tower_cookies::Cookies;

use crate::{
    auth::AccessClaims, auth::jwt::decode_token, error::AppError,
    routes::cookies::ACCESS_TOKEN_COOKIE, state::AppState,
};

// Auth guard: accept the access token from the session cookie or a bearer
// header, verify it, and hand the claims to the handler.
impl FromRequestParts<Arc<AppState>> for AccessClaims {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<AccessClaims>().cloned() {
            return Ok(claims);
        }

        let cookie_token = Cookies::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|cookies| {
                cookies
                    .get(ACCESS_TOKEN_COOKIE)
                    .map(|cookie| cookie.value().to_string())
            });

        let header_token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);

        let token = cookie_token
            .or(header_token)
            .ok_or_else(|| AppError::unauthorized("Missing access token"))?;

        let claims: AccessClaims = decode_token(&state.keys.access, &token)?;

        parts.extensions.insert(claims.clone());
        Ok(claims)
    }
}

pub type AuthGuard = AccessClaims;
