use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;

use crate::{
    error::AppError,
    middleware::AuthGuard,
    response::{ApiResult, JsonApiResponse},
    routes::cookies::{REFRESH_TOKEN_COOKIE, clear_session_cookies, set_session_cookies},
    services::ServiceContext,
    state::AppState,
};

use super::AccountResponse;
use super::uploads::MultipartForm;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub handle: Option<String>,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: AccountResponse,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/refresh-token", post(refresh))
        .with_state(state)
}

async fn register(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<AccountResponse> {
    let mut form = MultipartForm::read(multipart).await?;
    let handle = form.text("handle").to_string();
    let email = form.text("email").to_string();
    let full_name = form.text("fullName").to_string();
    let password = form.text("password").to_string();

    let accounts = ServiceContext::from_state(state.as_ref()).account();
    accounts
        .ensure_registrable(&handle, &email, &full_name, &password)
        .await?;

    let avatar = form
        .take_file("avatar")
        .ok_or_else(|| AppError::bad_request("Avatar file is required"))?;
    let cover = form.take_file("coverImage");

    let uploaded_avatar = state
        .media
        .upload(&avatar)
        .await
        .ok_or_else(|| AppError::internal("Error while uploading avatar"))?;
    // A failed cover upload is tolerated: the account is created without one.
    let uploaded_cover = match &cover {
        Some(file) => state.media.upload(file).await,
        None => None,
    };

    let account = accounts
        .create_account(
            &handle,
            &email,
            &full_name,
            &password,
            &uploaded_avatar.url,
            uploaded_cover.as_ref().map(|media| media.url.as_str()),
        )
        .await?;

    JsonApiResponse::created("Account created successfully", account.into())
}

async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(body): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let services = ServiceContext::from_state(state.as_ref());
    let auth = services.auth(&state.keys, &state.auth);

    let (account, pair) = auth
        .login(body.email.as_deref(), body.handle.as_deref(), &body.password)
        .await?;

    set_session_cookies(&cookies, &pair);
    JsonApiResponse::with_status(
        StatusCode::OK,
        "Logged in successfully",
        LoginResponse {
            user: account.into(),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        },
    )
}

async fn logout(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
    cookies: Cookies,
) -> ApiResult<serde_json::Value> {
    let services = ServiceContext::from_state(state.as_ref());
    let auth = services.auth(&state.keys, &state.auth);

    auth.logout(&claims.account_id()?).await?;

    clear_session_cookies(&cookies);
    JsonApiResponse::with_status(
        StatusCode::OK,
        "Logged out successfully",
        serde_json::Value::Null,
    )
}

async fn refresh(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    body: Option<Json<RefreshRequest>>,
) -> ApiResult<TokenResponse> {
    let presented = cookies
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| body.and_then(|Json(body)| body.refresh_token))
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::unauthorized("Refresh token missing"))?;

    let services = ServiceContext::from_state(state.as_ref());
    let auth = services.auth(&state.keys, &state.auth);

    let (_, pair) = auth.refresh(&presented).await?;

    set_session_cookies(&cookies, &pair);
    JsonApiResponse::with_status(
        StatusCode::OK,
        "Access token refreshed",
        TokenResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        },
    )
}
