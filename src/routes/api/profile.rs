use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, patch, post},
};
use serde::Deserialize;

use crate::{
    error::AppError,
    middleware::AuthGuard,
    response::{ApiResult, JsonApiResponse},
    services::ServiceContext,
    state::AppState,
};

use super::AccountResponse;
use super::uploads::MultipartForm;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/current-user", get(current_user))
        .route("/change-password", post(change_password))
        .route("/update-account", patch(update_account))
        .route("/avatar", patch(update_avatar))
        .route("/cover-image", patch(update_cover_image))
        .with_state(state)
}

async fn current_user(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
) -> ApiResult<AccountResponse> {
    let accounts = ServiceContext::from_state(state.as_ref()).account();
    let account = accounts
        .find_by_id(&claims.account_id()?)
        .await?
        .ok_or_else(|| AppError::not_found("Account does not exist"))?;

    JsonApiResponse::ok(account.into())
}

async fn change_password(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
    Json(body): Json<ChangePasswordRequest>,
) -> ApiResult<serde_json::Value> {
    let accounts = ServiceContext::from_state(state.as_ref()).account();
    accounts
        .change_password(&claims.account_id()?, &body.old_password, &body.new_password)
        .await?;

    JsonApiResponse::with_status(
        StatusCode::OK,
        "Password changed successfully",
        serde_json::Value::Null,
    )
}

async fn update_account(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
    Json(body): Json<UpdateAccountRequest>,
) -> ApiResult<AccountResponse> {
    let accounts = ServiceContext::from_state(state.as_ref()).account();
    let updated = accounts
        .update_details(&claims.account_id()?, body.full_name, body.email)
        .await?;

    JsonApiResponse::with_status(
        StatusCode::OK,
        "Account details updated successfully",
        updated.into(),
    )
}

async fn update_avatar(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
    multipart: Multipart,
) -> ApiResult<AccountResponse> {
    let account_id = claims.account_id()?;
    let mut form = MultipartForm::read(multipart).await?;
    let file = form
        .take_file("avatar")
        .ok_or_else(|| AppError::bad_request("Avatar file is required"))?;

    let accounts = ServiceContext::from_state(state.as_ref()).account();
    let account = accounts
        .find_by_id(&account_id)
        .await?
        .ok_or_else(|| AppError::not_found("Account does not exist"))?;

    let uploaded = state
        .media
        .upload(&file)
        .await
        .ok_or_else(|| AppError::bad_request("Error while uploading avatar"))?;

    // Fail closed: if the old asset's deletion is not confirmed, remove the
    // one we just uploaded and leave the account pointing at the old URL.
    let previous = account.avatar_url;
    if !previous.is_empty() && !state.media.delete(&previous).await {
        state.media.delete(&uploaded.url).await;
        return Err(AppError::bad_request("Error while deleting old avatar"));
    }

    let updated = accounts.set_avatar_url(&account_id, &uploaded.url).await?;
    JsonApiResponse::with_status(
        StatusCode::OK,
        "Avatar updated successfully",
        updated.into(),
    )
}

async fn update_cover_image(
    State(state): State<Arc<AppState>>,
    claims: AuthGuard,
    multipart: Multipart,
) -> ApiResult<AccountResponse> {
    let account_id = claims.account_id()?;
    let mut form = MultipartForm::read(multipart).await?;
    let file = form
        .take_file("coverImage")
        .ok_or_else(|| AppError::bad_request("Cover image file is required"))?;

    let uploaded = state
        .media
        .upload(&file)
        .await
        .ok_or_else(|| AppError::bad_request("Error while uploading cover image"))?;

    let accounts = ServiceContext::from_state(state.as_ref()).account();
    let updated = accounts
        .set_cover_image_url(&account_id, &uploaded.url)
        .await?;

    JsonApiResponse::with_status(
        StatusCode::OK,
        "Cover image updated successfully",
        updated.into(),
    )
}
