use uuid::Uuid;

use crate::{
    auth::{
        RefreshClaims, TokenPair,
        jwt::{TokenKeys, decode_token, encode_token, make_access_claims, make_refresh_claims},
        password::verify_password,
    },
    config::AuthConfig,
    db::entities::account,
    error::AppError,
};

use super::account_service::AccountService;

/// Credential login, token issuance and rotation. Issuing a pair persists
/// the refresh token on the account, so only the most recently issued
/// refresh token is ever honored.
pub struct AuthService<'a> {
    accounts: AccountService,
    keys: &'a TokenKeys,
    cfg: &'a AuthConfig,
}

impl<'a> AuthService<'a> {
    pub fn new(accounts: AccountService, keys: &'a TokenKeys, cfg: &'a AuthConfig) -> Self {
        Self {
            accounts,
            keys,
            cfg,
        }
    }

    pub async fn login(
        &self,
        email: Option<&str>,
        handle: Option<&str>,
        password: &str,
    ) -> Result<(account::Model, TokenPair), AppError> {
        let email = email.map(str::trim).filter(|value| !value.is_empty());
        let handle = handle.map(str::trim).filter(|value| !value.is_empty());
        if email.is_none() && handle.is_none() {
            return Err(AppError::bad_request("Email or handle is required"));
        }

        let account = self
            .accounts
            .find_by_login(email, handle)
            .await?
            .ok_or_else(|| AppError::not_found("Account does not exist"))?;

        if !verify_password(password, &account.password_hash)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        let pair = self.issue_tokens(&account).await?;
        Ok((account, pair))
    }

    /// Mints a fresh access/refresh pair and stores the refresh token,
    /// overwriting whatever was there — logging in elsewhere invalidates
    /// the previous session.
    pub async fn issue_tokens(&self, account: &account::Model) -> Result<TokenPair, AppError> {
        let access_claims = make_access_claims(account, self.cfg.access_ttl_secs);
        let access_token = encode_token(&self.keys.access, &access_claims)?;

        let refresh_claims = make_refresh_claims(&account.id, self.cfg.refresh_ttl_days);
        let refresh_token = encode_token(&self.keys.refresh, &refresh_claims)?;

        self.accounts
            .set_refresh_token(&account.id, Some(refresh_token.clone()))
            .await?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Rotation: the presented token must verify against the refresh secret
    /// AND match the stored value; a mismatch means it was already rotated
    /// out (stale reuse) and is refused.
    pub async fn refresh(
        &self,
        presented: &str,
    ) -> Result<(account::Model, TokenPair), AppError> {
        let claims: RefreshClaims = decode_token(&self.keys.refresh, presented)?;
        let account_id: Uuid = claims
            .sub
            .parse()
            .map_err(|_| AppError::unauthorized("Invalid refresh token"))?;

        let account = self
            .accounts
            .find_by_id(&account_id)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid refresh token"))?;

        if account.refresh_token.as_deref() != Some(presented) {
            return Err(AppError::unauthorized(
                "Refresh token expired or already used",
            ));
        }

        let pair = self.issue_tokens(&account).await?;
        Ok((account, pair))
    }

    pub async fn logout(&self, account_id: &Uuid) -> Result<(), AppError> {
        self.accounts.set_refresh_token(account_id, None).await
    }
}
