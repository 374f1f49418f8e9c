use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Serialize, de::DeserializeOwned};

use super::{AccessClaims, RefreshClaims};
use crate::{config::AuthConfig, db::entities::account, error::AppError};

#[derive(Clone)]
pub struct JwtKeys {
    pub enc: EncodingKey,
    pub dec: DecodingKey,
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            enc: EncodingKey::from_secret(secret),
            dec: DecodingKey::from_secret(secret),
        }
    }
}

/// Separate key pairs for the access and refresh tokens; each is signed and
/// verified against its own secret.
#[derive(Clone)]
pub struct TokenKeys {
    pub access: JwtKeys,
    pub refresh: JwtKeys,
}

impl TokenKeys {
    pub fn from_config(cfg: &AuthConfig) -> Self {
        Self {
            access: JwtKeys::from_secret(cfg.access_token_secret.as_bytes()),
            refresh: JwtKeys::from_secret(cfg.refresh_token_secret.as_bytes()),
        }
    }
}

pub fn now_unix() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

pub fn encode_token<C: Serialize>(keys: &JwtKeys, claims: &C) -> Result<String, AppError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".into());

    encode(&header, claims, &keys.enc)
        .map_err(|err| AppError::internal(format!("Token encoding failed: {err}")))
}

pub fn decode_token<C: DeserializeOwned>(keys: &JwtKeys, token: &str) -> Result<C, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    decode::<C>(token, &keys.dec, &validation)
        .map(|data| data.claims)
        .map_err(|err| AppError::unauthorized(format!("Invalid or expired token: {err}")))
}

pub fn make_access_claims(account: &account::Model, ttl_secs: usize) -> AccessClaims {
    let iat = now_unix();
    AccessClaims {
        sub: account.id.to_string(),
        handle: account.handle.clone(),
        email: account.email.clone(),
        iat,
        exp: iat + ttl_secs,
    }
}

pub fn make_refresh_claims(account_id: &uuid::Uuid, ttl_days: i64) -> RefreshClaims {
    let iat = now_unix();
    RefreshClaims {
        sub: account_id.to_string(),
        iat,
        exp: iat + (ttl_days as usize) * 24 * 60 * 60,
    }
}
