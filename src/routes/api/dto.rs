use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use uuid::Uuid;

use crate::db::entities::account;

/// Sanitized account payload: the only shape an account ever leaves the
/// service in. Credentials and the stored refresh token stay behind.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: Uuid,
    pub handle: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<account::Model> for AccountResponse {
    fn from(model: account::Model) -> Self {
        Self {
            id: model.id,
            handle: model.handle,
            email: model.email,
            full_name: model.full_name,
            avatar_url: model.avatar_url,
            cover_image_url: model.cover_image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use uuid::Uuid;

    use crate::db::entities::account;

    use super::AccountResponse;

    #[test]
    fn sanitized_payload_never_contains_credentials() {
        let ts = FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid");
        let model = account::Model {
            id: Uuid::new_v4(),
            created_at: ts,
            updated_at: ts,
            handle: "alice".to_string(),
            email: "alice@example.com".to_string(),
            full_name: "Alice Doe".to_string(),
            password_hash: "super-secret-hash".to_string(),
            avatar_url: "https://media.example.com/avatar.png".to_string(),
            cover_image_url: None,
            refresh_token: Some("active-refresh-token".to_string()),
        };

        let response = AccountResponse::from(model);
        let json = serde_json::to_value(&response).expect("payload should serialize");
        let object = json.as_object().expect("payload should be an object");

        assert_eq!(object["handle"], "alice");
        for key in object.keys() {
            assert!(!key.to_lowercase().contains("password"), "leaked: {key}");
            assert!(!key.to_lowercase().contains("refresh"), "leaked: {key}");
        }
        assert!(!json.to_string().contains("super-secret-hash"));
        assert!(!json.to_string().contains("active-refresh-token"));
    }
}
