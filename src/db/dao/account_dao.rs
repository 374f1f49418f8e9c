use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::account as entity;
use crate::db::entities::{account, prelude::Account};

#[derive(Clone)]
pub struct AccountDao {
    db: DatabaseConnection,
}

impl DaoBase for AccountDao {
    type Entity = Account;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl AccountDao {
    pub async fn find_by_handle(&self, handle: &str) -> DaoResult<Option<account::Model>> {
        let handle = handle.to_string();
        self.find(1, 1, None, move |query| {
            query.filter(entity::Column::Handle.eq(handle))
        })
        .await
        .map(|response| response.data.into_iter().next())
    }

    /// Looks up an account by whichever identifiers the caller supplies,
    /// matching either one. Both absent yields no match.
    pub async fn find_by_login(
        &self,
        email: Option<&str>,
        handle: Option<&str>,
    ) -> DaoResult<Option<account::Model>> {
        let mut condition = Condition::any();
        if let Some(email) = email {
            condition = condition.add(entity::Column::Email.eq(email.to_string()));
        }
        if let Some(handle) = handle {
            condition = condition.add(entity::Column::Handle.eq(handle.to_string()));
        }
        self.find(1, 1, None, move |query| query.filter(condition))
            .await
            .map(|response| response.data.into_iter().next())
    }

    /// Registration conflict check: any account already holding the handle
    /// or the email.
    pub async fn find_by_handle_or_email(
        &self,
        handle: &str,
        email: &str,
    ) -> DaoResult<Option<account::Model>> {
        let condition = Condition::any()
            .add(entity::Column::Handle.eq(handle.to_string()))
            .add(entity::Column::Email.eq(email.to_string()));
        self.find(1, 1, None, move |query| query.filter(condition))
            .await
            .map(|response| response.data.into_iter().next())
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> DaoResult<Vec<account::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Account::find()
            .filter(entity::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn create_account(
        &self,
        handle: &str,
        email: &str,
        full_name: &str,
        password_hash: &str,
        avatar_url: &str,
        cover_image_url: Option<&str>,
    ) -> DaoResult<account::Model> {
        let model = account::ActiveModel {
            handle: Set(handle.to_string()),
            email: Set(email.to_string()),
            full_name: Set(full_name.to_string()),
            password_hash: Set(password_hash.to_string()),
            avatar_url: Set(avatar_url.to_string()),
            cover_image_url: Set(cover_image_url.map(str::to_string)),
            refresh_token: Set(None),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Overwrites the stored refresh token; `None` clears it (logout).
    pub async fn set_refresh_token(
        &self,
        id: &Uuid,
        token: Option<String>,
    ) -> DaoResult<()> {
        self.update(*id, move |active| {
            active.refresh_token = Set(token);
        })
        .await
        .map(|_| ())
    }

    pub async fn set_password_hash(&self, id: &Uuid, password_hash: &str) -> DaoResult<()> {
        let password_hash = password_hash.to_string();
        self.update(*id, move |active| {
            active.password_hash = Set(password_hash);
        })
        .await
        .map(|_| ())
    }

    pub async fn update_details(
        &self,
        id: &Uuid,
        full_name: Option<String>,
        email: Option<String>,
    ) -> DaoResult<account::Model> {
        self.update(*id, move |active| {
            if let Some(full_name) = full_name {
                active.full_name = Set(full_name);
            }
            if let Some(email) = email {
                active.email = Set(email);
            }
        })
        .await
    }

    pub async fn set_avatar_url(&self, id: &Uuid, url: &str) -> DaoResult<account::Model> {
        let url = url.to_string();
        self.update(*id, move |active| {
            active.avatar_url = Set(url);
        })
        .await
    }

    pub async fn set_cover_image_url(&self, id: &Uuid, url: &str) -> DaoResult<account::Model> {
        let url = url.to_string();
        self.update(*id, move |active| {
            active.cover_image_url = Set(Some(url));
        })
        .await
    }
}
