use uuid::Uuid;

use crate::{
    auth::password::{hash_password, verify_password},
    db::dao::{AccountDao, DaoBase, DaoLayerError},
    db::entities::account,
    error::AppError,
};

#[derive(Clone)]
pub struct AccountService {
    account_dao: AccountDao,
}

impl AccountService {
    pub fn new(account_dao: AccountDao) -> Self {
        Self { account_dao }
    }

    pub async fn find_by_id(&self, id: &Uuid) -> Result<Option<account::Model>, AppError> {
        match self.account_dao.find_by_id(*id).await {
            Ok(model) => Ok(Some(model)),
            Err(DaoLayerError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn find_by_handle(&self, handle: &str) -> Result<Option<account::Model>, AppError> {
        Ok(self.account_dao.find_by_handle(handle).await?)
    }

    pub async fn find_by_login(
        &self,
        email: Option<&str>,
        handle: Option<&str>,
    ) -> Result<Option<account::Model>, AppError> {
        Ok(self.account_dao.find_by_login(email, handle).await?)
    }

    /// Pre-registration gate: all text fields present and the handle/email
    /// pair not already taken. Runs before any media upload so a rejected
    /// registration never touches the media host.
    pub async fn ensure_registrable(
        &self,
        handle: &str,
        email: &str,
        full_name: &str,
        password: &str,
    ) -> Result<(), AppError> {
        if [handle, email, full_name, password]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(AppError::bad_request("All fields are required"));
        }

        let handle = handle.trim().to_lowercase();
        if self
            .account_dao
            .find_by_handle_or_email(&handle, email.trim())
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Account already exists"));
        }

        Ok(())
    }

    /// Persists the new account (handle case-folded, password hashed) and
    /// re-fetches it to confirm the write landed.
    pub async fn create_account(
        &self,
        handle: &str,
        email: &str,
        full_name: &str,
        password: &str,
        avatar_url: &str,
        cover_image_url: Option<&str>,
    ) -> Result<account::Model, AppError> {
        let password_hash = hash_password(password)?;
        let created = self
            .account_dao
            .create_account(
                &handle.trim().to_lowercase(),
                email.trim(),
                full_name.trim(),
                &password_hash,
                avatar_url,
                cover_image_url,
            )
            .await?;

        match self.account_dao.find_by_id(created.id).await {
            Ok(model) => Ok(model),
            Err(DaoLayerError::NotFound { .. }) => {
                Err(AppError::internal("Error while creating account"))
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn change_password(
        &self,
        id: &Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let account = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Account does not exist"))?;

        if !verify_password(old_password, &account.password_hash)? {
            return Err(AppError::bad_request("Incorrect old password"));
        }

        let password_hash = hash_password(new_password)?;
        Ok(self
            .account_dao
            .set_password_hash(id, &password_hash)
            .await?)
    }

    pub async fn update_details(
        &self,
        id: &Uuid,
        full_name: Option<String>,
        email: Option<String>,
    ) -> Result<account::Model, AppError> {
        let full_name = full_name.filter(|value| !value.trim().is_empty());
        let email = email.filter(|value| !value.trim().is_empty());
        if full_name.is_none() && email.is_none() {
            return Err(AppError::bad_request("Full name or email is required"));
        }

        Ok(self
            .account_dao
            .update_details(id, full_name, email)
            .await?)
    }

    pub async fn set_refresh_token(
        &self,
        id: &Uuid,
        token: Option<String>,
    ) -> Result<(), AppError> {
        Ok(self.account_dao.set_refresh_token(id, token).await?)
    }

    pub async fn set_avatar_url(&self, id: &Uuid, url: &str) -> Result<account::Model, AppError> {
        Ok(self.account_dao.set_avatar_url(id, url).await?)
    }

    pub async fn set_cover_image_url(
        &self,
        id: &Uuid,
        url: &str,
    ) -> Result<account::Model, AppError> {
        Ok(self.account_dao.set_cover_image_url(id, url).await?)
    }
}
