use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::errors::internal::{AuthError, LookupError};
use crate::errors::InternalError;
use crate::stores::group_store;
use crate::types::db::{group, group_member, group_member_role, role, user};

/// Fields a site admin may change on a user row. `premium_ends_at` is
/// double-optional: the outer layer means "change it", the inner layer is
/// the stored value.
#[derive(Debug, Default, Clone)]
pub struct AdminUserUpdate {
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
    pub is_web_admin: Option<bool>,
    pub is_premium: Option<bool>,
    pub premium_ends_at: Option<Option<i64>>,
    pub role_id: Option<i32>,
    pub notes: Option<String>,
}

/// UserStore manages user accounts and credentials in the database
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Add a new user with an argon2-hashed password
    ///
    /// # Errors
    /// `AuthError::Duplicate` if the username or email is taken
    pub async fn add_user(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<user::Model, InternalError> {
        let existing = user::Entity::find()
            .filter(
                user::Column::Username
                    .eq(&username)
                    .or(user::Column::Email.eq(&email)),
            )
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("add_user", e))?;

        if existing.is_some() {
            return Err(AuthError::Duplicate(username).into());
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHashingFailed(e.to_string()))?
            .to_string();

        let now = Utc::now().timestamp();
        let new_user = user::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            username: Set(username.clone()),
            email: Set(email),
            password_hash: Set(password_hash),
            is_active: Set(true),
            is_admin: Set(false),
            is_web_admin: Set(false),
            is_premium: Set(false),
            premium_ends_at: Set(None),
            role_id: Set(0),
            date_created: Set(now),
            last_login: Set(now),
            notes: Set(String::new()),
        };

        new_user.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::Duplicate(username).into()
            } else {
                InternalError::database("add_user", e)
            }
        })
    }

    /// Verify username/password and return the user row on success
    ///
    /// Any failure (unknown user, wrong password, malformed hash) collapses
    /// to InvalidCredentials; callers must not learn which part failed.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<user::Model, InternalError> {
        let user = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("verify_credentials", e))?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed_hash =
            PasswordHash::new(&user.password_hash).map_err(|_| AuthError::InvalidCredentials)?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        Ok(user)
    }

    /// Change a user's password after verifying the current one
    pub async fn change_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), InternalError> {
        let user = self.get_by_id(user_id).await?;

        let parsed_hash =
            PasswordHash::new(&user.password_hash).map_err(|_| AuthError::InvalidCredentials)?;
        Argon2::default()
            .verify_password(current_password.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)?;

        let salt = SaltString::generate(&mut OsRng);
        let new_hash = Argon2::default()
            .hash_password(new_password.as_bytes(), &salt)
            .map_err(|e| AuthError::PasswordHashingFailed(e.to_string()))?
            .to_string();

        let mut active: user::ActiveModel = user.into();
        active.password_hash = Set(new_hash);
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("change_password", e))?;
        Ok(())
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find_by_id(user_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_id", e))
    }

    pub async fn get_by_id(&self, user_id: &str) -> Result<user::Model, InternalError> {
        self.find_by_id(user_id)
            .await?
            .ok_or_else(|| LookupError::User(user_id.to_string()).into())
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<user::Model>, InternalError> {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_by_username", e))
    }

    pub async fn get_by_username(&self, username: &str) -> Result<user::Model, InternalError> {
        self.find_by_username(username)
            .await?
            .ok_or_else(|| LookupError::User(username.to_string()).into())
    }

    pub async fn touch_last_login(&self, user_id: &str) -> Result<(), InternalError> {
        let user = self.get_by_id(user_id).await?;
        let mut active: user::ActiveModel = user.into();
        active.last_login = Set(Utc::now().timestamp());
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("touch_last_login", e))?;
        Ok(())
    }

    /// Persist the lazy premium demotion: is_premium=false, expiry cleared
    pub async fn clear_premium(&self, user_id: &str) -> Result<(), InternalError> {
        let user = self.get_by_id(user_id).await?;
        let mut active: user::ActiveModel = user.into();
        active.is_premium = Set(false);
        active.premium_ends_at = Set(None);
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("clear_premium", e))?;
        Ok(())
    }

    pub async fn set_premium(
        &self,
        user_id: &str,
        ends_at: Option<i64>,
    ) -> Result<user::Model, InternalError> {
        let user = self.get_by_id(user_id).await?;
        let mut active: user::ActiveModel = user.into();
        active.is_premium = Set(true);
        active.premium_ends_at = Set(ends_at);
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_premium", e))
    }

    pub async fn set_site_admin(&self, user_id: &str) -> Result<user::Model, InternalError> {
        let user = self.get_by_id(user_id).await?;
        let mut active: user::ActiveModel = user.into();
        active.is_admin = Set(true);
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_site_admin", e))
    }

    pub async fn set_site_role(
        &self,
        user_id: &str,
        role_id: i32,
    ) -> Result<user::Model, InternalError> {
        let user = self.get_by_id(user_id).await?;
        let mut active: user::ActiveModel = user.into();
        active.role_id = Set(role_id);
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("set_site_role", e))
    }

    /// Update the caller's own username/email
    pub async fn update_profile(
        &self,
        user_id: &str,
        username: Option<String>,
        email: Option<String>,
    ) -> Result<user::Model, InternalError> {
        let user = self.get_by_id(user_id).await?;
        let mut active: user::ActiveModel = user.into();
        if let Some(username) = username {
            active.username = Set(username);
        }
        if let Some(email) = email {
            active.email = Set(email);
        }
        active.update(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::Duplicate("username or email".to_string()).into()
            } else {
                InternalError::database("update_profile", e)
            }
        })
    }

    /// Apply a site-admin update. Self-protection rules are enforced by the
    /// admin service before this is called.
    pub async fn apply_admin_update(
        &self,
        user_id: &str,
        update: AdminUserUpdate,
    ) -> Result<user::Model, InternalError> {
        let user = self.get_by_id(user_id).await?;
        let mut active: user::ActiveModel = user.into();
        if let Some(v) = update.is_active {
            active.is_active = Set(v);
        }
        if let Some(v) = update.is_admin {
            active.is_admin = Set(v);
        }
        if let Some(v) = update.is_web_admin {
            active.is_web_admin = Set(v);
        }
        if let Some(v) = update.is_premium {
            active.is_premium = Set(v);
        }
        if let Some(v) = update.premium_ends_at {
            active.premium_ends_at = Set(v);
        }
        if let Some(v) = update.role_id {
            active.role_id = Set(v);
        }
        if let Some(v) = update.notes {
            active.notes = Set(v);
        }
        active
            .update(&self.db)
            .await
            .map_err(|e| InternalError::database("apply_admin_update", e))
    }

    /// All users with their site-role rows, for the admin listing
    pub async fn list_with_roles(
        &self,
    ) -> Result<Vec<(user::Model, Option<role::Model>)>, InternalError> {
        user::Entity::find()
            .find_also_related(role::Entity)
            .all(&self.db)
            .await
            .map_err(|e| InternalError::database("list_with_roles", e))
    }

    pub async fn find_site_role(
        &self,
        role_id: i32,
    ) -> Result<Option<role::Model>, InternalError> {
        role::Entity::find_by_id(role_id)
            .one(&self.db)
            .await
            .map_err(|e| InternalError::database("find_site_role", e))
    }

    /// Delete a user and everything hanging off them: explicit role rows,
    /// memberships, groups they own (full cascade each), then the user row.
    pub async fn delete_user_cascade(&self, user_id: &str) -> Result<(), InternalError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| InternalError::transaction("delete_user_cascade", e))?;

        group_member_role::Entity::delete_many()
            .filter(group_member_role::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user_cascade", e))?;

        group_member::Entity::delete_many()
            .filter(group_member::Column::UserId.eq(user_id))
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user_cascade", e))?;

        let owned = group::Entity::find()
            .filter(group::Column::OwnerId.eq(user_id))
            .all(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user_cascade", e))?;

        for group in owned {
            group_store::cascade_delete_group(&txn, &group.id).await?;
        }

        user::Entity::delete_by_id(user_id.to_string())
            .exec(&txn)
            .await
            .map_err(|e| InternalError::database("delete_user_cascade", e))?;

        txn.commit()
            .await
            .map_err(|e| InternalError::transaction("delete_user_cascade", e))?;
        Ok(())
    }
}
