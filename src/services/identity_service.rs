use std::sync::Arc;

use crate::errors::internal::{AccessError, AuthError};
use crate::errors::InternalError;
use crate::services::TokenService;
use crate::stores::UserStore;
use crate::types::db::{role, user};
use crate::types::internal::Identity;

/// Resolves an opaque session token to a user identity.
///
/// Token validation happens first, then the account-state check; a valid
/// token for a deactivated account yields AccountDeactivated, not a generic
/// failure. Pure read: nothing is written here.
pub struct IdentityService {
    user_store: Arc<UserStore>,
    token_service: Arc<TokenService>,
}

impl IdentityService {
    pub fn new(user_store: Arc<UserStore>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_store,
            token_service,
        }
    }

    pub async fn resolve(&self, token: &str) -> Result<Identity, InternalError> {
        let claims = self.token_service.validate(token)?;

        let user = self
            .user_store
            .find_by_id(&claims.sub)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        if !user.is_active {
            return Err(AuthError::AccountDeactivated.into());
        }

        Ok(Identity {
            user_id: user.id,
            username: user.username,
            is_active: user.is_active,
            is_admin: user.is_admin,
            is_web_admin: user.is_web_admin,
            role_id: user.role_id,
        })
    }

    /// Resolve and additionally require the site-level web-admin flag
    pub async fn resolve_web_admin(&self, token: &str) -> Result<Identity, InternalError> {
        let identity = self.resolve(token).await?;
        if !identity.is_web_admin {
            return Err(AccessError::InsufficientRole.into());
        }
        Ok(identity)
    }

    /// The roles row behind a user's site tier, if one exists
    pub async fn site_role_of(
        &self,
        user: &user::Model,
    ) -> Result<Option<role::Model>, InternalError> {
        self.user_store.find_site_role(user.role_id).await
    }

    /// Require the identity's site role tier to meet a minimum permission
    /// level. Users whose role_id resolves to no roles row are denied.
    pub async fn require_minimum_tier(
        &self,
        identity: &Identity,
        minimum: i32,
    ) -> Result<(), InternalError> {
        let role = self.user_store.find_site_role(identity.role_id).await?;
        match role {
            Some(role) if role.permissions_id >= minimum => Ok(()),
            _ => Err(AccessError::InsufficientSiteTier.into()),
        }
    }
}
