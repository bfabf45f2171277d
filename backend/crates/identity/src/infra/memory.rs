//! In-Memory Identity Store
//!
//! Same contract as the Postgres store, backed by a mutex-guarded map.
//! Every operation takes the lock once and never across an `.await`, so
//! each call is atomic. Used by tests and local runs without a database.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entity::{social_login::SocialLogin, user::User};
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::{
    email::Email,
    social_identity::ProviderIdentity,
    user_id::{SocialLoginId, UserId},
    user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct State {
    last_user_id: i64,
    last_login_id: i64,
    users: BTreeMap<i64, User>,
}

impl State {
    fn email_taken(&self, email: &Email) -> bool {
        self.users
            .values()
            .any(|u| u.email.as_ref() == Some(email))
    }

    fn owner_of(&self, identity: &ProviderIdentity) -> Option<&User> {
        self.users.values().find(|u| {
            u.social_logins
                .iter()
                .any(|s| s.provider == identity.provider && s.subject_id == identity.subject_id)
        })
    }

    fn insert(
        &mut self,
        email: Option<&Email>,
        password_hash: Option<&UserPassword>,
        role: UserRole,
    ) -> &mut User {
        self.last_user_id += 1;
        let id = self.last_user_id;
        self.users.entry(id).or_insert(User {
            user_id: UserId::from_i64(id),
            email: email.cloned(),
            password_hash: password_hash.cloned(),
            user_role: role,
            social_logins: Vec::new(),
        })
    }

    fn insert_credential_user(
        &mut self,
        email: &Email,
        password_hash: &UserPassword,
        role: UserRole,
    ) -> AuthResult<User> {
        if self.email_taken(email) {
            return Err(AuthError::UserExists);
        }
        Ok(self.insert(Some(email), Some(password_hash), role).clone())
    }
}

/// Mutex-backed identity store
#[derive(Default)]
pub struct MemoryIdentityStore {
    state: Mutex<State>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> AuthResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| AuthError::Internal("Identity store lock poisoned".to_string()))
    }

    /// Every stored user, ordered by ID
    pub fn users(&self) -> AuthResult<Vec<User>> {
        Ok(self.state()?.users.values().cloned().collect())
    }
}

impl IdentityStore for MemoryIdentityStore {
    async fn save_user(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User> {
        self.state()?
            .insert_credential_user(email, password_hash, UserRole::User)
    }

    async fn user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .state()?
            .users
            .values()
            .find(|u| u.email.as_ref() == Some(email))
            .cloned())
    }

    async fn user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        Ok(self.state()?.users.get(&user_id.get()).cloned())
    }

    async fn social_user_by_identity(
        &self,
        identity: &ProviderIdentity,
    ) -> AuthResult<Option<User>> {
        Ok(self.state()?.owner_of(identity).cloned())
    }

    async fn create_social_user(&self, identity: &ProviderIdentity) -> AuthResult<User> {
        let mut state = self.state()?;

        if let Some(existing) = state.owner_of(identity) {
            return Ok(existing.clone());
        }

        state.last_login_id += 1;
        let login_id = SocialLoginId::from_i64(state.last_login_id);

        let user = state.insert(None, None, UserRole::User);
        user.social_logins.push(SocialLogin {
            social_login_id: login_id,
            user_id: user.user_id,
            provider: identity.provider,
            subject_id: identity.subject_id.clone(),
        });

        Ok(user.clone())
    }

    async fn list_admins(&self) -> AuthResult<Vec<User>> {
        Ok(self
            .state()?
            .users
            .values()
            .filter(|u| u.user_role == UserRole::Admin)
            .cloned()
            .collect())
    }

    async fn save_admin(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User> {
        self.state()?
            .insert_credential_user(email, password_hash, UserRole::Admin)
    }

    async fn delete_admin(&self, user_id: UserId) -> AuthResult<bool> {
        let mut state = self.state()?;

        let is_admin = state
            .users
            .get(&user_id.get())
            .is_some_and(|u| u.user_role == UserRole::Admin);
        if is_admin {
            state.users.remove(&user_id.get());
        }

        Ok(is_admin)
    }

    async fn replace_superadmin(
        &self,
        email: &Email,
        password_hash: &UserPassword,
    ) -> AuthResult<User> {
        let mut state = self.state()?;

        // Check before touching anything so a conflict leaves no partial state
        let conflict = state
            .users
            .values()
            .any(|u| !u.user_role.is_super_admin() && u.email.as_ref() == Some(email));
        if conflict {
            return Err(AuthError::UserExists);
        }

        state.users.retain(|_, u| !u.user_role.is_super_admin());
        Ok(state
            .insert(Some(email), Some(password_hash), UserRole::SuperAdmin)
            .clone())
    }
}
