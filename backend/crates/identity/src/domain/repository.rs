//! Identity Store Contract
//!
//! What the core needs from persistence. Implementations live in the
//! infrastructure layer; the engine only ever sees this trait.

use crate::domain::entity::user::User;
use crate::domain::value_object::{
    email::Email, social_identity::ProviderIdentity, user_id::UserId,
    user_password::UserPassword,
};
use crate::error::AuthResult;

/// Identity store trait
///
/// Implementations must be safe for concurrent use from many in-flight
/// requests and must not hold locks across their own I/O.
#[trait_variant::make(IdentityStore: Send)]
pub trait LocalIdentityStore {
    /// Insert a credential-based user with role `user`
    ///
    /// An email uniqueness violation is reported as `AuthError::UserExists`.
    async fn save_user(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User>;

    /// Find a user by email
    async fn user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Find a user by ID, with linked social identities loaded
    async fn user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find the user owning an external identity
    async fn social_user_by_identity(&self, identity: &ProviderIdentity)
    -> AuthResult<Option<User>>;

    /// Create a user (no email, no hash, role `user`) together with its
    /// social login, as one atomic unit
    ///
    /// If a concurrent call linked the same identity first, the uniqueness
    /// violation on (provider, subject id) is swallowed and the user owning
    /// the existing link is returned instead. Callers never see the race.
    async fn create_social_user(&self, identity: &ProviderIdentity) -> AuthResult<User>;

    /// All users with role `admin`
    async fn list_admins(&self) -> AuthResult<Vec<User>>;

    /// Insert a user with role `admin`; same uniqueness rules as `save_user`
    async fn save_admin(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User>;

    /// Delete an admin by ID. Returns whether a row was removed;
    /// a missing ID is not an error.
    async fn delete_admin(&self, user_id: UserId) -> AuthResult<bool>;

    /// Delete every superadmin row, then insert exactly one new superadmin,
    /// all or nothing
    async fn replace_superadmin(
        &self,
        email: &Email,
        password_hash: &UserPassword,
    ) -> AuthResult<User>;
}
