//! PostgreSQL Identity Store

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::entity::{social_login::SocialLogin, user::User};
use crate::domain::repository::IdentityStore;
use crate::domain::value_object::{
    email::Email,
    social_identity::{ProviderIdentity, SocialProvider},
    user_id::{SocialLoginId, UserId},
    user_password::UserPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed identity store
#[derive(Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_user(
        tx: &mut Transaction<'_, Postgres>,
        email: Option<&Email>,
        password_hash: Option<&UserPassword>,
        role: UserRole,
    ) -> AuthResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, pass_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, pass_hash, role
            "#,
        )
        .bind(email.map(|e| e.as_str()))
        .bind(password_hash.map(|p| p.as_str()))
        .bind(role.code())
        .fetch_one(&mut **tx)
        .await?;

        Ok(row)
    }

    /// Insert a credential user in its own transaction
    async fn save_credential_user(
        &self,
        email: &Email,
        password_hash: &UserPassword,
        role: UserRole,
    ) -> AuthResult<User> {
        let mut tx = self.pool.begin().await?;
        let row = Self::insert_user(&mut tx, Some(email), Some(password_hash), role)
            .await
            .map_err(email_conflict)?;
        tx.commit().await?;

        row.into_user(Vec::new())
    }

    async fn insert_social_user(&self, identity: &ProviderIdentity) -> AuthResult<User> {
        let mut tx = self.pool.begin().await?;

        let user = Self::insert_user(&mut tx, None, None, UserRole::User).await?;
        let login = sqlx::query_as::<_, SocialLoginRow>(
            r#"
            INSERT INTO social_logins (user_id, provider, subject_id)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, provider, subject_id
            "#,
        )
        .bind(user.id)
        .bind(identity.provider.code())
        .bind(&identity.subject_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        user.into_user(vec![login.into_social_login()?])
    }

    /// Attach social logins to loaded user rows, preserving row order
    async fn hydrate(&self, rows: Vec<UserRow>) -> AuthResult<Vec<User>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        let login_rows = sqlx::query_as::<_, SocialLoginRow>(
            r#"
            SELECT id, user_id, provider, subject_id
            FROM social_logins
            WHERE user_id = ANY($1)
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_user: HashMap<i64, Vec<SocialLogin>> = HashMap::new();
        for row in login_rows {
            by_user
                .entry(row.user_id)
                .or_default()
                .push(row.into_social_login()?);
        }

        rows.into_iter()
            .map(|row| {
                let logins = by_user.remove(&row.id).unwrap_or_default();
                row.into_user(logins)
            })
            .collect()
    }

    async fn hydrate_one(&self, row: Option<UserRow>) -> AuthResult<Option<User>> {
        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }
}

impl IdentityStore for PgIdentityStore {
    async fn save_user(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User> {
        self.save_credential_user(email, password_hash, UserRole::User)
            .await
    }

    async fn user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, role
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        self.hydrate_one(row).await
    }

    async fn user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        self.hydrate_one(row).await
    }

    async fn social_user_by_identity(
        &self,
        identity: &ProviderIdentity,
    ) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.email, u.pass_hash, u.role
            FROM users u
            JOIN social_logins s ON s.user_id = u.id
            WHERE s.provider = $1 AND s.subject_id = $2
            "#,
        )
        .bind(identity.provider.code())
        .bind(&identity.subject_id)
        .fetch_optional(&self.pool)
        .await?;

        self.hydrate_one(row).await
    }

    async fn create_social_user(&self, identity: &ProviderIdentity) -> AuthResult<User> {
        match self.insert_social_user(identity).await {
            Ok(user) => Ok(user),
            // Lost the race: the other transaction committed the link first
            Err(AuthError::Database(e)) if is_unique_violation(&e) => {
                tracing::debug!(identity = %identity, "Social identity linked concurrently");
                self.social_user_by_identity(identity).await?.ok_or_else(|| {
                    AuthError::Internal(format!("Link for {identity} vanished after conflict"))
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn list_admins(&self) -> AuthResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, pass_hash, role
            FROM users
            WHERE role = $1
            ORDER BY id
            "#,
        )
        .bind(UserRole::Admin.code())
        .fetch_all(&self.pool)
        .await?;

        self.hydrate(rows).await
    }

    async fn save_admin(&self, email: &Email, password_hash: &UserPassword) -> AuthResult<User> {
        self.save_credential_user(email, password_hash, UserRole::Admin)
            .await
    }

    async fn delete_admin(&self, user_id: UserId) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1 AND role = $2")
            .bind(user_id.get())
            .bind(UserRole::Admin.code())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn replace_superadmin(
        &self,
        email: &Email,
        password_hash: &UserPassword,
    ) -> AuthResult<User> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM users WHERE role = $1")
            .bind(UserRole::SuperAdmin.code())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let row = Self::insert_user(&mut tx, Some(email), Some(password_hash), UserRole::SuperAdmin)
            .await
            .map_err(email_conflict)?;

        tx.commit().await?;

        tracing::debug!(removed, "Previous superadmin rows deleted");

        row.into_user(Vec::new())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Unique violations on a `users` insert mean the email is taken
fn email_conflict(err: AuthError) -> AuthError {
    match err {
        AuthError::Database(e) if is_unique_violation(&e) => AuthError::UserExists,
        other => other,
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: Option<String>,
    pass_hash: Option<String>,
    role: String,
}

impl UserRow {
    fn into_user(self, social_logins: Vec<SocialLogin>) -> AuthResult<User> {
        let user_role = self
            .role
            .parse::<UserRole>()
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_i64(self.id),
            email: self.email.map(Email::from_db),
            password_hash: self.pass_hash.map(UserPassword::from_db),
            user_role,
            social_logins,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SocialLoginRow {
    id: i64,
    user_id: i64,
    provider: String,
    subject_id: String,
}

impl SocialLoginRow {
    fn into_social_login(self) -> AuthResult<SocialLogin> {
        let provider = self
            .provider
            .parse::<SocialProvider>()
            .map_err(AuthError::Internal)?;

        Ok(SocialLogin {
            social_login_id: SocialLoginId::from_i64(self.id),
            user_id: UserId::from_i64(self.user_id),
            provider,
            subject_id: self.subject_id,
        })
    }
}
