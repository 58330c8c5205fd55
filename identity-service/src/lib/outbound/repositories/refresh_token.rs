use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::identity::errors::AuthError;
use crate::identity::models::EmailAddress;
use crate::identity::models::RefreshTokenRecord;
use crate::identity::models::User;
use crate::identity::models::UserId;
use crate::identity::ports::RefreshTokenRepository;

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    id: Uuid,
    token: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    revoked: bool,
    created_at: DateTime<Utc>,
}

impl From<RefreshTokenRow> for RefreshTokenRecord {
    fn from(row: RefreshTokenRow) -> Self {
        RefreshTokenRecord {
            id: row.id,
            token: row.token,
            user_id: UserId(row.user_id),
            expires_at: row.expires_at,
            revoked: row.revoked,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenWithUserRow {
    id: Uuid,
    token: String,
    user_id: Uuid,
    expires_at: DateTime<Utc>,
    revoked: bool,
    created_at: DateTime<Utc>,
    user_email: String,
    user_name: String,
    user_password_hash: String,
    user_created_at: DateTime<Utc>,
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, token, user_id, expires_at, revoked, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(&record.token)
        .bind(record.user_id.0)
        .bind(record.expires_at)
        .bind(record.revoked)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_with_user(
        &self,
        token: &str,
    ) -> Result<Option<(RefreshTokenRecord, User)>, AuthError> {
        let row = sqlx::query_as::<_, RefreshTokenWithUserRow>(
            r#"
            SELECT rt.id, rt.token, rt.user_id, rt.expires_at, rt.revoked, rt.created_at,
                   u.email AS user_email,
                   u.name AS user_name,
                   u.password_hash AS user_password_hash,
                   u.created_at AS user_created_at
            FROM refresh_tokens rt
            JOIN users u ON u.id = rt.user_id
            WHERE rt.token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        match row {
            Some(r) => {
                let user = User {
                    id: UserId(r.user_id),
                    email: EmailAddress::new(r.user_email)?,
                    name: r.user_name,
                    password_hash: r.user_password_hash,
                    created_at: r.user_created_at,
                };
                let record = RefreshTokenRecord {
                    id: r.id,
                    token: r.token,
                    user_id: user.id,
                    expires_at: r.expires_at,
                    revoked: r.revoked,
                    created_at: r.created_at,
                };
                Ok(Some((record, user)))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, AuthError> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            DELETE FROM refresh_tokens
            WHERE id = $1
            RETURNING id, token, user_id, expires_at, revoked, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(row.map(RefreshTokenRecord::from))
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> Result<(), AuthError> {
        sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE user_id = $1 AND revoked = FALSE
            "#,
        )
        .bind(user_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
