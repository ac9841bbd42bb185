use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::credential::errors::CredentialError;
use crate::credential::models::Credential;
use crate::credential::models::CredentialId;
use crate::credential::models::CredentialName;
use crate::credential::models::EmailAddress;
use crate::credential::models::NewCredential;
use crate::credential::ports::CredentialRepository;

pub struct PostgresCredentialRepository {
    pool: PgPool,
}

impl PostgresCredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CredentialRow {
    id: i64,
    name: String,
    email: String,
    encrypted_password: String,
    enabled: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CredentialRow> for Credential {
    type Error = CredentialError;

    fn try_from(r: CredentialRow) -> Result<Self, Self::Error> {
        Ok(Credential {
            id: CredentialId(r.id),
            name: CredentialName::new(r.name)?,
            email: EmailAddress::new(r.email)?,
            password_digest: r.encrypted_password,
            enabled: r.enabled,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[async_trait]
impl CredentialRepository for PostgresCredentialRepository {
    async fn find_enabled_by_id(
        &self,
        id: &CredentialId,
    ) -> Result<Option<Credential>, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, name, email, encrypted_password, enabled, created_at, updated_at
            FROM users
            WHERE id = $1 AND enabled = TRUE
            LIMIT 1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn find_enabled_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, name, email, encrypted_password, enabled, created_at, updated_at
            FROM users
            WHERE email = $1 AND enabled = TRUE
            LIMIT 1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::DatabaseError(e.to_string()))?;

        row.map(Credential::try_from).transpose()
    }

    async fn insert(&self, credential: NewCredential) -> Result<Credential, CredentialError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            INSERT INTO users (name, email, encrypted_password, enabled, created_at, updated_at)
            VALUES ($1, $2, $3, TRUE, $4, $4)
            RETURNING id, name, email, encrypted_password, enabled, created_at, updated_at
            "#,
        )
        .bind(credential.name.as_str())
        .bind(credential.email.as_str())
        .bind(&credential.password_digest)
        .bind(credential.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("users_email_key") {
                    return CredentialError::EmailAlreadyExists(
                        credential.email.as_str().to_string(),
                    );
                }
            }
            CredentialError::DatabaseError(e.to_string())
        })?;

        Credential::try_from(row)
    }
}
