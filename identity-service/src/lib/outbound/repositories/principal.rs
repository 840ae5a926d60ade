use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::principal::models::IdentityKey;
use crate::domain::principal::models::NewPrincipal;
use crate::domain::principal::models::Principal;
use crate::domain::principal::models::PrincipalId;
use crate::domain::principal::models::Role;
use crate::domain::principal::ports::PrincipalRepository;
use crate::principal::errors::CredentialError;

const EMAIL_UNIQUE_CONSTRAINT: &str = "principals_email_key";

pub struct PostgresPrincipalRepository {
    pool: PgPool,
}

impl PostgresPrincipalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PrincipalRow {
    id: i64,
    email: String,
    password_hash: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PrincipalRow> for Principal {
    type Error = CredentialError;

    fn try_from(row: PrincipalRow) -> Result<Self, Self::Error> {
        let email = IdentityKey::new(&row.email).map_err(|e| {
            CredentialError::Internal(format!("Stored email of principal {} is invalid: {}", row.id, e))
        })?;
        let role = row.role.parse::<Role>().map_err(|e| {
            CredentialError::Internal(format!("Stored role of principal {} is invalid: {}", row.id, e))
        })?;

        Ok(Principal {
            id: PrincipalId(row.id),
            email,
            password_hash: row.password_hash,
            role,
            created_at: row.created_at,
        })
    }
}

fn store_error(e: sqlx::Error) -> CredentialError {
    CredentialError::StoreUnavailable(e.to_string())
}

#[async_trait]
impl PrincipalRepository for PostgresPrincipalRepository {
    async fn create(&self, principal: NewPrincipal) -> Result<Principal, CredentialError> {
        let mut tx = self.pool.begin().await.map_err(store_error)?;

        let row: PrincipalRow = sqlx::query_as(
            r#"
            INSERT INTO principals (email, password_hash, role)
            VALUES ($1, $2, $3)
            RETURNING id, email, password_hash, role, created_at
            "#,
        )
        .bind(principal.email.as_str())
        .bind(&principal.password_hash)
        .bind(principal.role.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return CredentialError::DuplicateIdentity;
                }
            }
            store_error(e)
        })?;

        let profile = principal.profile;
        sqlx::query(
            r#"
            INSERT INTO profiles
                (principal_id, first_name, last_name, phone, address, date_of_birth, avatar_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(row.id)
        .bind(profile.first_name)
        .bind(profile.last_name)
        .bind(profile.phone)
        .bind(profile.address)
        .bind(profile.date_of_birth)
        .bind(profile.avatar_url)
        .execute(&mut *tx)
        .await
        .map_err(store_error)?;

        tx.commit().await.map_err(store_error)?;

        row.try_into()
    }

    async fn find_by_email(
        &self,
        email: &IdentityKey,
    ) -> Result<Option<Principal>, CredentialError> {
        let row: Option<PrincipalRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM principals
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(Principal::try_from).transpose()
    }

    async fn find_by_id(&self, id: PrincipalId) -> Result<Option<Principal>, CredentialError> {
        let row: Option<PrincipalRow> = sqlx::query_as(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM principals
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        row.map(Principal::try_from).transpose()
    }
}
