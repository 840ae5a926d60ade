use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::principal::models::PrincipalId;
use crate::domain::profile::errors::ProfileError;
use crate::domain::profile::models::Profile;
use crate::domain::profile::models::ProfileFields;
use crate::domain::profile::ports::ProfileRepository;

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    principal_id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    date_of_birth: Option<NaiveDate>,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            principal_id: PrincipalId(row.principal_id),
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            address: row.address,
            date_of_birth: row.date_of_birth,
            avatar_url: row.avatar_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_principal(
        &self,
        principal_id: PrincipalId,
    ) -> Result<Option<Profile>, ProfileError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT principal_id, first_name, last_name, phone, address,
                   date_of_birth, avatar_url, created_at, updated_at
            FROM profiles
            WHERE principal_id = $1
            "#,
        )
        .bind(principal_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProfileError::StoreUnavailable(e.to_string()))?;

        Ok(row.map(Profile::from))
    }

    async fn upsert(
        &self,
        principal_id: PrincipalId,
        fields: ProfileFields,
    ) -> Result<Profile, ProfileError> {
        let row: ProfileRow = sqlx::query_as(
            r#"
            INSERT INTO profiles
                (principal_id, first_name, last_name, phone, address, date_of_birth, avatar_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (principal_id) DO UPDATE SET
                first_name = COALESCE(EXCLUDED.first_name, profiles.first_name),
                last_name = COALESCE(EXCLUDED.last_name, profiles.last_name),
                phone = COALESCE(EXCLUDED.phone, profiles.phone),
                address = COALESCE(EXCLUDED.address, profiles.address),
                date_of_birth = COALESCE(EXCLUDED.date_of_birth, profiles.date_of_birth),
                avatar_url = COALESCE(EXCLUDED.avatar_url, profiles.avatar_url),
                updated_at = NOW()
            RETURNING principal_id, first_name, last_name, phone, address,
                      date_of_birth, avatar_url, created_at, updated_at
            "#,
        )
        .bind(principal_id.0)
        .bind(fields.first_name)
        .bind(fields.last_name)
        .bind(fields.phone)
        .bind(fields.address)
        .bind(fields.date_of_birth)
        .bind(fields.avatar_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return ProfileError::NotFound;
                }
            }
            ProfileError::StoreUnavailable(e.to_string())
        })?;

        Ok(row.into())
    }
}
