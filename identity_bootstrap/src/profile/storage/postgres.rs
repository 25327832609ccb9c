use sqlx::{Pool, Postgres};

use crate::profile::errors::ProfileError;
use crate::profile::types::{LocalProfile, ProfilePatch};

use super::config::DB_TABLE_PROFILES;

// PostgreSQL implementations
pub(super) async fn create_tables_postgres(pool: &Pool<Postgres>) -> Result<(), ProfileError> {
    let table_name = DB_TABLE_PROFILES.as_str();

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table_name} (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL,
            first_name TEXT,
            last_name TEXT,
            bio TEXT,
            phone TEXT,
            job_title TEXT,
            company TEXT,
            location TEXT,
            timezone TEXT,
            website TEXT,
            twitter TEXT,
            linkedin TEXT,
            github TEXT,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| ProfileError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_profile_postgres(
    pool: &Pool<Postgres>,
    id: &str,
) -> Result<Option<LocalProfile>, ProfileError> {
    let table_name = DB_TABLE_PROFILES.as_str();

    sqlx::query_as::<_, LocalProfile>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| ProfileError::Storage(e.to_string()))
}

pub(super) async fn upsert_profile_postgres(
    pool: &Pool<Postgres>,
    profile: LocalProfile,
) -> Result<LocalProfile, ProfileError> {
    let table_name = DB_TABLE_PROFILES.as_str();
    let now = chrono::Utc::now();

    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (
            id, email, first_name, last_name, bio, phone, job_title, company,
            location, timezone, website, twitter, linkedin, github,
            created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
        ON CONFLICT (id) DO UPDATE SET
            email = EXCLUDED.email,
            first_name = EXCLUDED.first_name,
            last_name = EXCLUDED.last_name,
            bio = EXCLUDED.bio,
            phone = EXCLUDED.phone,
            job_title = EXCLUDED.job_title,
            company = EXCLUDED.company,
            location = EXCLUDED.location,
            timezone = EXCLUDED.timezone,
            website = EXCLUDED.website,
            twitter = EXCLUDED.twitter,
            linkedin = EXCLUDED.linkedin,
            github = EXCLUDED.github,
            updated_at = EXCLUDED.updated_at
        "#
    ))
    .bind(&profile.id)
    .bind(&profile.email)
    .bind(&profile.first_name)
    .bind(&profile.last_name)
    .bind(&profile.bio)
    .bind(&profile.phone)
    .bind(&profile.job_title)
    .bind(&profile.company)
    .bind(&profile.location)
    .bind(&profile.timezone)
    .bind(&profile.website)
    .bind(&profile.twitter)
    .bind(&profile.linkedin)
    .bind(&profile.github)
    .bind(profile.created_at)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| ProfileError::Storage(e.to_string()))?;

    get_profile_postgres(pool, &profile.id)
        .await?
        .ok_or_else(|| ProfileError::NotFound(profile.id.clone()))
}

pub(super) async fn patch_profile_postgres(
    pool: &Pool<Postgres>,
    id: &str,
    patch: &ProfilePatch,
) -> Result<LocalProfile, ProfileError> {
    let table_name = DB_TABLE_PROFILES.as_str();

    // Fill-only: absent patch fields keep the stored value
    sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET
            first_name = COALESCE($1, first_name),
            last_name = COALESCE($2, last_name),
            updated_at = $3
        WHERE id = $4
        "#
    ))
    .bind(&patch.first_name)
    .bind(&patch.last_name)
    .bind(patch.updated_at)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| ProfileError::Storage(e.to_string()))?;

    get_profile_postgres(pool, id)
        .await?
        .ok_or_else(|| ProfileError::NotFound(id.to_string()))
}
