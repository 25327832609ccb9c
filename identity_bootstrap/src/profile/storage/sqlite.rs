use sqlx::{Pool, Sqlite};

use crate::profile::errors::ProfileError;
use crate::profile::types::{LocalProfile, ProfilePatch};

use super::config::DB_TABLE_PROFILES;

// SQLite implementations
pub(super) async fn create_tables_sqlite(pool: &Pool<Sqlite>) -> Result<(), ProfileError> {
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
            created_at TIMESTAMP NOT NULL,
            updated_at TIMESTAMP NOT NULL
        )
        "#
    ))
    .execute(pool)
    .await
    .map_err(|e| ProfileError::Storage(e.to_string()))?;

    Ok(())
}

pub(super) async fn get_profile_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
) -> Result<Option<LocalProfile>, ProfileError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_PROFILES.as_str();

    sqlx::query_as::<_, LocalProfile>(&format!(
        r#"
        SELECT * FROM {table_name} WHERE id = ?
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(|e| ProfileError::Storage(e.to_string()))
}

pub(super) async fn upsert_profile_sqlite(
    pool: &Pool<Sqlite>,
    profile: LocalProfile,
) -> Result<LocalProfile, ProfileError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_PROFILES.as_str();
    let now = chrono::Utc::now();

    // Upsert keyed on the immutable identity id; created_at is preserved on
    // conflict so concurrent first logins converge on one row.
    sqlx::query(&format!(
        r#"
        INSERT INTO {table_name} (
            id, email, first_name, last_name, bio, phone, job_title, company,
            location, timezone, website, twitter, linkedin, github,
            created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (id) DO UPDATE SET
            email = excluded.email,
            first_name = excluded.first_name,
            last_name = excluded.last_name,
            bio = excluded.bio,
            phone = excluded.phone,
            job_title = excluded.job_title,
            company = excluded.company,
            location = excluded.location,
            timezone = excluded.timezone,
            website = excluded.website,
            twitter = excluded.twitter,
            linkedin = excluded.linkedin,
            github = excluded.github,
            updated_at = excluded.updated_at
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

    get_profile_sqlite(pool, &profile.id)
        .await?
        .ok_or_else(|| ProfileError::NotFound(profile.id.clone()))
}

pub(super) async fn patch_profile_sqlite(
    pool: &Pool<Sqlite>,
    id: &str,
    patch: &ProfilePatch,
) -> Result<LocalProfile, ProfileError> {
    // Ensure tables exist before any operations - this is critical for in-memory databases
    create_tables_sqlite(pool).await?;

    let table_name = DB_TABLE_PROFILES.as_str();

    // Fill-only: absent patch fields keep the stored value
    sqlx::query(&format!(
        r#"
        UPDATE {table_name} SET
            first_name = COALESCE(?, first_name),
            last_name = COALESCE(?, last_name),
            updated_at = ?
        WHERE id = ?
        "#
    ))
    .bind(&patch.first_name)
    .bind(&patch.last_name)
    .bind(patch.updated_at)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| ProfileError::Storage(e.to_string()))?;

    get_profile_sqlite(pool, id)
        .await?
        .ok_or_else(|| ProfileError::NotFound(id.to_string()))
}
