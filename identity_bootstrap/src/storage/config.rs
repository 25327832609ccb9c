//! Profile data store connection configuration

use std::{env, str::FromStr, sync::LazyLock};
use tokio::sync::Mutex;

use super::types::{DataStore, PostgresDataStore, SqliteDataStore};

// Configuration
static PROFILE_STORE_TYPE: LazyLock<String> =
    LazyLock::new(|| env::var("PROFILE_STORE_TYPE").expect("PROFILE_STORE_TYPE must be set"));

static PROFILE_STORE_URL: LazyLock<String> =
    LazyLock::new(|| env::var("PROFILE_STORE_URL").expect("PROFILE_STORE_URL must be set"));

pub(crate) static PROFILE_DATA_STORE: LazyLock<Mutex<Box<dyn DataStore>>> = LazyLock::new(|| {
    let store_type = PROFILE_STORE_TYPE.as_str();
    let store_url = PROFILE_STORE_URL.as_str();

    tracing::info!(
        "Initializing profile data store with type: {}, url: {}",
        store_type,
        store_url
    );

    let store = match store_type {
        "sqlite" => {
            let opts = sqlx::sqlite::SqliteConnectOptions::from_str(store_url)
                .expect("Failed to parse SQLite connection string")
                .create_if_missing(true);

            Box::new(SqliteDataStore {
                pool: sqlx::sqlite::SqlitePool::connect_lazy_with(opts),
            }) as Box<dyn DataStore>
        }
        "postgres" => Box::new(PostgresDataStore {
            pool: sqlx::PgPool::connect_lazy(store_url).expect("Failed to create Postgres pool"),
        }) as Box<dyn DataStore>,
        t => panic!("Unsupported store type: {t}. Supported types are 'sqlite' and 'postgres'"),
    };

    Mutex::new(store)
});

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn test_env_var_parsing() {
        // Only the env parsing is exercised here; initializing the LazyLock
        // would pin the store type for the whole test process.
        unsafe {
            env::set_var("PROFILE_STORE_TYPE", "sqlite");
            env::set_var("PROFILE_STORE_URL", "sqlite::memory:");
        }

        let store_type = env::var("PROFILE_STORE_TYPE").unwrap();
        let store_url = env::var("PROFILE_STORE_URL").unwrap();

        assert_eq!(store_type, "sqlite");
        assert_eq!(store_url, "sqlite::memory:");
    }

    #[test]
    #[serial]
    fn test_unsupported_store_type_is_rejected() {
        let store_type = "mysql";
        let supported = matches!(store_type, "sqlite" | "postgres");
        assert!(!supported);
    }
}
