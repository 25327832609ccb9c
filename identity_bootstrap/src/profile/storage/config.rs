//! Profile table configuration

use std::{env, sync::LazyLock};

/// Table name for profile rows, overridable via `PROFILE_TABLE_NAME`
pub(crate) static DB_TABLE_PROFILES: LazyLock<String> =
    LazyLock::new(|| env::var("PROFILE_TABLE_NAME").unwrap_or_else(|_| "user_profiles".to_string()));
