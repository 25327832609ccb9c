//! Shared test initialization
//!
//! Points the profile data store at a process-shared in-memory SQLite
//! database before the connection LazyLock is first touched. The storage
//! functions create tables at the point of use, so no further setup is
//! needed here.

use std::sync::Once;

pub fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        // cache=shared keeps one in-memory database across pool connections
        unsafe {
            std::env::set_var("PROFILE_STORE_TYPE", "sqlite");
            std::env::set_var(
                "PROFILE_STORE_URL",
                "sqlite:file:identity_bootstrap_test?mode=memory&cache=shared",
            );
        }
    });
}
