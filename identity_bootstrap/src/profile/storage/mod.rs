mod config;
mod postgres;
mod sqlite;
mod store_type;

// Re-export only the specific items needed for the public API
pub use store_type::{ProfileStore, SqlProfileStore};
