//! Command handlers.

use workpay_core::config::{Config, paths};
use workpay_core::session::{FileSessionStore, SessionRepository};

pub mod auth;
pub mod config;
pub mod profile;
pub mod role;
pub mod status;

/// Builds the session repository every command works against.
pub(crate) fn repository(config: &Config) -> SessionRepository<FileSessionStore> {
    SessionRepository::new(
        FileSessionStore::new(paths::session_path()),
        config.reference_id.clone(),
    )
}
