//! Session persistence: the key-value store contract and the repository
//! that owns the durable representation of "is a user logged in".
//!
//! Storage is a flat string-keyed map surviving restarts. The repository is
//! injected wherever session state is needed; nothing reads storage
//! ambiently.

mod file;
mod memory;

use std::fmt;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
use workpay_types::Route;

/// Keys used in the session store.
pub mod keys {
    /// The session token as issued by the auth provider.
    pub const PROXY_AUTH_TOKEN: &str = "proxy_auth_token";
    /// Duplicate of the token for backward-compatible readers.
    pub const AUTH_TOKEN: &str = "auth_token";
    /// The user's email, when the provider reported one.
    pub const USER_EMAIL: &str = "user_email";
    /// The configured correlation reference id.
    pub const REFERENCE_ID: &str = "referenceId";
    /// Stale pre-login state, removed on every plain-token login.
    pub const SELECTED_COMPANY: &str = "selectedCompany";
}

/// Error from a session store operation.
#[derive(Debug, Clone)]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session store error: {}", self.message)
    }
}

impl std::error::Error for StoreError {}

/// Async persistent string-keyed storage.
///
/// Single-key operations only; there is no multi-key atomicity. `remove_many`
/// is a best-effort batch, not a transaction.
pub trait SessionStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Set a key-value pair, overwriting any previous value.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete a key. Deleting an absent key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete several keys, stopping at the first failure.
    fn remove_many(
        &self,
        store_keys: &[&str],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

impl<S: SessionStore> SessionStore for &S {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).remove(key)
    }

    fn remove_many(
        &self,
        store_keys: &[&str],
    ) -> impl Future<Output = Result<(), StoreError>> + Send {
        (**self).remove_many(store_keys)
    }
}

/// Repository over a [`SessionStore`], owning the session key layout.
///
/// Constructed once at startup with the configured reference id and injected
/// into the bootstrap and the shell.
pub struct SessionRepository<S: SessionStore> {
    store: S,
    reference_id: String,
}

impl<S: SessionStore> SessionRepository<S> {
    pub fn new(store: S, reference_id: impl Into<String>) -> Self {
        Self {
            store,
            reference_id: reference_id.into(),
        }
    }

    /// The configured correlation reference id.
    pub fn reference_id(&self) -> &str {
        &self.reference_id
    }

    /// Persists a freshly established session.
    ///
    /// The writes are order-independent and run concurrently; all of them
    /// have settled by the time this returns. A failure on any write fails
    /// the whole call; partial writes are possible and are not rolled back.
    pub async fn save_session(
        &self,
        token: &str,
        email: Option<&str>,
        purge_stale_company: bool,
    ) -> Result<(), StoreError> {
        tokio::try_join!(
            self.store.set(keys::PROXY_AUTH_TOKEN, token),
            self.store.set(keys::AUTH_TOKEN, token),
            async {
                match email {
                    Some(email) => self.store.set(keys::USER_EMAIL, email).await,
                    None => Ok(()),
                }
            },
            async {
                if purge_stale_company {
                    self.store.remove(keys::SELECTED_COMPANY).await
                } else {
                    Ok(())
                }
            },
            self.store.set(keys::REFERENCE_ID, &self.reference_id),
        )?;
        Ok(())
    }

    /// Removes the durable session in one best-effort batch.
    pub async fn clear_auth_data(&self) -> Result<(), StoreError> {
        self.store
            .remove_many(&[keys::PROXY_AUTH_TOKEN, keys::AUTH_TOKEN, keys::USER_EMAIL])
            .await
    }

    /// The persisted session token, if any.
    pub async fn auth_token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(keys::AUTH_TOKEN).await
    }

    /// The provider-issued token, if any.
    pub async fn proxy_auth_token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(keys::PROXY_AUTH_TOKEN).await
    }

    /// The persisted user email, if any.
    pub async fn user_email(&self) -> Result<Option<String>, StoreError> {
        self.store.get(keys::USER_EMAIL).await
    }

    /// Load-or-absent startup contract: is a user logged in?
    pub async fn signed_in(&self) -> Result<bool, StoreError> {
        Ok(self.auth_token().await?.is_some())
    }

    /// Initial route for the app shell, derived from persisted state.
    pub async fn initial_route(&self) -> Result<Route, StoreError> {
        Ok(if self.signed_in().await? {
            Route::Home
        } else {
            Route::Login
        })
    }
}

/// Returns a masked version of a token for display (first 12 chars + ...).
///
/// Tokens are never logged or displayed in full.
pub fn mask_token(token: &str) -> String {
    if token.len() <= 16 {
        return "***".to_string();
    }
    format!("{}...", &token[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> SessionRepository<MemorySessionStore> {
        SessionRepository::new(MemorySessionStore::new(), "ref-1")
    }

    /// Test: a successful save writes both token keys and the reference id;
    /// user_email is never written when no email was extracted.
    #[tokio::test]
    async fn test_save_session_without_email() {
        let repo = repo();
        repo.save_session("abc123", None, false).await.unwrap();

        assert_eq!(repo.proxy_auth_token().await.unwrap().as_deref(), Some("abc123"));
        assert_eq!(repo.auth_token().await.unwrap().as_deref(), Some("abc123"));
        assert_eq!(repo.user_email().await.unwrap(), None);
        assert!(repo.signed_in().await.unwrap());
    }

    /// Test: email is persisted when present.
    #[tokio::test]
    async fn test_save_session_with_email() {
        let repo = repo();
        repo.save_session("abc123", Some("a@b.com"), false)
            .await
            .unwrap();
        assert_eq!(repo.user_email().await.unwrap().as_deref(), Some("a@b.com"));
    }

    /// Test: the plain-token flow purges stale selectedCompany state.
    #[tokio::test]
    async fn test_save_session_purges_selected_company() {
        let store = MemorySessionStore::new();
        store.set(keys::SELECTED_COMPANY, "acme").await.unwrap();
        let repo = SessionRepository::new(store, "ref-1");

        repo.save_session("abc123", None, true).await.unwrap();
        // Repository has consumed the store; read back through it.
        assert!(repo.signed_in().await.unwrap());
        assert_eq!(
            repo.store.get(keys::SELECTED_COMPANY).await.unwrap(),
            None
        );
    }

    /// Test: clear_auth_data removes all three auth keys in one batch.
    #[tokio::test]
    async fn test_clear_auth_data() {
        let repo = repo();
        repo.save_session("abc123", Some("a@b.com"), false)
            .await
            .unwrap();

        repo.clear_auth_data().await.unwrap();
        assert!(!repo.signed_in().await.unwrap());
        assert_eq!(repo.proxy_auth_token().await.unwrap(), None);
        assert_eq!(repo.user_email().await.unwrap(), None);
        // referenceId is configuration, not auth state; it survives sign-out.
        assert_eq!(
            repo.store.get(keys::REFERENCE_ID).await.unwrap().as_deref(),
            Some("ref-1")
        );
    }

    /// Test: initial route follows the load-or-absent contract.
    #[tokio::test]
    async fn test_initial_route() {
        let repo = repo();
        assert_eq!(repo.initial_route().await.unwrap(), Route::Login);
        repo.save_session("abc123", None, false).await.unwrap();
        assert_eq!(repo.initial_route().await.unwrap(), Route::Home);
    }

    /// Test: token masking.
    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJhbGciOiJI...");
        assert_eq!(mask_token("short"), "***");
    }
}
