//! Session context
//!
//! The bearer token is the only state shared between pages. It lives in a
//! [`TokenStore`] (browser local storage, a file, or memory) and is reached
//! through one [`Session`] object created at start-up and handed to every
//! consumer, instead of each page touching storage on its own.
//!
//! ```ignore
//! use docquery::session::{MemoryTokenStore, Session};
//!
//! let session = Session::init(MemoryTokenStore::default());
//! session.set("eyJhbGciOi...")?;
//! assert!(session.is_authenticated());
//! let nav = session.sign_out()?;
//! assert_eq!(nav.to, docquery::routes::Route::SignIn);
//! ```

use std::sync::Arc;

use parking_lot::RwLock;

use crate::routes::{Navigation, Route};
use crate::types::{AppError, Result};

/// Default key the token is stored under.
pub const TOKEN_KEY: &str = "token";

/// Interpret a stored value. Stores hold the bare token text; surrounding
/// whitespace is ignored and a blank value means "signed out".
pub fn stored_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// Persistent home of the bearer token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn remove(&self) -> Result<()>;
}

/// Process-local store, used by tests and as a fallback when nothing
/// persistent is available.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.read().clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.token.write() = None;
        Ok(())
    }
}

/// Token kept in a single file. The file holds the raw token and nothing
/// else; a missing or blank file means "signed out".
#[cfg(feature = "native")]
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: std::path::PathBuf,
}

#[cfg(feature = "native")]
impl FileTokenStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "native")]
impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(stored_token(&contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to read {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(&self.path, token).map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }

    fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}

/// The authenticated-or-not state of the running client.
///
/// Cloning is cheap and every clone observes the same token.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    /// Open a session over `store`, picking up a token left by a previous run.
    pub fn init(store: impl TokenStore + 'static) -> Self {
        Self::from_arc(Arc::new(store))
    }

    pub fn from_arc(store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Could not read stored session, starting signed out: {}", e);
                None
            }
        };
        tracing::debug!(authenticated = token.is_some(), "Session initialised");

        Self {
            store,
            token: Arc::new(RwLock::new(token)),
        }
    }

    /// Replace the current token.
    pub fn set(&self, token: &str) -> Result<()> {
        if token.trim().is_empty() {
            return Err(AppError::Validation("Refusing to store an empty token".into()));
        }
        self.store.save(token)?;
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    pub fn get(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Forget the token. The in-memory copy is dropped even when the store
    /// fails, so the client never keeps acting as signed in.
    pub fn clear(&self) -> Result<()> {
        *self.token.write() = None;
        self.store.remove()
    }

    /// Clear the session and return the navigation that leaves the
    /// authenticated area without a way back.
    pub fn sign_out(&self) -> Result<Navigation> {
        self.clear()?;
        tracing::info!("Signed out");
        Ok(Navigation::replace(Route::SignIn))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
