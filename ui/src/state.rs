//! Global application state

use std::time::Duration;

use docquery::session::{stored_token, TOKEN_KEY};
use docquery::{AppError, AuthGate, ClientConfig, Navigation, Result, Session, TokenStore};
use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;

use crate::api::GlooApi;

/// Session token kept in the browser's `localStorage` as bare text under
/// the configured key.
#[derive(Debug, Clone)]
pub struct LocalTokenStore {
    key: String,
}

impl LocalTokenStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for LocalTokenStore {
    fn default() -> Self {
        Self::new(TOKEN_KEY)
    }
}

fn storage_error(e: wasm_bindgen::JsValue) -> AppError {
    AppError::Storage(format!("{:?}", e))
}

impl TokenStore for LocalTokenStore {
    fn load(&self) -> Result<Option<String>> {
        let raw = LocalStorage::raw()
            .get_item(&self.key)
            .map_err(storage_error)?;
        Ok(raw.as_deref().and_then(stored_token))
    }

    fn save(&self, token: &str) -> Result<()> {
        LocalStorage::raw()
            .set_item(&self.key, token)
            .map_err(storage_error)
    }

    fn remove(&self) -> Result<()> {
        LocalStorage::raw()
            .remove_item(&self.key)
            .map_err(storage_error)
    }
}

/// Global application state
#[derive(Clone)]
pub struct AppState {
    /// The one session shared by every page
    pub session: Session,
    /// Mirrors `session.is_authenticated()` so views re-render on change
    pub authenticated: RwSignal<bool>,
    pub api: GlooApi,
    pub config: ClientConfig,
}

impl AppState {
    pub fn new() -> Self {
        let mut config = ClientConfig::default();
        if let Some(api_base) = option_env!("DOCQUERY_API_BASE") {
            config = config.with_api_base(api_base);
        }
        if let Some(token_key) = option_env!("DOCQUERY_TOKEN_KEY") {
            config.token_key = token_key.to_string();
        }
        if let Err(e) = config.validate() {
            tracing::warn!("{}, falling back to defaults", e);
            config = ClientConfig::default();
        }

        let session = Session::init(LocalTokenStore::new(config.token_key.clone()));
        Self {
            authenticated: RwSignal::new(session.is_authenticated()),
            api: GlooApi::new(config.api_base.clone()),
            session,
            config,
        }
    }

    pub fn gate(&self) -> AuthGate {
        AuthGate::new(self.session.clone())
    }

    /// Re-read the session after a flow changed it.
    pub fn sync_auth(&self) {
        self.authenticated.set(self.session.is_authenticated());
    }

    pub fn sign_out(&self) -> Navigation {
        let nav = match self.session.sign_out() {
            Ok(nav) => nav,
            Err(e) => {
                tracing::error!("Failed to clear stored token: {}", e);
                Navigation::replace(docquery::Route::SignIn)
            }
        };
        self.sync_auth();
        nav
    }

    pub fn signup_redirect_delay(&self) -> Duration {
        self.config.signup_redirect_delay()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
