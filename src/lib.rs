//! # DocQuery
//!
//! Client-side workflow for DocQuery: sign up, sign in, upload a document and
//! ask questions about it, answered by the DocQuery backend.
//!
//! ## Overview
//!
//! This crate holds everything that does not depend on a particular UI:
//!
//! 1. **The session context** - one token, one owner, explicit hand-off
//! 2. **The page state machines** - sign-up, sign-in, upload and query flows
//! 3. **The route table** - with a single authorization gate
//! 4. **The API seam** - [`DocQueryApi`], returning tagged [`Result`]s
//!
//! Two front-ends drive it: the `docquery` terminal client in this package
//! (feature `native`, on by default) and the Leptos web client in `ui/`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docquery::{HttpApi, QueryState, Session, SignInFlow};
//! use docquery::session::MemoryTokenStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpApi::new("http://localhost:8000");
//!     let session = Session::init(MemoryTokenStore::default());
//!
//!     let mut sign_in = SignInFlow::new();
//!     sign_in.edit(|f| {
//!         f.username_or_email = "a@x.com".into();
//!         f.password = "secret".into();
//!     });
//!     sign_in.submit(&api, &session).await?;
//!
//!     let mut query = QueryState::new();
//!     query.input = "What is this document about?".into();
//!     let turn = query.ask(&api).await?;
//!     println!("{}", turn.answer);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `native` | reqwest transport, file-backed session, config loading, CLI (default) |
//!
//! ## Modules
//!
//! - [`api`] - Backend API trait and the native HTTP client
//! - [`auth`] - Sign-up and sign-in forms
//! - [`config`] - Client configuration
//! - [`query`] - Question flow and conversation history
//! - [`routes`] - Route table and authorization gate
//! - [`session`] - Session context and token stores
//! - [`types`] - Wire types and error handling
//! - [`upload`] - Document upload flow

#![warn(rustdoc::missing_crate_level_docs)]

/// Backend API seam.
pub mod api;
/// Sign-up and sign-in form state machines.
pub mod auth;
/// Terminal front-end.
#[cfg(feature = "native")]
pub mod cli;
/// Client configuration.
pub mod config;
/// Question flow and conversation history.
pub mod query;
/// Route table and authorization gate.
pub mod routes;
/// Session context and token stores.
pub mod session;
/// Wire types and errors.
pub mod types;
/// Document upload flow.
pub mod upload;

// Re-export commonly used types
pub use api::DocQueryApi;
#[cfg(feature = "native")]
pub use api::http::HttpApi;
pub use auth::{AuthPhase, SignInFlow, SignInForm, SignUpFlow, SignUpForm};
pub use config::ClientConfig;
pub use query::{ConversationHistory, QueryState, Turn};
pub use routes::{Access, AuthGate, Navigation, Route};
pub use session::{Session, TokenStore};
pub use types::{AppError, ErrorKind, Result};
pub use upload::{Document, UploadState};
