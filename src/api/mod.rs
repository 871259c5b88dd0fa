//! Backend API seam
//!
//! Every call to the question-answering backend goes through
//! [`DocQueryApi`] and returns the crate's tagged [`Result`]. The terminal
//! client uses [`http::HttpApi`]; the web client supplies its own
//! implementation over the browser's fetch.

#[cfg(feature = "native")]
pub mod http;

use async_trait::async_trait;

use crate::types::{
    AskRequest, AskResponse, Result, SignupRequest, TokenRequest, TokenResponse, UploadReceipt,
};
use crate::upload::Document;

pub const SIGNUP_PATH: &str = "/signup";
pub const TOKEN_PATH: &str = "/token";
pub const UPLOAD_PATH: &str = "/upload";
pub const ASK_PATH: &str = "/ask";

/// Multipart field carrying the uploaded document.
pub const UPLOAD_FIELD: &str = "file";

/// Join a base URL and an endpoint path without doubling the slash.
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// The four backend endpoints.
///
/// Futures are not required to be `Send` so that browser implementations,
/// whose futures hold JS values, fit the same trait.
#[async_trait(?Send)]
pub trait DocQueryApi {
    /// `POST /signup`. Any 2xx is success.
    async fn signup(&self, request: &SignupRequest) -> Result<()>;

    /// `POST /token` with form-encoded credentials.
    async fn token(&self, request: &TokenRequest) -> Result<TokenResponse>;

    /// `POST /upload` as multipart with the bearer token attached.
    async fn upload(&self, token: &str, document: &Document) -> Result<UploadReceipt>;

    /// `POST /ask`.
    async fn ask(&self, request: &AskRequest) -> Result<AskResponse>;
}
