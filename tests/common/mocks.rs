//! Mock implementations for testing.
//!
//! [`MockApi`] stands in for the DocQuery backend so the flows can be driven
//! without a server. Every call is recorded, which lets tests assert that a
//! locally rejected submission never reached the network.

use async_trait::async_trait;
use docquery::api::DocQueryApi;
use docquery::types::{
    AskRequest, AskResponse, SignupRequest, TokenRequest, TokenResponse, UploadReceipt,
};
use docquery::{AppError, Document, Result};
use parking_lot::Mutex;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Signup(SignupRequest),
    Token(TokenRequest),
    Upload { token: String, file: String },
    Ask(String),
}

/// Mock backend with configurable responses.
///
/// # Examples
///
/// ```ignore
/// // A backend that accepts everything
/// let api = MockApi::new();
///
/// // A backend whose every call fails with 500
/// let api = MockApi::failing();
///
/// // A backend answering questions with a fixed text
/// let api = MockApi::new().with_answer("It is a report.");
/// ```
#[derive(Debug)]
pub struct MockApi {
    calls: Mutex<Vec<Call>>,
    token: String,
    answer: Option<String>,
    error: Option<AppError>,
}

impl MockApi {
    /// Create a backend that accepts every request.
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            token: "mock-token".to_string(),
            answer: Some("Mock answer".to_string()),
            error: None,
        }
    }

    /// Create a backend that rejects every request with a 500 and no detail.
    pub fn failing() -> Self {
        Self::new().with_error(AppError::Backend {
            status: 500,
            detail: None,
        })
    }

    /// Fail every request with `error`.
    pub fn with_error(mut self, error: AppError) -> Self {
        self.error = Some(error);
        self
    }

    /// Token handed out by `/token`.
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = token.to_string();
        self
    }

    /// Answer every question with `answer`.
    pub fn with_answer(mut self, answer: &str) -> Self {
        self.answer = Some(answer.to_string());
        self
    }

    /// Reply `success: false` to every question.
    pub fn without_answer(mut self) -> Self {
        self.answer = None;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().push(call);
        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl DocQueryApi for MockApi {
    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        self.record(Call::Signup(request.clone()))
    }

    async fn token(&self, request: &TokenRequest) -> Result<TokenResponse> {
        self.record(Call::Token(request.clone()))?;
        Ok(TokenResponse {
            access_token: self.token.clone(),
            token_type: Some("bearer".to_string()),
        })
    }

    async fn upload(&self, token: &str, document: &Document) -> Result<UploadReceipt> {
        self.record(Call::Upload {
            token: token.to_string(),
            file: document.name.clone(),
        })?;
        Ok(UploadReceipt {
            message: Some("File uploaded successfully".to_string()),
            extracted_chunks: Some(3),
        })
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        self.record(Call::Ask(request.question.clone()))?;
        Ok(match &self.answer {
            Some(answer) => AskResponse {
                success: true,
                answer: answer.clone(),
            },
            None => AskResponse {
                success: false,
                answer: String::new(),
            },
        })
    }
}
