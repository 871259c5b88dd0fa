use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use super::{endpoint, DocQueryApi, ASK_PATH, SIGNUP_PATH, TOKEN_PATH, UPLOAD_FIELD, UPLOAD_PATH};
use crate::types::{
    AppError, AskRequest, AskResponse, Result, SignupRequest, TokenRequest, TokenResponse,
    UploadReceipt,
};
use crate::upload::Document;

/// `reqwest`-backed client for the terminal front-end.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    /// Send, map transport failures and non-2xx statuses, return the body.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let resp = request
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Backend rejected request");
            return Err(AppError::from_response(status.as_u16(), &body));
        }
        Ok(body)
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| AppError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl DocQueryApi for HttpApi {
    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        tracing::debug!(email = %request.email, "POST {}", SIGNUP_PATH);
        self.execute(self.client.post(self.url(SIGNUP_PATH)).json(request))
            .await
            .map(|_| ())
    }

    async fn token(&self, request: &TokenRequest) -> Result<TokenResponse> {
        tracing::debug!(username = %request.username, "POST {}", TOKEN_PATH);
        let body = self
            .execute(self.client.post(self.url(TOKEN_PATH)).form(request))
            .await?;
        decode(&body)
    }

    async fn upload(&self, token: &str, document: &Document) -> Result<UploadReceipt> {
        tracing::debug!(file = %document.name, bytes = document.len(), "POST {}", UPLOAD_PATH);
        let mut part = Part::bytes(document.bytes.to_vec()).file_name(document.name.clone());
        if let Some(content_type) = &document.content_type {
            part = part
                .mime_str(content_type)
                .map_err(|e| AppError::Validation(format!("Invalid content type: {}", e)))?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        let body = self
            .execute(
                self.client
                    .post(self.url(UPLOAD_PATH))
                    .bearer_auth(token)
                    .multipart(form),
            )
            .await?;
        // The receipt is informational; an unreadable body is still a success.
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        tracing::debug!("POST {}", ASK_PATH);
        let body = self
            .execute(self.client.post(self.url(ASK_PATH)).json(request))
            .await?;
        decode(&body)
    }
}
