//! API client for communicating with the DocQuery backend

use async_trait::async_trait;
use docquery::api::{
    endpoint, DocQueryApi, ASK_PATH, SIGNUP_PATH, TOKEN_PATH, UPLOAD_FIELD, UPLOAD_PATH,
};
use docquery::types::{
    AskRequest, AskResponse, SignupRequest, TokenRequest, TokenResponse, UploadReceipt,
};
use docquery::{AppError, Document, Result};
use gloo_net::http::{Request, Response};
use wasm_bindgen::JsValue;
use web_sys::{FormData, UrlSearchParams};

/// Browser transport over `fetch`.
#[derive(Debug, Clone)]
pub struct GlooApi {
    base_url: String,
}

impl GlooApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }
}

fn js_error(e: JsValue) -> AppError {
    AppError::Network(format!("{:?}", e))
}

/// Send a built request; non-2xx statuses become backend errors carrying
/// whatever `detail` the server sent.
async fn execute(request: std::result::Result<Request, gloo_net::Error>) -> Result<Response> {
    let resp = request
        .map_err(|e| AppError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| AppError::Network(e.to_string()))?;

    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(status, "Backend rejected request");
        return Err(AppError::from_response(status, &body));
    }
    Ok(resp)
}

async fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T> {
    resp.json::<T>()
        .await
        .map_err(|e| AppError::Decode(e.to_string()))
}

fn token_form(request: &TokenRequest) -> Result<UrlSearchParams> {
    let params = UrlSearchParams::new().map_err(js_error)?;
    params.append("username", &request.username);
    params.append("password", &request.password);
    Ok(params)
}

fn upload_form(document: &Document) -> Result<FormData> {
    let blob =
        gloo_file::Blob::new_with_options(&document.bytes[..], document.content_type.as_deref());
    let form = FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename(UPLOAD_FIELD, &blob.into(), &document.name)
        .map_err(js_error)?;
    Ok(form)
}

#[async_trait(?Send)]
impl DocQueryApi for GlooApi {
    async fn signup(&self, request: &SignupRequest) -> Result<()> {
        execute(Request::post(&self.url(SIGNUP_PATH)).json(request))
            .await
            .map(|_| ())
    }

    async fn token(&self, request: &TokenRequest) -> Result<TokenResponse> {
        let form = token_form(request)?;
        let resp = execute(
            Request::post(&self.url(TOKEN_PATH))
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(form),
        )
        .await?;
        decode(resp).await
    }

    async fn upload(&self, token: &str, document: &Document) -> Result<UploadReceipt> {
        let form = upload_form(document)?;
        // The browser sets the multipart boundary itself.
        let resp = execute(
            Request::post(&self.url(UPLOAD_PATH))
                .header("Authorization", &format!("Bearer {}", token))
                .body(form),
        )
        .await?;
        Ok(resp.json::<UploadReceipt>().await.unwrap_or_default())
    }

    async fn ask(&self, request: &AskRequest) -> Result<AskResponse> {
        let resp = execute(Request::post(&self.url(ASK_PATH)).json(request)).await?;
        decode(resp).await
    }
}

/// Read a file picked in an `<input type="file">` into a [`Document`].
pub async fn read_document(file: web_sys::File) -> Result<Document> {
    let file = gloo_file::File::from(file);
    let bytes = gloo_file::futures::read_as_bytes(&file)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to read {}: {}", file.name(), e)))?;

    let document = Document::new(file.name(), bytes);
    let mime = file.raw_mime_type();
    Ok(if mime.is_empty() {
        document
    } else {
        document.with_content_type(mime)
    })
}
