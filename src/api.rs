use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, ORIGIN};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::config::{BackendConfig, UploadConfig};
use crate::selection::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Error: {status} - {body}")]
    Http { status: u16, body: String },
    #[error("Unexpected response from the server: {0}")]
    Parse(String),
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),
    #[error("Invalid request: {0}")]
    Request(String),
    #[error("Request cancelled")]
    Cancelled,
}

/// Payload of `/ask-image`. Every field is optional; unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub top_artist_name: Option<String>,
    #[serde(default)]
    pub most_similar_artist_journey_outline: Option<String>,
    #[serde(default)]
    pub artwork_feedback_and_tips: Option<String>,
    #[serde(default)]
    pub recommended_next_steps: Option<String>,
    #[serde(default)]
    pub chunks_used: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisParams {
    pub top_k: u32,
    pub threshold: f32,
    pub use_gpt_summary: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        AnalysisParams {
            top_k: 3,
            threshold: 0.2,
            use_gpt_summary: true,
        }
    }
}

impl From<&UploadConfig> for AnalysisParams {
    fn from(upload: &UploadConfig) -> Self {
        AnalysisParams {
            top_k: upload.top_k,
            threshold: upload.threshold,
            use_gpt_summary: upload.use_gpt_summary,
        }
    }
}

impl AnalysisParams {
    /// Text fields sent next to `file` on `/ask-image`.
    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("top_k", self.top_k.to_string()),
            ("threshold", self.threshold.to_string()),
            ("use_gpt_summary", self.use_gpt_summary.to_string()),
        ]
    }
}

/// A question for `/ask-about-art`.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtQuestion {
    pub query: String,
    pub style_prediction: Option<String>,
    pub creative_story_mode: bool,
    pub session_id: Option<String>,
    pub top_k: u32,
}

impl ArtQuestion {
    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![("query", self.query.clone())];
        if let Some(style) = &self.style_prediction {
            fields.push(("style_prediction", style.clone()));
        }
        fields.push(("creative_story_mode", self.creative_story_mode.to_string()));
        if let Some(session) = &self.session_id {
            fields.push(("session_id", session.clone()));
        }
        fields.push(("top_k", self.top_k.to_string()));
        fields
    }
}

#[derive(Debug, Deserialize)]
struct ArtistNameResponse {
    artist_name: String,
}

/// Thin client over the analysis backend. Never touches workflow state.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    base_url: String,
    origin: String,
    timeout: Duration,
    params: AnalysisParams,
    client: reqwest::Client,
}

impl AnalysisClient {
    pub fn with_config(backend: &BackendConfig, upload: &UploadConfig) -> Self {
        AnalysisClient {
            base_url: backend.url.trim_end_matches('/').to_string(),
            origin: backend.origin.clone(),
            timeout: backend.timeout(),
            params: AnalysisParams::from(upload),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Primary analysis: `POST /ask-image`.
    pub async fn analyze(&self, file: &SelectedFile) -> Result<AnalysisResult, ApiError> {
        tracing::info!(
            "Analyzing artwork: {} ({} KB)",
            file.name,
            (file.size() + 512) / 1024
        );

        let mut form = Form::new().part("file", file_part(file)?);
        for (name, value) in self.params.fields() {
            form = form.text(name, value);
        }

        let body = self.post_form("/ask-image", form).await?;
        let result: AnalysisResult = decode(&body)?;
        tracing::info!(
            "Analysis complete: artist={:?}, chunks_used={:?}",
            result.top_artist_name,
            result.chunks_used
        );
        Ok(result)
    }

    /// Quick lookup of the matched artist only: `POST /artist-name-only`.
    pub async fn artist_name_only(&self, file: &SelectedFile) -> Result<String, ApiError> {
        tracing::debug!("Quick artist name check for: {}", file.name);

        let form = Form::new()
            .part("file", file_part(file)?)
            .text("top_k", self.params.top_k.to_string())
            .text("threshold", self.params.threshold.to_string());

        let body = self.post_form("/artist-name-only", form).await?;
        let response: ArtistNameResponse = decode(&body)?;
        Ok(response.artist_name)
    }

    #[allow(dead_code)]
    pub async fn ingest_text(&self, text: &str) -> Result<Value, ApiError> {
        let form = Form::new().text("text", text.to_string());
        let body = self.post_form("/ingest-text", form).await?;
        decode(&body)
    }

    pub async fn detect_art(&self, file: &SelectedFile) -> Result<Value, ApiError> {
        let form = Form::new().part("file", file_part(file)?);
        let body = self.post_form("/detect-art", form).await?;
        decode(&body)
    }

    pub async fn ask_about_art(&self, question: &ArtQuestion) -> Result<Value, ApiError> {
        let mut form = Form::new();
        for (name, value) in question.fields() {
            form = form.text(name, value);
        }
        let body = self.post_form("/ask-about-art", form).await?;
        decode(&body)
    }

    pub async fn compare_user_art(
        &self,
        file: &SelectedFile,
        top_k: u32,
        request_tips: bool,
    ) -> Result<Value, ApiError> {
        let form = Form::new()
            .part("file", file_part(file)?)
            .text("top_k", top_k.to_string())
            .text("request_tips", request_tips.to_string());
        let body = self.post_form("/compare-user-art", form).await?;
        decode(&body)
    }

    /// Liveness probe: `GET /health`.
    pub async fn health(&self) -> Result<Value, ApiError> {
        let body = self.get("/health").await?;
        decode(&body)
    }

    #[allow(dead_code)]
    pub async fn debug_cors(&self) -> Result<Value, ApiError> {
        let body = self.get("/debug-cors").await?;
        decode(&body)
    }

    async fn post_form(&self, path: &str, form: Form) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("POST {}", url);

        let request = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(ORIGIN, &self.origin)
            .timeout(self.timeout)
            .multipart(form);

        self.send(request).await
    }

    async fn get(&self, path: &str) -> Result<String, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(ORIGIN, &self.origin)
            .timeout(self.timeout);

        self.send(request).await
    }

    /// Sends and reads the body as text; non-2xx bodies become `ApiError::Http`.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            tracing::warn!("Backend returned {}: {}", status, body);
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout.as_secs())
        } else {
            tracing::warn!("Request failed: {}", e);
            ApiError::Network(e.to_string())
        }
    }
}

/// Races `fut` against `token`; a cancelled call resolves to `ApiError::Cancelled`.
pub async fn cancellable<T, F>(token: CancellationToken, fut: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        _ = token.cancelled() => Err(ApiError::Cancelled),
        result = fut => result,
    }
}

fn file_part(file: &SelectedFile) -> Result<Part, ApiError> {
    Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(&file.media_type)
        .map_err(|e| ApiError::Request(e.to_string()))
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serves exactly one canned response and hands back the raw request.
    async fn one_shot(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let raw = read_request(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            raw
        });

        (url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if request_complete(&buf) {
                break;
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn request_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let headers = text[..header_end].to_ascii_lowercase();
        let body_len = buf.len() - (header_end + 4);

        if let Some(line) = headers.lines().find(|l| l.starts_with("content-length:")) {
            let expected: usize = line["content-length:".len()..].trim().parse().unwrap_or(0);
            body_len >= expected
        } else if headers.contains("transfer-encoding: chunked") {
            text.ends_with("0\r\n\r\n")
        } else {
            true
        }
    }

    fn client_for(url: &str) -> AnalysisClient {
        let backend = BackendConfig {
            url: url.to_string(),
            ..BackendConfig::default()
        };
        AnalysisClient::with_config(&backend, &UploadConfig::default())
    }

    fn artwork() -> SelectedFile {
        SelectedFile::new("sketch.png", "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn test_default_params_fields() {
        let fields = AnalysisParams::default().fields();
        assert_eq!(
            fields,
            vec![
                ("top_k", "3".to_string()),
                ("threshold", "0.2".to_string()),
                ("use_gpt_summary", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_question_fields_skip_missing_options() {
        let question = ArtQuestion {
            query: "Who painted this?".to_string(),
            style_prediction: None,
            creative_story_mode: false,
            session_id: Some("abc".to_string()),
            top_k: 5,
        };
        let names: Vec<_> = question.fields().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["query", "creative_story_mode", "session_id", "top_k"]);
    }

    #[test]
    fn test_decode_partial_result() {
        let result: AnalysisResult =
            decode(r#"{"top_artist_name":"Frida Kahlo","extra":1}"#).unwrap();
        assert_eq!(result.top_artist_name.as_deref(), Some("Frida Kahlo"));
        assert!(result.most_similar_artist_journey_outline.is_none());
        assert!(result.chunks_used.is_none());
    }

    #[test]
    fn test_decode_malformed_is_parse_error() {
        let err = decode::<AnalysisResult>("<html>oops</html>").unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }

    #[test]
    fn test_http_error_message_has_status_and_body() {
        let err = ApiError::Http {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Error: 500 - boom");
    }

    #[tokio::test]
    async fn test_analyze_sends_multipart_request() {
        let (url, server) = one_shot(
            200,
            r#"{"top_artist_name":"Hokusai","recommended_next_steps":"Study waves.","chunks_used":7}"#,
        )
        .await;

        let result = client_for(&url).analyze(&artwork()).await.unwrap();
        assert_eq!(result.top_artist_name.as_deref(), Some("Hokusai"));
        assert_eq!(result.chunks_used, Some(7));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /ask-image "));
        let lower = raw.to_ascii_lowercase();
        assert!(lower.contains("accept: application/json"));
        assert!(lower.contains("multipart/form-data"));
        assert!(raw.contains("name=\"file\"; filename=\"sketch.png\""));
        assert!(raw.contains("name=\"top_k\"\r\n\r\n3"));
        assert!(raw.contains("name=\"threshold\"\r\n\r\n0.2"));
        assert!(raw.contains("name=\"use_gpt_summary\"\r\n\r\ntrue"));
    }

    #[tokio::test]
    async fn test_analyze_maps_http_failure() {
        let (url, server) = one_shot(500, "boom").await;

        let err = client_for(&url).analyze(&artwork()).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 500,
                body: "boom".to_string()
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_analyze_maps_malformed_success() {
        let (url, server) = one_shot(200, "not json").await;

        let err = client_for(&url).analyze(&artwork()).await.unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_artist_name_only() {
        let (url, server) = one_shot(200, r#"{"artist_name":"Monet"}"#).await;

        let name = client_for(&url).artist_name_only(&artwork()).await.unwrap();
        assert_eq!(name, "Monet");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /artist-name-only "));
        assert!(!raw.contains("use_gpt_summary"));
    }

    #[tokio::test]
    async fn test_health_probe() {
        let (url, server) = one_shot(200, r#"{"status":"ok"}"#).await;

        let health = client_for(&url).health().await.unwrap();
        assert_eq!(health["status"], "ok");
        assert!(server.await.unwrap().starts_with("GET /health "));
    }

    #[tokio::test]
    async fn test_ingest_text_and_debug_cors() {
        let (url, server) = one_shot(200, r#"{"ingested":1}"#).await;
        let reply = client_for(&url).ingest_text("Monet painted water lilies.").await.unwrap();
        assert_eq!(reply["ingested"], 1);
        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /ingest-text "));
        assert!(raw.contains("name=\"text\"\r\n\r\nMonet painted water lilies."));

        let (url, server) = one_shot(200, r#"{"origin":"app://art-analyze"}"#).await;
        let reply = client_for(&url).debug_cors().await.unwrap();
        assert_eq!(reply["origin"], "app://art-analyze");
        let raw = server.await.unwrap().to_ascii_lowercase();
        assert!(raw.starts_with("get /debug-cors "));
        assert!(raw.contains("origin: app://art-analyze"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = client_for(&url).health().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[tokio::test]
    async fn test_cancelled_call() {
        let token = CancellationToken::new();
        token.cancel();

        let result: Result<(), ApiError> =
            cancellable(token, std::future::pending::<Result<(), ApiError>>()).await;
        assert_eq!(result, Err(ApiError::Cancelled));
    }
}
