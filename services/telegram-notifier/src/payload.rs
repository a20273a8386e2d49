//! Multipart request encoding for the Telegram Bot API
//!
//! Bodies are written by hand rather than with `reqwest::multipart::Form`,
//! which does not expose the encoded bytes an [`OutboundRequest`] carries.

use std::path::{Path, PathBuf};

use crate::error::{NotifierError, Result};

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

const SEND_MESSAGE: &str = "sendMessage";
const SEND_PHOTO: &str = "sendPhoto";

/// What a notification carries: plain text, or a captioned photo read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageContent {
    Text(String),
    Photo { caption: String, image_path: PathBuf },
}

/// A fully encoded HTTP request, ready to hand to a [`crate::io::WebhookSender`]
#[derive(Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    url: String,
    body: Vec<u8>,
    headers: Vec<(String, String)>,
}

impl OutboundRequest {
    pub(crate) fn new(url: String, body: Vec<u8>, headers: Vec<(String, String)>) -> Self {
        Self { url, body, headers }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Always `POST`
    pub fn method(&self) -> &'static str {
        "POST"
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// The Bot API method this request targets, e.g. `sendPhoto`
    pub fn api_method(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or_default()
    }
}

// The URL embeds the bot token, keep it out of logs.
impl std::fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundRequest")
            .field("method", &self.method())
            .field("api_method", &self.api_method())
            .field("body_len", &self.body.len())
            .field("headers", &self.headers)
            .finish()
    }
}

/// Bot API endpoint for `method`
pub fn api_url(bot_token: &str, method: &str) -> String {
    format!("{}/bot{}/{}", TELEGRAM_API_URL, bot_token, method)
}

/// Encode `content` for `chat_id` into a multipart request.
///
/// For [`MessageContent::Photo`] the image is streamed from disk into the
/// body; an unreadable image yields [`NotifierError::ImageUnavailable`].
pub async fn encode(
    bot_token: &str,
    chat_id: &str,
    content: MessageContent,
) -> Result<OutboundRequest> {
    match content {
        MessageContent::Text(text) => Ok(encode_text(bot_token, chat_id, &text)),
        MessageContent::Photo {
            caption,
            image_path,
        } => encode_photo(bot_token, chat_id, &caption, &image_path).await,
    }
}

/// `sendMessage` request with HTML parse mode
pub fn encode_text(bot_token: &str, chat_id: &str, text: &str) -> OutboundRequest {
    let mut form = MultipartWriter::new();
    form.write_field("chat_id", chat_id);
    form.write_field("text", text);
    form.write_field("parse_mode", "html");
    into_request(form, bot_token, SEND_MESSAGE)
}

/// `sendPhoto` request with the image at `image_path` attached as `photo`
pub async fn encode_photo(
    bot_token: &str,
    chat_id: &str,
    caption: &str,
    image_path: &Path,
) -> Result<OutboundRequest> {
    let mut form = MultipartWriter::new();
    form.write_field("chat_id", chat_id);
    form.write_field("caption", caption);
    form.write_file("photo", image_path).await?;
    Ok(into_request(form, bot_token, SEND_PHOTO))
}

fn into_request(form: MultipartWriter, bot_token: &str, method: &str) -> OutboundRequest {
    let content_type = form.content_type();
    let body = form.finish();

    tracing::debug!("Encoded {} request ({} bytes)", method, body.len());

    OutboundRequest::new(
        api_url(bot_token, method),
        body,
        vec![("Content-Type".to_string(), content_type)],
    )
}

/// Incremental `multipart/form-data` body writer
#[derive(Debug)]
pub struct MultipartWriter {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartWriter {
    /// Writer with a random boundary
    pub fn new() -> Self {
        Self::with_boundary(uuid::Uuid::new_v4().simple().to_string())
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the `Content-Type` header
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn write_field(&mut self, name: &str, value: &str) {
        self.begin_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"\r\n",
            escape_quotes(name)
        ));
        self.body.extend_from_slice(value.as_bytes());
    }

    /// Stream the file at `path` into a file part named `name`.
    ///
    /// The file is opened before anything is written, so a failed open
    /// leaves the body untouched. The handle is dropped before returning.
    pub async fn write_file(&mut self, name: &str, path: &Path) -> Result<()> {
        let image_unavailable = |source| NotifierError::ImageUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::open(path)
            .await
            .map_err(image_unavailable)?;

        let filename = path
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.begin_part(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n",
            escape_quotes(name),
            escape_quotes(&filename)
        ));

        let copied = tokio::io::copy(&mut file, &mut self.body)
            .await
            .map_err(image_unavailable)?;
        tracing::debug!("Attached {} bytes from {}", copied, path.display());
        Ok(())
    }

    /// Write the closing boundary and return the body
    pub fn finish(mut self) -> Vec<u8> {
        if !self.body.is_empty() {
            self.body.extend_from_slice(b"\r\n");
        }
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }

    fn begin_part(&mut self, headers: &str) {
        if !self.body.is_empty() {
            self.body.extend_from_slice(b"\r\n");
        }
        self.body
            .extend_from_slice(format!("--{}\r\n{}\r\n", self.boundary, headers).as_bytes());
    }
}

fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
