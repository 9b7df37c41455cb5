use std::path::Path;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use ocr2gpt_types::BackendKind;
use serde::{Deserialize, Serialize};

use crate::{BackendMetadata, RecognitionError, Recognizer};

/// Remote recognition through a chat-completions endpoint with image input.
///
/// One request per image; failures are returned as-is, there is no retry.
#[derive(Clone)]
pub struct VisionRecognizer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
    prompt: String,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl VisionRecognizer {
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        prompt: String,
        max_tokens: u32,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            model,
            prompt,
            max_tokens,
        }
    }

    fn request_body(&self, data_url: String) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: &self.prompt },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl { url: data_url },
                    },
                ],
            }],
        }
    }
}

/// Inline `data:` URL for a PNG
pub(crate) fn png_data_url(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(bytes))
}

#[async_trait]
impl Recognizer for VisionRecognizer {
    async fn recognize(&self, image_path: &Path) -> Result<String, RecognitionError> {
        if self.api_key.is_empty() {
            return Err(RecognitionError::Authentication(
                "no API key configured (set API_KEY)".to_string(),
            ));
        }

        let bytes = tokio::fs::read(image_path).await?;
        let body = self.request_body(png_data_url(&bytes));

        tracing::debug!(
            "Sending {} bytes to {} ({})",
            bytes.len(),
            self.api_url,
            self.model
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RecognitionError::Authentication(format!(
                "HTTP {status}: {}",
                text.trim()
            )));
        }
        if !status.is_success() {
            return Err(RecognitionError::Api(format!("HTTP {status}: {}", text.trim())));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| RecognitionError::MalformedResponse(format!("{e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| RecognitionError::MalformedResponse("no choices in response".to_string()))
    }

    fn metadata(&self) -> BackendMetadata {
        BackendMetadata {
            kind: BackendKind::Vision,
            name: format!("Vision API ({})", self.model),
            requires_api_key: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use tokio::time::timeout;

    use super::*;

    const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

    /// Serve exactly one HTTP response and hand back the raw request
    async fn one_shot_server(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 8192];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (url, handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn write_fake_png() -> PathBuf {
        let path = std::env::temp_dir().join(format!("ocr2gpt-vision-{}.png", uuid::Uuid::new_v4()));
        std::fs::write(&path, FAKE_PNG).unwrap();
        path
    }

    fn recognizer(url: String, key: &str) -> VisionRecognizer {
        VisionRecognizer::new(
            url,
            key.to_string(),
            "test-model".to_string(),
            "Read the text.".to_string(),
            300,
        )
    }

    #[test]
    fn data_url_is_base64_png() {
        assert_eq!(png_data_url(b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn request_body_shape() {
        let r = recognizer("http://unused".into(), "k");
        let body = serde_json::to_value(r.request_body(png_data_url(b"hi"))).unwrap();

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["max_tokens"], 300);
        assert_eq!(body["messages"][0]["role"], "user");
        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[0]["text"], "Read the text.");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(content[1]["image_url"]["url"], "data:image/png;base64,aGk=");
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let r = recognizer("http://127.0.0.1:9/never".into(), "");
        let err = r.recognize(Path::new("does-not-matter.png")).await.unwrap_err();
        assert!(matches!(err, RecognitionError::Authentication(_)));
    }

    #[tokio::test]
    async fn returns_first_choice_verbatim() {
        let (url, server) = one_shot_server(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"  Hello\nworld "}}]}"#,
        )
        .await;
        let image = write_fake_png();

        let text = timeout(Duration::from_secs(5), recognizer(url, "secret").recognize(&image))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(text, "  Hello\nworld ");

        let request = timeout(Duration::from_secs(5), server).await.unwrap().unwrap();
        assert!(request.starts_with("POST /v1/chat/completions"));
        assert!(
            request
                .to_ascii_lowercase()
                .contains("authorization: bearer secret")
        );
        assert!(request.contains(&png_data_url(FAKE_PNG)));
        assert!(request.contains("\"max_tokens\":300"));

        std::fs::remove_file(image).ok();
    }

    #[tokio::test]
    async fn unauthorized_maps_to_authentication() {
        let (url, _server) =
            one_shot_server("401 Unauthorized", r#"{"error":{"message":"bad key"}}"#).await;
        let image = write_fake_png();

        let err = recognizer(url, "wrong").recognize(&image).await.unwrap_err();
        match err {
            RecognitionError::Authentication(message) => {
                assert!(message.contains("401"));
                assert!(message.contains("bad key"));
            }
            other => panic!("unexpected error: {other}"),
        }

        std::fs::remove_file(image).ok();
    }

    #[tokio::test]
    async fn forbidden_keeps_server_message() {
        let (url, _server) = one_shot_server(
            "403 Forbidden",
            r#"{"error":{"message":"Incorrect API key provided"}}"#,
        )
        .await;
        let image = write_fake_png();

        let err = recognizer(url, "k").recognize(&image).await.unwrap_err();
        assert!(err.to_string().contains("Incorrect API key provided"));

        std::fs::remove_file(image).ok();
    }

    #[tokio::test]
    async fn server_error_carries_body() {
        let (url, _server) = one_shot_server("500 Internal Server Error", "overloaded").await;
        let image = write_fake_png();

        let err = recognizer(url, "k").recognize(&image).await.unwrap_err();
        match err {
            RecognitionError::Api(message) => {
                assert!(message.contains("500"));
                assert!(message.contains("overloaded"));
            }
            other => panic!("unexpected error: {other}"),
        }

        std::fs::remove_file(image).ok();
    }

    #[tokio::test]
    async fn empty_choices_is_malformed() {
        let (url, _server) = one_shot_server("200 OK", r#"{"choices":[]}"#).await;
        let image = write_fake_png();

        let err = recognizer(url, "k").recognize(&image).await.unwrap_err();
        assert!(matches!(err, RecognitionError::MalformedResponse(_)));

        std::fs::remove_file(image).ok();
    }

    #[tokio::test]
    async fn unreadable_image_is_io_error() {
        let r = recognizer("http://127.0.0.1:9/never".into(), "k");
        let err = r
            .recognize(Path::new("/nonexistent/ocr2gpt/shot.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, RecognitionError::Io(_)));
    }
}
