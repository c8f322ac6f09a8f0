//! Shared fixtures for unit tests: an in-process mock of the chat-completion
//! endpoint and small PDF builders.

use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use lopdf::{dictionary, Document, Object, Stream};

use crate::config::CompletionConfig;
use crate::llm_client::CompletionClient;

pub const TEST_API_KEY: &str = "gsk_test_key";

/// Canned response served by the mock endpoint.
#[derive(Debug, Clone)]
pub struct MockCompletion {
    status: u16,
    body: String,
}

impl MockCompletion {
    pub fn ok(body: &str) -> Self {
        Self::status(200, body)
    }

    /// A 200 response whose first choice carries `content`.
    pub fn content(content: &str) -> Self {
        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        });
        Self::ok(&body.to_string())
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

struct MockState {
    response: MockCompletion,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockServer {
    pub url: String,
    state: Arc<MockState>,
}

impl MockServer {
    pub fn hits(&self) -> usize {
        self.state.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.lock().unwrap().last().cloned()
    }

    /// A client pointed at this mock with the test credential.
    pub fn client(&self) -> CompletionClient {
        CompletionClient::new(CompletionConfig {
            api_url: self.url.clone(),
            ..CompletionConfig::new(Some(TEST_API_KEY.to_string()))
        })
    }
}

/// Serves `response` for every POST to `/v1/chat/completions` on an ephemeral port.
pub async fn spawn_mock_completion(response: MockCompletion) -> MockServer {
    let state = Arc::new(MockState {
        response,
        requests: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .route("/v1/chat/completions", post(mock_handler))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    MockServer {
        url: format!("http://{addr}/v1/chat/completions"),
        state,
    }
}

async fn mock_handler(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    state.requests.lock().unwrap().push(RecordedRequest {
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body: serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null),
    });

    let status = StatusCode::from_u16(state.response.status).unwrap();
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        state.response.body.clone(),
    )
        .into_response()
}

/// Content of one page in a generated PDF.
#[derive(Debug, Clone, Copy)]
pub enum PageContent<'a> {
    Text(&'a str),
    /// A page with an empty content stream, standing in for a scanned image.
    Blank,
}

/// Builds a PDF with one page per entry, using the Helvetica base font.
pub fn build_pdf(pages: &[PageContent<'_>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.4");

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for page in pages {
        let content = match page {
            PageContent::Text(text) => format!(
                "BT /F1 12 Tf 100 700 Td ({}) Tj ET",
                text.replace('\\', "\\\\")
                    .replace('(', "\\(")
                    .replace(')', "\\)")
            ),
            PageContent::Blank => String::new(),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Resources" => resources_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| id.into()).collect();
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => Object::Integer(pages.len() as i64),
    });

    for page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(*page_id) {
            dict.set("Parent", pages_id);
        }
    }

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

/// The two-page sample résumé used by end-to-end tests.
pub fn sample_resume_pdf() -> Vec<u8> {
    build_pdf(&[
        PageContent::Text("Jane Doe,"),
        PageContent::Text("Python developer"),
    ])
}

/// Hand-rolled `multipart/form-data` body for router tests.
pub struct MultipartBody {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self {
            boundary: "resume-bot-test-boundary".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n",
                self.boundary
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (self.content_type(), self.body)
    }
}
