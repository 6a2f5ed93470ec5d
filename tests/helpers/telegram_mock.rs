//! Mock Telegram API Server for testing
//!
//! A wiremock server answering the Bot API methods the messenger uses, so the
//! teloxide-backed transport can be exercised without network access.

use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_BOT_TOKEN: &str = "123456:test_token";

pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Bot pointed at the mock server
    pub fn bot(&self) -> Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri");
        Bot::new(TEST_BOT_TOKEN).set_api_url(url)
    }

    /// teloxide posts to PascalCase method names, e.g. `/bot<token>/SendMessage`
    fn method_path(name: &str) -> String {
        format!("/bot{}/{}", TEST_BOT_TOKEN, name)
    }

    pub fn message_json(chat_id: i64, message_id: i32, text: &str) -> Value {
        json!({
            "message_id": message_id,
            "from": {
                "id": 12345,
                "is_bot": true,
                "first_name": "AmiHelper",
                "username": "amihelper_bot"
            },
            "chat": {
                "id": chat_id,
                "first_name": "Test",
                "type": "private"
            },
            "date": 1640995200,
            "text": text
        })
    }

    pub fn photo_message_json(chat_id: i64, message_id: i32, caption: &str) -> Value {
        json!({
            "message_id": message_id,
            "chat": {
                "id": chat_id,
                "first_name": "Test",
                "type": "private"
            },
            "date": 1640995200,
            "caption": caption,
            "photo": [{
                "file_id": "photo_file_id",
                "file_unique_id": "photo_unique",
                "width": 640,
                "height": 480,
                "file_size": 1024
            }]
        })
    }

    /// Answer `name` with `{"ok": true, "result": result}`
    pub async fn mock_method(&self, name: &str, result: Value) {
        Mock::given(method("POST"))
            .and(path(Self::method_path(name)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": result
            })))
            .mount(&self.server)
            .await;
    }

    /// Answer `name` only when the request body contains `needle`
    pub async fn mock_method_expecting(&self, name: &str, needle: &str, result: Value, times: u64) {
        Mock::given(method("POST"))
            .and(path(Self::method_path(name)))
            .and(body_string_contains(needle))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": result
            })))
            .expect(times)
            .mount(&self.server)
            .await;
    }

    /// Answer `name` with a Bot API error
    pub async fn mock_error(&self, name: &str, error_code: u16, description: &str) {
        Mock::given(method("POST"))
            .and(path(Self::method_path(name)))
            .respond_with(ResponseTemplate::new(error_code).set_body_json(json!({
                "ok": false,
                "error_code": error_code,
                "description": description
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn received_bodies(&self, name: &str) -> Vec<String> {
        let expected = Self::method_path(name);
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == expected)
            .map(|request| String::from_utf8_lossy(&request.body).into_owned())
            .collect()
    }
}
