use reqwest::{Client, Response, header};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

use crate::errors::{SourceError, SourceResult};

/// Error body shapes upstreams are known to send with non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// JSON-over-HTTP client shared by the upstream sources.
///
/// Every call is bounded by the timeout the client was built with; an
/// elapsed timeout surfaces as [`SourceError::Timeout`].
#[derive(Debug, Clone)]
pub struct StandardHttpClient {
    client: Client,
    service: &'static str,
}

impl StandardHttpClient {
    /// Create new HTTP client for `service` with a total per-request timeout
    pub fn new(service: &'static str, timeout: Duration, user_agent: &str) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| {
                SourceError::transport(service, format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, service })
    }

    /// GET `url` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> SourceResult<T> {
        debug!(service = self.service, url, "GET upstream");

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json; charset=utf-8")
            .send()
            .await
            .map_err(|e| self.map_request_error(e, url))?;

        self.process_response(response, url).await
    }

    /// POST `body` as JSON to `url` and decode the JSON body
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> SourceResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!(service = self.service, url, "POST upstream");

        let response = self
            .client
            .post(url)
            .header(header::ACCEPT, "application/json; charset=utf-8")
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e, url))?;

        self.process_response(response, url).await
    }

    async fn process_response<T: DeserializeOwned>(
        &self,
        response: Response,
        url: &str,
    ) -> SourceResult<T> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.map_request_error(e, url))?;

        if !status.is_success() {
            let message = Self::error_message(&bytes).unwrap_or_else(|| {
                format!("unknown error, status code: {}", status.as_u16())
            });
            return Err(SourceError::http(status.as_u16(), message));
        }

        debug!(service = self.service, bytes = bytes.len(), "upstream responded");

        serde_json::from_slice(&bytes)
            .map_err(|e| SourceError::decode(self.service, format!("Failed to parse JSON: {e}")))
    }

    fn error_message(body: &[u8]) -> Option<String> {
        let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
        parsed
            .message
            .or_else(|| parsed.error.and_then(|detail| detail.message))
            .filter(|message| !message.is_empty())
    }

    fn map_request_error(&self, error: reqwest::Error, url: &str) -> SourceError {
        if error.is_timeout() {
            SourceError::timeout(url)
        } else if error.is_decode() {
            SourceError::decode(self.service, error.to_string())
        } else {
            SourceError::transport(self.service, error.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::time::Instant;
    use tokio::net::TcpListener;

    fn client(timeout: Duration) -> StandardHttpClient {
        StandardHttpClient::new("test", timeout, "pokedex-proxy/test").unwrap()
    }

    /// Accepts connections and holds them open without ever answering
    async fn silent_upstream() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/species/mewtwo")
            .match_header("accept", "application/json; charset=utf-8")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"name":"mewtwo"}"#)
            .expect(1)
            .create_async()
            .await;

        let value: Value = client(Duration::from_secs(3))
            .get_json(&format!("{}/species/mewtwo", server.url()))
            .await
            .unwrap();

        assert_eq!(value, json!({"name": "mewtwo"}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_json_sends_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/yoda.json")
            .match_body(mockito::Matcher::Json(json!({"text": "hello"})))
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let value: Value = client(Duration::from_secs(3))
            .post_json(&format!("{}/yoda.json", server.url()), &json!({"text": "hello"}))
            .await
            .unwrap();

        assert_eq!(value, json!({"ok": true}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_uses_error_body_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/yoda.json")
            .with_status(429)
            .with_body(r#"{"error":{"code":429,"message":"Too Many Requests"}}"#)
            .create_async()
            .await;

        let err = client(Duration::from_secs(3))
            .post_json::<_, Value>(
                &format!("{}/yoda.json", server.url()),
                &json!({"text": "x"}),
            )
            .await
            .unwrap_err();

        match err {
            SourceError::Http { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Too Many Requests");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_success_status_without_json_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/missingno")
            .with_status(404)
            .with_body("Not Found")
            .create_async()
            .await;

        let err = client(Duration::from_secs(3))
            .get_json::<Value>(&format!("{}/missingno", server.url()))
            .await
            .unwrap_err();

        match err {
            SourceError::Http { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "unknown error, status code: 404");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/broken")
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let err = client(Duration::from_secs(3))
            .get_json::<Value>(&format!("{}/broken", server.url()))
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 9 (discard) on localhost is not expected to be listening
        let err = client(Duration::from_secs(3))
            .get_json::<Value>("http://127.0.0.1:9/species")
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Transport { .. } | SourceError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_unanswered_get_times_out() {
        let url = format!("{}/species/mewtwo", silent_upstream().await);
        let started = Instant::now();

        let err = client(Duration::from_millis(300))
            .get_json::<Value>(&url)
            .await
            .unwrap_err();

        match err {
            SourceError::Timeout { url: failed } => assert_eq!(failed, url),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_unanswered_post_times_out() {
        let url = format!("{}/yoda.json", silent_upstream().await);

        let err = client(Duration::from_millis(300))
            .post_json::<_, Value>(&url, &json!({"text": "x"}))
            .await
            .unwrap_err();

        assert!(matches!(err, SourceError::Timeout { .. }));
        assert_eq!(err.kind(), "timeout");
    }
}
