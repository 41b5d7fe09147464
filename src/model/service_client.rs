//! HTTP client for the backend and music services

use futures::future::BoxFuture;
use reqwest::header::{HeaderMap, AUTHORIZATION};
use reqwest::Method;
use thiserror::Error;

use super::content::SearchResponse;
use crate::config::ServiceUrls;
use crate::{log_api_request, log_api_result};

/// Service client errors
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Decode(String),

    #[error("Request cancelled")]
    Cancelled,
}

/// Logical name of a remote service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceName {
    Backend,
    MusicService,
}

/// Per-call overrides; defaults to a bare GET
#[derive(Clone, Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
        }
    }
}

/// Explicit client-side session, passed to the client instead of living in
/// a global store.
#[derive(Clone, Debug, Default)]
pub struct Session {
    pub access_token: Option<String>,
}

impl Session {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Anything that can answer a search query.
///
/// The production implementation is `ServiceClient`; tests script their own.
pub trait SearchSource: Send + Sync + 'static {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<SearchResponse, ServiceError>>;
}

/// Service client resolving logical service names to base URLs
#[derive(Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    urls: ServiceUrls,
    session: Session,
}

impl ServiceClient {
    pub fn new(urls: ServiceUrls, session: Session) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("tunescout/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, urls, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Full URL for `path` on `service`
    pub fn url_for(&self, service: ServiceName, path: &str) -> String {
        let base = match service {
            ServiceName::Backend => &self.urls.backend,
            ServiceName::MusicService => &self.urls.music_service,
        };
        format!("{}{}", base, path)
    }

    /// Perform one call. Non-success statuses come back as a response;
    /// only transport failures are errors. No retries, no timeout.
    pub async fn call(
        &self,
        path: &str,
        service: ServiceName,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ServiceError> {
        let url = self.url_for(service, path);
        log_api_request!("call", method = %options.method, url = %url);

        let mut request = self.http.request(options.method, &url).headers(options.headers);
        if let Some(token) = self.session.access_token.as_deref().filter(|t| !t.is_empty()) {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(body) = options.body {
            request = request.body(body);
        }

        Ok(request.send().await?)
    }

    /// `GET /search?query=..` on the music service, decoded into the
    /// strict payload schema
    pub async fn search_music(&self, query: &str) -> Result<SearchResponse, ServiceError> {
        let path = search_path(query);
        let result = self.fetch_search(&path).await;
        log_api_result!("search", result);
        result
    }

    async fn fetch_search(&self, path: &str) -> Result<SearchResponse, ServiceError> {
        let response = self
            .call(path, ServiceName::MusicService, RequestOptions::default())
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status(status.as_u16(), error_text));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

impl SearchSource for ServiceClient {
    fn search<'a>(&'a self, query: &'a str) -> BoxFuture<'a, Result<SearchResponse, ServiceError>> {
        Box::pin(self.search_music(query))
    }
}

/// Relative path of the music search endpoint for `query`
pub fn search_path(query: &str) -> String {
    format!("/search?query={}", urlencoding::encode(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned HTTP response on loopback; the task yields the request head
    async fn serve_once(
        status: &str,
        body: &str,
        session: Session,
    ) -> (ServiceClient, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                head.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&head).into_owned()
        });

        let urls = ServiceUrls {
            backend: format!("http://{}", addr),
            music_service: format!("http://{}", addr),
        };
        (ServiceClient::new(urls, session).unwrap(), server)
    }

    fn client() -> ServiceClient {
        let urls = ServiceUrls {
            backend: "http://localhost:8000".to_string(),
            music_service: "http://localhost:8001".to_string(),
        };
        ServiceClient::new(urls, Session::default()).unwrap()
    }

    #[test]
    fn url_for_resolves_each_service() {
        let client = client();
        assert_eq!(
            client.url_for(ServiceName::Backend, "/users/me"),
            "http://localhost:8000/users/me"
        );
        assert_eq!(
            client.url_for(ServiceName::MusicService, "/search?query=x"),
            "http://localhost:8001/search?query=x"
        );
    }

    #[test]
    fn search_path_encodes_query() {
        assert_eq!(search_path("abbey road"), "/search?query=abbey%20road");
        assert_eq!(search_path("AC/DC"), "/search?query=AC%2FDC");
    }

    #[test]
    fn session_reports_authentication() {
        assert!(!Session::default().is_authenticated());
        assert!(!Session::with_token("").is_authenticated());
        assert!(Session::with_token("abc").is_authenticated());
    }

    #[tokio::test]
    async fn transport_failure_is_an_error() {
        // Nothing listens on port 9 of the loopback interface
        let urls = ServiceUrls {
            backend: "http://127.0.0.1:9".to_string(),
            music_service: "http://127.0.0.1:9".to_string(),
        };
        let client = ServiceClient::new(urls, Session::default()).unwrap();

        let result = client.search_music("anything").await;
        assert!(matches!(result, Err(ServiceError::Transport(_))));
    }

    #[tokio::test]
    async fn non_success_status_is_a_status_error() {
        let (client, server) = serve_once("500 Internal Server Error", "boom", Session::default()).await;

        let result = client.search_music("abbey").await;
        server.await.unwrap();

        match result {
            Err(ServiceError::Status(code, text)) => {
                assert_eq!(code, 500);
                assert_eq!(text, "boom");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_a_decode_error() {
        let (client, server) = serve_once("200 OK", "<html>not json</html>", Session::default()).await;

        let result = client.search_music("abbey").await;
        server.await.unwrap();

        assert!(matches!(result, Err(ServiceError::Decode(_))));
    }

    #[tokio::test]
    async fn search_sends_encoded_query_and_bearer_token() {
        let body = r#"{"tracks": {"items": null}, "albums": {"items": [null, {"id": "a1", "name": "Abbey Road"}]}}"#;
        let (client, server) = serve_once("200 OK", body, Session::with_token("secret")).await;

        let response = client.search_music("abbey road").await.unwrap();
        let head = server.await.unwrap();

        assert!(head.starts_with("GET /search?query=abbey%20road HTTP/1.1"));
        assert!(head.to_ascii_lowercase().contains("authorization: bearer secret"));

        let albums = response.albums.unwrap_or_default().items;
        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].id, "a1");
        assert!(response.tracks.unwrap_or_default().items.is_empty());
        assert!(response.artists.is_none());
    }
}
