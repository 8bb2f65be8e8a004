//! Thin JSON client for the hotel REST API

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::domain::{Credential, DomainError, DomainResult};
use crate::infrastructure::InfraError;

/// Query string pairs, in the order they are sent
pub type Query = Vec<(&'static str, String)>;

/// HTTP client bound to the API base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, InfraError> {
        let base_url = ensure_slash(&Url::parse(base_url)?);
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&'static str, String)]) -> Result<Url, InfraError> {
        let mut url = self.base_url.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        auth: Option<&Credential>,
        path: &str,
        query: &[(&'static str, String)],
    ) -> DomainResult<(RequestBuilder, Url)> {
        let url = self.endpoint(path, query)?;
        let mut request = self.client.request(method, url.clone());
        if let Some(credential) = auth {
            request = request.header(reqwest::header::AUTHORIZATION, credential.authorization_header());
        }
        Ok((request, url))
    }

    /// Send the request and return the body of a successful response.
    async fn execute(&self, request: RequestBuilder, url: &Url) -> DomainResult<String> {
        debug!(%url, "Calling API");
        let response = request.send().await.map_err(|e| {
            error!(%url, error = %e, "API request failed");
            InfraError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(%url, status = status.as_u16(), error = %e, "Failed to read API response body");
            InfraError::from(e)
        })?;

        if status.is_success() {
            return Ok(body);
        }

        error!(%url, status = status.as_u16(), "API returned an error");
        debug!(%url, body = %body, "Error response body");
        Err(status_error(status, body))
    }

    fn decode<T: DeserializeOwned>(url: &Url, body: &str) -> DomainResult<T> {
        serde_json::from_str(body).map_err(|e| {
            error!(%url, error = %e, "Failed to parse API response");
            debug!(%url, body = %body, "Unparsable response body");
            InfraError::from(e).into()
        })
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        auth: Option<&Credential>,
        path: &str,
        query: &[(&'static str, String)],
    ) -> DomainResult<T> {
        let (request, url) = self.request(Method::GET, auth, path, query)?;
        let body = self.execute(request, &url).await?;
        Self::decode(&url, &body)
    }

    /// POST/PUT a JSON body and decode the JSON answer.
    pub async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        auth: Option<&Credential>,
        path: &str,
        body: &B,
    ) -> DomainResult<T> {
        let (request, url) = self.request(method, auth, path, &[])?;
        let text = self.execute(request.json(body), &url).await?;
        Self::decode(&url, &text)
    }

    /// POST/PUT a JSON body, ignoring whatever comes back.
    pub async fn send_ignoring_reply<B: Serialize + ?Sized>(
        &self,
        method: Method,
        auth: Option<&Credential>,
        path: &str,
        body: &B,
    ) -> DomainResult<()> {
        let (request, url) = self.request(method, auth, path, &[])?;
        self.execute(request.json(body), &url).await.map(|_| ())
    }

    /// Body-less call such as DELETE or a state-transition POST.
    pub async fn call(&self, method: Method, auth: Option<&Credential>, path: &str) -> DomainResult<()> {
        let (request, url) = self.request(method, auth, path, &[])?;
        self.execute(request, &url).await.map(|_| ())
    }
}

fn status_error(status: StatusCode, body: String) -> DomainError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DomainError::Unauthorized(if body.is_empty() {
            status.to_string()
        } else {
            body
        }),
        _ => DomainError::Rejected {
            status: status.as_u16(),
            body,
        },
    }
}

/// Turn a 404 on an id path into `NotFound` for that entity.
pub fn missing(entity: &'static str, id: i64) -> impl FnOnce(DomainError) -> DomainError {
    move |err| match err {
        DomainError::Rejected { status: 404, .. } => DomainError::not_found(entity, id),
        other => other,
    }
}

/// Makes sure a url has a trailing slash.
///
/// `Url::join` replaces the last path segment unless the base ends in '/',
/// so `http://host/api` joined with `rooms/` would lose `api`.
fn ensure_slash(url: &Url) -> Url {
    if url.path().ends_with('/') {
        url.clone()
    } else {
        let mut new_url = url.clone();
        let mut path = new_url.path().to_string();
        path.push('/');
        new_url.set_path(&path);
        new_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_without_slash_keeps_its_path() {
        let api = ApiClient::new("http://127.0.0.1:8000/api", Duration::from_secs(1)).unwrap();
        assert_eq!(api.base_url().as_str(), "http://127.0.0.1:8000/api/");
        let url = api.endpoint("habitaciones/3/", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/habitaciones/3/");
    }

    #[test]
    fn query_pairs_are_encoded() {
        let api = ApiClient::new("http://localhost/api/", Duration::from_secs(1)).unwrap();
        let url = api
            .endpoint("pagos/", &[("search", "María 10".to_string()), ("estado", "exitoso".to_string())])
            .unwrap();
        assert_eq!(url.query(), Some("search=Mar%C3%ADa+10&estado=exitoso"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new("not a url", Duration::from_secs(1)),
            Err(InfraError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn truncated_body_is_a_transport_error() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 2048];
            let _ = socket.read(&mut request).await;
            // promises 100 bytes, sends a few, then hangs up
            let _ = socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n[{\"id\"",
                )
                .await;
        });

        let api = ApiClient::new(&format!("http://{}/api/", addr), Duration::from_secs(5)).unwrap();
        let result: DomainResult<Vec<serde_json::Value>> = api.get(None, "habitaciones/", &[]).await;
        match result {
            Err(DomainError::Transport(msg)) => assert!(!msg.starts_with("unexpected response"), "{}", msg),
            other => panic!("expected a transport error, got {:?}", other),
        }
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(
            status_error(StatusCode::FORBIDDEN, String::new()),
            DomainError::Unauthorized(_)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "bad".into()),
            DomainError::Rejected { status: 400, .. }
        ));
        let not_found = missing("room", 4)(status_error(StatusCode::NOT_FOUND, String::new()));
        assert!(matches!(not_found, DomainError::NotFound { entity: "room", id: 4 }));
    }
}
