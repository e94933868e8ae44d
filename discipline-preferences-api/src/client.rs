// https://github.com/hyperium/hyper/blob/master/examples/client.rs
// https://github.com/rustls/tokio-rustls/blob/main/examples/client.rs

use core::fmt::{self, Debug};
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::{BodyExt as _, Full};
use hyper::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HOST};
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use serde::de::DeserializeOwned;
use tokio::net::TcpStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tracing::{debug, trace};
use url::{Host, Position, Url};

use crate::error::{ApiError, Result};
use crate::models::{
    Discipline, LoginRequest, LoginResponse, Preference, PreferenceKey, PreferenceRequest,
    RegisterRequest, User, UserUpdate,
};
use crate::session::Session;
use crate::PreferenceApi;

/// Talks to the backend over HTTP/1.1, opening one connection per request.
#[derive(Clone)]
pub struct ApiClient {
    /// The path always ends with a `/`.
    base_url: Url,
    session: Option<Session>,
    tls: Arc<ClientConfig>,
}

struct RawResponse {
    status: StatusCode,
    body: Bytes,
}

impl RawResponse {
    fn error_for_status(self) -> Result<Bytes> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            Err(ApiError::Status {
                status: self.status,
                body: String::from_utf8_lossy(&self.body).into_owned(),
            })
        }
    }
}

impl Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::UnsupportedScheme(base_url.into()));
        }
        if base_url.host().is_none() {
            return Err(ApiError::MissingHost(base_url.into()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            session: None,
            tls: Arc::new(tls_config()),
        })
    }

    #[must_use]
    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `segments` are percent-encoded one by one and appended to the base url.
    fn endpoint(&self, segments: &[&str], query: Option<&str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::UnsupportedScheme(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.set_query(query);
        Ok(url)
    }

    async fn send(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<RawResponse> {
        let host = url
            .host()
            .ok_or_else(|| ApiError::MissingHost(url.to_string()))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| ApiError::UnsupportedScheme(url.to_string()))?;
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        let mut builder = Request::builder()
            .method(method.clone())
            .uri(&url[Position::BeforePath..])
            .header(HOST, authority)
            .header(ACCEPT, "application/json");
        if let Some(token) = self
            .session
            .as_ref()
            .and_then(|session| session.token.as_deref())
        {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Full::new(Bytes::from(body)))?,
            None => builder.body(Full::new(Bytes::new()))?,
        };

        debug!(%method, %url, "sending request");

        let stream = match &host {
            Host::Domain(domain) => TcpStream::connect((*domain, port)).await?,
            Host::Ipv4(ip) => TcpStream::connect((*ip, port)).await?,
            Host::Ipv6(ip) => TcpStream::connect((*ip, port)).await?,
        };
        let response = if url.scheme() == "https" {
            let connector = TlsConnector::from(Arc::clone(&self.tls));
            let stream = connector.connect(server_name(&host)?, stream).await?;
            exchange(TokioIo::new(stream), request).await?
        } else {
            exchange(TokioIo::new(stream), request).await?
        };

        debug!(%method, %url, status = %response.status, "received response");
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<T> {
        let body = self
            .send(method, url, body)
            .await?
            .error_for_status()?;
        decode(&body)
    }

    async fn message(&self, method: Method, url: Url, body: Option<Vec<u8>>) -> Result<String> {
        let body = self
            .send(method, url, body)
            .await?
            .error_for_status()?;
        Ok(message_text(&body))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = serde_json::to_vec(&LoginRequest { email, password })?;
        self.json(Method::POST, self.endpoint(&["login"], None)?, Some(body))
            .await
    }

    pub async fn register(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<String> {
        let body = serde_json::to_vec(&RegisterRequest {
            email,
            first_name,
            last_name,
            password,
        })?;
        self.message(Method::POST, self.endpoint(&["registerUser"], None)?, Some(body))
            .await
    }

    pub async fn user(&self, user_id: &str) -> Result<User> {
        self.json(Method::GET, self.endpoint(&["user", user_id], None)?, None)
            .await
    }

    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<String> {
        let body = serde_json::to_vec(update)?;
        self.message(
            Method::PUT,
            self.endpoint(&["user", user_id], None)?,
            Some(body),
        )
        .await
    }

    pub async fn institutions(&self) -> Result<Vec<String>> {
        self.json(Method::GET, self.endpoint(&["institutions"], None)?, None)
            .await
    }
}

impl PreferenceApi for ApiClient {
    async fn discipline(&self, id: &str) -> Result<Discipline> {
        self.json(Method::GET, self.endpoint(&["discipline", id], None)?, None)
            .await
    }

    async fn disciplines(&self) -> Result<Vec<Discipline>> {
        self.json(Method::GET, self.endpoint(&["disciplines"], None)?, None)
            .await
    }

    async fn user_preference(&self, discipline: &str, user: &str) -> Result<Option<Preference>> {
        let query = serde_urlencoded::to_string(PreferenceKey { discipline, user })?;
        let url = self.endpoint(&["preference"], Some(&query))?;
        let response = self.send(Method::GET, url, None).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = response.error_for_status()?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        decode(&body)
    }

    async fn create_preference(
        &self,
        discipline: &str,
        user: &str,
        options: &[String],
    ) -> Result<String> {
        let body = serde_json::to_vec(&PreferenceRequest {
            discipline,
            user,
            options,
        })?;
        let url = self.endpoint(&["preference"], None)?;
        self.message(Method::POST, url, Some(body)).await
    }

    async fn update_preference(
        &self,
        discipline: &str,
        user: &str,
        options: &[String],
    ) -> Result<String> {
        let body = serde_json::to_vec(&PreferenceRequest {
            discipline,
            user,
            options,
        })?;
        let url = self.endpoint(&["preference"], None)?;
        self.message(Method::PUT, url, Some(body)).await
    }

    async fn finalize_preference(&self, discipline: &str, user: &str) -> Result<String> {
        let body = serde_json::to_vec(&PreferenceKey { discipline, user })?;
        let url = self.endpoint(&["preference", "finalize"], None)?;
        self.message(Method::POST, url, Some(body)).await
    }

    async fn reset_discipline_preferences(&self, discipline: &str, user: &str) -> Result<String> {
        let body = serde_json::to_vec(&PreferenceKey { discipline, user })?;
        let url = self.endpoint(&["preference", "reset"], None)?;
        self.message(Method::POST, url, Some(body)).await
    }

    async fn delete_preference(&self, discipline: &str, user: &str) -> Result<String> {
        let query = serde_urlencoded::to_string(PreferenceKey { discipline, user })?;
        let url = self.endpoint(&["preference"], Some(&query))?;
        self.message(Method::DELETE, url, None).await
    }
}

async fn exchange<T>(io: T, request: Request<Full<Bytes>>) -> Result<RawResponse>
where
    T: hyper::rt::Read + hyper::rt::Write + Unpin + Send + 'static,
{
    let (mut sender, connection) = hyper::client::conn::http1::handshake(io).await?;
    tokio::task::spawn(async move {
        if let Err(error) = connection.await {
            debug!("connection failed: {error}");
        }
    });

    let response = sender.send_request(request).await?;
    let status = response.status();
    let body = response.into_body().collect().await?.to_bytes();
    trace!(?body, "response body");
    Ok(RawResponse { status, body })
}

fn tls_config() -> ClientConfig {
    let mut root_cert_store = RootCertStore::empty();
    root_cert_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    ClientConfig::builder()
        .with_root_certificates(root_cert_store)
        .with_no_client_auth()
}

fn server_name(host: &Host<&str>) -> Result<ServerName<'static>> {
    let name = match host {
        Host::Domain(domain) => (*domain).to_owned(),
        Host::Ipv4(ip) => ip.to_string(),
        Host::Ipv6(ip) => ip.to_string(),
    };
    ServerName::try_from(name.clone()).map_err(|_| ApiError::InvalidDnsName(name))
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    let deserializer = &mut serde_json::Deserializer::from_slice(body);
    Ok(serde_path_to_error::deserialize(deserializer)?)
}

/// The backend answers most writes with a bare message, sometimes json encoded.
fn message_text(body: &[u8]) -> String {
    serde_json::from_slice::<String>(body)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::{message_text, ApiClient};
    use crate::error::ApiError;
    use crate::session::Session;

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = ApiClient::new("http://localhost:8080").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/");
        let client = ApiClient::new("https://example.org/api").unwrap();
        assert_eq!(client.base_url(), "https://example.org/api/");
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            ApiClient::new("ftp://example.org/"),
            Err(ApiError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            ApiClient::new("/relative/"),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn endpoints_keep_the_base_path_and_encode_segments() {
        let client = ApiClient::new("https://example.org/api/").unwrap();
        assert_eq!(
            client.endpoint(&["discipline", "61f0a2b3c4"], None).unwrap().as_str(),
            "https://example.org/api/discipline/61f0a2b3c4"
        );
        assert_eq!(
            client.endpoint(&["user", "a b/c"], None).unwrap().as_str(),
            "https://example.org/api/user/a%20b%2Fc"
        );
        assert_eq!(
            client
                .endpoint(&["preference"], Some("discipline=d1&user=u1"))
                .unwrap()
                .as_str(),
            "https://example.org/api/preference?discipline=d1&user=u1"
        );

        let client = ApiClient::new("http://[::1]:8080").unwrap();
        let url = client.endpoint(&["disciplines"], None).unwrap();
        assert_eq!(url.as_str(), "http://[::1]:8080/disciplines");
        assert_eq!(url.port_or_known_default(), Some(8080));
    }

    #[test]
    fn debug_output_hides_the_token() {
        let client = ApiClient::new("http://localhost:8080/")
            .unwrap()
            .with_session(Some(Session {
                user_id: "u1".to_owned(),
                token: Some("top-secret-jwt".to_owned()),
            }));
        let debug = format!("{client:?}");
        assert!(debug.contains("u1"), "{debug}");
        assert!(debug.contains("localhost:8080"), "{debug}");
        assert!(!debug.contains("top-secret-jwt"), "{debug}");
    }

    #[test]
    fn messages() {
        assert_eq!(message_text(br#""Preference saved""#), "Preference saved");
        assert_eq!(message_text(b"Preference saved\n"), "Preference saved");
        assert_eq!(message_text(br#"{"ok":true}"#), r#"{"ok":true}"#);
    }
}
