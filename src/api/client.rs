//! GitHub API client implementation.
//!
//! The client owns a base URL and an authenticated transport. It builds
//! requests with the headers the GitHub REST API expects and decodes JSON
//! responses. Status codes are reported, never judged: callers decide what
//! counts as success.

use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Request, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use super::error::{ApiError, Result};
use super::issues::IssuesService;
use super::transport::{BearerAuth, Transport};

/// Default GitHub REST API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com/";

/// Versioned JSON media type sent in `Accept`.
pub const DEFAULT_MEDIA_TYPE: &str = "application/vnd.github+json";

/// REST API version pinned for every request.
pub const DEFAULT_API_VERSION: &str = "2022-11-28";

/// Header carrying the REST API version.
pub const HEADER_API_VERSION: &str = "x-github-api-version";

/// Status and metadata of a response whose body has been decoded.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// The final URL of the response.
    pub url: Url,
}

impl ApiResponse {
    /// Check that the response carried `expected`.
    ///
    /// The client never calls this itself; it is an opt-in check for callers.
    pub fn expect_status(&self, expected: StatusCode) -> Result<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(ApiError::UnexpectedStatus {
                expected,
                actual: self.status,
            })
        }
    }
}

/// The GitHub API client.
///
/// The base URL is fixed at construction; the client is safe to share
/// across tasks.
pub struct ApiClient {
    /// The authenticated transport.
    transport: Box<dyn Transport>,
    /// The base URL every request path is resolved against.
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be used as a header value or the
    /// default base URL fails to parse.
    pub fn new<T: Transport + 'static>(transport: T, token: &str) -> Result<Self> {
        Self::with_base_url(transport, token, DEFAULT_BASE_URL)
    }

    /// Create a client against an explicit base URL.
    ///
    /// Use this for GitHub Enterprise hosts or mock servers. A trailing
    /// slash is added when missing so relative paths resolve beneath it.
    pub fn with_base_url<T: Transport + 'static>(
        transport: T,
        token: &str,
        base_url: &str,
    ) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let transport = BearerAuth::new(transport, token)?;
        debug!(base_url = %base_url, "Created GitHub API client");

        Ok(Self {
            transport: Box::new(transport),
            base_url,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Access the issues API.
    pub fn issues(&self) -> IssuesService<'_> {
        IssuesService::new(self)
    }

    /// Build a request without sending it.
    ///
    /// `path` may be absolute or relative and is resolved against the base
    /// URL. A present `body` is serialized to JSON. `Accept` and the API
    /// version header are set on every request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidPath` if `path` is not a valid URL
    /// reference, or `ApiError::Serialize` if the body cannot be encoded.
    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self.resolve(path)?;
        let mut request = Request::new(method, url);

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body).map_err(ApiError::Serialize)?;
            *request.body_mut() = Some(bytes.into());
            request.headers_mut().insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }

        let headers = request.headers_mut();
        headers.insert(header::ACCEPT, HeaderValue::from_static(DEFAULT_MEDIA_TYPE));
        headers.insert(
            HeaderName::from_static(HEADER_API_VERSION),
            HeaderValue::from_static(DEFAULT_API_VERSION),
        );

        Ok(request)
    }

    /// Send a request and decode the JSON body into `T`.
    ///
    /// The body is decoded whatever the status code; a 404 with an error
    /// document is not an error here. Check [`ApiResponse::status`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Network` if the exchange fails and
    /// `ApiError::Decode` if the body is not JSON matching `T`.
    #[instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<(T, ApiResponse)> {
        let response = self.transport.round_trip(request).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let url = response.url().clone();
        debug!(status = %status, "Received response");

        // Reading to the end releases the connection back to the pool.
        let bytes = response.bytes().await?;

        let value = serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode {
            status,
            source,
        })?;

        Ok((
            value,
            ApiResponse {
                status,
                headers,
                url,
            },
        ))
    }

    /// Resolve `path` against the base URL.
    fn resolve(&self, path: &str) -> Result<Url> {
        validate_reference(path).map_err(|reason| ApiError::InvalidPath {
            path: path.to_string(),
            reason,
        })?;

        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Parse the base URL, ensuring a trailing slash.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// Check that `reference` is a well-formed RFC 3986 URI reference.
///
/// The WHATWG parser behind [`Url::join`] repairs many malformed inputs
/// silently; this rejects them instead.
fn validate_reference(reference: &str) -> std::result::Result<(), String> {
    if let Some(c) = reference
        .chars()
        .find(|c| c.is_whitespace() || c.is_control())
    {
        return Err(format!("contains invalid character {:?}", c));
    }

    if reference.matches('#').count() > 1 {
        return Err("contains more than one '#'".to_string());
    }

    let bytes = reference.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if *b == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(format!("invalid percent-escape at byte {}", i));
            }
        }
    }

    Ok(())
}
