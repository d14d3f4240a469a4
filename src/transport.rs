use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_ENCODING,
    CONTENT_TYPE, WWW_AUTHENTICATE,
};

use crate::{Error, Result};

use crate::enums::HttpMethod;

/// What user agent string to present to Atlas
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_2) AppleWebKit/601.3.9 (KHTML, like Gecko) Version/9.0.2 Safari/601.3.9";

/// One HTTP exchange as the handshake sees it.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub authorization: Option<String>,
    pub body: Option<RequestBody>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestBody {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The slice of a response the handshake cares about.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    /// `WWW-Authenticate` value, present on the 401 challenge
    pub www_authenticate: Option<String>,
    /// `Content-Encoding` tokens, used to pick the framing decode
    pub content_encoding: Vec<String>,
    pub body: Vec<u8>,
}

/// Seam between the handshake and the wire; test doubles implement this.
///
/// Timeouts and cancellation belong to the implementation, not the
/// handshake - the engine imposes none of its own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed transport with the Atlas default headers.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build the underlying client. `zip_response` asks the server for gzip
    /// framing; the trailer decode happens downstream, so the client itself
    /// must not transparently decompress anything.
    pub fn new(zip_response: bool) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let encoding: &'static str = if zip_response { "gzip, deflate, br" } else { "json" };
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static(encoding));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let method = reqwest::Method::from_bytes(request.method.to_string().as_bytes())
            .map_err(|e| Error::Transport(Box::new(e)))?;

        let mut builder = self.client.request(method, &request.url);

        if let Some(auth) = &request.authorization {
            builder = builder.header(AUTHORIZATION, auth);
        }

        if let Some(body) = &request.body {
            builder = builder
                .header(CONTENT_TYPE, &body.content_type)
                .body(body.bytes.clone());
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let www_authenticate = response
            .headers()
            .get(WWW_AUTHENTICATE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let content_encoding = response
            .headers()
            .get_all(CONTENT_ENCODING)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(','))
            .map(|v| v.trim().to_string())
            .collect();

        let body = response.bytes().await?.to_vec();

        Ok(ApiResponse {
            status,
            www_authenticate,
            content_encoding,
            body,
        })
    }
}
