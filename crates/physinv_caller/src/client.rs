use std::time::Duration;

use caller_logging::caller_debug;
use futures_util::StreamExt;
use physinv_core::QueryParams;
use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::Method;

use crate::{TransportError, TransportKind};

const SAP_CLIENT_HEADER: &str = "sap-client";

#[derive(Debug, Clone)]
pub struct RequestSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user: Option<String>,
    pub password: Option<String>,
    pub sap_client: Option<String>,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            user: None,
            password: None,
            sap_client: None,
        }
    }
}

/// Performs one HTTP exchange and hands back the full response body.
#[async_trait::async_trait]
pub trait RequestClient: Send + Sync {
    async fn request(
        &self,
        method: Method,
        url: &str,
        query: &QueryParams,
        body: Option<&str>,
    ) -> Result<Vec<u8>, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRequestClient {
    settings: RequestSettings,
    client: reqwest::Client,
    sap_client: Option<HeaderValue>,
}

impl ReqwestRequestClient {
    pub fn new(settings: RequestSettings) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .build()
            .map_err(|err| TransportError::new(TransportKind::Network, err.to_string()))?;
        let sap_client = settings
            .sap_client
            .as_deref()
            .map(HeaderValue::from_str)
            .transpose()
            .map_err(|err| TransportError::new(TransportKind::InvalidHeader, err.to_string()))?;
        Ok(Self {
            settings,
            client,
            sap_client,
        })
    }

    fn build_request(
        &self,
        method: Method,
        url: reqwest::Url,
        query: &QueryParams,
        body: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(user) = self.settings.user.as_deref() {
            builder = builder.basic_auth(user, self.settings.password.as_deref());
        }
        if let Some(sap_client) = &self.sap_client {
            builder = builder.header(SAP_CLIENT_HEADER, sap_client.clone());
        }
        if let Some(body) = body {
            builder = builder.body(body.to_string());
        }
        builder
    }
}

#[async_trait::async_trait]
impl RequestClient for ReqwestRequestClient {
    async fn request(
        &self,
        method: Method,
        url: &str,
        query: &QueryParams,
        body: Option<&str>,
    ) -> Result<Vec<u8>, TransportError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| TransportError::new(TransportKind::InvalidUrl, err.to_string()))?;
        caller_debug!("{} {}", method, parsed);

        let response = self
            .build_request(method, parsed, query, body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                TransportKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        caller_debug!("{} bytes read from {}", bytes.len(), url);
        Ok(bytes)
    }
}

fn too_large(max_bytes: u64, actual: u64) -> TransportError {
    TransportError::new(
        TransportKind::TooLarge {
            max_bytes,
            actual: Some(actual),
        },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(TransportKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return TransportError::new(TransportKind::RedirectLimitExceeded, err.to_string());
    }
    TransportError::new(TransportKind::Network, err.to_string())
}
