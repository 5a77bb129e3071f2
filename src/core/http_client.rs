//! Outbound HTTP client abstraction.
//!
//! Tools never call reqwest directly. They go through [`HttpClient`], so a
//! single shared [`ReqwestHttpClient`] serves every invocation in production
//! and tests can substitute an in-memory implementation.

use async_trait::async_trait;
use reqwest::Url;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while talking to a remote HTTP server.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The request could not be sent or no response was received
    /// (DNS, connect, TLS, timeout).
    #[error("{0}")]
    Send(String),

    /// A response arrived but its body could not be read in full.
    #[error("{0}")]
    Body(String),
}

/// An outbound GET request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: HashMap<String, String>,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: HashMap::new(),
        }
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Remote 4xx and 5xx responses.
    pub fn is_error(&self) -> bool {
        self.status >= 400
    }

    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// HTTP client trait used by tool handlers.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send a request and buffer the whole response body.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// Production HTTP client using reqwest with library-default settings.
#[derive(Debug, Clone, Default)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        // Errors drop the URL: the query string carries the api-key.
        let mut req_builder = self.client.get(request.url);

        for (key, value) in request.headers {
            req_builder = req_builder.header(key, value);
        }

        let response = req_builder
            .send()
            .await
            .map_err(|e| HttpError::Send(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::Body(e.without_url().to_string()))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}
