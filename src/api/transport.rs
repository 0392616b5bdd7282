//! HTTP transport used by the map client.

use super::staging::StagedCsv;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// A JSON call against the Felt API.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

/// A multipart POST to a presigned storage target.
#[derive(Debug)]
pub struct UploadRequest {
    pub url: Url,
    /// Presigned form fields, sent before the file part.
    pub fields: Vec<(String, String)>,
    pub file_name: String,
    pub payload: StagedCsv,
}

/// Raw status and body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    /// Build a response from its status and body.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Fail with [`Error::Status`] unless the status is 2xx.
    pub fn error_for_status(self, endpoint: &str) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::status(endpoint, self.status, self.body))
        }
    }

    /// Decode the body, reporting shape mismatches against `endpoint`.
    pub fn parse<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| Error::response(endpoint, e.to_string()))
    }
}

/// Performs the HTTP exchanges for a [`MapClient`](super::MapClient).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a JSON request.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;

    /// Send a presigned multipart upload.
    async fn upload(&self, request: UploadRequest) -> Result<ApiResponse>;
}

/// [`Transport`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    async fn finish(response: reqwest::Response) -> Result<ApiResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        Self::finish(builder.send().await?).await
    }

    async fn upload(&self, request: UploadRequest) -> Result<ApiResponse> {
        let mut form = Form::new();
        for (name, value) in request.fields {
            form = form.text(name, value);
        }
        // Storage targets expect the file after every policy field.
        let part = request.payload.to_part(&request.file_name).await?;
        form = form.part("file", part);

        let response = self
            .client
            .post(request.url)
            .multipart(form)
            .send()
            .await?;

        // `request.payload` is still alive here, so a spooled file outlives the send.
        Self::finish(response).await
    }
}
