//! Felt map client.

use super::endpoints::Endpoints;
use super::models::{
    CreateMapRequest, Envelope, FinishUploadRequest, LayerUploadData, LayerUploadRequest,
    MapData, MapSession,
};
use super::staging::StagedCsv;
use super::transport::{ApiRequest, ApiResponse, HttpTransport, Transport, UploadRequest};
use crate::config::{Config, LayerConfig};
use crate::embed::EmbedHtml;
use crate::error::{Error, Result};
use crate::progress::{ProgressSink, TracingProgress, UploadStage};
use crate::table::Table;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Builder for creating a map client.
pub struct MapClientBuilder {
    config: Config,
    token: Option<String>,
    transport: Option<Arc<dyn Transport>>,
    progress: Option<Arc<dyn ProgressSink>>,
}

impl MapClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            token: None,
            transport: None,
            progress: None,
        }
    }

    /// Set the configuration.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Set the API token. Takes precedence over `api.token` in the config.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the HTTP transport.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Set where upload progress is reported.
    pub fn progress(mut self, progress: impl ProgressSink + 'static) -> Self {
        self.progress = Some(Arc::new(progress));
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<MapClient> {
        let token = self
            .token
            .or_else(|| self.config.api.token.clone())
            .ok_or_else(|| Error::auth("No API token provided"))?;

        if self.config.api.timeout_secs == 0 {
            return Err(Error::config("api.timeout_secs must be greater than 0"));
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(Duration::from_secs(
                self.config.api.timeout_secs,
            ))?),
        };
        let progress: Arc<dyn ProgressSink> = match self.progress {
            Some(progress) => progress,
            None => Arc::new(TracingProgress),
        };

        MapClient::with_parts(self.config, token, transport, progress)
    }
}

impl Default for MapClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for one Felt map at a time.
///
/// Call [`create_map`](Self::create_map) first; layers and the embed
/// snippet refer to the map it created.
pub struct MapClient {
    config: Config,
    token: String,
    /// Auth and content-type headers sent on every API call.
    headers: HeaderMap,
    endpoints: Endpoints,
    transport: Arc<dyn Transport>,
    progress: Arc<dyn ProgressSink>,
    session: Option<MapSession>,
}

impl MapClient {
    /// Create a client with default settings.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        MapClientBuilder::new().token(token).build()
    }

    /// Start building a client.
    pub fn builder() -> MapClientBuilder {
        MapClientBuilder::new()
    }

    fn with_parts(
        config: Config,
        token: String,
        transport: Arc<dyn Transport>,
        progress: Arc<dyn ProgressSink>,
    ) -> Result<Self> {
        let headers = auth_headers(&token)?;
        let endpoints = Endpoints::new(&config.api.base_url)?;

        Ok(Self {
            config,
            token,
            headers,
            endpoints,
            transport,
            progress,
            session: None,
        })
    }

    /// The bearer token this client authenticates with.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolved endpoint URLs.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Current map, if one has been created.
    pub fn session(&self) -> Option<&MapSession> {
        self.session.as_ref()
    }

    /// Id of the current map.
    pub fn map_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.map_id.as_str())
    }

    /// Browsing URL of the current map.
    pub fn map_url(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.map_url.as_str())
    }

    /// Embedding URL of the current map.
    pub fn embed_url(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.embed_url.as_str())
    }

    /// Create a new map and make it the current one.
    pub async fn create_map(&mut self, title: &str) -> Result<&MapSession> {
        let url = self.endpoints.maps();
        let response = self
            .post_json(url.clone(), &CreateMapRequest { title })
            .await?;

        let created: Envelope<MapData> = response.parse(url.as_str())?;
        let session = MapSession::new(created.data.id, created.data.attributes.url);
        info!("Created map {} ({})", session.map_id, session.map_url);

        Ok(&*self.session.insert(session))
    }

    /// Upload `table` as a new layer using the configured layer settings.
    ///
    /// Returns the layer id assigned by Felt.
    pub async fn add_layer(&self, table: &Table) -> Result<String> {
        self.add_layer_with(table, &self.config.layer).await
    }

    /// Upload `table` as a new layer with explicit layer settings.
    pub async fn add_layer_with(&self, table: &Table, options: &LayerConfig) -> Result<String> {
        let session = self.require_session()?;
        self.progress.tick(UploadStage::Requesting);

        // Ask Felt for a presigned upload target
        let layers_url = self.endpoints.layers(&session.map_id)?;
        let request = LayerUploadRequest {
            file_names: [options.file_name.as_str()],
            name: &options.layer_name,
        };
        let granted: Envelope<LayerUploadData> = self
            .post_json(layers_url.clone(), &request)
            .await?
            .parse(layers_url.as_str())?;
        let grant = granted.data.attributes;
        self.progress.tick(UploadStage::Granted);

        // Upload the CSV straight to storage
        let upload_url = Url::parse(&grant.url)
            .map_err(|e| Error::response(layers_url.as_str(), format!("bad upload url: {}", e)))?;
        let payload = StagedCsv::stage(table.to_csv(options.include_index)?, options.staging)?;
        debug!(
            "Uploading {} bytes ({} rows) for layer {}",
            payload.len(),
            table.len(),
            grant.layer_id
        );
        self.transport
            .upload(UploadRequest {
                url: upload_url,
                fields: grant.form_fields(),
                file_name: options.file_name.clone(),
                payload,
            })
            .await?
            .error_for_status(&grant.url)?;
        self.progress.tick(UploadStage::Uploaded);

        // Tell Felt the content is in place
        let finish_url = self
            .endpoints
            .finish_upload(&session.map_id, &grant.layer_id)?;
        self.post_json(
            finish_url,
            &FinishUploadRequest {
                filename: &options.file_name,
            },
        )
        .await?;
        self.progress.tick(UploadStage::Finished);

        info!("Layer {} uploaded to map {}", grant.layer_id, session.map_id);
        Ok(grant.layer_id)
    }

    /// Fetch the elements of a map.
    ///
    /// Any status other than 200 is logged and yields `Ok(None)`; only
    /// transport failures and an undecodable body are errors.
    pub async fn pull_elements(&self, map_id: &str) -> Result<Option<Value>> {
        let url = self.endpoints.elements(map_id)?;
        debug!("GET {}", url);

        let response = self
            .transport
            .send(ApiRequest {
                method: Method::GET,
                url,
                headers: self.headers.clone(),
                body: None,
            })
            .await?;

        if response.status != 200 {
            warn!(
                "Failed to retrieve elements for map {}: status {}",
                map_id, response.status
            );
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&response.body)?))
    }

    /// HTML iframe embedding the current map.
    pub fn show(&self) -> Result<EmbedHtml> {
        let session = self.require_session()?;
        Ok(EmbedHtml::render(&session.embed_url, &self.config.embed))
    }

    fn require_session(&self) -> Result<&MapSession> {
        self.session.as_ref().ok_or(Error::MapNotCreated)
    }

    async fn post_json<T: Serialize>(&self, url: Url, body: &T) -> Result<ApiResponse> {
        let endpoint = url.to_string();
        debug!("POST {}", endpoint);

        self.transport
            .send(ApiRequest {
                method: Method::POST,
                url,
                headers: self.headers.clone(),
                body: Some(serde_json::to_value(body)?),
            })
            .await?
            .error_for_status(&endpoint)
    }
}

fn auth_headers(token: &str) -> Result<HeaderMap> {
    if token.trim().is_empty() {
        return Err(Error::auth("API token is empty"));
    }

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| Error::auth("API token contains characters not allowed in a header"))?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}
