use std::time::Instant;

use async_trait::async_trait;
use log::{error, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Proxy, Response};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::TransportError;
use crate::request::{ChatReply, TextRequest, UploadReply, UploadRequest};

const CHAT_PATH: &str = "chat";
const UPLOAD_PATH: &str = "upload";

/// The network capability the workflow depends on.
#[async_trait]
pub trait TransportClient: Send + Sync {
    async fn send_message(&self, request: &TextRequest) -> Result<ChatReply, TransportError>;

    async fn send_upload(&self, request: &UploadRequest) -> Result<UploadReply, TransportError>;
}

/// [`TransportClient`] speaking JSON and `multipart/form-data` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = Self::build_http_client(config)?;
        Ok(Self::with_client(client, config.api_base.as_str()))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_http_client(config: &Config) -> Result<Client, TransportError> {
        let mut builder = Client::builder();
        if !config.http_proxy.is_empty() {
            builder = builder.proxy(Proxy::http(&config.http_proxy)?);
        }
        if !config.https_proxy.is_empty() {
            builder = builder.proxy(Proxy::https(&config.https_proxy)?);
        }
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Files first, each as its own `files` part, then `message` and `fileCount`.
    fn build_form(request: &UploadRequest) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for file in &request.files {
            let part = Part::bytes(file.content().to_vec())
                .file_name(file.name().to_string())
                .mime_str(file.content_type())?;
            form = form.part("files", part);
        }

        Ok(form
            .text("message", request.message.clone())
            .text("fileCount", request.file_count().to_string()))
    }

    async fn read_json<T: DeserializeOwned>(
        url: &str,
        response: Response,
    ) -> Result<T, TransportError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("{} returned {}: {}", url, status, body);
            return Err(TransportError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to decode response from {}: {}", url, e);
            TransportError::Decode(e)
        })
    }
}

#[async_trait]
impl TransportClient for HttpTransport {
    async fn send_message(&self, request: &TextRequest) -> Result<ChatReply, TransportError> {
        let url = self.endpoint(CHAT_PATH);
        info!("Sending POST request to {}", url);

        let start_time = Instant::now();
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Failed HTTP request to {}: {}", url, e);
                TransportError::Http(e)
            })?;

        info!(
            "Got response from {} after {:?} with status {}",
            url,
            start_time.elapsed(),
            response.status()
        );

        Self::read_json(&url, response).await
    }

    async fn send_upload(&self, request: &UploadRequest) -> Result<UploadReply, TransportError> {
        let url = self.endpoint(UPLOAD_PATH);
        let form = Self::build_form(request)?;
        info!("Uploading {} file(s) to {}", request.file_count(), url);

        let start_time = Instant::now();
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Failed HTTP request to {}: {}", url, e);
                TransportError::Http(e)
            })?;

        info!(
            "Got response from {} after {:?} with status {}",
            url,
            start_time.elapsed(),
            response.status()
        );

        Self::read_json(&url, response).await
    }
}
