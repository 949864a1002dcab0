use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::clients::traits::{GenerateRequest, ModelServer};
use crate::config::Config;
use crate::error::{CaptionError, ParseFailure, Result};

/// Blocking client for an Ollama-compatible model server.
#[derive(Clone, Debug)]
pub struct OllamaClient {
    host: String,
    client: Client,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<ModelTag>,
}

#[derive(Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaClient {
    pub fn new(host: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CaptionError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            host: host.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.host.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.host, route)
    }
}

impl ModelServer for OllamaClient {
    fn generate(&self, request: &GenerateRequest) -> Result<String> {
        debug!(
            "POST {} (model={}, images={}, image_bytes={})",
            self.url("api/generate"),
            request.model,
            request.images.len(),
            request.images.iter().map(String::len).sum::<usize>()
        );

        let res = self.client.post(self.url("api/generate")).json(request).send()?;
        let status = res.status();
        let body = res.text()?;

        if !status.is_success() {
            return Err(CaptionError::Service {
                status: Some(status.as_u16()),
                body,
            });
        }

        match serde_json::from_str::<GenerateResponse>(&body) {
            Ok(reply) => Ok(reply.response),
            Err(_) => Err(CaptionError::parse(ParseFailure::MissingResponse, body)),
        }
    }

    fn list_models(&self) -> Result<Vec<String>> {
        let res = self.client.get(self.url("api/tags")).send()?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().unwrap_or_default();
            return Err(CaptionError::Service {
                status: Some(status.as_u16()),
                body,
            });
        }

        let tags: TagsResponse = res.json()?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}
