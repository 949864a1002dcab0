//! Turning product images into validated captions.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::path::Path;
use tracing::{debug, warn};

use crate::clients::{GenerateRequest, ModelServer, OllamaClient};
use crate::config::Config;
use crate::error::{CaptionError, Result};
use crate::extract::caption_from_reply;
use crate::models::Caption;
use crate::prompts::{SYSTEM_PROMPT, USER_PROMPT};

/// Sampling temperature sent with every caption request.
pub const CAPTION_TEMPERATURE: f32 = 0.1;

/// Sends images to a model server and validates what comes back.
///
/// The model is plain state on the value: set it at construction or with
/// [`Captioner::set_model`]; each request reads it once.
#[derive(Debug, Clone)]
pub struct Captioner<S = OllamaClient> {
    server: S,
    model: String,
}

impl Captioner<OllamaClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            OllamaClient::from_config(config)?,
            config.model.clone(),
        ))
    }
}

impl<S: ModelServer> Captioner<S> {
    pub fn new(server: S, model: impl Into<String>) -> Self {
        Self {
            server,
            model: model.into(),
        }
    }

    pub fn server(&self) -> &S {
        &self.server
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Switch the model used by later requests. No network call.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.model = model.into();
    }

    /// Models installed on the server, sorted.
    ///
    /// Any failure yields an empty list: callers should read empty as
    /// "service unavailable", not "no models".
    pub fn list_models(&self) -> Vec<String> {
        match self.server.list_models() {
            Ok(mut models) => {
                models.sort();
                models
            }
            Err(e) => {
                warn!("Could not list models: {}", e);
                Vec::new()
            }
        }
    }

    pub fn build_request(&self, image: &[u8]) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            prompt: USER_PROMPT.to_string(),
            images: vec![STANDARD.encode(image)],
            stream: false,
            temperature: CAPTION_TEMPERATURE,
        }
    }

    /// Caption one image file. Errors are returned as-is; nothing is retried.
    pub fn generate_caption(&self, image_path: impl AsRef<Path>) -> Result<Caption> {
        let image_path = image_path.as_ref();
        let image = std::fs::read(image_path).map_err(|source| CaptionError::FileAccess {
            path: image_path.to_path_buf(),
            source,
        })?;
        debug!(
            "Captioning {} ({} bytes) with {}",
            image_path.display(),
            image.len(),
            self.model
        );

        let request = self.build_request(&image);
        let reply = self.server.generate(&request)?;
        caption_from_reply(&reply)
    }
}

/// Pick `preferred` if the server lists it, otherwise the first listed model.
///
/// An untagged name also matches its `:latest` tag, as Ollama lists it.
pub fn choose_model(available: &[String], preferred: &str) -> Option<String> {
    let latest = format!("{preferred}:latest");
    available
        .iter()
        .find(|m| m.as_str() == preferred)
        .or_else(|| available.iter().find(|m| **m == latest))
        .or_else(|| available.first())
        .cloned()
}
