use serde::Serialize;

use crate::error::Result;

/// Body of a single, non-streaming generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    /// Base64-encoded image payloads.
    pub images: Vec<String>,
    pub stream: bool,
    pub temperature: f32,
}

/// A server hosting vision-language models.
///
/// Calls are synchronous and never retried.
pub trait ModelServer {
    /// Run one generation and return the model's reply text.
    fn generate(&self, request: &GenerateRequest) -> Result<String>;

    /// Identifiers of the models installed on the server, in server order.
    fn list_models(&self) -> Result<Vec<String>>;
}
