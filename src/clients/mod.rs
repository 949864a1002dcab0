pub mod ollama;
pub mod traits;

pub use ollama::OllamaClient;
pub use traits::{GenerateRequest, ModelServer};
