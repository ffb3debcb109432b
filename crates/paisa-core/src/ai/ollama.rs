//! Ollama backend implementation
//!
//! Talks to a local Ollama server via its `/api/generate` endpoint.
//! Vision prompts (receipt scanning) attach the image as a base64 string
//! in the request's `images` array, which requires a multimodal model
//! such as llava or llama3.2-vision.
//!
//! # Configuration
//!
//! Environment variables:
//! - `OLLAMA_HOST`: Server URL (required), e.g. `http://localhost:11434`
//! - `OLLAMA_MODEL`: Model name (default: llama3.2)

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::AiBackend;

/// Completion requests can take a while on modest hardware.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama AI backend
#[derive(Clone)]
pub struct OllamaBackend {
    http_client: Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Create a new Ollama backend
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    /// Create from environment variables
    ///
    /// Required: `OLLAMA_HOST`
    /// Optional: `OLLAMA_MODEL` (default: llama3.2)
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("OLLAMA_HOST").ok()?;
        let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string());
        Some(Self::new(&host, &model))
    }

    async fn send_generate(&self, request: &impl Serialize) -> Result<String> {
        let response = self
            .http_client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::ServiceUnavailable(format!("Ollama request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ServiceUnavailable(format!(
                "Ollama returned {}",
                response.status()
            )));
        }

        let body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(format!("Invalid Ollama response: {}", e)))?;
        debug!("Ollama response: {}", body.response);

        Ok(body.response)
    }
}

/// Ollama generate request
#[derive(Debug, Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    system: String,
    stream: bool,
}

/// Ollama generate request with images (multimodal)
#[derive(Debug, Serialize)]
struct OllamaVisionRequest {
    model: String,
    prompt: String,
    system: String,
    stream: bool,
    /// Base64-encoded images
    images: Vec<String>,
}

/// Ollama generate response
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

#[async_trait]
impl AiBackend for OllamaBackend {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            system: system.to_string(),
            stream: false,
        };

        self.send_generate(&request).await
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        system: &str,
        image_data: &[u8],
    ) -> Result<String> {
        let base64_image = base64::engine::general_purpose::STANDARD.encode(image_data);

        let request = OllamaVisionRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            system: system.to_string(),
            stream: false,
            images: vec![base64_image],
        };

        self.send_generate(&request).await
    }

    async fn health_check(&self) -> bool {
        match self
            .http_client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_stripped() {
        let backend = OllamaBackend::new("http://localhost:11434/", "llama3.2");
        assert_eq!(backend.host(), "http://localhost:11434");
    }

    #[test]
    fn test_request_serialization() {
        let request = OllamaRequest {
            model: "llama3.2".to_string(),
            prompt: "hello".to_string(),
            system: "be brief".to_string(),
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "llama3.2");
        assert_eq!(json["stream"], false);
        assert!(json.get("images").is_none());
    }
}
