//! Pluggable local AI backend abstraction
//!
//! This module provides a backend-agnostic interface for the assistant
//! features. All backends run locally (no cloud APIs) - Ollama,
//! OpenAI-compatible servers, etc.
//!
//! # Architecture
//!
//! - `AiBackend` trait: text and vision completions plus a health probe
//! - `AiClient` enum: concrete wrapper providing Clone + compile-time dispatch
//! - `Assistant`: high-level operations (voice parsing, receipt scanning,
//!   categorization, narrative insights) built on top of a client
//!
//! # Configuration
//!
//! Environment variables:
//! - `AI_BACKEND`: Backend to use (ollama, openai_compatible, mock).
//!   Unset leaves the assistant disabled.
//! - `OLLAMA_HOST`: Ollama server URL (required for ollama backend)
//! - `OLLAMA_MODEL`: Model name (default: llama3.2)
//! - `OPENAI_COMPATIBLE_HOST`: Server URL (required for openai_compatible backend)
//! - `OPENAI_COMPATIBLE_MODEL`: Model name (default: gpt-3.5-turbo)
//! - `OPENAI_COMPATIBLE_API_KEY`: API key if required (optional)

mod assistant;
mod mock;
mod ollama;
mod openai_compatible;
pub mod parsing;
pub mod prompts;
pub mod types;

pub use assistant::{Assistant, CategorizeOutcome, EmotionalAnalysis, HabitAnalysis, HabitPatterns};
pub use mock::MockBackend;
pub use ollama::OllamaBackend;
pub use openai_compatible::OpenAICompatibleBackend;
pub use types::*;

use async_trait::async_trait;

use crate::error::Result;

/// Trait defining the interface for all AI backends
///
/// Backends should be Send + Sync to allow use across async tasks.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Generate a text completion for a prompt with a system instruction
    async fn generate(&self, prompt: &str, system: &str) -> Result<String>;

    /// Generate a completion for a prompt plus an image (receipt scanning)
    async fn generate_with_image(
        &self,
        prompt: &str,
        system: &str,
        image_data: &[u8],
    ) -> Result<String>;

    /// Check if the backend is available
    async fn health_check(&self) -> bool;

    /// Get the model name (for logging)
    fn model(&self) -> &str;

    /// Get the host URL (for logging)
    fn host(&self) -> &str;
}

/// Concrete AI client enum
///
/// Provides Clone and compile-time dispatch without Box<dyn> overhead.
#[derive(Clone)]
pub enum AiClient {
    /// Ollama backend (HTTP API)
    Ollama(OllamaBackend),
    /// OpenAI-compatible backend (Docker Model Runner, vLLM, LocalAI, llama-server, etc.)
    OpenAICompatible(OpenAICompatibleBackend),
    /// Mock backend for testing
    Mock(MockBackend),
}

impl AiClient {
    /// Create an AI client from environment variables
    ///
    /// Checks `AI_BACKEND` to determine which backend to use:
    /// - `ollama`: Uses OLLAMA_HOST and OLLAMA_MODEL
    /// - `openai_compatible`: Uses OPENAI_COMPATIBLE_HOST and OPENAI_COMPATIBLE_MODEL
    ///   (works with Docker Model Runner, vLLM, LocalAI, llama-server, etc.)
    /// - `mock`: Creates a mock backend for testing
    ///
    /// Returns None when `AI_BACKEND` is unset or the selected backend is
    /// missing its required variables; the assistant stays disabled.
    pub fn from_env() -> Option<Self> {
        let backend = std::env::var("AI_BACKEND").ok()?;

        match backend.to_lowercase().as_str() {
            "ollama" => OllamaBackend::from_env().map(AiClient::Ollama),
            "openai_compatible" | "openai" | "vllm" | "localai" | "llamacpp" => {
                OpenAICompatibleBackend::from_env().map(AiClient::OpenAICompatible)
            }
            "mock" => Some(AiClient::Mock(MockBackend::new())),
            _ => {
                tracing::warn!(backend = %backend, "Unknown AI_BACKEND, assistant disabled");
                None
            }
        }
    }

    /// Create an Ollama backend directly
    pub fn ollama(host: &str, model: &str) -> Self {
        AiClient::Ollama(OllamaBackend::new(host, model))
    }

    /// Create a mock backend for testing
    pub fn mock() -> Self {
        AiClient::Mock(MockBackend::new())
    }
}

#[async_trait]
impl AiBackend for AiClient {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String> {
        match self {
            AiClient::Ollama(b) => b.generate(prompt, system).await,
            AiClient::OpenAICompatible(b) => b.generate(prompt, system).await,
            AiClient::Mock(b) => b.generate(prompt, system).await,
        }
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        system: &str,
        image_data: &[u8],
    ) -> Result<String> {
        match self {
            AiClient::Ollama(b) => b.generate_with_image(prompt, system, image_data).await,
            AiClient::OpenAICompatible(b) => b.generate_with_image(prompt, system, image_data).await,
            AiClient::Mock(b) => b.generate_with_image(prompt, system, image_data).await,
        }
    }

    async fn health_check(&self) -> bool {
        match self {
            AiClient::Ollama(b) => b.health_check().await,
            AiClient::OpenAICompatible(b) => b.health_check().await,
            AiClient::Mock(b) => b.health_check().await,
        }
    }

    fn model(&self) -> &str {
        match self {
            AiClient::Ollama(b) => b.model(),
            AiClient::OpenAICompatible(b) => b.model(),
            AiClient::Mock(b) => b.model(),
        }
    }

    fn host(&self) -> &str {
        match self {
            AiClient::Ollama(b) => b.host(),
            AiClient::OpenAICompatible(b) => b.host(),
            AiClient::Mock(b) => b.host(),
        }
    }
}
