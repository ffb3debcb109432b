//! Mock backend for testing
//!
//! Returns a configurable canned reply for every generate call, so
//! handler and assistant tests run without an LLM server.

use async_trait::async_trait;

use crate::error::Result;

use super::AiBackend;

/// Mock AI backend for testing
#[derive(Clone)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    reply: Option<String>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBackend {
    /// Create a new mock backend (healthy, plain-text replies)
    pub fn new() -> Self {
        Self {
            healthy: true,
            reply: None,
        }
    }

    /// Create an unhealthy mock backend
    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            reply: None,
        }
    }

    /// Create a mock that answers every generate call with `reply`
    ///
    /// Tests use this to feed structured extraction a known JSON payload.
    pub fn with_reply(reply: &str) -> Self {
        Self {
            healthy: true,
            reply: Some(reply.to_string()),
        }
    }
}

#[async_trait]
impl AiBackend for MockBackend {
    async fn generate(&self, _prompt: &str, _system: &str) -> Result<String> {
        Ok(self
            .reply
            .clone()
            .unwrap_or_else(|| "This is a mock assistant reply.".to_string()))
    }

    async fn generate_with_image(
        &self,
        prompt: &str,
        system: &str,
        _image_data: &[u8],
    ) -> Result<String> {
        self.generate(prompt, system).await
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_default_reply() {
        let mock = MockBackend::new();
        let reply = mock.generate("anything", "system").await.unwrap();
        assert_eq!(reply, "This is a mock assistant reply.");
    }

    #[tokio::test]
    async fn test_mock_canned_reply() {
        let mock = MockBackend::with_reply(r#"{"category": "Food"}"#);
        let reply = mock.generate("categorize this", "system").await.unwrap();
        assert_eq!(reply, r#"{"category": "Food"}"#);

        let vision = mock
            .generate_with_image("scan this", "system", &[0u8; 4])
            .await
            .unwrap();
        assert_eq!(vision, r#"{"category": "Food"}"#);
    }

    #[tokio::test]
    async fn test_mock_health_check() {
        assert!(MockBackend::new().health_check().await);
        assert!(!MockBackend::unhealthy().health_check().await);
    }
}
