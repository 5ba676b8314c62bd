use async_trait::async_trait;

use servir_core::AppResult;

/// Port for the optional generative ranking capability.
///
/// Responses are free-form text and must be parsed defensively by the
/// caller. Implementations bound every call with a timeout; a timeout is
/// reported as an ordinary error.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates a text completion for the given prompt.
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}
