use std::time::Duration;

use ollama_rs::generation::chat::{request::ChatMessageRequest, ChatMessage};
use ollama_rs::Ollama;
use tokio::time::timeout;

use crate::config;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("a chamada ao modelo excedeu o tempo limite de {0}s")]
    Timeout(u64),

    #[error("falha na chamada ao modelo: {0}")]
    Upstream(String),

    #[error("o modelo devolveu uma resposta vazia")]
    EmptyResponse,
}

/// Raised once, at startup, when the AI integration cannot be brought up.
/// Cloneable so it can sit inside the shared application state.
#[derive(Debug, Clone, thiserror::Error)]
#[error("integração de IA indisponível: {0}")]
pub struct LlmInitError(pub String);

/// Process-wide handle to the generative model. Built once at startup and
/// shared read-only across requests.
#[derive(Clone)]
pub struct LlmClient {
    ollama: Ollama,
    model: String,
    timeout: Duration,
}

impl LlmClient {
    pub fn from_config() -> Result<Self, LlmInitError> {
        let model = config::model_name();
        if model.trim().is_empty() {
            return Err(LlmInitError("nome de modelo vazio".to_string()));
        }
        let host = config::ollama_host();
        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(LlmInitError(format!("endereço de servidor inválido: {}", host)));
        }
        Ok(LlmClient {
            ollama: config::create_ollama(),
            model,
            timeout: config::llm_timeout(),
        })
    }

    /// Single best-effort generation call: system instruction plus user
    /// prompt in, trimmed text out. No retries; the timeout bounds the only
    /// unguarded external dependency.
    pub async fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let conversation = vec![
            ChatMessage::system(system.to_string()),
            ChatMessage::user(prompt.to_string()),
        ];
        let request = ChatMessageRequest::new(self.model.clone(), conversation);

        let mut ollama = self.ollama.clone();
        let mut history = vec![];
        let response = timeout(
            self.timeout,
            ollama.send_chat_messages_with_history(&mut history, request),
        )
        .await
        .map_err(|_| LlmError::Timeout(self.timeout.as_secs()))?
        .map_err(|e| LlmError::Upstream(e.to_string()))?;

        let text = response.message.content.trim().to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(text)
    }
}
