use std::env;
use std::time::Duration;

use ollama_rs::Ollama;

pub fn init_logging() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
}

pub const MODEL_NAME: &str = "llama3.2";

/// Maximum number of characters handed to the local classification pipeline.
pub const LOCAL_MODEL_MAX_CHARS: usize = 512;

const OLLAMA_PORT: u16 = 11434;

pub fn ollama_port() -> u16 {
    env::var("OLLAMA_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(OLLAMA_PORT)
}

const OLLAMA_HOST: &str = "http://localhost";

pub fn ollama_host() -> String {
    env::var("OLLAMA_HOST").unwrap_or_else(|_| OLLAMA_HOST.to_string())
}

pub fn model_name() -> String {
    env::var("OLLAMA_MODEL").unwrap_or_else(|_| MODEL_NAME.to_string())
}

/// Upper bound on each outbound model call.
pub fn llm_timeout() -> Duration {
    let secs = env::var("LLM_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(30);
    Duration::from_secs(secs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    Prompt,
    Local,
}

/// Which classification strategy this instance runs. Never both.
pub fn classifier_backend() -> ClassifierBackend {
    match env::var("CLASSIFIER_BACKEND").as_deref() {
        Ok("local") => ClassifierBackend::Local,
        _ => ClassifierBackend::Prompt,
    }
}

pub fn bind_address() -> String {
    env::var("BIND_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string())
}

pub fn bind_port() -> u16 {
    env::var("BIND_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080)
}

pub fn create_ollama() -> Ollama {
    Ollama::new(ollama_host(), ollama_port())
}
