use std::sync::Arc;

use log::info;

use crate::config::{self, ClassifierBackend};
use crate::services::classifier_service::{Classifier, PromptClassifier};
use crate::services::llm_service::{LlmClient, LlmInitError};
use crate::services::response_service::{OllamaResponseGenerator, ResponseGenerator};

/// The AI integration, brought up once at startup. Read-only afterwards.
#[derive(Clone)]
pub struct AiHandles {
    pub classifier: Arc<dyn Classifier>,
    pub responder: Arc<dyn ResponseGenerator>,
}

impl AiHandles {
    pub fn from_config() -> Result<Self, LlmInitError> {
        let llm = LlmClient::from_config()?;
        let classifier: Arc<dyn Classifier> = match config::classifier_backend() {
            ClassifierBackend::Prompt => {
                info!("Using prompt-based classification backend");
                Arc::new(PromptClassifier::new(llm.clone()))
            }
            ClassifierBackend::Local => {
                // No inference pipeline is linked into this build; treat the
                // selection as an integration that failed to come up.
                return Err(LlmInitError(
                    "backend local selecionado sem pipeline de inferência embarcado".to_string(),
                ));
            }
        };
        Ok(AiHandles {
            classifier,
            responder: Arc::new(OllamaResponseGenerator::new(llm)),
        })
    }
}

/// Shared application state. The init outcome is kept as a typed result so
/// every request can answer 503 with the original failure, rather than
/// probing a nullable field.
#[derive(Clone)]
pub struct AppState {
    pub ai: Result<AiHandles, LlmInitError>,
}

impl AppState {
    pub fn from_config() -> Self {
        let ai = AiHandles::from_config();
        if let Err(e) = &ai {
            log::error!("AI integration failed to initialize: {}", e);
        }
        AppState { ai }
    }

    pub fn with_handles(handles: AiHandles) -> Self {
        AppState { ai: Ok(handles) }
    }

    pub fn unavailable(error: LlmInitError) -> Self {
        AppState { ai: Err(error) }
    }
}
