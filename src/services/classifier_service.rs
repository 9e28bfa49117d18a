use async_trait::async_trait;
use log::{info, warn};

use crate::config;
use crate::models::classification::{ClassificationResult, Label};
use crate::services::llm_service::LlmClient;

const CLASSIFIER_SYSTEM: &str = "Você é um assistente que classifica e-mails corporativos.";

/// Fixed classification prompt. The model is asked for the bare category so
/// the reply can be matched literally.
const CLASSIFICATION_PROMPT: &str = "\
Classifique o e-mail como \"produtivo\" ou \"improdutivo\" conforme as definições abaixo.
Responda apenas com a classificação, sem explicações.
produtivo: e-mails sobre trabalho, tarefas, projetos, reuniões, calls, stack, decisões ou informações úteis.
improdutivo: e-mails irrelevantes, pessoais, correntes, café, promoções ou spam.
Se não tiver certeza, classifique como \"improdutivo\".
E-mail: {email_text}
Classificação:";

/// Strategy seam for the two classification backends. Exactly one is active
/// per instance; both always report a label.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> ClassificationResult;
}

/// Remote-prompt strategy: format the email into the fixed template, send it
/// to the generative model and match the literal reply.
pub struct PromptClassifier {
    llm: LlmClient,
}

impl PromptClassifier {
    pub fn new(llm: LlmClient) -> Self {
        PromptClassifier { llm }
    }
}

#[async_trait]
impl Classifier for PromptClassifier {
    async fn classify(&self, text: &str) -> ClassificationResult {
        let prompt = CLASSIFICATION_PROMPT.replace("{email_text}", text);
        let label = match self.llm.generate(CLASSIFIER_SYSTEM, &prompt).await {
            Ok(reply) => {
                info!("Classifier reply: {}", reply);
                parse_label(&reply)
            }
            Err(e) => {
                // Fail closed: an unreachable model must not fail the request.
                warn!("Classification call failed, defaulting to improdutivo: {}", e);
                Label::Unproductive
            }
        };
        ClassificationResult::from_label(label)
    }
}

/// Match the model's literal reply against the two categories. The
/// "improdutivo" check dominates because "produtivo" is a substring of it;
/// anything unparseable defaults to Unproductive.
fn parse_label(reply: &str) -> Label {
    let cleaned = reply.trim().to_lowercase();
    if cleaned.contains("produtivo") && !cleaned.contains("improdutivo") {
        Label::Productive
    } else {
        // Either the model said "improdutivo" or it said something
        // unparseable; both fail closed.
        Label::Unproductive
    }
}

#[derive(Debug, thiserror::Error)]
#[error("falha no pipeline de classificação: {0}")]
pub struct PipelineError(pub String);

/// Local sequence-classification pipeline: text in, top label plus score
/// out. The concrete model is wired in at deployment; tests substitute a
/// stub.
#[cfg_attr(test, mockall::automock)]
pub trait ClassificationPipeline: Send + Sync {
    fn predict(&self, text: &str) -> Result<(String, f32), PipelineError>;
}

/// Local-model strategy: bounded input, label string mapped to the two
/// categories, score threshold when the label is unrecognized.
pub struct LocalClassifier {
    pipeline: Box<dyn ClassificationPipeline>,
}

impl LocalClassifier {
    pub fn new(pipeline: Box<dyn ClassificationPipeline>) -> Self {
        LocalClassifier { pipeline }
    }
}

#[async_trait]
impl Classifier for LocalClassifier {
    async fn classify(&self, text: &str) -> ClassificationResult {
        let input = truncate_chars(text, config::LOCAL_MODEL_MAX_CHARS);
        match self.pipeline.predict(input) {
            Ok((label, score)) => {
                info!("Pipeline label: {} (score {:.3})", label, score);
                ClassificationResult::with_confidence(
                    map_pipeline_label(&label, score),
                    score.clamp(0.0, 1.0),
                )
            }
            Err(e) => {
                warn!("Pipeline failed, defaulting to improdutivo: {}", e);
                ClassificationResult::from_label(Label::Unproductive)
            }
        }
    }
}

/// Case-insensitive label mapping; an unrecognized label falls back to
/// thresholding the score at 0.5.
fn map_pipeline_label(label: &str, score: f32) -> Label {
    let label = label.trim();
    if label.eq_ignore_ascii_case("produtivo") || label.eq_ignore_ascii_case("productive") {
        Label::Productive
    } else if label.eq_ignore_ascii_case("improdutivo") || label.eq_ignore_ascii_case("unproductive") {
        Label::Unproductive
    } else if score > 0.5 {
        Label::Productive
    } else {
        Label::Unproductive
    }
}

/// Truncate on a char boundary without allocating.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
