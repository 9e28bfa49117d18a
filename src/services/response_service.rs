use async_trait::async_trait;
use log::{error, info};

use crate::models::analysis::ResponseResult;
use crate::models::classification::Label;
use crate::services::llm_service::LlmClient;

const PRODUCTIVE_SYSTEM: &str = "Você é um assistente corporativo que redige respostas de e-mail \
profissionais e construtivas, focadas em dar andamento ao assunto.";

const UNPRODUCTIVE_SYSTEM: &str = "Você é um assistente corporativo que redige respostas de e-mail \
diplomáticas, agradecendo a mensagem e redirecionando a conversa com educação.";

/// Completion cue the prompt ends with; the model writes the reply after it.
const REPLY_CUE: &str = "Resposta sugerida:";

const SKIP_MESSAGE: &str =
    "E-mail classificado como improdutivo; nenhuma resposta automática foi gerada.";

/// Seam for reply generation so tests can substitute a stub.
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(
        &self,
        text: &str,
        label: Label,
        context: Option<&str>,
        force: bool,
    ) -> ResponseResult;
}

pub struct OllamaResponseGenerator {
    llm: LlmClient,
}

impl OllamaResponseGenerator {
    pub fn new(llm: LlmClient) -> Self {
        OllamaResponseGenerator { llm }
    }
}

#[async_trait]
impl ResponseGenerator for OllamaResponseGenerator {
    async fn generate(
        &self,
        text: &str,
        label: Label,
        context: Option<&str>,
        force: bool,
    ) -> ResponseResult {
        // Cost/relevance gate, not a failure: unproductive mail gets no
        // automatic reply unless explicitly forced.
        if label == Label::Unproductive && !force {
            info!("Skipping reply generation for unproductive email");
            return ResponseResult::not_generated(SKIP_MESSAGE.to_string());
        }

        let system = match label {
            Label::Productive => PRODUCTIVE_SYSTEM,
            Label::Unproductive => UNPRODUCTIVE_SYSTEM,
        };
        let prompt = build_prompt(text, label, context);

        match self.llm.generate(system, &prompt).await {
            Ok(reply) => {
                let reply = strip_cue(&reply).to_string();
                ResponseResult::generated(reply, "Resposta gerada com sucesso.")
            }
            Err(e) => {
                error!("Reply generation failed: {}", e);
                ResponseResult::not_generated(format!("Falha ao gerar resposta: {}", e))
            }
        }
    }
}

fn build_prompt(text: &str, label: Label, context: Option<&str>) -> String {
    let mut prompt = String::new();
    prompt.push_str("E-mail original:\n");
    prompt.push_str(text);
    prompt.push('\n');
    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str("\nContexto adicional:\n");
        prompt.push_str(context);
        prompt.push('\n');
    }
    prompt.push_str(&format!("\nClassificação: {}\n", label));
    prompt.push_str(
        "\nEscreva uma resposta curta, respeitosa e em português para este e-mail.\n",
    );
    prompt.push_str(REPLY_CUE);
    prompt
}

/// Models sometimes echo the cue back; drop it from the reply.
fn strip_cue(reply: &str) -> &str {
    reply
        .trim()
        .strip_prefix(REPLY_CUE)
        .map(str::trim)
        .unwrap_or_else(|| reply.trim())
}
