use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use log::{error, info};
use serde_json::json;

use crate::models::analysis::AnalysisResult;
use crate::routes::app_state::AppState;
use crate::services::encoding_service;

const MISSING_INPUT: &str = "Nenhum texto fornecido";

#[derive(MultipartForm)]
pub struct ProcessEmailForm {
    pub email_text: Option<Text<String>>,
    pub email_file: Option<Bytes>,
    pub context: Option<Text<String>>,
    pub force_response: Option<Text<bool>>,
}

/// The single processing endpoint: resolve the email text, classify it, and
/// generate (or withhold) a suggested reply.
pub async fn handle_process_email(
    data: web::Data<AppState>,
    form: ProcessEmailForm,
) -> HttpResponse {
    // Initialization failures block every request until restart.
    let ai = match &data.ai {
        Ok(ai) => ai,
        Err(e) => {
            error!("Rejecting request, AI integration unavailable: {}", e);
            return HttpResponse::ServiceUnavailable().json(json!({ "detail": e.to_string() }));
        }
    };

    let text = match resolve_input(&form) {
        Some(text) => text,
        None => {
            return HttpResponse::BadRequest().json(json!({ "detail": MISSING_INPUT }));
        }
    };

    let context = form
        .context
        .as_ref()
        .map(|c| c.as_str())
        .filter(|c| !c.trim().is_empty());
    let force = form.force_response.as_ref().map(|f| f.0).unwrap_or(false);

    info!("Processing email ({} chars, force={})", text.chars().count(), force);
    let classification = ai.classifier.classify(&text).await;
    let response = ai
        .responder
        .generate(&text, classification.label(), context, force)
        .await;

    HttpResponse::Ok().json(AnalysisResult::new(text, classification, response))
}

/// Precondition chain: inline text wins; otherwise uploaded bytes go through
/// the encoding fallback. Whitespace-only results count as missing.
fn resolve_input(form: &ProcessEmailForm) -> Option<String> {
    if let Some(text) = form.email_text.as_ref() {
        if !text.trim().is_empty() {
            return Some(text.0.clone());
        }
    }
    if let Some(file) = form.email_file.as_ref() {
        let decoded = encoding_service::resolve_text(&file.data);
        if !decoded.trim().is_empty() {
            return Some(decoded);
        }
    }
    None
}
