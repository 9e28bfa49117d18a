use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use async_trait::async_trait;
use std::sync::Arc;

use email_triage::models::analysis::ResponseResult;
use email_triage::models::classification::{ClassificationResult, Label};
use email_triage::routes::app_state::{AiHandles, AppState};
use email_triage::routes::process_routes;
use email_triage::services::classifier_service::Classifier;
use email_triage::services::llm_service::LlmInitError;
use email_triage::services::response_service::ResponseGenerator;

const BOUNDARY: &str = "----triagem-test-boundary";

/// Keyword stand-in for the real backends, so the endpoint can be exercised
/// without a running model.
struct StubClassifier;

#[async_trait]
impl Classifier for StubClassifier {
    async fn classify(&self, text: &str) -> ClassificationResult {
        let lower = text.to_lowercase();
        let productive = ["projeto", "reunião", "call", "stack"]
            .iter()
            .any(|k| lower.contains(k));
        if productive {
            ClassificationResult::from_label(Label::Productive)
        } else {
            ClassificationResult::from_label(Label::Unproductive)
        }
    }
}

struct StubResponder;

#[async_trait]
impl ResponseGenerator for StubResponder {
    async fn generate(
        &self,
        _text: &str,
        label: Label,
        _context: Option<&str>,
        force: bool,
    ) -> ResponseResult {
        if label == Label::Unproductive && !force {
            ResponseResult::not_generated("E-mail classificado como improdutivo.".to_string())
        } else {
            ResponseResult::generated(
                "Olá! Podemos agendar a revisão ainda esta semana.".to_string(),
                "Resposta gerada com sucesso.",
            )
        }
    }
}

fn stub_state() -> AppState {
    AppState::with_handles(AiHandles {
        classifier: Arc::new(StubClassifier),
        responder: Arc::new(StubResponder),
    })
}

fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"email_file\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: text/plain\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

async fn post_form(
    state: AppState,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> (StatusCode, serde_json::Value) {
    let _ = env_logger::builder().is_test(true).try_init();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(process_routes::init_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/process_email")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(multipart_body(fields, file))
        .to_request();

    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let json = test::read_body_json(resp).await;
    (status, json)
}

#[actix_web::test]
async fn productive_text_round_trips_with_reply() {
    let (status, json) = post_form(
        stub_state(),
        &[("email_text", "Vamos marcar uma call para revisar o projeto")],
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["classification"]["category"], "Produtivo");
    assert_eq!(json["classification"]["is_productive"], true);
    assert_eq!(json["response"]["generated"], true);
    assert!(json["response"]["text"].is_string());
    assert!(json["timestamp"].is_string());
}

#[actix_web::test]
async fn unproductive_text_gets_no_reply() {
    let (status, json) = post_form(
        stub_state(),
        &[("email_text", "Segue a corrente da sorte, repasse para dez amigos")],
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["classification"]["category"], "Improdutivo");
    assert_eq!(json["response"]["generated"], false);
    assert!(json["response"]["text"].is_null());
}

#[actix_web::test]
async fn force_flag_overrides_the_gate() {
    let (status, json) = post_form(
        stub_state(),
        &[
            ("email_text", "Feliz aniversário! Bolo na copa às 16h"),
            ("force_response", "true"),
        ],
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["classification"]["category"], "Improdutivo");
    assert_eq!(json["response"]["generated"], true);
}

#[actix_web::test]
async fn missing_input_is_a_client_error() {
    let (status, json) = post_form(stub_state(), &[("context", "sem email")], None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "Nenhum texto fornecido");
}

#[actix_web::test]
async fn blank_text_counts_as_missing() {
    let (status, json) = post_form(stub_state(), &[("email_text", "   ")], None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["detail"], "Nenhum texto fornecido");
}

#[actix_web::test]
async fn windows_1252_upload_is_decoded() {
    // "Reunião de projeto" in windows-1252; 0xE3 is invalid UTF-8.
    let mut bytes = b"Reuni".to_vec();
    bytes.push(0xE3);
    bytes.extend_from_slice(b"o de projeto");

    let (status, json) = post_form(stub_state(), &[], Some(("email.txt", &bytes))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "Reunião de projeto");
    assert_eq!(json["classification"]["category"], "Produtivo");
}

#[actix_web::test]
async fn inline_text_wins_over_file() {
    let (status, json) = post_form(
        stub_state(),
        &[("email_text", "Status do projeto em anexo")],
        Some(("email.txt", b"Corrente de piadas".as_slice())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["text"], "Status do projeto em anexo");
}

#[actix_web::test]
async fn failed_init_answers_service_unavailable() {
    let state = AppState::unavailable(LlmInitError("nome de modelo vazio".to_string()));
    let (status, json) = post_form(
        state,
        &[("email_text", "Vamos revisar o projeto")],
        None,
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(json["detail"].as_str().unwrap().contains("indisponível"));
}
