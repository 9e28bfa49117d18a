use chrono::Utc;
use serde::Serialize;

use crate::models::classification::ClassificationResult;

/// Outcome of the reply-generation step. `text` is null whenever
/// `generated` is false; `message` explains why in either case.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseResult {
    pub generated: bool,
    pub message: String,
    pub text: Option<String>,
}

impl ResponseResult {
    pub fn generated(text: String, message: &str) -> Self {
        ResponseResult {
            generated: true,
            message: message.to_string(),
            text: Some(text),
        }
    }

    pub fn not_generated(message: String) -> Self {
        ResponseResult {
            generated: false,
            message,
            text: None,
        }
    }
}

/// The single unit returned to the caller. Built once per request,
/// serialized and discarded.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub text: String,
    pub classification: ClassificationResult,
    pub response: ResponseResult,
    pub timestamp: String,
}

impl AnalysisResult {
    pub fn new(text: String, classification: ClassificationResult, response: ResponseResult) -> Self {
        AnalysisResult {
            success: true,
            text,
            classification,
            response,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
