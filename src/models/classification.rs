use std::fmt;

use serde::Serialize;

/// Binary triage label for an incoming email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Productive,
    Unproductive,
}

impl Label {
    /// User-facing category name, as the front-end expects it.
    pub fn category(&self) -> &'static str {
        match self {
            Label::Productive => "Produtivo",
            Label::Unproductive => "Improdutivo",
        }
    }

    pub fn is_productive(&self) -> bool {
        matches!(self, Label::Productive)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.category())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    pub category: String,
    pub is_productive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ClassificationResult {
    pub fn from_label(label: Label) -> Self {
        ClassificationResult {
            category: label.category().to_string(),
            is_productive: label.is_productive(),
            confidence: None,
        }
    }

    pub fn with_confidence(label: Label, confidence: f32) -> Self {
        ClassificationResult {
            confidence: Some(confidence),
            ..Self::from_label(label)
        }
    }

    pub fn label(&self) -> Label {
        if self.is_productive {
            Label::Productive
        } else {
            Label::Unproductive
        }
    }
}
