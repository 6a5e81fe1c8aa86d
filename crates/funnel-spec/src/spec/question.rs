use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Supported question kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum QuestionKind {
    #[serde(rename = "text", alias = "short-text")]
    ShortText,
    #[serde(rename = "textarea", alias = "long-text")]
    LongText,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "select", alias = "single-choice-list")]
    SingleChoiceList,
    #[serde(rename = "radio", alias = "single-choice-cards")]
    SingleChoiceCards,
}

impl QuestionKind {
    /// Every accepted wire label, aliases included.
    pub const WIRE_NAMES: &'static [&'static str] = &[
        "text",
        "short-text",
        "textarea",
        "long-text",
        "email",
        "phone",
        "select",
        "single-choice-list",
        "radio",
        "single-choice-cards",
    ];

    /// Canonical wire label, also used by the embedded runtime.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::ShortText => "text",
            QuestionKind::LongText => "textarea",
            QuestionKind::Email => "email",
            QuestionKind::Phone => "phone",
            QuestionKind::SingleChoiceList => "select",
            QuestionKind::SingleChoiceCards => "radio",
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionKind::SingleChoiceList | QuestionKind::SingleChoiceCards
        )
    }
}

/// One selectable option of a choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct QuestionOption {
    pub id: String,
    pub label: String,
    pub value: String,
}

/// A single funnel question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub order: i64,
    /// Identity questions (name, phone, e-mail) whose kind and requiredness are locked in the editor.
    #[serde(default)]
    pub is_fixed: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Placeholder text, treating blank strings as absent.
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder
            .as_deref()
            .filter(|value| !value.trim().is_empty())
    }

    /// Options that apply to this question; non-choice kinds never expose any.
    pub fn choices(&self) -> &[QuestionOption] {
        if self.kind.is_choice() {
            &self.options
        } else {
            &[]
        }
    }
}
