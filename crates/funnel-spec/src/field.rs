//! Input validation for text-like steps.
//!
//! These rules are mirrored one-to-one by the embedded runtime script; the
//! Rust versions back the runtime model and the CLI simulator.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::spec::question::QuestionKind;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_MAX_DIGITS: usize = 11;
pub const PHONE_MIN_DIGITS: usize = 10;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

/// Validator attached to an input step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    Text,
    Email,
    Phone,
}

impl Validator {
    /// Validator for a kind; choice kinds validate through selection instead.
    pub fn for_kind(kind: QuestionKind) -> Option<Self> {
        match kind {
            QuestionKind::ShortText | QuestionKind::LongText => Some(Validator::Text),
            QuestionKind::Email => Some(Validator::Email),
            QuestionKind::Phone => Some(Validator::Phone),
            QuestionKind::SingleChoiceList | QuestionKind::SingleChoiceCards => None,
        }
    }

    /// Inline message shown while the field is invalid.
    pub fn error_message(&self) -> &'static str {
        match self {
            Validator::Text => "Preenchimento obrigatório",
            Validator::Email => "Informe um e-mail válido",
            Validator::Phone => "Informe um telefone com DDD",
        }
    }

    /// Normalize raw keystrokes and judge the result.
    pub fn check(&self, raw: &str, required: bool) -> FieldCheck {
        match self {
            Validator::Text => {
                let valid = !required || !raw.trim().is_empty();
                FieldCheck::new(raw.to_string(), valid)
            }
            Validator::Email => {
                let valid = if raw.trim().is_empty() {
                    !required
                } else {
                    is_email(raw)
                };
                FieldCheck::new(raw.to_string(), valid)
            }
            Validator::Phone => {
                let digits = phone_digits(raw);
                let valid = if digits.is_empty() {
                    !required
                } else {
                    digits.len() >= PHONE_MIN_DIGITS
                };
                FieldCheck::new(format_phone(raw), valid)
            }
        }
    }
}

/// Result of validating one input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    /// Value as stored in the answer map (phones are reformatted).
    pub value: String,
    pub valid: bool,
}

impl FieldCheck {
    fn new(value: String, valid: bool) -> Self {
        Self { value, valid }
    }
}

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Digits of a phone entry, capped at the national eleven-digit length.
pub fn phone_digits(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_MAX_DIGITS)
        .collect()
}

/// Progressive `(DD) DDDDD-DDDD` formatting applied on every keystroke.
pub fn format_phone(raw: &str) -> String {
    let digits = phone_digits(raw);
    if digits.is_empty() {
        return digits;
    }
    let mut formatted = String::with_capacity(15);
    formatted.push('(');
    formatted.push_str(&digits[..digits.len().min(2)]);
    if digits.len() > 2 {
        formatted.push_str(") ");
        formatted.push_str(&digits[2..digits.len().min(7)]);
    }
    if digits.len() > 7 {
        formatted.push('-');
        formatted.push_str(&digits[7..]);
    }
    formatted
}
