use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::CompileError;
use crate::spec::form::FormDefinition;
use crate::spec::question::QuestionKind;

static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern is valid"));
static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("color pattern is valid")
});

/// Non-fatal findings: the definition compiles, but the funnel may misbehave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckWarning {
    /// A rule targets a question that does not exist; it always evaluates false.
    DanglingRule { rule_id: String, question_id: String },
    /// A choice question without options; its step cannot be left forward.
    EmptyChoices { question_id: String },
}

impl fmt::Display for CheckWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckWarning::DanglingRule {
                rule_id,
                question_id,
            } => write!(
                f,
                "rule '{}' targets unknown question '{}' and will never match",
                rule_id, question_id
            ),
            CheckWarning::EmptyChoices { question_id } => write!(
                f,
                "choice question '{}' has no options; respondents cannot advance past it",
                question_id
            ),
        }
    }
}

/// Outcome of a successful check.
#[derive(Debug, Clone, Default)]
pub struct CheckReport {
    pub warnings: Vec<CheckWarning>,
}

/// Parse a definition from JSON, reporting unknown question kinds by question id.
pub fn parse_definition(json: &str) -> Result<FormDefinition, CompileError> {
    let raw: Value = serde_json::from_str(json).map_err(CompileError::Parse)?;
    if let Some(questions) = raw.get("questions").and_then(Value::as_array) {
        for (position, question) in questions.iter().enumerate() {
            if let Some(kind) = question.get("type").and_then(Value::as_str)
                && !QuestionKind::WIRE_NAMES.contains(&kind)
            {
                let question_id = question
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{}", position + 1));
                return Err(CompileError::UnknownQuestionKind {
                    question_id,
                    kind: kind.to_string(),
                });
            }
        }
    }
    serde_json::from_value(raw).map_err(CompileError::Parse)
}

/// Reject definitions that would produce broken markup; collect warnings for the rest.
pub fn check(definition: &FormDefinition) -> Result<CheckReport, CompileError> {
    let identity = &definition.identity;
    if identity.company_name.trim().is_empty() {
        return Err(CompileError::MissingIdentityField("companyName"));
    }
    if identity.slug.trim().is_empty() {
        return Err(CompileError::MissingIdentityField("slug"));
    }
    if !SLUG.is_match(&identity.slug) {
        return Err(CompileError::InvalidSlug(identity.slug.clone()));
    }
    for (field, value) in [
        ("primary", identity.primary_color()),
        ("secondary", identity.secondary_color()),
    ] {
        if !HEX_COLOR.is_match(value) {
            return Err(CompileError::InvalidColor {
                field,
                value: value.to_string(),
            });
        }
    }

    let mut warnings = Vec::new();
    let mut seen = BTreeSet::new();
    for (position, question) in definition.questions.iter().enumerate() {
        if question.id.trim().is_empty() {
            return Err(CompileError::EmptyQuestionId {
                position: position + 1,
            });
        }
        if !seen.insert(question.id.as_str()) {
            return Err(CompileError::DuplicateQuestionId(question.id.clone()));
        }

        let mut option_ids = BTreeSet::new();
        for option in question.choices() {
            if !option_ids.insert(option.id.as_str()) {
                return Err(CompileError::DuplicateOptionId {
                    question_id: question.id.clone(),
                    option_id: option.id.clone(),
                });
            }
        }
        if question.kind.is_choice() && question.options.is_empty() {
            warnings.push(CheckWarning::EmptyChoices {
                question_id: question.id.clone(),
            });
        }
    }

    for rule in &definition.qualification_criteria.rules {
        if !seen.contains(rule.question_id.as_str()) {
            warnings.push(CheckWarning::DanglingRule {
                rule_id: rule.id.clone(),
                question_id: rule.question_id.clone(),
            });
        }
    }

    Ok(CheckReport { warnings })
}

/// Derive a URL-safe slug from a company name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn fold_accent(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_strips_accents_and_punctuation() {
        assert_eq!(slugify("Energia Solar São João!"), "energia-solar-sao-joao");
        assert_eq!(slugify("  --ACME--  "), "acme");
        assert_eq!(slugify("???"), "");
    }

    #[test]
    fn slug_pattern_rejects_uppercase_and_double_dashes() {
        assert!(SLUG.is_match("acme-solar-2"));
        assert!(!SLUG.is_match("Acme"));
        assert!(!SLUG.is_match("acme--solar"));
        assert!(!SLUG.is_match("-acme"));
    }
}
