use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::spec::criteria::Criteria;
use crate::spec::question::Question;

pub const DEFAULT_PRIMARY_COLOR: &str = "#ff8533";
pub const DEFAULT_SECONDARY_COLOR: &str = "#ffc933";

/// Brand color pair used for gradients, borders and hover states.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Colors {
    #[serde(default)]
    pub primary: String,
    #[serde(default)]
    pub secondary: String,
}

/// Page and hero copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub hero_title: String,
    #[serde(default)]
    pub hero_subtitle: String,
    /// Free-form benefits copy, one benefit per line.
    #[serde(default)]
    pub benefits: String,
}

/// Company identity shown at the top of the funnel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub company_name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default)]
    pub colors: Colors,
    #[serde(default)]
    pub customization: Customization,
}

impl Identity {
    /// Logo reference, treating blank strings as absent.
    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref().map(str::trim).filter(|value| !value.is_empty())
    }

    pub fn primary_color(&self) -> &str {
        non_blank(&self.colors.primary).unwrap_or(DEFAULT_PRIMARY_COLOR)
    }

    pub fn secondary_color(&self) -> &str {
        non_blank(&self.colors.secondary).unwrap_or(DEFAULT_SECONDARY_COLOR)
    }

    pub fn page_title(&self) -> &str {
        non_blank(&self.customization.page_title).unwrap_or("Formulário")
    }

    pub fn hero_title(&self) -> &str {
        non_blank(&self.customization.hero_title).unwrap_or(&self.company_name)
    }

    pub fn benefits(&self) -> Vec<&str> {
        self.customization
            .benefits
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

/// A qualified/disqualified pair of URLs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct EndpointPair {
    #[serde(default)]
    pub qualified: String,
    #[serde(default)]
    pub disqualified: String,
}

/// Where completed submissions are announced and where respondents land afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Destinations {
    #[serde(default)]
    pub webhooks: EndpointPair,
    #[serde(default)]
    pub redirects: EndpointPair,
}

/// Top-level funnel definition produced by the form editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub qualification_criteria: Criteria,
    #[serde(flatten)]
    pub destinations: Destinations,
}

impl FormDefinition {
    /// Questions in render order: ascending `order`, ties kept in definition order.
    pub fn sorted_questions(&self) -> Vec<&Question> {
        let mut questions: Vec<&Question> = self.questions.iter().collect();
        questions.sort_by_key(|question| question.order);
        questions
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
