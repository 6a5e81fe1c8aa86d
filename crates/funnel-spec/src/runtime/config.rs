use serde::{Deserialize, Serialize};

use crate::runtime::RUNTIME_VERSION;
use crate::spec::criteria::Criteria;
use crate::spec::form::{EndpointPair, FormDefinition};
use crate::spec::question::{Question, QuestionKind};

/// Delays used by the runtime between a user action and navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    #[serde(default = "default_choice_delay_ms")]
    pub choice_delay_ms: u64,
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
}

fn default_choice_delay_ms() -> u64 {
    450
}

fn default_redirect_delay_ms() -> u64 {
    2000
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            choice_delay_ms: default_choice_delay_ms(),
            redirect_delay_ms: default_redirect_delay_ms(),
        }
    }
}

/// What the runtime needs to know about a question step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDescriptor {
    pub id: String,
    pub kind: QuestionKind,
    pub label: String,
    pub required: bool,
    /// Option values, for choice kinds only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl From<&Question> for QuestionDescriptor {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            kind: question.kind,
            label: question.label.clone(),
            required: question.required,
            options: question
                .choices()
                .iter()
                .map(|option| option.value.clone())
                .collect(),
        }
    }
}

/// Webhook and redirect used for one verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Destination {
    pub webhook: String,
    pub redirect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DestinationPlan {
    pub qualified: Destination,
    pub disqualified: Destination,
}

impl DestinationPlan {
    fn from_pairs(webhooks: &EndpointPair, redirects: &EndpointPair) -> Self {
        Self {
            qualified: Destination {
                webhook: webhooks.qualified.trim().to_string(),
                redirect: redirects.qualified.trim().to_string(),
            },
            disqualified: Destination {
                webhook: webhooks.disqualified.trim().to_string(),
                redirect: redirects.disqualified.trim().to_string(),
            },
        }
    }
}

/// Structured data embedded in every compiled document and read by the runtime script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeConfig {
    pub version: String,
    pub total_steps: usize,
    pub questions: Vec<QuestionDescriptor>,
    pub criteria: Criteria,
    pub destinations: DestinationPlan,
    pub timing: Timing,
}

impl RuntimeConfig {
    pub fn from_definition(definition: &FormDefinition, timing: Timing) -> Self {
        let questions: Vec<QuestionDescriptor> = definition
            .sorted_questions()
            .into_iter()
            .map(QuestionDescriptor::from)
            .collect();
        let destinations = &definition.destinations;
        Self {
            version: RUNTIME_VERSION.to_string(),
            total_steps: questions.len() + 2,
            questions,
            criteria: definition.qualification_criteria.clone(),
            destinations: DestinationPlan::from_pairs(
                &destinations.webhooks,
                &destinations.redirects,
            ),
            timing,
        }
    }

    pub fn review_step(&self) -> usize {
        self.questions.len() + 1
    }

    pub fn commitment_step(&self) -> usize {
        self.questions.len() + 2
    }

    /// Descriptor rendered at a 1-based step, if that step is a question.
    pub fn question_at(&self, step: usize) -> Option<&QuestionDescriptor> {
        step.checked_sub(1)
            .and_then(|index| self.questions.get(index))
    }
}
