use serde::Serialize;

use crate::field::Validator;
use crate::runtime::{RUNTIME_SCRIPT, RUNTIME_VERSION, RuntimeConfig};
use crate::spec::form::FormDefinition;
use crate::spec::question::{Question, QuestionKind, QuestionOption};

/// `(DD) DDDDD-DDDD`
const PHONE_MAX_LENGTH: u32 = 15;

#[derive(Debug, Serialize)]
pub(crate) struct DocumentView<'a> {
    page_title: &'a str,
    company_name: &'a str,
    hero_title: &'a str,
    hero_subtitle: Option<&'a str>,
    logo: Option<&'a str>,
    benefits: Vec<&'a str>,
    primary: String,
    secondary: String,
    total_steps: usize,
    steps: Vec<StepView<'a>>,
    review_step: usize,
    review_active: bool,
    review_has_back: bool,
    commit_step: usize,
    config_json: String,
    runtime_version: &'static str,
    runtime_script: &'static str,
}

#[derive(Debug, Serialize)]
struct StepView<'a> {
    step: usize,
    id: &'a str,
    kind: &'static str,
    label: &'a str,
    placeholder: Option<&'a str>,
    required: bool,
    active: bool,
    has_back: bool,
    continue_label: &'static str,
    control: ControlView<'a>,
}

#[derive(Debug, Serialize)]
struct ControlView<'a> {
    choice: bool,
    layout: Option<&'static str>,
    options: &'a [QuestionOption],
    multiline: bool,
    input_type: Option<&'static str>,
    max_length: Option<u32>,
    error_message: Option<&'static str>,
}

impl<'a> ControlView<'a> {
    fn input(input_type: &'static str, validator: Validator, max_length: Option<u32>) -> Self {
        Self {
            choice: false,
            layout: None,
            options: &[],
            multiline: false,
            input_type: Some(input_type),
            max_length,
            error_message: Some(validator.error_message()),
        }
    }

    fn textarea() -> Self {
        Self {
            multiline: true,
            input_type: None,
            ..Self::input("text", Validator::Text, None)
        }
    }

    fn choices(layout: &'static str, options: &'a [QuestionOption]) -> Self {
        Self {
            choice: true,
            layout: Some(layout),
            options,
            multiline: false,
            input_type: None,
            max_length: None,
            error_message: None,
        }
    }

    fn for_question(question: &'a Question) -> Self {
        match question.kind {
            QuestionKind::ShortText => Self::input("text", Validator::Text, None),
            QuestionKind::LongText => Self::textarea(),
            QuestionKind::Email => Self::input("email", Validator::Email, None),
            QuestionKind::Phone => Self::input("tel", Validator::Phone, Some(PHONE_MAX_LENGTH)),
            QuestionKind::SingleChoiceList => Self::choices("list", &question.options),
            QuestionKind::SingleChoiceCards => Self::choices("cards", &question.options),
        }
    }
}

impl<'a> DocumentView<'a> {
    pub(crate) fn build(
        definition: &'a FormDefinition,
        config: &RuntimeConfig,
        config_json: String,
    ) -> Self {
        let identity = &definition.identity;
        let questions = definition.sorted_questions();
        let last = questions.len();
        let steps = questions
            .into_iter()
            .enumerate()
            .map(|(index, question)| {
                let step = index + 1;
                StepView {
                    step,
                    id: &question.id,
                    kind: question.kind.as_str(),
                    label: &question.label,
                    placeholder: question.placeholder(),
                    required: question.required,
                    active: step == 1,
                    has_back: step > 1,
                    continue_label: if step == last { "Revisar" } else { "Continuar" },
                    control: ControlView::for_question(question),
                }
            })
            .collect();

        Self {
            page_title: identity.page_title(),
            company_name: identity.company_name.trim(),
            hero_title: identity.hero_title(),
            hero_subtitle: Some(identity.customization.hero_subtitle.trim())
                .filter(|value| !value.is_empty()),
            logo: identity.logo(),
            benefits: identity.benefits(),
            primary: normalize_hex(identity.primary_color()),
            secondary: normalize_hex(identity.secondary_color()),
            total_steps: config.total_steps,
            steps,
            review_step: config.review_step(),
            review_active: last == 0,
            review_has_back: last > 0,
            commit_step: config.commitment_step(),
            config_json,
            runtime_version: RUNTIME_VERSION,
            runtime_script: RUNTIME_SCRIPT,
        }
    }
}

/// Expand `#rgb` to `#rrggbb` so alpha suffixes can be appended in the stylesheet.
fn normalize_hex(color: &str) -> String {
    let digits = color.trim_start_matches('#');
    if digits.len() == 3 {
        let expanded: String = digits.chars().flat_map(|ch| [ch, ch]).collect();
        format!("#{}", expanded.to_ascii_lowercase())
    } else {
        format!("#{}", digits.to_ascii_lowercase())
    }
}
