use std::collections::BTreeSet;

use chrono::Utc;

use crate::field::{FieldCheck, Validator};
use crate::qualify::{self, Answers};
use crate::runtime::config::{QuestionDescriptor, RuntimeConfig};
use crate::runtime::submit::{Status, Submission};

/// What is on screen at a given step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    Question(&'a QuestionDescriptor),
    Review,
    Commitment,
}

/// Why an event left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// The current field does not validate; the continue control is disabled.
    Invalid,
    /// A selection was already made on this step.
    Locked,
    /// The event has no control on the current step.
    Unavailable,
    /// The selected value is not one of the step's options.
    UnknownOption,
    /// The funnel was already submitted.
    Finished,
}

/// Result of feeding one event to the funnel.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Moved { from: usize, to: usize },
    /// A choice was recorded; the advance fires after `delay_ms` via [`Funnel::fire_timer`].
    Scheduled { step: usize, delay_ms: u64 },
    Submitted(Submission),
    Ignored(Ignored),
}

/// Mutable session state of one respondent.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeState {
    pub current_step: usize,
    pub answers: Answers,
    pub qualified: bool,
    pub editing: bool,
    pub finished: bool,
    locked: BTreeSet<usize>,
    pending: Option<usize>,
}

impl Default for RuntimeState {
    fn default() -> Self {
        Self {
            current_step: 1,
            answers: Answers::new(),
            qualified: true,
            editing: false,
            finished: false,
            locked: BTreeSet::new(),
            pending: None,
        }
    }
}

/// One review line: an answered question and the step that edits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub step: usize,
    pub question_id: String,
    pub label: String,
    pub value: String,
}

/// Step state machine driving a funnel, the Rust twin of the embedded script.
#[derive(Debug, Clone)]
pub struct Funnel<'a> {
    config: &'a RuntimeConfig,
    state: RuntimeState,
}

impl<'a> Funnel<'a> {
    pub fn new(config: &'a RuntimeConfig) -> Self {
        let mut funnel = Self {
            config,
            state: RuntimeState::default(),
        };
        if config.questions.is_empty() {
            funnel.enter_review();
        }
        funnel
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.config.total_steps
    }

    pub fn is_qualified(&self) -> bool {
        self.state.qualified
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.state.answers.get(question_id).map(String::as_str)
    }

    pub fn screen(&self) -> Screen<'a> {
        let step = self.state.current_step;
        if let Some(question) = self.config.question_at(step) {
            Screen::Question(question)
        } else if step == self.config.review_step() {
            Screen::Review
        } else {
            Screen::Commitment
        }
    }

    /// Cosmetic progress, `(step - 1) / total` as a rounded percentage.
    pub fn progress_percent(&self) -> u32 {
        let done = (self.state.current_step - 1) as f64;
        (done / self.config.total_steps as f64 * 100.0).round() as u32
    }

    /// Keystrokes on the current step's input. `None` when the step has no input.
    pub fn input(&mut self, raw: &str) -> Option<FieldCheck> {
        if self.state.finished {
            return None;
        }
        let Screen::Question(question) = self.screen() else {
            return None;
        };
        let check = Validator::for_kind(question.kind)?.check(raw, question.required);
        self.state
            .answers
            .insert(question.id.clone(), check.value.clone());
        Some(check)
    }

    /// The primary action of the current step: continue on inputs, confirm on review.
    pub fn advance(&mut self) -> Transition {
        if self.state.finished {
            return Transition::Ignored(Ignored::Finished);
        }
        match self.screen() {
            Screen::Question(question) => {
                let Some(validator) = Validator::for_kind(question.kind) else {
                    return Transition::Ignored(Ignored::Unavailable);
                };
                let current = self.answer(&question.id).unwrap_or_default();
                if !validator.check(current, question.required).valid {
                    return Transition::Ignored(Ignored::Invalid);
                }
                self.leave_question()
            }
            Screen::Review => self.confirm_review(),
            Screen::Commitment => Transition::Ignored(Ignored::Unavailable),
        }
    }

    /// Pick an option on a choice step; the step locks until shown again.
    pub fn select(&mut self, value: &str) -> Transition {
        if self.state.finished {
            return Transition::Ignored(Ignored::Finished);
        }
        let Screen::Question(question) = self.screen() else {
            return Transition::Ignored(Ignored::Unavailable);
        };
        if !question.kind.is_choice() {
            return Transition::Ignored(Ignored::Unavailable);
        }
        let step = self.state.current_step;
        if self.state.locked.contains(&step) {
            return Transition::Ignored(Ignored::Locked);
        }
        if !question.options.iter().any(|option| option == value) {
            return Transition::Ignored(Ignored::UnknownOption);
        }
        self.state.locked.insert(step);
        self.state
            .answers
            .insert(question.id.clone(), value.to_string());
        self.state.pending = Some(step);
        Transition::Scheduled {
            step,
            delay_ms: self.config.timing.choice_delay_ms,
        }
    }

    /// The choice delay elapsed. Advances only if the respondent is still on the selecting step.
    pub fn fire_timer(&mut self) -> Transition {
        let Some(step) = self.state.pending.take() else {
            return Transition::Ignored(Ignored::Unavailable);
        };
        if self.state.finished {
            return Transition::Ignored(Ignored::Finished);
        }
        if step != self.state.current_step {
            return Transition::Ignored(Ignored::Unavailable);
        }
        self.leave_question()
    }

    /// Select and let the feedback delay elapse.
    pub fn choose(&mut self, value: &str) -> Transition {
        match self.select(value) {
            Transition::Scheduled { .. } => self.fire_timer(),
            other => other,
        }
    }

    pub fn back(&mut self) -> Transition {
        if self.state.finished {
            return Transition::Ignored(Ignored::Finished);
        }
        let step = self.state.current_step;
        if step <= 1 {
            return Transition::Ignored(Ignored::Unavailable);
        }
        self.show_step(step - 1)
    }

    /// Edit a question from the review step; its next completion returns to review.
    pub fn edit(&mut self, step: usize) -> Transition {
        if self.state.finished {
            return Transition::Ignored(Ignored::Finished);
        }
        if self.screen() != Screen::Review || self.config.question_at(step).is_none() {
            return Transition::Ignored(Ignored::Unavailable);
        }
        self.state.editing = true;
        self.show_step(step)
    }

    /// Leave review: commitment when qualified, otherwise submit right away.
    pub fn confirm_review(&mut self) -> Transition {
        if self.state.finished {
            return Transition::Ignored(Ignored::Finished);
        }
        if self.screen() != Screen::Review {
            return Transition::Ignored(Ignored::Unavailable);
        }
        if self.state.qualified {
            self.show_step(self.config.commitment_step())
        } else {
            self.submit(Status::Disqualified)
        }
    }

    /// Answer the commitment step; both answers submit.
    pub fn commit(&mut self, confirmed: bool) -> Transition {
        if self.state.finished {
            return Transition::Ignored(Ignored::Finished);
        }
        if self.screen() != Screen::Commitment {
            return Transition::Ignored(Ignored::Unavailable);
        }
        self.submit(Status::from_verdict(confirmed))
    }

    /// Answered questions in render order, as listed on the review step.
    pub fn review_entries(&self) -> Vec<ReviewEntry> {
        self.config
            .questions
            .iter()
            .enumerate()
            .filter_map(|(index, question)| {
                let value = self.answer(&question.id).filter(|value| !value.is_empty())?;
                Some(ReviewEntry {
                    step: index + 1,
                    question_id: question.id.clone(),
                    label: question.label.clone(),
                    value: value.to_string(),
                })
            })
            .collect()
    }

    fn leave_question(&mut self) -> Transition {
        let step = self.state.current_step;
        if self.state.editing || step >= self.config.questions.len() {
            self.state.editing = false;
            self.enter_review()
        } else {
            self.show_step(step + 1)
        }
    }

    fn enter_review(&mut self) -> Transition {
        self.state.qualified = qualify::evaluate(&self.config.criteria, &self.state.answers);
        tracing::debug!(qualified = self.state.qualified, "qualification evaluated");
        self.show_step(self.config.review_step())
    }

    fn show_step(&mut self, step: usize) -> Transition {
        let from = self.state.current_step;
        self.state.current_step = step;
        self.state.locked.remove(&step);
        tracing::debug!(from, to = step, "funnel step changed");
        Transition::Moved { from, to: step }
    }

    fn submit(&mut self, status: Status) -> Transition {
        self.state.finished = true;
        let submission = Submission::new(
            status,
            &self.config.destinations,
            &self.state.answers,
            Utc::now(),
        );
        tracing::info!(
            status = status.as_str(),
            webhook = submission.webhook.as_deref().unwrap_or("<none>"),
            "funnel submitted"
        );
        Transition::Submitted(submission)
    }
}
