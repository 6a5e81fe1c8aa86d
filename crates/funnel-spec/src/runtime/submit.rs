use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde_json::{Map, Value};

use crate::qualify::Answers;
use crate::runtime::config::{Destination, DestinationPlan};

static ABSOLUTE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://[^\s/?#]+").expect("url pattern is valid"));

/// Submission status as sent to webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Qualified,
    Disqualified,
}

impl Status {
    pub fn from_verdict(qualified: bool) -> Self {
        if qualified {
            Status::Qualified
        } else {
            Status::Disqualified
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Qualified => "qualificado",
            Status::Disqualified => "desqualificado",
        }
    }
}

/// Everything the runtime does once the funnel finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub status: Status,
    /// Webhook to POST to; `None` when missing or not an absolute http(s) URL.
    pub webhook: Option<String>,
    /// Redirect target; `None` when missing or malformed.
    pub redirect: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub payload: Map<String, Value>,
}

impl Submission {
    pub fn new(
        status: Status,
        destinations: &DestinationPlan,
        answers: &Answers,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        let destination: &Destination = match status {
            Status::Qualified => &destinations.qualified,
            Status::Disqualified => &destinations.disqualified,
        };

        let mut payload = Map::new();
        for (id, value) in answers.iter().filter(|(_, value)| !value.is_empty()) {
            payload.insert(id.clone(), Value::String(value.clone()));
        }
        payload.insert("status".into(), Value::String(status.as_str().into()));
        payload.insert(
            "submittedAt".into(),
            Value::String(submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        );

        Self {
            status,
            webhook: well_formed(&destination.webhook),
            redirect: well_formed(&destination.redirect),
            submitted_at,
            payload,
        }
    }

    /// JSON body of the webhook POST.
    pub fn body(&self) -> String {
        Value::Object(self.payload.clone()).to_string()
    }
}

pub fn is_absolute_url(value: &str) -> bool {
    ABSOLUTE_URL.is_match(value)
}

fn well_formed(url: &str) -> Option<String> {
    let url = url.trim();
    if is_absolute_url(url) {
        Some(url.to_string())
    } else {
        if !url.is_empty() {
            tracing::debug!(url, "skipping malformed destination url");
        }
        None
    }
}
