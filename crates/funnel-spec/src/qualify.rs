use std::collections::BTreeMap;

use crate::spec::criteria::{CombineMode, Criteria, Rule, RuleOperator};

/// Answers keyed by question id.
pub type Answers = BTreeMap<String, String>;

/// Evaluate the criteria against the answers. No rules means everyone qualifies.
pub fn evaluate(criteria: &Criteria, answers: &Answers) -> bool {
    if criteria.rules.is_empty() {
        return true;
    }
    let mut outcomes = criteria.rules.iter().map(|rule| rule.evaluate(answers));
    match criteria.logic {
        CombineMode::All => outcomes.all(|passed| passed),
        CombineMode::Any => outcomes.any(|passed| passed),
    }
}

impl Rule {
    /// A rule whose target has no answer (or an unknown target) is false.
    pub fn evaluate(&self, answers: &Answers) -> bool {
        let Some(answer) = answers
            .get(&self.question_id)
            .filter(|answer| !answer.is_empty())
        else {
            return false;
        };

        match self.operator {
            RuleOperator::Equals => *answer == self.value,
            RuleOperator::NotEquals => *answer != self.value,
            RuleOperator::Contains => answer.contains(self.value.as_str()),
            RuleOperator::GreaterThan => compare(answer, &self.value, |left, right| left > right),
            RuleOperator::LessThan => compare(answer, &self.value, |left, right| left < right),
        }
    }
}

fn compare(answer: &str, threshold: &str, op: impl Fn(f64, f64) -> bool) -> bool {
    match (leading_number(answer), leading_number(threshold)) {
        (Some(left), Some(right)) => op(left, right),
        _ => false,
    }
}

/// First numeric token of a value, with `.`/`,` group separators dropped.
///
/// `"R$ 1.000"` reads as 1000 and `"R$ 400 a R$ 600"` reads as 400: range
/// answers collapse to their lower bound.
pub fn leading_number(value: &str) -> Option<f64> {
    let start = value.find(|ch: char| ch.is_ascii_digit())?;
    let mut digits = String::new();
    let mut chars = value[start..].chars().peekable();
    while let Some(ch) = chars.next() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        } else if matches!(ch, '.' | ',')
            && chars.peek().is_some_and(|next| next.is_ascii_digit())
        {
            continue;
        } else {
            break;
        }
    }
    digits.parse().ok()
}
