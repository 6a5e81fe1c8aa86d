use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Comparison applied by a qualification rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RuleOperator {
    Equals,
    NotEquals,
    Contains,
    GreaterThan,
    LessThan,
}

/// How rule outcomes are combined into a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub enum CombineMode {
    #[default]
    #[serde(rename = "AND", alias = "ALL")]
    All,
    #[serde(rename = "OR", alias = "ANY")]
    Any,
}

/// A single qualification rule targeting one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub question_id: String,
    pub operator: RuleOperator,
    pub value: String,
}

/// Qualification criteria: rules plus their combination mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct Criteria {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub logic: CombineMode,
}
