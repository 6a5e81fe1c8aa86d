use thiserror::Error;

/// Reasons a definition cannot be compiled into a funnel document.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("question '{question_id}' has unknown type '{kind}'")]
    UnknownQuestionKind { question_id: String, kind: String },
    #[error("question at position {position} has an empty id")]
    EmptyQuestionId { position: usize },
    #[error("question id '{0}' is used more than once")]
    DuplicateQuestionId(String),
    #[error("question '{question_id}' repeats option id '{option_id}'")]
    DuplicateOptionId {
        question_id: String,
        option_id: String,
    },
    #[error("identity field '{0}' is required")]
    MissingIdentityField(&'static str),
    #[error("slug '{0}' is not a URL-safe token (lowercase letters, digits and single dashes)")]
    InvalidSlug(String),
    #[error("color '{field}' has invalid value '{value}' (expected #rgb or #rrggbb)")]
    InvalidColor { field: &'static str, value: String },
    #[error("failed to parse form definition: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to encode runtime configuration: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),
    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),
}
