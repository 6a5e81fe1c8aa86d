#![allow(missing_docs)]

pub mod check;
pub mod compile;
pub mod error;
pub mod field;
pub mod qualify;
pub mod runtime;
pub mod spec;

pub use check::{CheckReport, CheckWarning, check, parse_definition, slugify};
pub use compile::{CompileOptions, Compiler, compile, export_file_name};
pub use error::CompileError;
pub use field::{FieldCheck, Validator, format_phone, is_email};
pub use qualify::{Answers, evaluate};
pub use runtime::{
    Funnel, Ignored, RUNTIME_VERSION, ReviewEntry, RuntimeConfig, RuntimeState, Screen, Status,
    Submission, Timing, Transition,
};
pub use spec::{
    CombineMode, Criteria, FormDefinition, Identity, Question, QuestionKind, QuestionOption, Rule,
    RuleOperator,
};
