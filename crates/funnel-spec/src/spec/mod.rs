pub mod criteria;
pub mod form;
pub mod question;

pub use criteria::{CombineMode, Criteria, Rule, RuleOperator};
pub use form::{Colors, Customization, Destinations, EndpointPair, FormDefinition, Identity};
pub use question::{Question, QuestionKind, QuestionOption};
