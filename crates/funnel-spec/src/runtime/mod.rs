//! The funnel runtime: the configuration embedded in each document, the
//! fixed script that executes it in the browser, and a Rust model of the same
//! state machine.

pub mod config;
pub mod machine;
pub mod submit;

pub use config::{Destination, DestinationPlan, QuestionDescriptor, RuntimeConfig, Timing};
pub use machine::{Funnel, Ignored, ReviewEntry, RuntimeState, Screen, Transition};
pub use submit::{Status, Submission, is_absolute_url};

/// Version of the embedded script; bumped whenever the script or the config shape changes.
pub const RUNTIME_VERSION: &str = "1.2.0";

/// The browser runtime inlined into every compiled document.
pub const RUNTIME_SCRIPT: &str = include_str!("../../assets/funnel-runtime.js");
