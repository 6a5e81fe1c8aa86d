//! Definition-to-document compiler.

pub mod escape;
mod view;

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};

use crate::check::check;
use crate::error::CompileError;
use crate::runtime::{RuntimeConfig, Timing};
use crate::spec::form::FormDefinition;

const DOCUMENT_TEMPLATE: &str = "document";
const DOCUMENT_SOURCE: &str = include_str!("../../templates/document.hbs");
const STEP_SOURCE: &str = include_str!("../../templates/step.hbs");
const STYLE_SOURCE: &str = include_str!("../../templates/style.hbs");

/// Compiler settings that are not part of the form definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompileOptions {
    #[serde(default)]
    pub timing: Timing,
}

/// Template registry plus options; build once, compile many definitions.
pub struct Compiler {
    registry: Handlebars<'static>,
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Result<Self, CompileError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::html_escape);
        registry
            .register_partial("style", STYLE_SOURCE)
            .map_err(Box::new)?;
        registry
            .register_partial("step", STEP_SOURCE)
            .map_err(Box::new)?;
        registry
            .register_template_string(DOCUMENT_TEMPLATE, DOCUMENT_SOURCE)
            .map_err(Box::new)?;
        Ok(Self { registry, options })
    }

    /// The runtime configuration a definition compiles to.
    pub fn runtime_config(&self, definition: &FormDefinition) -> RuntimeConfig {
        RuntimeConfig::from_definition(definition, self.options.timing)
    }

    /// Compile a definition into a self-contained HTML document.
    pub fn compile(&self, definition: &FormDefinition) -> Result<String, CompileError> {
        let report = check(definition)?;
        for warning in &report.warnings {
            tracing::warn!(slug = %definition.identity.slug, "{}", warning);
        }

        let config = self.runtime_config(definition);
        let config_json = serde_json::to_string(&config).map_err(CompileError::Encode)?;
        let document = view::DocumentView::build(definition, &config, escape::script_json(&config_json));
        let html = self.registry.render(DOCUMENT_TEMPLATE, &document)?;

        tracing::debug!(
            slug = %definition.identity.slug,
            steps = config.total_steps,
            bytes = html.len(),
            "compiled funnel document"
        );
        Ok(html)
    }
}

/// Compile with default options.
pub fn compile(definition: &FormDefinition) -> Result<String, CompileError> {
    Compiler::new(CompileOptions::default())?.compile(definition)
}

/// File name used when exporting a compiled funnel.
pub fn export_file_name(definition: &FormDefinition) -> String {
    format!("formulario-{}.html", definition.identity.slug)
}
