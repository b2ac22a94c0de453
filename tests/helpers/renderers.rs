//! Renderer stubs standing in for a template engine.

use std::convert::Infallible;

use mime_cascade::negotiate::{RenderOutcome, Renderer};
use mime_cascade::registry::FormatNode;

/// Renders when a template named `"{action}.{format}"` exists.
#[derive(Debug, Default)]
pub struct TemplateSet {
    templates: Vec<String>,
    pub action: String,
    pub attempts: Vec<String>,
    pub content_type: Option<String>,
}

impl TemplateSet {
    pub fn new(action: &str, templates: &[&str]) -> Self {
        Self {
            templates: templates.iter().map(|t| t.to_string()).collect(),
            action: action.to_string(),
            ..Self::default()
        }
    }

    /// Template lookup usable with `resolve_resource`.
    pub fn find(&self, format: &str) -> Option<String> {
        let name = format!("{}.{}", self.action, format);
        self.templates.iter().find(|t| **t == name).cloned()
    }
}

impl Renderer for TemplateSet {
    type Error = Infallible;

    fn render(&mut self, format: &FormatNode) -> Result<RenderOutcome, Infallible> {
        self.attempts.push(format.symbol.to_string());
        if self.find(&format.symbol).is_some() {
            self.content_type = Some(format.mime.to_string());
            Ok(RenderOutcome::Rendered)
        } else {
            Ok(RenderOutcome::ResourceNotFound)
        }
    }
}
