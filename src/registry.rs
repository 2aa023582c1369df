//! Template registry with type-name fallback
//!
//! Templates are kept in registration order. Resolution tries the exact type
//! name first and then scans for the first registered name that the
//! requested type is a leading substring of, so a request for `image`
//! finds `image_edit` when only the latter is registered. With more than one
//! candidate the earliest registration wins; prefer unambiguous type names
//! over relying on that order.

use indexmap::IndexMap;
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};
use crate::template::Template;

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: IndexMap<String, Template>,
}

impl TemplateRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge two registries, `overrides` first
    ///
    /// Every template of `overrides` is registered in its order, followed by
    /// each template of `defaults` whose type is not overridden. The result's
    /// order is the order the prefix fallback scans.
    pub fn merged(overrides: &TemplateRegistry, defaults: &TemplateRegistry) -> Self {
        let mut registry = overrides.clone();
        for (kind, template) in defaults.iter() {
            if !registry.contains(kind) {
                registry.register(kind, template.clone());
            }
        }
        registry
    }

    /// Register a template under an exact type name
    ///
    /// Replacing an existing template keeps its original position.
    pub fn register(&mut self, kind: impl Into<String>, template: Template) -> Option<Template> {
        self.templates.insert(kind.into(), template)
    }

    /// Exact lookup, without fallback
    pub fn get(&self, kind: &str) -> Option<&Template> {
        self.templates.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.templates.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Registered type names in registration order
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Template)> {
        self.templates.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Find the template for `kind`
    ///
    /// Returns the name the template is registered under together with the
    /// template. A registered name `c` is a fallback candidate when
    /// `c.len() >= kind.len()` and `c[..kind.len()] == kind`.
    pub fn resolve(&self, kind: &str) -> Option<(&str, &Template)> {
        if let Some((name, template)) = self.templates.get_key_value(kind) {
            return Some((name.as_str(), template));
        }

        let guessed = self
            .templates
            .iter()
            .find(|(name, _)| name.starts_with(kind))
            .map(|(name, template)| (name.as_str(), template));

        if let Some((name, _)) = guessed {
            tracing::debug!(requested = kind, resolved = name, "using prefix fallback template");
        }
        guessed
    }

    /// Render `data` with the template for `kind`
    pub fn try_render(&self, kind: &str, data: &Map<String, JsonValue>) -> Result<String> {
        let (_, template) = self
            .resolve(kind)
            .ok_or_else(|| Error::TemplateNotFound(kind.to_string()))?;
        template.render(data)
    }

    /// Render `data`, degrading every failure to an empty string
    ///
    /// Misses and template failures are logged with the offending type.
    pub fn render(&self, kind: &str, data: &Map<String, JsonValue>) -> String {
        match self.try_render(kind, data) {
            Ok(html) => html,
            Err(Error::TemplateNotFound(_)) => {
                tracing::warn!("No template for type {}", kind);
                String::new()
            }
            Err(err) => {
                tracing::error!("Error while generating templated view for {}: {}", kind, err);
                String::new()
            }
        }
    }
}
