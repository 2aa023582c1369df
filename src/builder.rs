//! Builder pattern API for constructing Adapter instances
//!
//! This module provides a fluent API for choosing markup names and
//! registering per-type templates before the adapter is frozen.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::adapter::Adapter;
use crate::builtins;
use crate::error::{Error, Result};
use crate::registry::TemplateRegistry;
use crate::template::Template;
use crate::types::AdapterConfig;

/// Builder for constructing Adapter instances
///
/// Templates added here override the built-in template of the same type.
/// Overrides come first in the registry's order, followed by the built-ins
/// that were not overridden.
///
/// # Examples
///
/// ```rust
/// use html_block_adapter::AdapterBuilder;
/// use serde_json::json;
///
/// let adapter = AdapterBuilder::new()
///     .element_class("block")
///     .add_element_type_class(false)
///     .with_template_source("quote", "<blockquote><%= text %></blockquote>")
///     .build()
///     .unwrap();
///
/// let html = adapter.to_html(&json!({"type": "quote", "data": {"text": "Hi"}}));
/// assert!(html.starts_with(r#"<div class="block" data-st="#));
/// assert!(html.ends_with("<blockquote>Hi</blockquote></div>"));
/// ```
pub struct AdapterBuilder {
    config: AdapterConfig,
    templates: Vec<(String, PendingTemplate)>,
    include_defaults: bool,
}

/// Template as supplied to the builder
enum PendingTemplate {
    Ready(Template),
    Source(String),
}

#[derive(Deserialize)]
struct TemplateSources {
    #[serde(default)]
    templates: IndexMap<String, String>,
}

impl AdapterBuilder {
    /// Create a new adapter builder with the default configuration
    pub fn new() -> Self {
        Self {
            config: AdapterConfig::default(),
            templates: Vec::new(),
            include_defaults: true,
        }
    }

    /// Create a builder from a JSON configuration object
    ///
    /// Accepts the camelCase option names (`elementEnclosingTag`,
    /// `elementClass`, `addElementTypeClass`, `containerClass`, `attrName`)
    /// and an optional `templates` object mapping type names to template
    /// source, registered in the order given.
    pub fn from_json_config(json: &str) -> Result<Self> {
        let config = AdapterConfig::from_json_str(json)?;
        let sources: TemplateSources = serde_json::from_str(json)?;

        let mut builder = Self::new().with_config(config);
        for (kind, source) in sources.templates {
            builder = builder.with_template_source(kind, source);
        }
        Ok(builder)
    }

    /// Use a complete configuration
    pub fn with_config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the element wrapping every rendered record
    pub fn element_enclosing_tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.config = self.config.with_element_enclosing_tag(tag);
        self
    }

    /// Set the marker class of rendered records
    pub fn element_class<S: Into<String>>(mut self, class: S) -> Self {
        self.config = self.config.with_element_class(class);
        self
    }

    /// Enable or disable the `<elementClass>-<type>` class
    pub fn add_element_type_class(mut self, enabled: bool) -> Self {
        self.config = self.config.with_add_element_type_class(enabled);
        self
    }

    /// Set the class of the collection wrapper
    pub fn container_class<S: Into<String>>(mut self, class: S) -> Self {
        self.config = self.config.with_container_class(class);
        self
    }

    /// Set the embedded attribute name, without the `data-` prefix
    pub fn attr_name<S: Into<String>>(mut self, name: S) -> Self {
        self.config = self.config.with_attr_name(name);
        self
    }

    /// Register a template for a type
    pub fn with_template<S: Into<String>>(mut self, kind: S, template: Template) -> Self {
        self.templates.push((kind.into(), PendingTemplate::Ready(template)));
        self
    }

    /// Register template source for a type, compiled by [`build`](Self::build)
    pub fn with_template_source<S: Into<String>, T: Into<String>>(mut self, kind: S, source: T) -> Self {
        self.templates
            .push((kind.into(), PendingTemplate::Source(source.into())));
        self
    }

    /// Register a rendering function for a type
    pub fn with_function<S, F>(self, kind: S, f: F) -> Self
    where
        S: Into<String>,
        F: Fn(&Map<String, JsonValue>) -> Result<String> + Send + Sync + 'static,
    {
        self.with_template(kind, Template::function(f))
    }

    /// Start from an empty template table instead of the built-ins
    pub fn without_defaults(mut self) -> Self {
        self.include_defaults = false;
        self
    }

    /// Build the Adapter instance
    ///
    /// Fails on invalid configuration names or template syntax errors.
    pub fn build(self) -> Result<Adapter> {
        self.config.validate()?;

        let mut overrides = TemplateRegistry::new();
        for (kind, pending) in self.templates {
            if kind.is_empty() {
                return Err(Error::config_static("template type can't be empty"));
            }
            let template = match pending {
                PendingTemplate::Ready(template) => template,
                PendingTemplate::Source(source) => Template::parse(&source).map_err(|err| {
                    Error::parse_owned(format!("template for type {}: {}", kind, err))
                })?,
            };
            overrides.register(kind, template);
        }

        let templates = if self.include_defaults {
            TemplateRegistry::merged(&overrides, builtins::default_templates())
        } else {
            overrides
        };

        Ok(Adapter {
            config: self.config,
            templates,
        })
    }
}

impl Default for AdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let adapter = AdapterBuilder::new().build().unwrap();
        assert_eq!(adapter.config(), &AdapterConfig::default());
        assert_eq!(
            adapter.templates().types().collect::<Vec<_>>(),
            builtins::default_templates().types().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_overrides_come_first() {
        let adapter = AdapterBuilder::new()
            .with_template_source("gallery", "<div></div>")
            .with_template_source("text", "<p><%= text %></p>")
            .build()
            .unwrap();
        let types: Vec<_> = adapter.templates().types().collect();
        assert_eq!(&types[..3], &["gallery", "text", "quote"]);
        assert_eq!(adapter.templates().get("text").unwrap().source(), Some("<p><%= text %></p>"));
    }

    #[test]
    fn test_without_defaults() {
        let adapter = AdapterBuilder::new()
            .without_defaults()
            .with_function("raw", |_| Ok("raw".to_string()))
            .build()
            .unwrap();
        assert_eq!(adapter.templates().len(), 1);
        assert!(!adapter.templates().contains("text"));
    }

    #[test]
    fn test_invalid_template_source() {
        let err = AdapterBuilder::new()
            .with_template_source("list", "<% for e in items %>")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ParseError(_)));
        assert!(err.to_string().contains("template for type list"));
    }

    #[test]
    fn test_invalid_config() {
        let err = AdapterBuilder::new()
            .element_enclosing_tag("<div>")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let err = AdapterBuilder::new()
            .with_template_source("", "x")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_from_json_config() {
        let json = r#"{
            "elementEnclosingTag": "section",
            "attrName": "block",
            "templates": {
                "zeta": "<i><%= text %></i>",
                "alpha": "<b><%= text %></b>"
            }
        }"#;
        let adapter = AdapterBuilder::from_json_config(json).unwrap().build().unwrap();
        assert_eq!(adapter.config().element_enclosing_tag(), "section");
        assert_eq!(adapter.config().attr_name(), "block");
        assert_eq!(adapter.config().element_class(), "st-render");

        let types: Vec<_> = adapter.templates().types().collect();
        assert_eq!(&types[..2], &["zeta", "alpha"]);
    }

    #[test]
    fn test_from_json_config_rejects_bad_json() {
        assert!(matches!(
            AdapterBuilder::from_json_config("{").err(),
            Some(Error::JsonError(_))
        ));
    }
}
