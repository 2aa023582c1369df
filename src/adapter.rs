//! Rendering records to markup and recovering them
//!
//! [`Adapter`] is the entry point of the crate. It owns a frozen
//! [`TemplateRegistry`] and an [`AdapterConfig`]; every call is independent
//! and leaves the adapter untouched.
//!
//! # Rendered markup
//!
//! Each record becomes one element:
//!
//! ```html
//! <div class="st-render st-render-heading" data-st="{&quot;data&quot;:...}"><h2>Title</h2></div>
//! ```
//!
//! The `data-st` attribute holds the canonical JSON of the record, which is
//! what [`Adapter::to_json`] reads back. The visible content may be lossy;
//! the attribute never is.
//!
//! # Usage
//!
//! ```rust
//! use html_block_adapter::Adapter;
//! use serde_json::json;
//!
//! let adapter = Adapter::new();
//! let blocks = json!([
//!     {"type": "heading", "data": {"text": "Title"}},
//!     {"type": "text", "data": {"text": "Body"}}
//! ]);
//!
//! let html = adapter.to_html(&blocks);
//! assert!(html.starts_with(r#"<div class="st-render-container">"#));
//!
//! let records = adapter.to_json(&html);
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].kind, "heading");
//! ```

use serde_json::{Map, Value as JsonValue};

use crate::builder::AdapterBuilder;
use crate::builtins;
use crate::error::{Error, Result};
use crate::markup;
use crate::registry::TemplateRegistry;
use crate::types::{AdapterConfig, Record};

/// Renderer and parser for typed content blocks
#[derive(Debug, Clone)]
pub struct Adapter {
    pub(crate) config: AdapterConfig,
    pub(crate) templates: TemplateRegistry,
}

impl Adapter {
    /// Create an adapter with the default configuration and templates
    pub fn new() -> Self {
        Self {
            config: AdapterConfig::default(),
            templates: builtins::default_templates().clone(),
        }
    }

    /// Start configuring an adapter
    pub fn builder() -> AdapterBuilder {
        AdapterBuilder::new()
    }

    /// The built-in template table every adapter starts from
    pub fn default_templates() -> &'static TemplateRegistry {
        builtins::default_templates()
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    /// Render `data` with the template for `kind`
    ///
    /// An empty `kind` is a contract violation and fails. Every other
    /// problem (no template, template failure) is logged and yields an
    /// empty string.
    pub fn render_type(&self, kind: &str, data: &Map<String, JsonValue>) -> Result<String> {
        if kind.is_empty() {
            return Err(Error::MissingType);
        }
        Ok(self.templates.render(kind, data))
    }

    /// Render one record as an element carrying the record itself
    pub fn map(&self, record: &Record) -> String {
        if !record.is_valid() {
            tracing::error!("{} is not a valid block record", record.to_value());
            return String::new();
        }

        let json = match record.to_canonical_json() {
            Ok(json) => json,
            Err(err) => {
                tracing::error!("failed to serialize {} record: {}", record.kind, err);
                return String::new();
            }
        };

        let inner = self.templates.render(&record.kind, &record.data);
        let attr = self.config.data_attribute();
        match markup::element(
            &self.config.element_enclosing_tag,
            &self.config.element_classes(&record.kind),
            &[(attr.as_str(), json.as_str())],
            &inner,
        ) {
            Ok(html) => html,
            Err(err) => {
                tracing::error!("failed to build element for {} record: {}", record.kind, err);
                String::new()
            }
        }
    }

    /// Render one JSON value, validating the record shape first
    ///
    /// Values that are not records are logged and render as an empty string.
    pub fn map_value(&self, value: &JsonValue) -> String {
        match Record::from_value(value) {
            Ok(record) => self.map(&record),
            Err(err) => {
                tracing::error!("{} is not a valid block record: {}", value, err);
                String::new()
            }
        }
    }

    /// Render a record or a list of records
    ///
    /// An array renders every element (joined with newlines) inside a
    /// single `<div class="{containerClass}">`. Any other value renders as a
    /// single record with no wrapper, so callers can tell one block from a
    /// list holding one block.
    pub fn to_html(&self, json: &JsonValue) -> String {
        match json {
            JsonValue::Array(values) => {
                let mapped: Vec<String> = values.iter().map(|v| self.map_value(v)).collect();
                self.wrap(&mapped)
            }
            single => self.map_value(single),
        }
    }

    /// Alias of [`Adapter::to_html`]
    pub fn from_json(&self, json: &JsonValue) -> String {
        self.to_html(json)
    }

    /// Render a list of typed records inside the collection container
    pub fn to_html_records(&self, records: &[Record]) -> String {
        let mapped: Vec<String> = records.iter().map(|r| self.map(r)).collect();
        self.wrap(&mapped)
    }

    fn wrap(&self, mapped: &[String]) -> String {
        markup::container(&self.config.container_class, &mapped.join("\n"))
    }

    /// Recover the records embedded in `html`
    ///
    /// Scans the whole document for elements carrying the element class,
    /// regardless of nesting or container. Elements whose attribute is
    /// missing, not JSON, or not a record are logged and skipped.
    pub fn to_json(&self, html: &str) -> Vec<Record> {
        self.to_json_values(html)
            .into_iter()
            .filter_map(|value| match Record::from_value(&value) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!("skipping embedded value {}: {}", value, err);
                    None
                }
            })
            .collect()
    }

    /// Alias of [`Adapter::to_json`]
    pub fn from_html(&self, html: &str) -> Vec<Record> {
        self.to_json(html)
    }

    /// Recover the raw embedded JSON values, without record validation
    pub fn to_json_values(&self, html: &str) -> Vec<JsonValue> {
        let attr = self.config.data_attribute();
        markup::scan(html, &self.config.element_class, &attr)
            .into_iter()
            .filter_map(|raw| {
                let Some(raw) = raw else {
                    tracing::warn!("element with class {} has no {} attribute", self.config.element_class, attr);
                    return None;
                };
                match serde_json::from_str::<JsonValue>(&raw) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        tracing::warn!("undecodable {} attribute {:?}: {}", attr, raw, err);
                        None
                    }
                }
            })
            .collect()
    }
}

impl Default for Adapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tracing_test::traced_test;

    fn record(value: JsonValue) -> Record {
        Record::from_value(&value).unwrap()
    }

    #[test]
    fn test_map_heading() {
        let adapter = Adapter::new();
        let html = adapter.map(&record(json!({"type": "heading", "data": {"text": "Title"}})));
        assert_eq!(
            html,
            r#"<div class="st-render st-render-heading" data-st="{&quot;data&quot;:{&quot;text&quot;:&quot;Title&quot;},&quot;type&quot;:&quot;heading&quot;}"><h2>Title</h2></div>"#
        );
    }

    #[test]
    fn test_render_type_requires_type() {
        let adapter = Adapter::new();
        assert!(matches!(
            adapter.render_type("", &Map::new()),
            Err(Error::MissingType)
        ));
    }

    #[test]
    fn test_render_type_degrades_softly() {
        let adapter = Adapter::new();
        assert_eq!(adapter.render_type("unknown", &Map::new()).unwrap(), "");
        assert_eq!(adapter.render_type("heading", &Map::new()).unwrap(), "");
    }

    #[test]
    #[traced_test]
    fn test_map_value_rejects_invalid_shape() {
        let adapter = Adapter::new();
        assert_eq!(adapter.map_value(&json!({"type": "text"})), "");
        assert!(logs_contain("is not a valid block record"));
    }

    #[test]
    #[traced_test]
    fn test_map_rejects_empty_kind() {
        let adapter = Adapter::new();
        assert_eq!(adapter.map(&Record::new("", Map::new())), "");
        assert!(logs_contain("is not a valid block record"));
    }

    #[test]
    #[traced_test]
    fn test_to_json_skips_undecodable_attributes() {
        let adapter = Adapter::new();
        let html = r#"<div class="st-render" data-st="{oops"></div><div class="st-render"></div>"#;
        assert!(adapter.to_json(html).is_empty());
        assert!(logs_contain("undecodable data-st attribute"));
        assert!(logs_contain("has no data-st attribute"));
    }

    #[test]
    #[traced_test]
    fn test_to_json_skips_non_record_values() {
        let adapter = Adapter::new();
        let html = r#"<div class="st-render" data-st="[1,2]"></div>"#;
        assert!(adapter.to_json(html).is_empty());
        assert_eq!(adapter.to_json_values(html), vec![json!([1, 2])]);
        assert!(logs_contain("skipping embedded value"));
    }

    #[test]
    fn test_to_html_records_wraps() {
        let adapter = Adapter::new();
        let records = vec![
            record(json!({"type": "text", "data": {"text": "a"}})),
            record(json!({"type": "text", "data": {"text": "b"}})),
        ];
        let html = adapter.to_html_records(&records);
        assert!(html.starts_with(r#"<div class="st-render-container"><div class="st-render st-render-text""#));
        assert!(html.contains("</div>\n<div"));
        assert_eq!(adapter.to_json(&html), records);
    }

    #[test]
    fn test_aliases() {
        let adapter = Adapter::new();
        let value = json!({"type": "quote", "data": {"text": "q"}});
        let html = adapter.from_json(&value);
        assert_eq!(html, adapter.to_html(&value));
        assert_eq!(adapter.from_html(&html), adapter.to_json(&html));
    }

    #[test]
    fn test_default_templates_exposed() {
        assert!(Adapter::default_templates().contains("heading"));
        assert_eq!(Adapter::new().templates().len(), Adapter::default_templates().len());
    }
}
