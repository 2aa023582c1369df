//! Core data types: records and adapter configuration
//!
//! # Key Types
//!
//! - [`Record`] - A typed content block: `{ "type": ..., "data": { ... } }`
//! - [`AdapterConfig`] - Markup naming options resolved once per adapter
//!
//! # Usage
//!
//! ```rust
//! use html_block_adapter::{AdapterConfig, Record};
//! use serde_json::json;
//!
//! let config = AdapterConfig::default()
//!     .with_element_class("block")
//!     .with_add_element_type_class(false);
//! assert_eq!(config.data_attribute(), "data-st");
//!
//! let record = Record::from_value(&json!({"type": "text", "data": {"text": "Hi"}})).unwrap();
//! assert_eq!(record.kind, "text");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};

/// A typed content block
///
/// `kind` names the rendering strategy and `data` carries the type-specific
/// fields. Any other top-level keys of the source JSON are kept in `extra`
/// so the embedded copy stays verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Map<String, JsonValue>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Record {
    /// Create a record from a type name and a data object
    pub fn new(kind: impl Into<String>, data: Map<String, JsonValue>) -> Self {
        Self {
            kind: kind.into(),
            data,
            extra: Map::new(),
        }
    }

    /// Validate a JSON value against the record shape
    ///
    /// A value is a record only if it is an object with a non-empty string
    /// `type` and an object-valued `data`.
    pub fn from_value(value: &JsonValue) -> Result<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| Error::invalid_record_static("record must be a JSON object"))?;

        let kind = match obj.get("type") {
            Some(JsonValue::String(kind)) if !kind.is_empty() => kind.clone(),
            Some(JsonValue::String(_)) => {
                return Err(Error::invalid_record_static("`type` is empty"));
            }
            Some(_) => return Err(Error::invalid_record_static("`type` must be a string")),
            None => return Err(Error::invalid_record_static("`type` is missing")),
        };

        let data = match obj.get("data") {
            Some(JsonValue::Object(data)) => data.clone(),
            Some(_) => return Err(Error::invalid_record_static("`data` must be an object")),
            None => return Err(Error::invalid_record_static("`data` is missing")),
        };

        let extra = obj
            .iter()
            .filter(|(key, _)| key.as_str() != "type" && key.as_str() != "data")
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();

        Ok(Self { kind, data, extra })
    }

    /// Whether the record satisfies the shape `from_value` enforces
    pub fn is_valid(&self) -> bool {
        !self.kind.is_empty()
    }

    /// Convert back to a JSON object
    pub fn to_value(&self) -> JsonValue {
        let mut obj = self.extra.clone();
        obj.insert("type".to_string(), JsonValue::String(self.kind.clone()));
        obj.insert("data".to_string(), JsonValue::Object(self.data.clone()));
        JsonValue::Object(obj)
    }

    /// Canonical JSON text of the record (compact, keys sorted)
    pub fn to_canonical_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_value())?)
    }
}

impl TryFrom<&JsonValue> for Record {
    type Error = Error;

    fn try_from(value: &JsonValue) -> Result<Self> {
        Record::from_value(value)
    }
}

impl From<Record> for JsonValue {
    fn from(record: Record) -> Self {
        record.to_value()
    }
}

pub const DEFAULT_ELEMENT_ENCLOSING_TAG: &str = "div";
pub const DEFAULT_ELEMENT_CLASS: &str = "st-render";
pub const DEFAULT_CONTAINER_CLASS: &str = "st-render-container";
pub const DEFAULT_ATTR_NAME: &str = "st";

/// Prefix prepended to [`AdapterConfig::attr_name`]
pub const ATTR_NAMESPACE: &str = "data-";

/// Tags an HTML parser drops, moves or renames when they appear inside a
/// `<div>`, so rendered records using them could not be read back
const UNSCANNABLE_TAGS: &[&str] = &[
    "html", "head", "body", "frameset", "frame", "caption", "col", "colgroup", "tbody", "thead",
    "tfoot", "tr", "td", "th", "template", "image", "plaintext",
];

/// Markup naming options
///
/// Every field is optional when deserialized; missing fields take the
/// defaults (`div`, `st-render`, `true`, `st-render-container`, `st`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdapterConfig {
    pub(crate) element_enclosing_tag: String,
    pub(crate) element_class: String,
    pub(crate) add_element_type_class: bool,
    pub(crate) container_class: String,
    pub(crate) attr_name: String,
}

impl AdapterConfig {
    /// Create a new configuration with the default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the element wrapping every rendered record
    pub fn with_element_enclosing_tag(mut self, tag: impl Into<String>) -> Self {
        self.element_enclosing_tag = tag.into();
        self
    }

    /// Set the marker class carried by every rendered record
    pub fn with_element_class(mut self, class: impl Into<String>) -> Self {
        self.element_class = class.into();
        self
    }

    /// Enable or disable the additional `<elementClass>-<type>` class
    pub fn with_add_element_type_class(mut self, enabled: bool) -> Self {
        self.add_element_type_class = enabled;
        self
    }

    /// Set the class of the wrapper around a rendered collection
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }

    /// Set the attribute name (without the `data-` prefix)
    pub fn with_attr_name(mut self, name: impl Into<String>) -> Self {
        self.attr_name = name.into();
        self
    }

    /// Parse a configuration from JSON, filling missing fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    // Accessors
    pub fn element_enclosing_tag(&self) -> &str {
        &self.element_enclosing_tag
    }
    pub fn element_class(&self) -> &str {
        &self.element_class
    }
    pub fn add_element_type_class(&self) -> bool {
        self.add_element_type_class
    }
    pub fn container_class(&self) -> &str {
        &self.container_class
    }
    pub fn attr_name(&self) -> &str {
        &self.attr_name
    }

    /// Full attribute name holding the embedded record
    ///
    /// HTML parsing lowercases attribute names, so the name is lowercased
    /// here too; writing and reading then agree.
    pub fn data_attribute(&self) -> String {
        format!("{}{}", ATTR_NAMESPACE, self.attr_name.to_ascii_lowercase())
    }

    /// Classes assigned to the element rendered for `kind`
    pub fn element_classes(&self, kind: &str) -> Vec<String> {
        let mut classes = vec![self.element_class.clone()];
        if self.add_element_type_class {
            classes.push(format!("{}-{}", self.element_class, kind));
        }
        classes
    }

    /// Check tag, class and attribute names before an adapter is built
    pub fn validate(&self) -> Result<()> {
        if !crate::utils::is_markup_name(&self.element_enclosing_tag) {
            return Err(Error::config_owned(format!(
                "invalid elementEnclosingTag '{}'",
                self.element_enclosing_tag
            )));
        }
        let tag = self.element_enclosing_tag.to_ascii_lowercase();
        if UNSCANNABLE_TAGS.contains(&tag.as_str()) {
            return Err(Error::config_owned(format!(
                "elementEnclosingTag '{}' does not survive HTML parsing inside a container",
                self.element_enclosing_tag
            )));
        }
        if !crate::utils::is_markup_name(&self.attr_name) {
            return Err(Error::config_owned(format!(
                "invalid attrName '{}'",
                self.attr_name
            )));
        }
        if self.element_class.is_empty() || self.element_class.contains(char::is_whitespace) {
            return Err(Error::config_owned(format!(
                "elementClass '{}' must be a single class name",
                self.element_class
            )));
        }
        Ok(())
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            element_enclosing_tag: DEFAULT_ELEMENT_ENCLOSING_TAG.to_string(),
            element_class: DEFAULT_ELEMENT_CLASS.to_string(),
            add_element_type_class: true,
            container_class: DEFAULT_CONTAINER_CLASS.to_string(),
            attr_name: DEFAULT_ATTR_NAME.to_string(),
        }
    }
}
