//! Rendering strategies for a single block type
//!
//! A [`Template`] is either compiled template source or a rendering
//! function. Both are reference-counted, so registries copy them cheaply.
//!
//! ```rust
//! use html_block_adapter::Template;
//! use serde_json::json;
//!
//! let heading = Template::parse("<h2><%= text %></h2>").unwrap();
//! let data = json!({"text": "Title"});
//! assert_eq!(heading.render(data.as_object().unwrap()).unwrap(), "<h2>Title</h2>");
//!
//! let shout = Template::function(|data| {
//!     Ok(data["text"].as_str().unwrap_or_default().to_uppercase())
//! });
//! assert_eq!(shout.render(data.as_object().unwrap()).unwrap(), "TITLE");
//! ```

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

use crate::error::{Error, Result};
use crate::parser::{Parser, Segment};
use crate::renderer::Renderer;
use crate::value::Scope;

/// Signature of a rendering function
///
/// The function receives the record's `data` and is fully responsible for
/// escaping whatever it interpolates.
pub type RenderFn = dyn Fn(&Map<String, JsonValue>) -> Result<String> + Send + Sync;

/// Template source compiled once into segments
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl CompiledTemplate {
    pub fn compile(source: &str) -> Result<Self> {
        Ok(Self {
            source: source.to_string(),
            segments: Parser::parse(source)?,
        })
    }

    /// The original template text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Substitute placeholders from the fields of `data`
    pub fn render(&self, data: &Map<String, JsonValue>) -> Result<String> {
        let mut scope = Scope::new(data);
        Renderer::new(&self.segments).render(&mut scope)
    }

    /// Substitute placeholders from an explicit context object
    ///
    /// Rendering functions use this to fill sub-templates with values they
    /// computed themselves.
    pub fn render_with(&self, context: &JsonValue) -> Result<String> {
        match context {
            JsonValue::Object(map) => self.render(map),
            _ => Err(Error::render_static("template context must be an object")),
        }
    }
}

/// Rendering strategy registered for a block type
#[derive(Clone)]
pub enum Template {
    Source(Arc<CompiledTemplate>),
    Function(Arc<RenderFn>),
}

impl Template {
    /// Compile template source
    pub fn parse(source: &str) -> Result<Self> {
        Ok(Template::Source(Arc::new(CompiledTemplate::compile(source)?)))
    }

    /// Wrap a rendering function
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&Map<String, JsonValue>) -> Result<String> + Send + Sync + 'static,
    {
        Template::Function(Arc::new(f))
    }

    /// Render `data`
    ///
    /// Rendering functions that panic are reported as render errors.
    pub fn render(&self, data: &Map<String, JsonValue>) -> Result<String> {
        match self {
            Template::Source(compiled) => compiled.render(data),
            Template::Function(f) => match catch_unwind(AssertUnwindSafe(|| f(data))) {
                Ok(result) => result,
                Err(panic) => {
                    let reason = panic
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    Err(Error::render_owned(format!(
                        "rendering function panicked: {}",
                        reason
                    )))
                }
            },
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Template::Function(_))
    }

    /// Template text, for source templates
    pub fn source(&self) -> Option<&str> {
        match self {
            Template::Source(compiled) => Some(compiled.source()),
            Template::Function(_) => None,
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Source(compiled) => f.debug_tuple("Source").field(&compiled.source()).finish(),
            Template::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<CompiledTemplate> for Template {
    fn from(compiled: CompiledTemplate) -> Self {
        Template::Source(Arc::new(compiled))
    }
}
