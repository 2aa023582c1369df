//! Render typed content blocks to HTML and recover them later
//!
//! Editors commonly store documents as a list of typed blocks:
//!
//! ```json
//! [{"type": "heading", "data": {"text": "Title"}},
//!  {"type": "list", "data": {"listItems": [{"content": "one"}]}}]
//! ```
//!
//! This crate renders each block through a per-type template and wraps the
//! result in an element that carries the original block as a `data-*`
//! attribute. Parsing the markup later returns exactly the blocks that went
//! in, so rendered documents can be edited again.
//!
//! # Examples
//!
//! ```rust
//! use html_block_adapter::{Adapter, AdapterBuilder};
//! use serde_json::json;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let adapter = AdapterBuilder::new()
//!     .with_template_source("callout", "<aside><%= text %></aside>")
//!     .build()?;
//!
//! let blocks = json!([
//!     {"type": "heading", "data": {"text": "Hello World"}},
//!     {"type": "callout", "data": {"text": "Mind the gap"}}
//! ]);
//!
//! let html = adapter.to_html(&blocks);
//! assert!(html.contains("<h2>Hello World</h2>"));
//! assert!(html.contains("<aside>Mind the gap</aside>"));
//!
//! let records = adapter.to_json(&html);
//! assert_eq!(serde_json::to_value(&records)?, blocks);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod adapter;
pub mod builder;
pub mod builtins;
pub mod error;
pub mod markup;
pub mod parser;
pub mod registry;
pub mod renderer;
pub mod template;
pub mod test_utils;
pub mod types;
pub mod utils;
pub mod value;

// Re-export commonly used types
pub use adapter::Adapter;
pub use builder::AdapterBuilder;
pub use error::{Error, Result};
pub use registry::TemplateRegistry;
pub use template::{CompiledTemplate, RenderFn, Template};
pub use types::{AdapterConfig, Record};
