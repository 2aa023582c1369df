//! Markup building and querying
//!
//! Building goes through `dom_query`: the inner markup is parsed into the new
//! element and serialized back, so whatever a raw template emits (an open
//! comment, a `<textarea>`) is closed inside its own element. Querying parses
//! a document and walks every element carrying a class token.

use dom_query::{Document, Node};

use crate::error::{Error, Result};
use crate::utils::escape_html_cow;

/// Extension trait for dom_query::Node to provide class and attribute helpers
pub trait NodeExt {
    fn class_list(&self) -> Vec<String>;
    fn has_class_token(&self, class: &str) -> bool;
    fn attr_string(&self, name: &str) -> Option<String>;
}

impl<'a> NodeExt for Node<'a> {
    fn class_list(&self) -> Vec<String> {
        self.attr("class")
            .map(|classes| classes.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    fn has_class_token(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    fn attr_string(&self, name: &str) -> Option<String> {
        self.attr(name).map(|value| value.to_string())
    }
}

/// Outer markup of a new element
///
/// `classes` become a single `class` attribute (omitted when empty). `inner`
/// is parsed as the element's content and serialized balanced. Fails when the
/// parser does not keep a `tag` element in a document body.
pub fn element(tag: &str, classes: &[String], attrs: &[(&str, &str)], inner: &str) -> Result<String> {
    let doc = Document::from(format!("<{tag}></{tag}>").as_str());
    let selection = doc.select(tag);
    if !classes.is_empty() {
        selection.set_attr("class", &classes.join(" "));
    }
    for (name, value) in attrs {
        selection.set_attr(name, value);
    }
    selection.set_html(inner);

    selection
        .nodes()
        .first()
        .map(|node| node.html().to_string())
        .ok_or_else(|| Error::render_owned(format!("cannot build a <{}> element", tag)))
}

/// Collection wrapper around already serialized elements
pub fn container(class: &str, inner: &str) -> String {
    format!(r#"<div class="{}">{}</div>"#, escape_html_cow(class), inner)
}

/// Values of `attr` on every element carrying `class`, in document order
///
/// Elements are matched at any depth. An element without the attribute
/// yields `None`.
pub fn scan(html: &str, class: &str, attr: &str) -> Vec<Option<String>> {
    if html.trim().is_empty() {
        return Vec::new();
    }

    let doc = Document::from(html);
    let attr = attr.to_ascii_lowercase();
    let found: Vec<Option<String>> = doc
        .select("[class]")
        .nodes()
        .iter()
        .filter(|node| node.has_class_token(class))
        .map(|node| node.attr_string(&attr))
        .collect();

    tracing::debug!(class, matches = found.len(), "scanned markup for marker class");
    found
}
