//! Value lookup and display for template rendering
//!
//! A [`Scope`] resolves placeholder paths against the record's `data` object
//! and the variables bound by enclosing `for` blocks. Resolution follows the
//! rules of the templating library the block format was designed around:
//!
//! - the first path segment must be bound, otherwise the lookup fails
//! - later segments that do not exist resolve to nothing
//!
//! ```rust
//! use html_block_adapter::value::{display, Scope};
//! use serde_json::json;
//!
//! let data = json!({"file": {"url": "a.png"}});
//! let scope = Scope::new(data.as_object().unwrap());
//! let path = vec!["file".to_string(), "url".to_string()];
//! let value = scope.lookup(&path).unwrap();
//! assert_eq!(display(value), "a.png");
//! ```

use serde_json::{Map, Value as JsonValue};
use std::borrow::Cow;

use crate::error::{Error, Result};

/// Variable bindings visible to a template while it renders
pub struct Scope<'t, 'd> {
    root: &'d Map<String, JsonValue>,
    locals: Vec<(&'t str, &'d JsonValue)>,
}

impl<'t, 'd> Scope<'t, 'd> {
    /// Create a scope whose only bindings are the fields of `root`
    pub fn new(root: &'d Map<String, JsonValue>) -> Self {
        Self {
            root,
            locals: Vec::new(),
        }
    }

    /// Bind `name` to `value`, shadowing outer bindings
    pub fn push(&mut self, name: &'t str, value: &'d JsonValue) {
        self.locals.push((name, value));
    }

    /// Remove the innermost binding
    pub fn pop(&mut self) {
        self.locals.pop();
    }

    /// Resolve a path
    ///
    /// Returns `Ok(None)` when the head is bound but a later segment is
    /// missing, and an error when the head itself is not bound.
    pub fn lookup(&self, path: &[String]) -> Result<Option<&'d JsonValue>> {
        let (head, rest) = path
            .split_first()
            .ok_or_else(|| Error::render_static("empty variable path"))?;

        let (head_name, head_index) = match parse_array_access(head) {
            Some((name, index)) => (name, Some(index)),
            None => (head.clone(), None),
        };

        let bound = self
            .locals
            .iter()
            .rev()
            .find(|(name, _)| *name == head_name)
            .map(|(_, value)| *value)
            .or_else(|| self.root.get(&head_name));

        let mut current = match bound {
            Some(value) => value,
            None => {
                return Err(Error::render_owned(format!("{} is not defined", head_name)));
            }
        };

        if let Some(index) = head_index {
            current = match current.get(index) {
                Some(value) => value,
                None => return Ok(None),
            };
        }

        for segment in rest {
            let next = match parse_array_access(segment) {
                Some((name, index)) => current.get(&name).and_then(|v| v.get(index)),
                None => match current {
                    JsonValue::Array(arr) => segment.parse::<usize>().ok().and_then(|i| arr.get(i)),
                    _ => current.get(segment.as_str()),
                },
            };
            match next {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }

        Ok(Some(current))
    }
}

/// Text shown for a resolved value
///
/// Strings are verbatim, numbers and booleans use their JSON form, null and
/// missing values are empty, arrays are joined with `,` and objects are
/// written as compact JSON.
pub fn display(value: Option<&JsonValue>) -> Cow<'_, str> {
    match value {
        None | Some(JsonValue::Null) => Cow::Borrowed(""),
        Some(JsonValue::String(s)) => Cow::Borrowed(s.as_str()),
        Some(JsonValue::Number(n)) => Cow::Owned(n.to_string()),
        Some(JsonValue::Bool(b)) => Cow::Owned(b.to_string()),
        Some(JsonValue::Array(items)) => Cow::Owned(
            items
                .iter()
                .map(|item| display(Some(item)).into_owned())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Some(obj @ JsonValue::Object(_)) => Cow::Owned(obj.to_string()),
    }
}

/// Items a `for` block iterates over
///
/// Arrays yield their elements, objects their values, null and missing
/// values nothing. Scalars cannot be iterated.
pub fn iter_items(value: Option<&JsonValue>) -> Result<Vec<&JsonValue>> {
    match value {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(JsonValue::Array(items)) => Ok(items.iter().collect()),
        Some(JsonValue::Object(obj)) => Ok(obj.values().collect()),
        Some(other) => Err(Error::render_owned(format!("cannot iterate over {}", other))),
    }
}

fn parse_array_access(segment: &str) -> Option<(String, usize)> {
    if let Some(bracket_pos) = segment.find('[') {
        if segment.ends_with(']') {
            let prop_name = segment[..bracket_pos].to_string();
            let index_str = &segment[bracket_pos + 1..segment.len() - 1];
            if let Ok(index) = index_str.parse::<usize>() {
                return Some((prop_name, index));
            }
        }
    }
    None
}
