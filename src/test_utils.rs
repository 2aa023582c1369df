//! Test utilities for rendered block markup
//!
//! Helpers for comparing markup structurally and for poking at the elements
//! an adapter produced.

use dom_query::Document;

use crate::markup::NodeExt;

/// Normalize HTML for comparison by parsing and re-serializing
///
/// # Examples
///
/// ```
/// use html_block_adapter::test_utils::normalize_html;
///
/// let html1 = "<div  class=\"test\"   id=\"main\" ><p>Hello</p></div>";
/// let html2 = "<div class=\"test\" id=\"main\"><p>Hello</p></div>";
///
/// assert_eq!(normalize_html(html1), normalize_html(html2));
/// ```
pub fn normalize_html(html: &str) -> String {
    let doc = Document::from(html);
    doc.html().trim().to_string()
}

/// Assert that two HTML strings are equivalent
///
/// Both strings are normalized before comparison, ignoring differences in
/// tag spacing and attribute quoting.
#[macro_export]
macro_rules! assert_html_eq {
    ($left:expr, $right:expr) => {
        {
            let left_normalized = $crate::test_utils::normalize_html($left);
            let right_normalized = $crate::test_utils::normalize_html($right);

            if left_normalized != right_normalized {
                panic!(
                    "HTML assertion failed\n\nLeft (normalized):\n{}\n\nRight (normalized):\n{}\n\nOriginal left:\n{}\n\nOriginal right:\n{}",
                    left_normalized,
                    right_normalized,
                    $left,
                    $right
                );
            }
        }
    };
}

/// Compare two HTML strings and return whether they're equivalent
pub fn html_eq(html1: &str, html2: &str) -> bool {
    normalize_html(html1) == normalize_html(html2)
}

/// Extract text content from HTML, ignoring all tags
///
/// Whitespace runs collapse to a single space.
pub fn extract_text(html: &str) -> String {
    let doc = Document::from(html);
    let body = doc.select("body");

    let text = if !body.nodes().is_empty() {
        body.text()
    } else {
        doc.text()
    };

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Class lists of every element matching a selector
pub fn classes_by_selector(html: &str, selector: &str) -> Vec<Vec<String>> {
    let doc = Document::from(html);
    let selection = doc.select(selector);

    selection.nodes().iter().map(|node| node.class_list()).collect()
}

/// Count elements matching a selector
pub fn count_elements(html: &str, selector: &str) -> usize {
    let doc = Document::from(html);
    doc.select(selector).nodes().len()
}
