//! String helpers shared by the template engine and the markup builder

use std::borrow::Cow;

/// Check if a string is usable as a tag or attribute name
///
/// Accepts non-empty ASCII alphanumerics plus `-` and `_`, starting with a
/// letter.
pub fn is_markup_name(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Escape HTML entities efficiently
///
/// Used both for `<%= %>` placeholders and for attribute values, so quotes
/// are escaped as well.
pub fn escape_html_cow(input: &str) -> Cow<str> {
    if !input.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(input);
    }

    let mut result = String::with_capacity(input.len() + input.len() / 4);
    for ch in input.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(ch),
        }
    }

    Cow::Owned(result)
}

/// Split a dot-separated path
pub fn split_path(path: &str) -> Vec<String> {
    path.split('.').map(|s| s.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_markup_name() {
        assert!(is_markup_name("div"));
        assert!(is_markup_name("h2"));
        assert!(is_markup_name("st-block"));
        assert!(is_markup_name("my_attr"));
        assert!(!is_markup_name(""));
        assert!(!is_markup_name("2div"));
        assert!(!is_markup_name("di v"));
        assert!(!is_markup_name("div>"));
    }

    #[test]
    fn test_escape_html_cow() {
        let result = escape_html_cow("simple text");
        assert!(matches!(result, Cow::Borrowed(_)));

        let result = escape_html_cow("text with <tags> & \"quotes\"");
        assert_eq!(result, "text with &lt;tags&gt; &amp; &quot;quotes&quot;");
        assert!(matches!(result, Cow::Owned(_)));

        assert_eq!(escape_html_cow("it's"), "it&#x27;s");
    }

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("simple"), vec!["simple"]);
        assert_eq!(split_path("file.url"), vec!["file", "url"]);
    }
}
