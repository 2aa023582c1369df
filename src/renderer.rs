//! Template rendering engine
//!
//! Walks parsed [`Segment`]s and writes their output against a [`Scope`].

use crate::error::Result;
use crate::parser::Segment;
use crate::utils::escape_html_cow;
use crate::value::{display, iter_items, Scope};

/// Renders compiled segments into a string
pub struct Renderer<'a> {
    segments: &'a [Segment],
}

impl<'a> Renderer<'a> {
    pub fn new(segments: &'a [Segment]) -> Self {
        Self { segments }
    }

    pub fn render(&self, scope: &mut Scope<'a, '_>) -> Result<String> {
        let mut output = String::new();
        Self::render_segments(self.segments, scope, &mut output)?;
        Ok(output)
    }

    fn render_segments<'d>(
        segments: &'a [Segment],
        scope: &mut Scope<'a, 'd>,
        output: &mut String,
    ) -> Result<()> {
        for segment in segments {
            match segment {
                Segment::Text(text) => output.push_str(text),
                Segment::Escaped(path) => {
                    let value = scope.lookup(path)?;
                    output.push_str(&escape_html_cow(&display(value)));
                }
                Segment::Raw(path) => {
                    let value = scope.lookup(path)?;
                    output.push_str(&display(value));
                }
                Segment::Each {
                    binding,
                    path,
                    body,
                } => {
                    let items = iter_items(scope.lookup(path)?)?;
                    for item in items {
                        scope.push(binding, item);
                        let result = Self::render_segments(body, scope, output);
                        scope.pop();
                        result?;
                    }
                }
            }
        }
        Ok(())
    }
}
