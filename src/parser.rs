//! Template source parser
//!
//! Turns template text into a tree of [`Segment`]s. Supported tags:
//!
//! - `<%= path %>` escaped interpolation
//! - `<%- path %>` raw interpolation
//! - `<% for item in path %>` ... `<% end %>` iteration

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::utils::split_path;

static TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<%([=-]?)(.*?)%>").expect("Invalid tag regex"));

static PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][\w$]*(\[\d+\])?(\.[\w$]+(\[\d+\])?)*$").expect("Invalid path regex")
});

static FOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^for\s+([A-Za-z_$][\w$]*)\s+in\s+(\S+)$").expect("Invalid for regex")
});

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Text(String),
    Escaped(Vec<String>),
    Raw(Vec<String>),
    Each {
        binding: String,
        path: Vec<String>,
        body: Vec<Segment>,
    },
}

struct Frame {
    block: Option<(String, Vec<String>)>,
    segments: Vec<Segment>,
}

pub struct Parser;

impl Parser {
    pub fn parse(source: &str) -> Result<Vec<Segment>> {
        let mut stack = vec![Frame {
            block: None,
            segments: Vec::new(),
        }];
        let mut last = 0;

        for caps in TAG_REGEX.captures_iter(source) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let kind = caps.get(1).map_or("", |m| m.as_str());
            let code = caps.get(2).map_or("", |m| m.as_str()).trim();

            Self::push_text(&mut stack, &source[last..whole.start()])?;
            last = whole.end();

            match kind {
                "=" => Self::push(&mut stack, Segment::Escaped(Self::parse_path(code)?)),
                "-" => Self::push(&mut stack, Segment::Raw(Self::parse_path(code)?)),
                _ => Self::parse_statement(&mut stack, code)?,
            }
        }

        Self::push_text(&mut stack, &source[last..])?;

        if stack.len() > 1 {
            return Err(Error::parse_static("Unclosed for block"));
        }
        Ok(stack.pop().map(|frame| frame.segments).unwrap_or_default())
    }

    fn parse_statement(stack: &mut Vec<Frame>, code: &str) -> Result<()> {
        if code == "end" {
            if stack.len() == 1 {
                return Err(Error::parse_static("`end` without matching `for`"));
            }
            if let Some(frame) = stack.pop() {
                if let Some((binding, path)) = frame.block {
                    Self::push(
                        stack,
                        Segment::Each {
                            binding,
                            path,
                            body: frame.segments,
                        },
                    );
                }
            }
            return Ok(());
        }

        if let Some(caps) = FOR_REGEX.captures(code) {
            let binding = caps[1].to_string();
            let path = Self::parse_path(&caps[2])?;
            stack.push(Frame {
                block: Some((binding, path)),
                segments: Vec::new(),
            });
            return Ok(());
        }

        Err(Error::parse_owned(format!("Unsupported statement: {}", code)))
    }

    fn parse_path(code: &str) -> Result<Vec<String>> {
        if code.is_empty() {
            return Err(Error::parse_static("Empty expression"));
        }
        if !PATH_REGEX.is_match(code) {
            return Err(Error::parse_owned(format!("Invalid expression: {}", code)));
        }
        Ok(split_path(code))
    }

    fn push_text(stack: &mut [Frame], text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        if text.contains("<%") {
            return Err(Error::parse_static("Unterminated tag"));
        }
        Self::push(stack, Segment::Text(text.to_string()));
        Ok(())
    }

    fn push(stack: &mut [Frame], segment: Segment) {
        if let Some(frame) = stack.last_mut() {
            frame.segments.push(segment);
        }
    }
}
