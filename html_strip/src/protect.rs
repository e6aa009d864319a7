use crate::codec::Placeholder;
use crate::configuration::TagPair;
use crate::error::{ConfigError, Result};
use regex::bytes::{Captures, Regex};
use std::borrow::Cow;

/// Finds the spans of one tag pair and swaps them for placeholders.
#[derive(Debug, Clone)]
pub struct SpanProtector {
    placeholder: Placeholder,
    pattern: Regex,
}

impl SpanProtector {
    /// Build the protector for `pair` using `placeholder` as its token.
    pub fn new(pair: &TagPair, placeholder: Placeholder) -> Result<Self> {
        Ok(Self {
            pattern: span_pattern(pair)?,
            placeholder,
        })
    }

    /// The placeholder spans are encoded into.
    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    /// Replace every leftmost non-overlapping span in `input` with a placeholder
    /// carrying the span bytes, markers included.
    pub fn protect<'a>(&self, input: &'a [u8]) -> Cow<'a, [u8]> {
        let mut protected = 0usize;

        let output = self.pattern.replace_all(input, |caps: &Captures| {
            protected += 1;
            self.placeholder.encode(&caps[0]).into_bytes()
        });

        log::debug!(
            "protected {} span(s) for tag pair {}",
            protected,
            self.placeholder.index()
        );

        output
    }
}

/// The start marker, one or more characters that are not the first character
/// of the end marker, then the end marker.
///
/// ASCII stop characters are matched byte-wise so spans holding bytes that
/// are not UTF-8 are still protected.
pub fn span_pattern(pair: &TagPair) -> Result<Regex> {
    let stop = match pair.end.chars().next() {
        Some(c) if c.is_ascii() => format!("(?-u:[^\\x{:02X}])", c as u32),
        Some(c) => format!("[^\\x{{{:X}}}]", c as u32),
        None => {
            return Err(ConfigError::EmptyTag {
                start: pair.start.clone(),
                end: pair.end.clone(),
            }
            .into())
        }
    };

    Ok(Regex::new(&format!(
        "{}{}+{}",
        regex::escape(&pair.start),
        stop,
        regex::escape(&pair.end)
    ))?)
}
