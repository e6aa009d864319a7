use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Closing part of every placeholder comment.
pub const SUFFIX: &str = " -->";

/// The placeholder identity for one configured tag pair.
///
/// A protected span is rendered as
/// `<!-- ___{namespace}_{index}___ {base64(span)} -->`. The payload only uses
/// the base64 alphabet, so the HTML parser and serializer cannot split,
/// reorder or auto-close anything inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    namespace: String,
    index: usize,
    prefix: String,
}

impl Placeholder {
    /// Placeholder for the tag pair at `index` inside `namespace`.
    pub fn new(namespace: &str, index: usize) -> Self {
        Self {
            namespace: namespace.into(),
            index,
            prefix: format!("<!-- ___{}_{}___ ", namespace, index),
        }
    }

    /// The namespace the placeholder lives in.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The tag pair index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Opening part of the comment, up to and including the space before the payload.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The prefix as the serializer writes it inside a text node.
    pub fn escaped_prefix(&self) -> String {
        escape_text(&self.prefix)
    }

    /// The suffix as the serializer writes it inside a text node.
    pub fn escaped_suffix(&self) -> String {
        escape_text(SUFFIX)
    }

    /// Render `payload` as a placeholder comment.
    pub fn encode(&self, payload: &[u8]) -> String {
        let mut token = String::with_capacity(self.prefix.len() + payload.len() * 4 / 3 + 8);
        token.push_str(&self.prefix);
        STANDARD.encode_string(payload, &mut token);
        token.push_str(SUFFIX);
        token
    }

    /// Recover the payload from a placeholder in raw form.
    pub fn decode(&self, token: &[u8]) -> Result<Vec<u8>> {
        decode_between(token, self.prefix.as_bytes(), SUFFIX.as_bytes())
    }

    /// Recover the payload from a placeholder whose delimiters were entity escaped.
    pub fn decode_escaped(&self, token: &[u8]) -> Result<Vec<u8>> {
        decode_between(
            token,
            self.escaped_prefix().as_bytes(),
            self.escaped_suffix().as_bytes(),
        )
    }
}

/// Strip `prefix` and `suffix` off `token` and base64 decode what is left.
fn decode_between(token: &[u8], prefix: &[u8], suffix: &[u8]) -> Result<Vec<u8>> {
    let payload = token
        .strip_prefix(prefix)
        .and_then(|t| t.strip_suffix(suffix))
        .unwrap_or(token);

    STANDARD.decode(payload).map_err(|source| Error::Decode {
        token: String::from_utf8_lossy(token).into_owned(),
        source,
    })
}

/// Escape text the way html5ever serializes text nodes.
pub fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '\u{00A0}' => escaped.push_str("&nbsp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }

    escaped
}
