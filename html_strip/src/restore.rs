use crate::codec::{Placeholder, SUFFIX};
use crate::error::Result;
use regex::bytes::Regex;

/// Finds the placeholders of one tag pair in serialized output and puts the
/// original span bytes back.
///
/// The serializer leaves comments alone but escapes text nodes, so a
/// placeholder that ended up as text (inside `<title>` or `<textarea>` for
/// instance) comes out as `&lt;!-- ... --&gt;`. Both forms are recognised.
#[derive(Debug, Clone)]
pub struct SpanRestorer {
    placeholder: Placeholder,
    raw: Regex,
    escaped: Regex,
}

impl SpanRestorer {
    /// Build the restorer for `placeholder`.
    pub fn new(placeholder: Placeholder) -> Result<Self> {
        let raw = token_pattern(placeholder.prefix(), SUFFIX)?;
        let escaped = token_pattern(&placeholder.escaped_prefix(), &placeholder.escaped_suffix())?;

        Ok(Self {
            placeholder,
            raw,
            escaped,
        })
    }

    /// The placeholder searched for.
    pub fn placeholder(&self) -> &Placeholder {
        &self.placeholder
    }

    /// Decode every placeholder of this pair, raw form first then escaped form.
    /// The first payload that fails to decode aborts the restore.
    pub fn restore(&self, input: &[u8]) -> Result<Vec<u8>> {
        let output = replace_tokens(input, &self.raw, |t| self.placeholder.decode(t))?;
        replace_tokens(&output, &self.escaped, |t| {
            self.placeholder.decode_escaped(t)
        })
    }
}

/// `prefix`, a run of non-space bytes, then `suffix`.
fn token_pattern(prefix: &str, suffix: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        "{}(?-u:[^ ]+){}",
        regex::escape(prefix),
        regex::escape(suffix)
    ))?)
}

/// Swap every match of `pattern` for its decoded payload.
fn replace_tokens<F>(input: &[u8], pattern: &Regex, decode: F) -> Result<Vec<u8>>
where
    F: Fn(&[u8]) -> Result<Vec<u8>>,
{
    let mut output = Vec::with_capacity(input.len());
    let mut last = 0;
    let mut restored = 0usize;

    for m in pattern.find_iter(input) {
        output.extend_from_slice(&input[last..m.start()]);
        output.extend_from_slice(&decode(m.as_bytes())?);
        last = m.end();
        restored += 1;
    }

    output.extend_from_slice(&input[last..]);

    if restored > 0 {
        log::trace!("restored {} placeholder(s)", restored);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::escape_text;
    use crate::error::Error;

    fn restorer(index: usize) -> SpanRestorer {
        SpanRestorer::new(Placeholder::new("HTML_STRIP", index)).unwrap()
    }

    #[test]
    fn test_restore_raw() {
        let restorer = restorer(0);
        let p = restorer.placeholder();
        let input = format!(
            "<p>{}hi{}</p>",
            p.encode(b"{% if x %}"),
            p.encode(b"{% endif %}")
        );

        assert_eq!(
            restorer.restore(input.as_bytes()).unwrap(),
            b"<p>{% if x %}hi{% endif %}</p>".to_vec()
        );
    }

    #[test]
    fn test_restore_escaped() {
        let restorer = restorer(0);
        let token = escape_text(&restorer.placeholder().encode(b"{% block title %}"));
        let input = format!("<title>{}</title>", token);

        assert_eq!(
            restorer.restore(input.as_bytes()).unwrap(),
            b"<title>{% block title %}</title>".to_vec()
        );
    }

    #[test]
    fn test_restore_both_forms() {
        let restorer = restorer(0);
        let p = restorer.placeholder();
        let input = format!(
            "<title>{}</title><p>{}</p>",
            escape_text(&p.encode(b"{% a %}")),
            p.encode(b"{% b %}")
        );

        assert_eq!(
            restorer.restore(input.as_bytes()).unwrap(),
            b"<title>{% a %}</title><p>{% b %}</p>".to_vec()
        );
    }

    #[test]
    fn test_restore_ignores_other_pairs() {
        let other = Placeholder::new("HTML_STRIP", 1).encode(b"{{ x }}");
        let input = format!("<p>{}</p>", other);

        assert_eq!(restorer(0).restore(input.as_bytes()).unwrap(), input.into_bytes());
    }

    #[test]
    fn test_restore_ignores_plain_comments() {
        let input = b"<!-- a genuine comment --><p>x</p>";
        assert_eq!(restorer(0).restore(input).unwrap(), input.to_vec());
    }

    #[test]
    fn test_restore_decode_failure() {
        let input = b"<p><!-- ___HTML_STRIP_0___ @@@ --></p>";

        assert!(matches!(
            restorer(0).restore(input),
            Err(Error::Decode { .. })
        ));
    }

    #[test]
    fn test_restore_escaped_decode_failure_after_raw_success() {
        let restorer = restorer(0);
        let input = format!(
            "<p>{}</p><title>&lt;!-- ___HTML_STRIP_0___ @@@ --&gt;</title>",
            restorer.placeholder().encode(b"{% ok %}")
        );

        assert!(matches!(
            restorer.restore(input.as_bytes()),
            Err(Error::Decode { .. })
        ));
    }
}
