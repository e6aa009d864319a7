use crate::error::ConfigError;

/// Default placeholder namespace.
pub const DEFAULT_NAMESPACE: &str = "HTML_STRIP";
/// Default comma separated strip selectors.
pub const DEFAULT_STRIP_SELECTORS: &str = r#"script,noscript,link[rel="preload"][as="style"]"#;
/// Default comma separated ignore tags.
pub const DEFAULT_IGNORE_TAGS: &str = "{%,%}";

/// A start and end marker delimiting template syntax to keep verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagPair {
    /// The opening marker, e.g. `{%`.
    pub start: String,
    /// The closing marker, e.g. `%}`.
    pub end: String,
}

impl TagPair {
    /// A new pair. Markers are trimmed and must not be empty afterwards.
    pub fn new(start: &str, end: &str) -> Result<Self, ConfigError> {
        let (s, e) = (start.trim(), end.trim());

        if s.is_empty() || e.is_empty() {
            return Err(ConfigError::EmptyTag {
                start: start.into(),
                end: end.into(),
            });
        }

        Ok(Self {
            start: s.into(),
            end: e.into(),
        })
    }

    /// Parse a flat comma separated list `start1,end1,start2,end2,...`.
    pub fn parse_list(list: &str) -> Result<Vec<TagPair>, ConfigError> {
        let tags = list.split(',').collect::<Vec<_>>();

        if tags.len() % 2 == 1 {
            return Err(ConfigError::UnpairedTags);
        }

        tags.chunks(2).map(|t| TagPair::new(t[0], t[1])).collect()
    }
}

/// Split a comma separated selector list, dropping blank entries.
pub fn parse_selector_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Check the namespace can sit inside a comment without ending it. The
/// parser also rewrites control characters such as `\r` and `\0`, which
/// would change the prefix.
pub fn validate_namespace(namespace: &str) -> Result<(), ConfigError> {
    if !namespace.is_empty()
        && !namespace.contains('>')
        && !namespace.contains("--")
        && !namespace.chars().any(char::is_control)
    {
        Ok(())
    } else {
        Err(ConfigError::InvalidNamespace(namespace.into()))
    }
}

/// Options for a strip run.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Configuration {
    /// Name embedded in placeholder comments to avoid clashing with real comments.
    pub namespace: String,
    /// CSS selectors of the elements to remove, applied in order.
    pub strip_selectors: Vec<String>,
    /// Template tag pairs to protect, applied in order.
    pub tag_pairs: Vec<TagPair>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.into(),
            strip_selectors: parse_selector_list(DEFAULT_STRIP_SELECTORS),
            tag_pairs: vec![TagPair {
                start: "{%".into(),
                end: "%}".into(),
            }],
        }
    }
}

impl Configuration {
    /// Represents the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placeholder namespace.
    pub fn with_namespace(&mut self, namespace: &str) -> &mut Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the selectors of elements to remove.
    pub fn with_strip_selectors(&mut self, strip_selectors: Vec<String>) -> &mut Self {
        self.strip_selectors = strip_selectors;
        self
    }

    /// Set the selectors from a comma separated list.
    pub fn with_strip_list(&mut self, list: &str) -> &mut Self {
        self.strip_selectors = parse_selector_list(list);
        self
    }

    /// Set the protected tag pairs.
    pub fn with_tag_pairs(&mut self, tag_pairs: Vec<TagPair>) -> &mut Self {
        self.tag_pairs = tag_pairs;
        self
    }

    /// Set the protected tag pairs from a flat comma separated list.
    pub fn with_ignore_tags(&mut self, list: &str) -> Result<&mut Self, ConfigError> {
        self.tag_pairs = TagPair::parse_list(list)?;
        Ok(self)
    }

    /// Validate the namespace and tag pairs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_namespace(&self.namespace)?;

        for pair in &self.tag_pairs {
            TagPair::new(&pair.start, &pair.end)?;
        }

        Ok(())
    }
}
