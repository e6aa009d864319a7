use crate::codec::Placeholder;
use crate::configuration::Configuration;
use crate::error::Result;
use crate::protect::SpanProtector;
use crate::restore::SpanRestorer;
use crate::strip::ElementStripper;

/// A compiled strip run: raw input is protected, stripped and restored.
///
/// Nothing is streamed. The whole document is protected before the HTML
/// parser sees it and fully restored before any output is handed back, so a
/// failure at any stage yields no output at all.
#[derive(Debug, Clone)]
pub struct Pipeline {
    protectors: Vec<SpanProtector>,
    stripper: ElementStripper,
    restorers: Vec<SpanRestorer>,
}

impl Pipeline {
    /// Validate `config` and compile its patterns and selectors.
    pub fn new(config: &Configuration) -> Result<Self> {
        config.validate()?;

        let mut protectors = Vec::with_capacity(config.tag_pairs.len());
        let mut restorers = Vec::with_capacity(config.tag_pairs.len());

        for (index, pair) in config.tag_pairs.iter().enumerate() {
            let placeholder = Placeholder::new(&config.namespace, index);
            protectors.push(SpanProtector::new(pair, placeholder.clone())?);
            restorers.push(SpanRestorer::new(placeholder)?);
        }

        Ok(Self {
            protectors,
            stripper: ElementStripper::new(&config.strip_selectors)?,
            restorers,
        })
    }

    /// Hide every template span behind a placeholder, pairs in configured order.
    pub fn protect(&self, input: &[u8]) -> Vec<u8> {
        let mut buf = input.to_vec();

        for protector in &self.protectors {
            buf = protector.protect(&buf).into_owned();
        }

        buf
    }

    /// Put the template spans back, pairs in configured order.
    pub fn restore(&self, serialized: &[u8]) -> Result<Vec<u8>> {
        let mut buf = serialized.to_vec();

        for restorer in &self.restorers {
            buf = restorer.restore(&buf)?;
        }

        Ok(buf)
    }

    /// Run the whole pipeline on `input`.
    pub fn run(&self, input: &[u8]) -> Result<Vec<u8>> {
        let protected = self.protect(input);
        log::trace!("protected document is {} bytes", protected.len());

        let mutated = self.stripper.strip(&protected)?;
        log::trace!("stripped document is {} bytes", mutated.len());

        let restored = self.restore(&mutated)?;
        log::debug!("restored document is {} bytes", restored.len());

        Ok(restored)
    }
}

/// Strip `input` with `config` in one call.
pub fn strip_html(input: &[u8], config: &Configuration) -> Result<Vec<u8>> {
    Pipeline::new(config)?.run(input)
}
