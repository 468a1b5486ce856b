use anyhow::{Context, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Scoped XML emission over a `quick-xml` event writer.
///
/// The writers only ever talk to this type. `element` takes the body as a
/// closure and writes the end tag no matter how the body returns, so a tag
/// opened here is closed on every path, error paths included.
///
/// Output is not pretty-printed: much of what this crate emits is
/// preformatted synopsis text whose column alignment an indenting writer
/// would destroy. All whitespace in the output is content.
pub struct MarkupWriter {
    inner: Writer<Vec<u8>>,
}

impl MarkupWriter {
    pub fn new() -> Self {
        Self {
            inner: Writer::new(Vec::new()),
        }
    }

    /// Write preamble bytes (a DOCTYPE declaration) without escaping.
    /// Only meaningful before the first element.
    pub fn raw(&mut self, text: &str) {
        self.inner.get_mut().extend_from_slice(text.as_bytes());
    }

    /// `<name attrs>` ... `</name>` with the body produced by `body`.
    pub fn element<F>(&mut self, name: &str, attrs: &[(&str, &str)], body: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let mut start = BytesStart::new(name);
        for (key, value) in attrs {
            start.push_attribute((*key, *value));
        }
        self.inner.write_event(Event::Start(start))?;
        let result = body(self);
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        result
    }

    /// `<name attrs>text</name>`.
    pub fn tag(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.element(name, attrs, |w| w.text(text))
    }

    /// `<name attrs/>`.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut start = BytesStart::new(name);
        for (key, value) in attrs {
            start.push_attribute((*key, *value));
        }
        self.inner.write_event(Event::Empty(start))?;
        Ok(())
    }

    /// Escaped character data.
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.inner.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    pub fn into_string(self) -> Result<String> {
        String::from_utf8(self.inner.into_inner()).context("markup output is not valid UTF-8")
    }
}

impl Default for MarkupWriter {
    fn default() -> Self {
        Self::new()
    }
}
