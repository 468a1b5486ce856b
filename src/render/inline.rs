//! Inline documentation prose is plain text with `#token` cross-reference
//! markers. The scanner yields literal runs and marker tokens as borrowed
//! segments; it is a flat iteration, so arbitrarily long prose costs no
//! recursion depth.

pub const MARKER: char = '#';

#[derive(Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Marker(&'a str),
}

pub fn segments(text: &str) -> Segments<'_> {
    Segments { rest: text }
}

pub struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.find(MARKER) {
            None => {
                let text = self.rest;
                self.rest = "";
                Some(Segment::Text(text))
            }
            Some(0) => {
                let after = &self.rest[1..];
                let token_len = after
                    .find(|c: char| !is_token_char(c))
                    .unwrap_or(after.len());
                if token_len == 0 {
                    // A bare marker is literal text.
                    self.rest = after;
                    Some(Segment::Text("#"))
                } else {
                    let token = &after[..token_len];
                    self.rest = &after[token_len..];
                    Some(Segment::Marker(token))
                }
            }
            Some(pos) => {
                let text = &self.rest[..pos];
                self.rest = &self.rest[pos..];
                Some(Segment::Text(text))
            }
        }
    }
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-')
}
