//! Block documentation comment locator
//!
//! Finds every `/** ... */` region in a text. The first `*/` after an
//! opener closes the region, nested openers are plain content, and an
//! opener without a closer yields nothing.

pub const OPEN_MARKER: &str = "/**";
pub const CLOSE_MARKER: &str = "*/";

/// A located block comment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentRegion<'a> {
    /// Full comment text including both markers
    pub text: &'a str,
    /// Byte offset of `/**` in the source text
    pub start: usize,
}

impl<'a> CommentRegion<'a> {
    /// Byte offset just past `*/` in the source text
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    /// Region-relative offset of the closing `*/`
    pub fn content_end(&self) -> usize {
        self.text.len() - CLOSE_MARKER.len()
    }
}

/// Iterator over the comment regions of a text
pub struct Regions<'a> {
    text: &'a str,
    /// Where the next search starts
    pos: usize,
}

impl<'a> Iterator for Regions<'a> {
    type Item = CommentRegion<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.text.get(self.pos..)?;
        let open = self.pos + rest.find(OPEN_MARKER)?;
        let body_start = open + OPEN_MARKER.len();
        let close = match self.text[body_start..].find(CLOSE_MARKER) {
            Some(i) => body_start + i,
            None => {
                // Unterminated opener: nothing more can close
                self.pos = self.text.len();
                return None;
            }
        };
        let end = close + CLOSE_MARKER.len();
        self.pos = end;
        Some(CommentRegion {
            text: &self.text[open..end],
            start: open,
        })
    }
}

/// Locate all block documentation comments in a text
pub fn locate(text: &str) -> Regions<'_> {
    Regions { text, pos: 0 }
}
