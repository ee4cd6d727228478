//! Cursor-based sub-grammar scanning
//!
//! A `Cursor` walks a window of comment text. Every `eat_*` method tries
//! one sub-grammar anchored at the current position and, on success,
//! returns the matched byte range (relative to the scanned text) and moves
//! past it. A failed attempt leaves the cursor where it was.

use once_cell::sync::Lazy;
use regex::Regex;

/// `@` followed by ASCII letters
static TAG_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"@[A-Za-z]+").unwrap());

/// `{@link target}` or `{@see target}` on a single line
static INLINE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{@(?:link|see)[ \t]+[^{}\n]+\}").unwrap());

/// Brace-delimited type without nested braces
static TYPE_ANNOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\{[^{}\n]+\}").unwrap());

/// Identifier path, optionally opened by `[`
static PARAM_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\[)?[A-Za-z_$][A-Za-z0-9_$.]*").unwrap());

/// Whitespace that does not end a line
pub fn is_horizontal_whitespace(c: char) -> bool {
    c != '\n' && c.is_whitespace()
}

/// Byte ranges of all tag tokens in `text`
pub fn find_tag_tokens(text: &str) -> Vec<(usize, usize)> {
    TAG_TOKEN
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect()
}

/// Byte ranges of all inline cross-references in `text`
pub fn find_inline_links(text: &str) -> Vec<(usize, usize)> {
    INLINE_LINK
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect()
}

/// Shrink `start..end` of `text` to exclude surrounding whitespace
///
/// Returns `None` if nothing but whitespace remains.
pub fn trim_range(text: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &text[start..end];
    let trimmed_start = slice.trim_start();
    if trimmed_start.is_empty() {
        return None;
    }
    let new_start = start + (slice.len() - trimmed_start.len());
    let new_end = new_start + trimmed_start.trim_end().len();
    Some((new_start, new_end))
}

/// A scanning position inside a bounded window of text
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
    /// Exclusive upper bound for every match
    limit: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor over `text[pos..limit]`
    ///
    /// `limit` is clamped to the text length and `pos` to `limit`.
    pub fn new(text: &'a str, pos: usize, limit: usize) -> Self {
        let limit = limit.min(text.len());
        Self {
            text,
            pos: pos.min(limit),
            limit,
        }
    }

    /// Current byte offset
    pub fn pos(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..self.limit]
    }

    /// Peek at the next character
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Skip spaces and tabs (never a newline), returning bytes skipped
    pub fn skip_horizontal_whitespace(&mut self) -> usize {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start_matches(is_horizontal_whitespace).len();
        self.pos += skipped;
        skipped
    }

    /// Consume `c` if it is the next character
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Match an anchored pattern at the cursor
    fn eat_pattern(&mut self, pattern: &Regex) -> Option<(usize, usize)> {
        let m = pattern.find(self.rest())?;
        let start = self.pos + m.start();
        let end = self.pos + m.end();
        self.pos = end;
        Some((start, end))
    }

    /// Match a `{type}` annotation after optional horizontal whitespace
    ///
    /// An inline cross-reference in that position is not a type.
    pub fn eat_type(&mut self) -> Option<(usize, usize)> {
        let saved = self.pos;
        self.skip_horizontal_whitespace();
        let found = if INLINE_LINK.find(self.rest()).is_some_and(|m| m.start() == 0) {
            None
        } else {
            self.eat_pattern(&TYPE_ANNOTATION)
        };
        if found.is_none() {
            self.pos = saved;
        }
        found
    }

    /// Match a parameter name after at least one horizontal whitespace
    ///
    /// A leading `[` marks an optional parameter, written `[name]` or
    /// `[name=default]`. The brackets belong to the name only when the
    /// closing `]` is on the same line; otherwise just the identifier is
    /// matched.
    pub fn eat_param_name(&mut self) -> Option<(usize, usize)> {
        let saved = self.pos;
        if self.skip_horizontal_whitespace() == 0 {
            return None;
        }
        let bracketed = self.peek() == Some('[');
        let Some((start, name_end)) = self.eat_pattern(&PARAM_NAME) else {
            self.pos = saved;
            return None;
        };
        if !bracketed {
            return Some((start, name_end));
        }

        let rest = self.rest();
        let closer = if rest.starts_with('=') {
            rest.find([']', '\n']).filter(|&i| rest[i..].starts_with(']'))
        } else {
            rest.starts_with(']').then_some(0)
        };
        match closer {
            Some(i) => {
                self.pos += i + 1;
                Some((start, self.pos))
            }
            None => Some((start + 1, name_end)),
        }
    }

    /// Consume up to the end of the current line (or the window)
    ///
    /// The newline itself is not consumed.
    pub fn eat_rest_of_line(&mut self) -> (usize, usize) {
        let start = self.pos;
        let len = self.rest().find('\n').unwrap_or(self.limit - self.pos);
        self.pos += len;
        (start, self.pos)
    }
}
