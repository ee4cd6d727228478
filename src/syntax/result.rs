//! Parse results keyed by category

use std::collections::BTreeMap;

use serde::Serialize;

use super::category::Category;
use crate::error::Result;
use crate::text::{Range, SourceText};

/// A classified byte range with its translated position range
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedSpan {
    /// Byte offset where the span starts (inclusive)
    pub start: usize,
    /// Byte offset where the span ends (exclusive)
    pub end: usize,
    /// Line/column range of the span
    pub range: Range,
}

impl ClassifiedSpan {
    /// Build a span, translating its offsets against `source`
    pub fn new(source: &SourceText, start: usize, end: usize) -> Result<Self> {
        Ok(Self {
            start,
            end,
            range: source.range(start, end)?,
        })
    }

    /// The covered slice of `text`
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Classified spans for one document, grouped by category
///
/// Every category has an entry, possibly empty. Spans within a category
/// are in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParseResult {
    spans: BTreeMap<Category, Vec<ClassifiedSpan>>,
}

impl ParseResult {
    /// Create a result with an empty list for every category
    pub fn new() -> Self {
        Self {
            spans: Category::ALL.iter().map(|&c| (c, Vec::new())).collect(),
        }
    }

    /// Append a span to a category
    pub fn push(&mut self, category: Category, span: ClassifiedSpan) {
        self.spans.entry(category).or_default().push(span);
    }

    /// Spans of one category
    pub fn get(&self, category: Category) -> &[ClassifiedSpan] {
        self.spans.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over categories and their spans
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ClassifiedSpan])> {
        self.spans.iter().map(|(&c, v)| (c, v.as_slice()))
    }

    /// Number of spans in one category
    pub fn len(&self, category: Category) -> usize {
        self.get(category).len()
    }

    /// Total number of spans across all categories
    pub fn total(&self) -> usize {
        self.spans.values().map(Vec::len).sum()
    }

    /// Check if no span was produced at all
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Sort every category into document order
    pub(crate) fn finish(mut self) -> Self {
        for spans in self.spans.values_mut() {
            spans.sort_by_key(|s| (s.start, s.end));
        }
        self
    }
}

impl Default for ParseResult {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_every_category() {
        let result = ParseResult::new();
        assert_eq!(result.iter().count(), Category::ALL.len());
        assert!(result.is_empty());
        assert!(result.get(Category::Throws).is_empty());
    }

    #[test]
    fn test_push_and_finish_orders_spans() {
        let source = SourceText::new("abcdefgh");
        let mut result = ParseResult::new();
        result.push(Category::Tag, ClassifiedSpan::new(&source, 5, 7).unwrap());
        result.push(Category::Tag, ClassifiedSpan::new(&source, 1, 3).unwrap());
        result.push(Category::Link, ClassifiedSpan::new(&source, 0, 8).unwrap());

        let result = result.finish();
        let tags = result.get(Category::Tag);
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].start, 1);
        assert_eq!(tags[1].start, 5);
        assert_eq!(result.total(), 3);
        assert_eq!(result.len(Category::Link), 1);
        assert_eq!(tags[0].slice(source.text()), "bc");
    }

    #[test]
    fn test_span_translation_error_propagates() {
        let source = SourceText::new("abc");
        assert!(ClassifiedSpan::new(&source, 1, 9).is_err());
    }
}
