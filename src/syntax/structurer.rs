//! Comment structuring
//!
//! Classifies the inside of one located comment region. The sub-scans run
//! in a fixed order:
//!
//! 1. delimiter marks (`/**`, `*/`, leading `*`)
//! 2. tag tokens, each with a window reaching to the next tag token
//! 3. an inline `{type}` right after any tag
//! 4. parameter names or default values, depending on the tag
//! 5. inline cross-references anywhere in the comment
//! 6. free-text description lines
//!
//! All offsets handled here are relative to the region text; `Emitter`
//! shifts them into document offsets when a span is recorded.

use tracing::trace;

use super::category::Category;
use super::locator::{CommentRegion, OPEN_MARKER};
use super::result::{ClassifiedSpan, ParseResult};
use super::scanner::{
    find_inline_links, find_tag_tokens, is_horizontal_whitespace, trim_range, Cursor,
};
use super::tags::{is_known_tag, TagKind};
use crate::error::Result;
use crate::text::SourceText;

/// Records region-relative spans into a shared result
struct Emitter<'s, 'r> {
    source: &'s SourceText,
    base: usize,
    result: &'r mut ParseResult,
}

impl Emitter<'_, '_> {
    fn emit(&mut self, category: Category, start: usize, end: usize) -> Result<()> {
        let span = ClassifiedSpan::new(self.source, self.base + start, self.base + end)?;
        self.result.push(category, span);
        Ok(())
    }

    fn emit_description(&mut self, text: &str, start: usize, end: usize) -> Result<()> {
        for (s, e) in extract_description(&text[start..end]) {
            self.emit(Category::Description, start + s, start + e)?;
        }
        Ok(())
    }
}

/// Classify one comment region into `result`
///
/// Fails only when a span cannot be translated against `source`, which
/// means the region was not located in that snapshot.
pub fn structure(
    region: &CommentRegion<'_>,
    source: &SourceText,
    result: &mut ParseResult,
) -> Result<()> {
    let text = region.text;
    let content_end = region.content_end();
    let mut emitter = Emitter {
        source,
        base: region.start,
        result,
    };

    let links = find_inline_links(&text[..content_end]);

    mark_delimiters(text, content_end, &mut emitter)?;
    scan_tags(text, content_end, &links, &mut emitter)?;
    for &(start, end) in &links {
        emitter.emit(Category::Link, start, end)?;
    }
    scan_description_lines(text, content_end, &mut emitter)?;
    Ok(())
}

/// Split a description fragment around its inline cross-references
///
/// Returns the non-blank segments before, between and after the links,
/// trimmed, as ranges relative to `fragment`. The links themselves are
/// left out.
pub fn extract_description(fragment: &str) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut last = 0;
    for (start, end) in find_inline_links(fragment) {
        segments.extend(trim_range(fragment, last, start));
        last = end;
    }
    segments.extend(trim_range(fragment, last, fragment.len()));
    segments
}

/// Physical lines of `text` with their starting offsets
fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split('\n').scan(0, |offset, line| {
        let start = *offset;
        *offset += line.len() + 1;
        Some((start, line))
    })
}

fn mark_delimiters(text: &str, content_end: usize, emitter: &mut Emitter<'_, '_>) -> Result<()> {
    emitter.emit(Category::CommentDelimiter, 0, OPEN_MARKER.len())?;
    emitter.emit(Category::CommentDelimiter, content_end, text.len())?;

    for (line_start, line) in lines_with_offsets(text) {
        let body = line.trim_start_matches(is_horizontal_whitespace);
        if !body.starts_with('*') {
            continue;
        }
        let star = line_start + (line.len() - body.len());
        // Stars belonging to `/**` or `*/` are already marked
        if star >= OPEN_MARKER.len() && star < content_end {
            emitter.emit(Category::CommentDelimiter, star, star + 1)?;
        }
    }
    Ok(())
}

fn scan_tags(
    text: &str,
    content_end: usize,
    links: &[(usize, usize)],
    emitter: &mut Emitter<'_, '_>,
) -> Result<()> {
    // `@link` inside `{@link ...}` is part of the link
    let tokens: Vec<(usize, usize)> = find_tag_tokens(&text[..content_end])
        .into_iter()
        .filter(|&(start, _)| !links.iter().any(|&(ls, le)| start > ls && start < le))
        .collect();

    for (i, &(start, end)) in tokens.iter().enumerate() {
        let token = &text[start..end];
        let kind = TagKind::classify(token);
        trace!(
            token,
            ?kind,
            known = is_known_tag(token),
            offset = emitter.base + start,
            "classified tag"
        );
        emitter.emit(kind.category(), start, end)?;

        let window_end = tokens.get(i + 1).map_or(content_end, |&(next, _)| next);
        let mut cursor = Cursor::new(text, end, window_end);

        if let Some((ts, te)) = cursor.eat_type() {
            emitter.emit(Category::Type, ts, te)?;
        }

        match kind {
            TagKind::Param => {
                if let Some((ns, ne)) = cursor.eat_param_name() {
                    emitter.emit(Category::ParamName, ns, ne)?;
                    if !line_is_described(text, start) {
                        cursor.skip_horizontal_whitespace();
                        cursor.eat('-');
                        cursor.skip_horizontal_whitespace();
                        let (ds, de) = cursor.eat_rest_of_line();
                        emitter.emit_description(text, ds, de)?;
                    }
                }
            }
            TagKind::DefaultValue => {
                if cursor.skip_horizontal_whitespace() > 0 {
                    let (vs, ve) = cursor.eat_rest_of_line();
                    if let Some((vs, ve)) = trim_range(text, vs, ve) {
                        emitter.emit(Category::DefaultValue, vs, ve)?;
                    }
                }
            }
            _ => {
                if !line_is_described(text, start) {
                    let (ds, de) = cursor.eat_rest_of_line();
                    emitter.emit_description(text, ds, de)?;
                }
            }
        }
    }
    Ok(())
}

/// Offset where a line's content begins after its leading marker
///
/// Strips horizontal whitespace, one optional `*` and one optional
/// following whitespace character.
fn strip_leading_marker(line: &str) -> usize {
    let mut cursor = Cursor::new(line, 0, line.len());
    cursor.skip_horizontal_whitespace();
    cursor.eat('*');
    if let Some(c) = cursor.peek().filter(|&c| is_horizontal_whitespace(c)) {
        cursor.eat(c);
    }
    cursor.pos()
}

/// Content of a line that counts as free description text
///
/// Tag lines and delimiter remnants are left to the tag scan.
fn line_description(line: &str) -> Option<&str> {
    let content = &line[strip_leading_marker(line)..];
    if content.is_empty() || content.starts_with('@') || content.starts_with('/') {
        None
    } else {
        Some(content)
    }
}

/// Check if the line holding `offset` is already a description line
///
/// The opening line never is.
fn line_is_described(text: &str, offset: usize) -> bool {
    let Some(newline) = text[..offset].rfind('\n') else {
        return false;
    };
    let line_start = newline + 1;
    let line_end = text[line_start..]
        .find('\n')
        .map_or(text.len(), |i| line_start + i);
    line_description(&text[line_start..line_end]).is_some()
}

fn scan_description_lines(
    text: &str,
    content_end: usize,
    emitter: &mut Emitter<'_, '_>,
) -> Result<()> {
    for (line_start, line) in lines_with_offsets(text).skip(1) {
        let Some(content) = line_description(line) else {
            continue;
        };
        let start = line_start + (line.len() - content.len());
        let end = (line_start + line.len()).min(content_end);
        if start < end {
            emitter.emit_description(text, start, end)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::locator::locate;

    fn parse(text: &str) -> (SourceText, ParseResult) {
        let source = SourceText::new(text);
        let mut result = ParseResult::new();
        for region in locate(text) {
            structure(&region, &source, &mut result).unwrap();
        }
        (source, result.finish())
    }

    fn slices<'a>(source: &'a SourceText, result: &ParseResult, category: Category) -> Vec<&'a str> {
        result
            .get(category)
            .iter()
            .map(|s| s.slice(source.text()))
            .collect()
    }

    #[test]
    fn test_param_with_type_and_description() {
        let (src, result) = parse("/** @param {string} name - the user name */");
        assert_eq!(slices(&src, &result, Category::Tag), vec!["@param"]);
        assert_eq!(slices(&src, &result, Category::Type), vec!["{string}"]);
        assert_eq!(slices(&src, &result, Category::ParamName), vec!["name"]);
        assert_eq!(slices(&src, &result, Category::Description), vec!["the user name"]);
        assert_eq!(slices(&src, &result, Category::CommentDelimiter), vec!["/**", "*/"]);
    }

    #[test]
    fn test_param_without_type() {
        let (src, result) = parse("/**\n * @arg [options.verbose] whether to log\n */");
        assert!(result.get(Category::Type).is_empty());
        assert_eq!(slices(&src, &result, Category::ParamName), vec!["[options.verbose]"]);
        assert_eq!(slices(&src, &result, Category::Description), vec!["whether to log"]);
    }

    #[test]
    fn test_param_without_name_emits_nothing_more() {
        let (_, result) = parse("/** @param {string} */");
        assert_eq!(result.len(Category::Type), 1);
        assert!(result.get(Category::ParamName).is_empty());
        assert!(result.get(Category::Description).is_empty());
    }

    #[test]
    fn test_deprecated_replaces_generic_tag() {
        let (src, result) = parse("/** @deprecated use foo() instead */");
        assert_eq!(slices(&src, &result, Category::Deprecated), vec!["@deprecated"]);
        assert!(result.get(Category::Tag).is_empty());
        assert_eq!(slices(&src, &result, Category::Description), vec!["use foo() instead"]);
    }

    #[test]
    fn test_inline_link_splits_description() {
        let (src, result) = parse("/**\n * See {@link Thing} for details.\n */");
        assert_eq!(slices(&src, &result, Category::Link), vec!["{@link Thing}"]);
        assert_eq!(slices(&src, &result, Category::Description), vec!["See", "for details."]);
        // `@link` belongs to the link, not the tag list
        assert!(result.get(Category::Tag).is_empty());
    }

    #[test]
    fn test_returns_with_type_and_text() {
        let (src, result) = parse("/**\n * @returns {number} the count\n */");
        assert_eq!(slices(&src, &result, Category::Returns), vec!["@returns"]);
        assert_eq!(slices(&src, &result, Category::Type), vec!["{number}"]);
        assert!(result.get(Category::ParamName).is_empty());
        assert!(result.get(Category::Tag).is_empty());
        assert_eq!(slices(&src, &result, Category::Description), vec!["the count"]);
    }

    #[test]
    fn test_default_value() {
        let (src, result) = parse("/**\n * @default 42   \n * @defaultValue {number} 7\n */");
        assert_eq!(slices(&src, &result, Category::Tag), vec!["@default", "@defaultValue"]);
        assert_eq!(slices(&src, &result, Category::DefaultValue), vec!["42", "7"]);
        assert_eq!(slices(&src, &result, Category::Type), vec!["{number}"]);
        assert!(result.get(Category::Description).is_empty());
    }

    #[test]
    fn test_default_value_stops_at_closing_marker() {
        let (src, result) = parse("/** @default true */");
        assert_eq!(slices(&src, &result, Category::DefaultValue), vec!["true"]);
    }

    #[test]
    fn test_default_without_value() {
        let (_, result) = parse("/**\n * @default\n * next\n */");
        assert!(result.get(Category::DefaultValue).is_empty());
    }

    #[test]
    fn test_specialized_tags() {
        let text = "/**\n * @example\n * @since 1.2\n * @see other\n * @throws {Error} boom\n * @version 3\n */";
        let (src, result) = parse(text);
        assert_eq!(slices(&src, &result, Category::Example), vec!["@example"]);
        assert_eq!(slices(&src, &result, Category::Since), vec!["@since", "@version"]);
        assert_eq!(slices(&src, &result, Category::See), vec!["@see"]);
        assert_eq!(slices(&src, &result, Category::Throws), vec!["@throws"]);
        assert_eq!(slices(&src, &result, Category::Type), vec!["{Error}"]);
        assert!(result.get(Category::Tag).is_empty());
    }

    #[test]
    fn test_leading_stars_marked() {
        let text = "/**\n * one\n *\n   * two\n */";
        let (src, result) = parse(text);
        let delimiters = result.get(Category::CommentDelimiter);
        // open, three interior stars, close
        assert_eq!(delimiters.len(), 5);
        assert_eq!(delimiters[0].slice(src.text()), "/**");
        assert_eq!(delimiters[4].slice(src.text()), "*/");
        for star in &delimiters[1..4] {
            assert_eq!(star.slice(src.text()), "*");
        }
        assert_eq!(delimiters[3].range.start.column, 3);
    }

    #[test]
    fn test_description_lines() {
        let text = "/** Summary on the opener line\n * First line.\n *   indented\n *\n * @param x\n * /not/text\n */";
        let (src, result) = parse(text);
        assert_eq!(
            slices(&src, &result, Category::Description),
            vec!["First line.", "indented"]
        );
    }

    #[test]
    fn test_description_before_closing_marker() {
        let (src, result) = parse("/**\n * trailing text */");
        assert_eq!(slices(&src, &result, Category::Description), vec!["trailing text"]);
    }

    #[test]
    fn test_mid_line_tag_not_forwarded() {
        let (src, result) = parse("/**\n * mail me at user@example.com today\n */");
        assert_eq!(slices(&src, &result, Category::Example), vec!["@example"]);
        assert_eq!(
            slices(&src, &result, Category::Description),
            vec!["mail me at user@example.com today"]
        );
    }

    #[test]
    fn test_tag_window_stops_at_next_tag() {
        let (src, result) = parse("/** @param a first @param b second */");
        assert_eq!(slices(&src, &result, Category::ParamName), vec!["a", "b"]);
        assert_eq!(slices(&src, &result, Category::Description), vec!["first", "second"]);
    }

    #[test]
    fn test_empty_comment_has_delimiters_only() {
        let (_, result) = parse("/***/");
        assert_eq!(result.len(Category::CommentDelimiter), 2);
        assert_eq!(result.total(), 2);
    }

    #[test]
    fn test_offsets_are_document_relative() {
        let text = "const a = 1;\n/** @see b */\n";
        let (src, result) = parse(text);
        let see = &result.get(Category::See)[0];
        assert_eq!(see.start, 17);
        assert_eq!(see.slice(src.text()), "@see");
        assert_eq!(see.range.start.line, 1);
        assert_eq!(see.range.start.column, 4);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (src, result) = parse("/**\r\n * @param x the x\r\n * more\r\n */");
        assert_eq!(slices(&src, &result, Category::ParamName), vec!["x"]);
        assert_eq!(slices(&src, &result, Category::Description), vec!["the x", "more"]);
    }

    #[test]
    fn test_extract_description_segments() {
        let fragment = "a {@link B} c {@see D}";
        assert_eq!(extract_description(fragment), vec![(0, 1), (12, 13)]);
        assert!(extract_description("   ").is_empty());
        assert!(extract_description("{@link X}").is_empty());
    }

    #[test]
    fn test_line_is_described() {
        let text = "/** @a\n * @b x @c\n * text @d\n@e */";
        assert!(!line_is_described(text, 4));
        assert!(!line_is_described(text, 10));
        assert!(!line_is_described(text, 15));
        assert!(line_is_described(text, 26));
        assert!(!line_is_described(text, 29));
    }

    #[test]
    fn test_link_after_tag_is_not_a_type() {
        let (src, result) = parse("/**\n * @see {@link Foo} for more\n */");
        assert_eq!(slices(&src, &result, Category::See), vec!["@see"]);
        assert!(result.get(Category::Type).is_empty());
        assert_eq!(slices(&src, &result, Category::Link), vec!["{@link Foo}"]);
        assert_eq!(slices(&src, &result, Category::Description), vec!["for more"]);

        let (src, result) = parse("/** @throws {@link Err} */");
        assert!(result.get(Category::Type).is_empty());
        assert_eq!(slices(&src, &result, Category::Link), vec!["{@link Err}"]);
    }

    #[test]
    fn test_optional_param_with_default() {
        let (src, result) = parse("/**\n * @param {number} [count=1] how many\n */");
        assert_eq!(slices(&src, &result, Category::Type), vec!["{number}"]);
        assert_eq!(slices(&src, &result, Category::ParamName), vec!["[count=1]"]);
        assert_eq!(slices(&src, &result, Category::Description), vec!["how many"]);
    }

    #[test]
    fn test_mid_line_param_description_not_duplicated() {
        let (src, result) = parse("/**\n * text @param x desc\n */");
        assert_eq!(slices(&src, &result, Category::ParamName), vec!["x"]);
        assert_eq!(
            slices(&src, &result, Category::Description),
            vec!["text @param x desc"]
        );
    }

    #[test]
    fn test_second_tag_on_tag_line_keeps_its_text() {
        let (src, result) = parse("/**\n * @since 2 @see other\n */");
        assert_eq!(slices(&src, &result, Category::Description), vec!["2", "other"]);
    }
}
