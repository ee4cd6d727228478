//! Terminal rendering of classified spans
//!
//! Maps each category to a `Style` and writes the source text with ANSI
//! styling applied over the parse result. Rendering options never affect
//! parsing.

use std::collections::HashMap;
use std::io::Write;

use crossterm::queue;
use crossterm::style::{Attribute, Color as TermColor, Print, SetAttribute, SetForegroundColor};

use crate::error::Result;
use crate::syntax::{Category, Color, ParseResult, Span, Style};
use crate::text::SourceText;

/// Options that shape the style of each category
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Render tag-like categories in bold
    pub bold_tags: bool,
    /// Render descriptive categories in italics
    pub italic_descriptions: bool,
    /// 0.0 to 1.0; anything below 1.0 renders faint
    pub opacity: f32,
    /// Per-category foreground overrides
    pub colors: HashMap<Category, Color>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bold_tags: true,
            italic_descriptions: true,
            opacity: 1.0,
            colors: HashMap::new(),
        }
    }
}

/// Resolved style for every category
#[derive(Debug, Clone)]
pub struct StyleSheet {
    styles: HashMap<Category, Style>,
}

impl StyleSheet {
    /// Resolve category styles from options
    pub fn new(options: &RenderOptions) -> Self {
        let styles = Category::ALL
            .iter()
            .map(|&category| {
                let mut style = category.default_style();
                if let Some(&color) = options.colors.get(&category) {
                    style = style.with_fg(color);
                }
                style.bold &= options.bold_tags;
                style.italic &= options.italic_descriptions;
                if options.opacity < 1.0 {
                    style = style.with_dim();
                }
                (category, style)
            })
            .collect();
        Self { styles }
    }

    /// Style for one category
    pub fn style(&self, category: Category) -> Style {
        self.styles.get(&category).copied().unwrap_or_default()
    }

    /// Flatten a parse result into non-overlapping styled spans
    ///
    /// Where spans overlap, the category with the higher paint priority
    /// wins. The result is sorted by start offset.
    pub fn styled_spans(&self, result: &ParseResult, len: usize) -> Vec<Span> {
        let mut layers: Vec<_> = result.iter().collect();
        layers.sort_by_key(|(category, _)| category.paint_priority());

        let mut paint: Vec<Option<Category>> = vec![None; len];
        for (category, spans) in layers {
            for span in spans {
                let end = span.end.min(len);
                for cell in paint.iter_mut().take(end).skip(span.start) {
                    *cell = Some(category);
                }
            }
        }

        let mut styled = Vec::new();
        let mut pos = 0;
        while pos < len {
            let current = paint[pos];
            let run_end = paint[pos..]
                .iter()
                .position(|&c| c != current)
                .map_or(len, |n| pos + n);
            if let Some(category) = current {
                styled.push(Span::new(pos, run_end, self.style(category)));
            }
            pos = run_end;
        }
        styled
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self::new(&RenderOptions::default())
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}

/// Queue the escape sequences for a style
fn apply_style<W: Write>(out: &mut W, style: &Style) -> Result<()> {
    if style.fg != Color::Default {
        queue!(out, SetForegroundColor(term_color(style.fg)))?;
    }
    let attributes = [
        (style.bold, Attribute::Bold),
        (style.italic, Attribute::Italic),
        (style.underline, Attribute::Underlined),
        (style.strikethrough, Attribute::CrossedOut),
        (style.dim, Attribute::Dim),
    ];
    for (enabled, attribute) in attributes {
        if enabled {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

/// Write `source` to `out` with the parse result's styling applied
pub fn highlight<W: Write>(
    source: &SourceText,
    result: &ParseResult,
    sheet: &StyleSheet,
    out: &mut W,
) -> Result<()> {
    let text = source.text();
    let mut pos = 0;

    for span in sheet.styled_spans(result, text.len()) {
        if span.start > pos {
            queue!(out, Print(&text[pos..span.start]))?;
        }
        if span.style.is_default() {
            queue!(out, Print(&text[span.start..span.end]))?;
        } else {
            apply_style(out, &span.style)?;
            queue!(
                out,
                Print(&text[span.start..span.end]),
                SetAttribute(Attribute::Reset)
            )?;
        }
        pos = span.end;
    }

    if pos < text.len() {
        queue!(out, Print(&text[pos..]))?;
    }
    out.flush()?;
    Ok(())
}
