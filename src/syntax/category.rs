//! Semantic categories for documentation-comment spans
//!
//! This module defines the closed set of categories a classified span
//! can belong to and their default visual styles.

use serde::Serialize;

use super::style::{Color, Style};

/// Semantic category of a classified span
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    /// Generic `@word` tag (also parameter, default and type tags)
    Tag,
    /// Parameter name after `@param`
    ParamName,
    /// Brace-delimited type annotation (`{string}`)
    Type,
    /// Free-text description
    Description,
    /// Inline cross-reference (`{@link Foo}`)
    Link,
    /// `/**`, `*/` and leading `*` markers
    CommentDelimiter,
    /// `@deprecated`
    Deprecated,
    /// `@example`
    Example,
    /// `@returns` / `@return`
    Returns,
    /// Value after `@default`
    DefaultValue,
    /// `@since` / `@version`
    Since,
    /// `@see`
    See,
    /// `@throws` / `@throw` / `@exception`
    Throws,
}

impl Category {
    /// Every category, in declaration order
    pub const ALL: [Category; 13] = [
        Category::Tag,
        Category::ParamName,
        Category::Type,
        Category::Description,
        Category::Link,
        Category::CommentDelimiter,
        Category::Deprecated,
        Category::Example,
        Category::Returns,
        Category::DefaultValue,
        Category::Since,
        Category::See,
        Category::Throws,
    ];

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            Category::Tag => Style::fg(Color::Magenta).with_bold(),
            Category::ParamName => Style::fg(Color::BrightYellow).with_bold(),
            Category::Type => Style::fg(Color::Yellow).with_italic(),
            Category::Description => Style::fg(Color::White).with_italic(),
            Category::Link => Style::fg(Color::BrightBlue).with_underline(),
            Category::CommentDelimiter => Style::fg(Color::BrightBlack),
            Category::Deprecated => Style::fg(Color::Red)
                .with_bold()
                .with_italic()
                .with_strikethrough(),
            Category::Example => Style::fg(Color::Green).with_bold(),
            Category::Returns => Style::fg(Color::Cyan).with_bold(),
            Category::DefaultValue => Style::fg(Color::BrightMagenta).with_italic(),
            Category::Since => Style::fg(Color::Blue).with_italic(),
            Category::See => Style::fg(Color::BrightCyan).with_italic(),
            Category::Throws => Style::fg(Color::BrightRed).with_bold(),
        }
    }

    /// Precedence when spans of different categories overlap (higher wins)
    pub fn paint_priority(&self) -> u8 {
        match self {
            Category::Description => 0,
            Category::CommentDelimiter => 1,
            Category::Type | Category::ParamName | Category::DefaultValue => 2,
            Category::Link => 3,
            Category::Tag
            | Category::Deprecated
            | Category::Example
            | Category::Returns
            | Category::Since
            | Category::See
            | Category::Throws => 4,
        }
    }

    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Category::Tag => "Tag",
            Category::ParamName => "ParamName",
            Category::Type => "Type",
            Category::Description => "Description",
            Category::Link => "Link",
            Category::CommentDelimiter => "CommentDelimiter",
            Category::Deprecated => "Deprecated",
            Category::Example => "Example",
            Category::Returns => "Returns",
            Category::DefaultValue => "DefaultValue",
            Category::Since => "Since",
            Category::See => "See",
            Category::Throws => "Throws",
        }
    }

    /// Parse a category from its name (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}
