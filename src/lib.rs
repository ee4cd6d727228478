//! docmark - documentation comment scanner and highlighter
//!
//! Locates every `/** ... */` block in a source text and classifies its
//! delimiters, tags, types, parameter names, default values, inline links
//! and descriptions into exact byte spans, ready for an editor or terminal
//! to paint.

pub mod config;
pub mod error;
pub mod render;
pub mod syntax;
pub mod text;

pub use error::{DocmarkError, Result};
pub use syntax::{parse_document, Category, ClassifiedSpan, ParseResult};
pub use text::{Position, Range, SourceText};
