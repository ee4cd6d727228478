//! Documentation-comment scanning
//!
//! This module turns a source text into classified spans:
//! - `locator` finds `/** ... */` regions
//! - `structurer` classifies each region's delimiters, tags, types,
//!   parameter names, default values, links and descriptions
//! - `category` and `style` describe how each span is presented

mod category;
mod locator;
mod result;
mod scanner;
mod structurer;
mod style;
mod tags;

pub use category::Category;
pub use locator::{locate, CommentRegion, Regions};
pub use result::{ClassifiedSpan, ParseResult};
pub use structurer::{extract_description, structure};
pub use style::{Color, Span, Style};
pub use tags::{is_known_tag, TagKind};

use tracing::debug;

use crate::error::Result;
use crate::text::SourceText;

/// Classify every documentation comment in a text snapshot
///
/// Malformed or unterminated comments never fail; they contribute what
/// could be recognized, or nothing. An error means an offset could not be
/// translated against `source`.
pub fn parse_document(source: &SourceText) -> Result<ParseResult> {
    let mut result = ParseResult::new();
    let mut regions = 0;

    for region in locate(source.text()) {
        debug!(start = region.start, len = region.text.len(), "structuring comment");
        structure(&region, source, &mut result)?;
        regions += 1;
    }

    debug!(regions, spans = result.total(), "parsed document");
    Ok(result.finish())
}
