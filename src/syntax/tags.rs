//! Tag classification table
//!
//! Each `@word` token resolves to exactly one `TagKind`. The tables are
//! checked most specific first and the first hit wins.

use super::category::Category;

const DEPRECATED_TAGS: &[&str] = &["@deprecated"];
const EXAMPLE_TAGS: &[&str] = &["@example"];
const RETURN_TAGS: &[&str] = &["@returns", "@return"];
const SINCE_TAGS: &[&str] = &["@since", "@version"];
const SEE_TAGS: &[&str] = &["@see"];
const THROWS_TAGS: &[&str] = &["@throws", "@throw", "@exception"];
const DEFAULT_TAGS: &[&str] = &["@default", "@defaultValue"];
const PARAM_TAGS: &[&str] = &["@param", "@argument", "@arg"];
const TYPE_TAGS: &[&str] = &[
    "@type",
    "@typedef",
    "@callback",
    "@template",
    "@enum",
    "@member",
    "@var",
    "@property",
    "@prop",
];

/// Structural, visibility and relationship tags
///
/// These classify as generic tags like any other unknown `@word`; the list
/// lets callers tell a well-known tag apart from an arbitrary one.
const STRUCTURAL_TAGS: &[&str] = &[
    "@readonly",
    "@override",
    "@virtual",
    "@abstract",
    "@access",
    "@public",
    "@private",
    "@protected",
    "@internal",
    "@inheritDoc",
    "@packageDocumentation",
    "@module",
    "@namespace",
    "@class",
    "@constructor",
    "@interface",
    "@implements",
    "@extends",
    "@augments",
    "@mixes",
    "@requires",
    "@fires",
    "@emits",
    "@listens",
    "@event",
    "@satisfies",
];

/// Classification of a tag token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Deprecated,
    Example,
    Returns,
    Since,
    See,
    Throws,
    /// Followed by a default value
    DefaultValue,
    /// Followed by an optional type and a parameter name
    Param,
    /// Carries an optional type only
    TypeBearing,
    /// Any other `@word`
    Generic,
}

impl TagKind {
    /// Classify a tag token (including its leading `@`)
    pub fn classify(token: &str) -> Self {
        let table: [(&[&str], TagKind); 9] = [
            (DEPRECATED_TAGS, TagKind::Deprecated),
            (EXAMPLE_TAGS, TagKind::Example),
            (RETURN_TAGS, TagKind::Returns),
            (SINCE_TAGS, TagKind::Since),
            (SEE_TAGS, TagKind::See),
            (THROWS_TAGS, TagKind::Throws),
            (DEFAULT_TAGS, TagKind::DefaultValue),
            (PARAM_TAGS, TagKind::Param),
            (TYPE_TAGS, TagKind::TypeBearing),
        ];
        table
            .iter()
            .find(|(tags, _)| tags.contains(&token))
            .map_or(TagKind::Generic, |&(_, kind)| kind)
    }

    /// Category the tag token's own span is emitted under
    pub fn category(&self) -> Category {
        match self {
            TagKind::Deprecated => Category::Deprecated,
            TagKind::Example => Category::Example,
            TagKind::Returns => Category::Returns,
            TagKind::Since => Category::Since,
            TagKind::See => Category::See,
            TagKind::Throws => Category::Throws,
            TagKind::DefaultValue | TagKind::Param | TagKind::TypeBearing | TagKind::Generic => {
                Category::Tag
            }
        }
    }
}

/// Check if a token is one of the recognized documentation tags
pub fn is_known_tag(token: &str) -> bool {
    TagKind::classify(token) != TagKind::Generic || STRUCTURAL_TAGS.contains(&token)
}
