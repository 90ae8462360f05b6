// src/error.rs
//
// Errors raised while reformatting one comment run. None of them escape the
// file-level pass: the driver reports them and keeps the run's original lines.

/// A node list whose shape the renderer cannot lay out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// A block-level and an inline-level tag are siblings.
    #[error("<{block}> is block-level, but <{inline}> is inline-level.")]
    Conflict { block: String, inline: String },

    /// A tag outside both vocabularies where its level decides the layout.
    #[error("I don't know whether <{0}> is inline-level or block-level.")]
    UnknownTag(String),

    #[error(
        "This comment contains an element that contains both block-level elements as well as raw text. Wrap the text in <para>."
    )]
    MixedText,

    /// Non-whitespace text directly at the top of a comment, outside any tag.
    #[error("This comment contains raw text outside of any tag. Wrap the text in <summary>.")]
    StrayText,

    #[error("A <list> tag is not supposed to contain anything other than <item> tags.")]
    ListContent,
}

/// Reason a comment run is left untouched.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    /// Markup rejected by the XML reader (unbalanced tags, bad syntax).
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed or duplicated attribute.
    #[error("{0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("{0}")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// A character outside the XML `Char` production.
    #[error("Invalid character U+{0:04X} in comment.")]
    InvalidCharacter(u32),

    #[error("Reference to undefined entity &{0};")]
    UnknownEntity(String),

    #[error("The <{0}> tag is never closed.")]
    Unclosed(String),

    /// Markup that follows a stray closing tag of the synthetic root.
    #[error("Unexpected content after the end of the comment.")]
    TrailingContent,

    #[error("{0} are not supported in documentation comments.")]
    Unsupported(&'static str),

    #[error(transparent)]
    Structure(#[from] StructureError),
}
