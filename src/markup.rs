// src/markup.rs
//
// Markup tree for one comment run.
//
// - A run's content is parsed strictly under a synthetic root element, with
//   whitespace kept exactly as written.
// - Adjacent text (including decoded entity references and CDATA) is merged
//   into a single Text node, so siblings alternate between text and elements.
// - Comments, processing instructions, declarations and DOCTYPEs are rejected,
//   and so is any character XML does not allow, written literally or as a
//   character reference.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::FormatError;

/* =============================== Core sets =============================== */

/// Tags that flow with the surrounding text.
pub const INLINE_TAGS: &[&str] = &["see", "paramref", "typeparamref", "c"];

/// Tags that start on their own line and indent their contents.
pub const BLOCK_TAGS: &[&str] = &["code", "para", "list", "description"];

/// Level of an element name, decided by the two fixed vocabularies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagClass {
    Inline,
    Block,
    Unknown,
}

impl TagClass {
    pub fn of(name: &str) -> Self {
        if INLINE_TAGS.contains(&name) {
            TagClass::Inline
        } else if BLOCK_TAGS.contains(&name) {
            TagClass::Block
        } else {
            TagClass::Unknown
        }
    }
}

/* ================================= Tree ================================== */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// True for text made of whitespace only (the filler between block tags).
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Node::Text(text) if text.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Attributes in document order, values already unescaped.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn class(&self) -> TagClass {
        TagClass::of(&self.name)
    }
}

/* ================================ Parsing ================================ */

const ROOT: &str = "comment-root";

/// Parse the concatenated content of a comment run and return the children
/// of the synthetic root.
pub fn parse(content: &str) -> Result<Vec<Node>, FormatError> {
    check_chars(content)?;
    let wrapped = format!("<{ROOT}>{content}</{ROOT}>");
    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Vec<Node>> = None;

    loop {
        let event = reader.read_event()?;
        if root.is_some() && !matches!(event, Event::Eof) {
            return Err(FormatError::TrailingContent);
        }
        match event {
            Event::Start(e) => open.push(open_element(&reader, &e)?),
            Event::Empty(e) => {
                let element = open_element(&reader, &e)?;
                let parent = open.last_mut().ok_or(FormatError::TrailingContent)?;
                parent.children.push(Node::Element(element));
            }
            Event::End(_) => {
                let element = open.pop().ok_or(FormatError::TrailingContent)?;
                match open.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(element)),
                    None => root = Some(element.children),
                }
            }
            Event::Text(e) => push_text(&mut open, &reader.decoder().decode(&e)?)?,
            Event::CData(e) => push_text(&mut open, &reader.decoder().decode(&e)?)?,
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                let mut buf = [0u8; 4];
                push_text(&mut open, resolve_entity(&entity)?.encode_utf8(&mut buf))?;
            }
            Event::Comment(_) => return Err(FormatError::Unsupported("XML comments")),
            Event::PI(_) => return Err(FormatError::Unsupported("Processing instructions")),
            Event::Decl(_) => return Err(FormatError::Unsupported("XML declarations")),
            Event::DocType(_) => return Err(FormatError::Unsupported("Document type declarations")),
            Event::Eof => break,
        }
    }

    if let Some(element) = open.pop() {
        return Err(FormatError::Unclosed(element.name));
    }
    root.ok_or_else(|| FormatError::Unclosed(ROOT.to_string()))
}

fn open_element(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> Result<Element, FormatError> {
    let decoder = reader.decoder();
    let name = decoder.decode(start.name().as_ref())?.into_owned();

    // attributes() checks for duplicates and unquoted values
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = decoder.decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        check_chars(&value)?;
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn push_text(open: &mut [Element], text: &str) -> Result<(), FormatError> {
    if text.is_empty() {
        return Ok(());
    }
    let parent = open.last_mut().ok_or(FormatError::TrailingContent)?;
    if let Some(Node::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
    Ok(())
}

#[inline]
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

fn check_chars(s: &str) -> Result<(), FormatError> {
    match s.chars().find(|&c| !is_xml_char(c)) {
        Some(c) => Err(FormatError::InvalidCharacter(u32::from(c))),
        None => Ok(()),
    }
}

/// Resolve a predefined XML entity or a numeric character reference.
fn resolve_entity(entity: &str) -> Result<char, FormatError> {
    let resolved = match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        s => s.strip_prefix('#').and_then(|code| {
            let value = match code.strip_prefix('x') {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse::<u32>().ok(),
            };
            value.and_then(char::from_u32)
        }),
    };
    let c = resolved.ok_or_else(|| FormatError::UnknownEntity(entity.to_string()))?;
    if !is_xml_char(c) {
        return Err(FormatError::InvalidCharacter(u32::from(c)));
    }
    Ok(c)
}
