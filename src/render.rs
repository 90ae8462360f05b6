// src/render.rs
//
// Structure classification and rendering of a markup tree back to text.
//
// - Block mode: whitespace between tags is discarded, every element starts on
//   its own line and its contents are indented by four spaces.
// - Inline mode: lone line breaks collapse to one space, blank-line breaks
//   survive as a paragraph break, everything else flows left to right.
// - `<code>` contents keep their line structure; only the shared indentation
//   is normalized.
// - `<list>` may hold only `<item>` elements, one per line.

use memchr::memchr;
use quick_xml::escape::{escape, partial_escape};

use crate::error::{FormatError, StructureError};
use crate::markup::{Element, Node, TagClass};
use crate::wrap::{indent, is_ws, set_indentation};

/// Indentation added for each level of block nesting.
pub const INDENT_WIDTH: usize = 4;

/// How a sibling node list is laid out.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderMode {
    Block,
    Inline,
    Invalid(StructureError),
}

/* ============================ Classification ============================ */

pub fn classify(nodes: &[Node], top_level: bool) -> RenderMode {
    let elements = || nodes.iter().filter_map(Node::as_element);
    let first_of = |class: TagClass| elements().find(|e| e.class() == class);

    if top_level {
        // raw text here has no tag to render into; reject the run instead of dropping it
        return if nodes.iter().all(|n| n.as_element().is_some() || n.is_blank_text()) {
            RenderMode::Block
        } else {
            RenderMode::Invalid(StructureError::StrayText)
        };
    }

    let block_shaped = nodes.iter().all(|n| match n {
        Node::Text(_) => n.is_blank_text(),
        Node::Element(e) => e.class() != TagClass::Inline,
    });
    if block_shaped && first_of(TagClass::Block).is_some() {
        return RenderMode::Block;
    }

    let inline_shaped = elements().all(|e| e.class() != TagClass::Block);
    if inline_shaped && (elements().next().is_none() || first_of(TagClass::Inline).is_some()) {
        return RenderMode::Inline;
    }

    let reason = match (first_of(TagClass::Block), first_of(TagClass::Inline)) {
        (Some(block), Some(inline)) => StructureError::Conflict {
            block: block.name.clone(),
            inline: inline.name.clone(),
        },
        _ => match first_of(TagClass::Unknown) {
            Some(unknown) => StructureError::UnknownTag(unknown.name.clone()),
            None => StructureError::MixedText,
        },
    };
    RenderMode::Invalid(reason)
}

/* =============================== Rendering =============================== */

/// Classify `nodes` and render them in the resulting mode.
///
/// `keep_indentation` is set for the contents of `<code>`: text is escaped
/// but its line breaks and indentation are left alone.
pub fn render_nodes(
    nodes: &[Node],
    top_level: bool,
    keep_indentation: bool,
) -> Result<String, FormatError> {
    match classify(nodes, top_level) {
        RenderMode::Block => render_block(nodes),
        RenderMode::Inline => render_inline(nodes, keep_indentation),
        RenderMode::Invalid(reason) => Err(reason.into()),
    }
}

fn render_block(nodes: &[Node]) -> Result<String, FormatError> {
    let mut out = String::new();
    for (i, element) in nodes.iter().filter_map(Node::as_element).enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format_tag(element, true, || block_contents(element))?);
    }
    Ok(out)
}

fn block_contents(element: &Element) -> Result<String, FormatError> {
    if element.name != "list" {
        let inner = render_nodes(&element.children, false, element.name == "code")?;
        return Ok(indent(&inner, INDENT_WIDTH));
    }

    // Items get one level under <list> and no extra level for their contents.
    let mut items = Vec::new();
    for node in &element.children {
        match node {
            Node::Element(item) if item.name == "item" => items.push(format_tag(item, false, || {
                render_nodes(&item.children, false, false)
            })?),
            _ if node.is_blank_text() => {}
            _ => return Err(StructureError::ListContent.into()),
        }
    }
    Ok(indent(&items.join("\n"), INDENT_WIDTH))
}

fn render_inline(nodes: &[Node], keep_indentation: bool) -> Result<String, FormatError> {
    let mut out = String::new();
    for (i, node) in nodes.iter().enumerate() {
        match node {
            Node::Text(text) => {
                let text = match (i, keep_indentation) {
                    (0, true) => text.trim_start_matches(['\r', '\n']),
                    (0, false) => text.trim_start(),
                    _ => text.as_str(),
                };
                if keep_indentation {
                    out.push_str(&partial_escape(text));
                } else {
                    out.push_str(&partial_escape(collapse_line_breaks(text).as_str()));
                }
            }
            Node::Element(element) => out.push_str(&format_tag(element, false, || {
                render_nodes(&element.children, false, false)
            })?),
        }
    }
    Ok(set_indentation(out.trim_end(), 0))
}

/// Replace every whitespace run holding a single line break with one space;
/// runs holding two or more line breaks become one blank line.
fn collapse_line_breaks(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut seg_start = 0usize;

    while let Some(off) = memchr(b'\n', &bytes[seg_start..]) {
        let nl = seg_start + off;
        let mut start = nl;
        while start > seg_start && is_ws(bytes[start - 1]) {
            start -= 1;
        }
        let mut end = nl + 1;
        let mut breaks = 1usize;
        while end < bytes.len() && is_ws(bytes[end]) {
            if bytes[end] == b'\n' {
                breaks += 1;
            }
            end += 1;
        }

        out.push_str(&text[seg_start..start]);
        out.push_str(if breaks > 1 { "\n\n" } else { " " });
        seg_start = end;
    }
    out.push_str(&text[seg_start..]);
    out
}

/* ============================ Tag serializer ============================ */

/// Render `element` as a self-closing tag when it has no children, otherwise
/// as opening tag, `inside()`, closing tag. Block tags put a line break right
/// after the opening tag.
pub fn format_tag<F>(element: &Element, block: bool, inside: F) -> Result<String, FormatError>
where
    F: FnOnce() -> Result<String, FormatError>,
{
    let mut out = String::new();
    out.push('<');
    out.push_str(&element.name);
    for (name, value) in &element.attributes {
        out.push_str(&format!(" {name}=\"{}\"", escape(value.as_str())));
    }

    if element.children.is_empty() {
        out.push_str("/>");
        return Ok(out);
    }

    out.push('>');
    if block {
        out.push('\n');
    }
    out.push_str(&inside()?);
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
    Ok(out)
}
