// src/wrap.rs
//
// Layout of rendered comment text.
//
// - Word wrapping keeps a line's own leading indentation on its continuation
//   lines and never splits a word.
// - A trailing run of closing tags (`</para></remarks>`) is excluded from the
//   wrap width and stays glued to the last wrapped segment.
// - Lines from a `<code` line up to the matching `</code>` line are emitted
//   verbatim.
// - Indentation normalization strips the common leading spaces of a fragment
//   and reapplies a caller-supplied indent; blank lines become empty.

use memchr::{memmem, memrchr};

/* ============================ Utility predicates ========================= */

#[inline]
pub(crate) fn is_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':' || b == b'.'
}

#[inline]
pub(crate) fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r'
}

#[inline]
fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

#[inline]
fn width_of(s: &str) -> usize {
    s.chars().count()
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/* =========================== Indentation ================================= */

/// Prefix every non-blank line of `text` with `by` spaces.
pub fn indent(text: &str, by: usize) -> String {
    let pad = " ".repeat(by);
    text.split('\n')
        .map(|line| {
            if is_blank(line) {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strip the indentation shared by all non-blank lines, then indent each of
/// them by `indent` spaces. Leading and trailing line breaks are dropped.
pub fn set_indentation(text: &str, indent: usize) -> String {
    let lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    let common = lines
        .iter()
        .filter(|line| !is_blank(line))
        .map(|line| leading_spaces(line))
        .min()
        .unwrap_or(0);

    let pad = " ".repeat(indent);
    let out = lines
        .iter()
        .map(|line| {
            if is_blank(line) {
                String::new()
            } else {
                format!("{pad}{}", &line[common..])
            }
        })
        .collect::<Vec<_>>()
        .join("\n");
    out.trim_matches(['\r', '\n']).to_string()
}

/* ============================== Wrapping ================================= */

/// Byte offset where the trailing run of closing tags of `line` begins
/// (`line.len()` when the line does not end in a closing tag).
fn closing_tags_start(line: &str) -> usize {
    let bytes = line.as_bytes();
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b'>' {
        let Some(lt) = memrchr(b'<', &bytes[..end]) else { break };
        let tag = &bytes[lt..end];
        let name = &tag[1..tag.len() - 1];
        if name.len() < 2 || name[0] != b'/' || !name[1..].iter().all(|&b| is_name_char(b)) {
            break;
        }
        end = lt;
    }
    end
}

/// Space-separated words of `s`; a tag (`<see cref="A B"/>`) counts as part
/// of one word even when it contains spaces.
fn words(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut out = Vec::new();
    let mut in_tag = false;
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' => in_tag = true,
            b'>' => in_tag = false,
            b' ' if !in_tag => {
                if start < i {
                    out.push(&s[start..i]);
                }
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < bytes.len() {
        out.push(&s[start..]);
    }
    out
}

/// Greedy word wrap of a single line to `width` columns.
fn wrap_words(line: &str, width: usize) -> Vec<String> {
    let indent_len = leading_spaces(line);
    let indent = &line[..indent_len];

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;
    for word in words(&line[indent_len..]) {
        let word_width = width_of(word);
        if current.is_empty() {
            current.push_str(indent);
            current.push_str(word);
            current_width = indent_len + word_width;
        } else if current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(indent);
            current.push_str(word);
            current_width = indent_len + word_width;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    } else if lines.is_empty() {
        // no words: keep the indentation for closing tags glued to this line
        lines.push(indent.to_string());
    }
    lines
}

fn prefixed(prefix: &str, line: &str) -> String {
    if line.is_empty() {
        prefix.trim_end().to_string()
    } else {
        format!("{prefix}{line}")
    }
}

/// Lay out rendered comment markup as source lines, each starting with
/// `prefix`, wrapped so that prefix plus text fits in `width` columns.
pub fn wrap_comment(rendered: &str, prefix: &str, width: usize) -> Vec<String> {
    let available = width.saturating_sub(width_of(prefix));
    let mut out = Vec::new();
    let mut in_code = false;

    for line in rendered.lines() {
        if memmem::find(line.as_bytes(), b"<code").is_some() {
            in_code = true;
        }

        if in_code {
            out.push(prefixed(prefix, line));
            if memmem::find(line.as_bytes(), b"</code>").is_some() {
                in_code = false;
            }
            continue;
        }

        let split = closing_tags_start(line);
        let (body, closing) = line.split_at(split);
        let mut wrapped = wrap_words(body, available);
        if let Some(last) = wrapped.last_mut() {
            last.push_str(closing);
        }
        out.extend(wrapped.iter().map(|segment| prefixed(prefix, segment)));
    }

    if out.is_empty() {
        out.push(prefixed(prefix, ""));
    }
    out
}
