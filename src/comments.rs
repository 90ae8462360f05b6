// src/comments.rs
//
// Line segmentation, run grouping and the per-run driver.
//
// - A line is a comment line when, after leading whitespace, it starts with
//   `///` or `'''`. Consecutive lines of the same kind form one group.
// - Plain groups are copied verbatim. Each comment run is parsed, rendered and
//   wrapped on its own; a run that fails is reported on a diagnostic line and
//   left exactly as it was.

use crate::error::FormatError;
use crate::markup::{self, Node};
use crate::render::render_nodes;
use crate::wrap::wrap_comment;
use crate::FormatOptions;

/* ============================== Segmenting =============================== */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommentKind {
    /// `///`
    Slash,
    /// `'''`
    Quote,
}

impl CommentKind {
    pub const fn marker(self) -> &'static str {
        match self {
            CommentKind::Slash => "///",
            CommentKind::Quote => "'''",
        }
    }

    /// Kind and content (the text after the marker) of a comment line.
    fn detect(line: &str) -> Option<(Self, &str)> {
        let trimmed = line.trim_start();
        [CommentKind::Slash, CommentKind::Quote]
            .into_iter()
            .find_map(|kind| trimmed.strip_prefix(kind.marker()).map(|rest| (kind, rest)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Zero-based line number.
    pub index: usize,
    pub text: &'a str,
    pub kind: Option<CommentKind>,
    /// Text after the comment marker; empty for plain lines.
    pub content: &'a str,
}

/// Split `source` into lines, accepting both `\n` and `\r\n`.
/// Trailing whitespace of the whole source is dropped first.
pub fn segment(source: &str) -> Vec<SourceLine<'_>> {
    source
        .trim_end()
        .split('\n')
        .enumerate()
        .map(|(index, raw)| {
            let text = raw.strip_suffix('\r').unwrap_or(raw);
            let (kind, content) = match CommentKind::detect(text) {
                Some((kind, content)) => (Some(kind), content),
                None => (None, ""),
            };
            SourceLine {
                index,
                text,
                kind,
                content,
            }
        })
        .collect()
}

/* =============================== Grouping ================================ */

#[derive(Debug, PartialEq, Eq)]
pub enum Group<'a> {
    Plain(&'a [SourceLine<'a>]),
    Comment(CommentRun<'a>),
}

/// Maximal block of consecutive comment lines of one kind.
#[derive(Debug, PartialEq, Eq)]
pub struct CommentRun<'a> {
    pub kind: CommentKind,
    pub lines: &'a [SourceLine<'a>],
}

impl CommentRun<'_> {
    pub fn start(&self) -> usize {
        self.lines[0].index
    }

    /// Number of leading whitespace characters on the first line.
    pub fn indentation(&self) -> usize {
        self.lines[0]
            .text
            .chars()
            .take_while(|c| c.is_whitespace())
            .count()
    }

    /// What every emitted line of this run starts with.
    pub fn prefix(&self) -> String {
        format!("{}{} ", " ".repeat(self.indentation()), self.kind.marker())
    }

    /// Marker-stripped lines joined by line breaks.
    pub fn content(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.content)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn group<'a>(lines: &'a [SourceLine<'a>]) -> Vec<Group<'a>> {
    lines
        .chunk_by(|a, b| a.kind == b.kind)
        .map(|chunk| match chunk[0].kind {
            None => Group::Plain(chunk),
            Some(kind) => Group::Comment(CommentRun { kind, lines: chunk }),
        })
        .collect()
}

/* ================================ Driver ================================= */

/// Reformat one comment run into its output lines.
pub fn reformat_run(run: &CommentRun<'_>, options: &FormatOptions) -> Result<Vec<String>, FormatError> {
    let nodes = markup::parse(&run.content())?;
    let prefix = run.prefix();

    if let Some(line) = single_line_summary(&nodes, &prefix, options.wrap_width)? {
        return Ok(vec![line]);
    }

    let rendered = render_nodes(&nodes, true, false)?;
    Ok(wrap_comment(rendered.trim(), &prefix, options.wrap_width))
}

/// `<summary>…</summary>` on one line, when the run holds nothing but an
/// attribute-less summary whose inline rendering fits in `width`.
fn single_line_summary(
    nodes: &[Node],
    prefix: &str,
    width: usize,
) -> Result<Option<String>, FormatError> {
    let mut elements = nodes.iter().filter_map(Node::as_element);
    let (Some(summary), None) = (elements.next(), elements.next()) else {
        return Ok(None);
    };
    if summary.name != "summary"
        || !summary.attributes.is_empty()
        || summary.children.is_empty()
        || !nodes.iter().all(|n| n.as_element().is_some() || n.is_blank_text())
    {
        return Ok(None);
    }

    let inner = render_nodes(&summary.children, false, false)?;
    // a whitespace-only summary renders as an empty block, never `<summary></summary>`
    if inner.is_empty() || inner.contains('\n') {
        return Ok(None);
    }
    let line = format!("{prefix}<summary>{inner}</summary>");
    Ok((line.chars().count() <= width).then_some(line))
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Rewrite every documentation comment run in `source`; all other lines are
/// copied unchanged. Every output line ends with `\n`.
pub fn reformat_comments_with(source: &str, options: &FormatOptions) -> String {
    let lines = segment(source);
    let mut out = String::with_capacity(source.len() + source.len() / 20 + 64);

    for entry in group(&lines) {
        match entry {
            Group::Plain(lines) => {
                for line in lines {
                    push_line(&mut out, line.text);
                }
            }
            Group::Comment(run) => {
                tracing::debug!(
                    start = run.start(),
                    lines = run.lines.len(),
                    kind = ?run.kind,
                    "reformatting comment run"
                );
                match reformat_run(&run, options) {
                    Ok(formatted) => {
                        for line in &formatted {
                            push_line(&mut out, line);
                        }
                    }
                    Err(err) => {
                        tracing::warn!(
                            line = run.start() + 1,
                            error = %err,
                            "comment is not valid, leaving it unchanged"
                        );
                        push_line(&mut out, &format!("The following comment is not valid: {err}"));
                        for line in run.lines {
                            push_line(&mut out, line.text);
                        }
                    }
                }
            }
        }
    }
    out
}
