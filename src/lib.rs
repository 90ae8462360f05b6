// src/lib.rs
//
// reformadoc: canonical layout for XML documentation comments
//
// - Runs of `///` or `'''` lines are parsed as a small markup tree and
//   rendered back with tag-aware word wrapping (126 columns by default) and
//   four-space indentation per block level.
// - Every other line is copied unchanged.
// - A run whose markup is invalid is kept as written, preceded by a line
//   explaining what is wrong with it.

pub mod backup;
pub mod comments;
pub mod error;
pub mod markup;
pub mod render;
pub mod wrap;

pub use comments::{reformat_comments_with, CommentKind};
pub use error::{FormatError, StructureError};

/// Target line width, indentation and comment marker included.
pub const DEFAULT_WRAP_WIDTH: usize = 126;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    pub wrap_width: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

/// Reformat all documentation comments in `source` with the default options.
pub fn reformat_comments(source: &str) -> String {
    reformat_comments_with(source, &FormatOptions::default())
}
