//! Best-effort LaTeX to structured-document conversion.
//!
//! [`parse_latex`] turns raw LaTeX into a [`ParsedDocument`]: title and
//! metadata plus an ordered list of [`ContentBlock`]s (headings, paragraphs,
//! display math, code, lists). Parsing is a fixed set of regex heuristics,
//! not a TeX engine. The remaining modules are the collaborators around it:
//! a directory-backed tutorial store, table of contents, HTML output, and
//! search.

pub mod parser;
pub mod render;
pub mod search;
pub mod settings;
pub mod store;
pub mod toc;

pub use parser::blocks::ContentBlock;
pub use parser::{parse_latex, ParsedDocument};
