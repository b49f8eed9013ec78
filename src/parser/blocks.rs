use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::extract::{code, list, math};
use super::inline::clean_inline_text;

static BLANK_LINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

const MATH_OPENERS: &[&str] = &[r"\begin{equation}", r"\begin{align}", r"\["];
const CODE_OPENERS: &[&str] = &[r"\begin{verbatim}", r"\begin{lstlisting}", r"\begin{minted}"];
const LIST_OPENERS: &[&str] = &[r"\begin{itemize}", r"\begin{enumerate}"];

/// One renderable unit of a converted document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Heading { level: u8, text: String },
    /// Cleaned inline markup, safe to embed as HTML.
    Paragraph { html: String },
    /// Raw display-math source.
    Math { latex: String },
    Code { language: String, source: String },
    List { ordered: bool, items: Vec<String> },
}

impl ContentBlock {
    /// Text as a reader sees it: tags the inline cleaner added are dropped.
    /// Math and code stay raw source.
    pub fn plain_text(&self) -> String {
        match self {
            ContentBlock::Heading { text, .. } => text.clone(),
            ContentBlock::Paragraph { html } => strip_tags(html),
            ContentBlock::Math { latex } => latex.clone(),
            ContentBlock::Code { source, .. } => source.clone(),
            ContentBlock::List { items, .. } => {
                items.iter().map(|i| strip_tags(i)).collect::<Vec<_>>().join("\n")
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Heading { .. } => "heading",
            ContentBlock::Paragraph { .. } => "paragraph",
            ContentBlock::Math { .. } => "math",
            ContentBlock::Code { .. } => "code",
            ContentBlock::List { .. } => "list",
        }
    }
}

fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkKind {
    Math,
    Code,
    List,
    Paragraph,
}

/// Split a segment on blank lines and turn every non-empty chunk into at most one block.
pub fn classify_chunks(content: &str, out: &mut Vec<ContentBlock>) {
    for chunk in BLANK_LINE_RE.split(content) {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            continue;
        }

        let block = match classify(chunk) {
            ChunkKind::Math => math::extract(chunk),
            ChunkKind::Code => code::extract(chunk),
            ChunkKind::List => list::extract(chunk),
            ChunkKind::Paragraph => Some(ContentBlock::Paragraph {
                html: clean_inline_text(chunk),
            }),
        };
        out.extend(block);
    }
}

/// Prefix test on the trimmed chunk, math first. `$$` counts anywhere.
fn classify(chunk: &str) -> ChunkKind {
    let starts_with_any = |openers: &[&str]| openers.iter().any(|o| chunk.starts_with(o));

    if starts_with_any(MATH_OPENERS) || chunk.contains("$$") {
        ChunkKind::Math
    } else if starts_with_any(CODE_OPENERS) {
        ChunkKind::Code
    } else if starts_with_any(LIST_OPENERS) {
        ChunkKind::List
    } else {
        ChunkKind::Paragraph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(content: &str) -> Vec<ContentBlock> {
        let mut out = Vec::new();
        classify_chunks(content, &mut out);
        out
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        let b = blocks("First line\ncontinues.\n\n\n   \nSecond \\textbf{para}.");
        assert_eq!(
            b,
            vec![
                ContentBlock::Paragraph { html: "First line\ncontinues.".into() },
                ContentBlock::Paragraph { html: "Second <strong>para</strong>.".into() },
            ]
        );
    }

    #[test]
    fn routes_each_kind() {
        let content = "\\begin{equation}x=1\\end{equation}\n\n\
                       \\begin{verbatim}\nls\n\\end{verbatim}\n\n\
                       \\begin{itemize}\\item a\\end{itemize}\n\n\
                       plain";
        let kinds: Vec<_> = blocks(content).iter().map(ContentBlock::kind).collect();
        assert_eq!(kinds, vec!["math", "code", "list", "paragraph"]);
    }

    #[test]
    fn plain_text_drops_cleaner_markup() {
        let b = blocks("See \\textbf{graphs} and \\url{https://x.org}.");
        assert_eq!(b[0].plain_text(), "See graphs and https://x.org.");

        let list = ContentBlock::List {
            ordered: false,
            items: vec!["<em>a</em>".into(), "b".into()],
        };
        assert_eq!(list.plain_text(), "a\nb");

        let code = ContentBlock::Code { language: "html".into(), source: "<p>".into() };
        assert_eq!(code.plain_text(), "<p>");
    }

    #[test]
    fn dollars_anywhere_route_to_math() {
        let b = blocks("The identity $$a=b$$ follows.");
        assert_eq!(b, vec![ContentBlock::Math { latex: "a=b".into() }]);
    }

    #[test]
    fn environment_not_at_start_is_a_paragraph() {
        let b = blocks("Intro text \\begin{itemize}\\item a\\end{itemize}");
        assert_eq!(b.len(), 1);
        assert!(matches!(&b[0], ContentBlock::Paragraph { .. }));
    }

    #[test]
    fn trailing_text_after_environment_is_absorbed() {
        let b = blocks("\\begin{equation}y=2\\end{equation} where y is fixed");
        assert_eq!(b, vec![ContentBlock::Math { latex: "y=2".into() }]);
    }

    #[test]
    fn empty_environments_vanish() {
        let b = blocks("\\begin{equation}\\end{equation}\n\n\\begin{itemize}\n\\end{itemize}");
        assert!(b.is_empty());
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(ContentBlock::Code {
            language: "python".into(),
            source: "print(1)".into(),
        })
        .unwrap();
        assert_eq!(json["type"], "code");
        assert_eq!(json["language"], "python");
    }
}
