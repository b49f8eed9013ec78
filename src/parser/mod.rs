pub mod blocks;
pub mod extract;
pub mod inline;
pub mod read_time;
pub mod sections;

use serde::Serialize;
use tracing::debug;

use blocks::ContentBlock;

pub const UNTITLED: &str = "Untitled Tutorial";
pub const NO_CONTENT: &str = "No content could be extracted from this LaTeX document.";

/// Result of one conversion. `title` and `content` are never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
    pub read_time: String,
    pub content: Vec<ContentBlock>,
}

/// Convert raw LaTeX into a `ParsedDocument`.
///
/// Pipeline: title → metadata → sections → blocks per section. Read time is
/// taken over the raw source. Never fails; missing pieces get placeholders.
pub fn parse_latex(source: &str) -> ParsedDocument {
    let title = extract::meta::extract_title(source).unwrap_or_else(|| UNTITLED.to_string());
    let meta = extract::meta::extract(source);
    let content = extract_content(source);

    debug!(
        title = %title,
        blocks = content.len(),
        tags = meta.tags.len(),
        "parsed latex document"
    );

    ParsedDocument {
        title,
        description: meta.description,
        category: meta.category,
        date: meta.date,
        tags: meta.tags,
        read_time: read_time::estimate_read_time(source),
        content,
    }
}

fn extract_content(source: &str) -> Vec<ContentBlock> {
    let segments = sections::split_sections(source);
    debug!(segments = segments.len(), "split sections");

    let mut content = Vec::new();
    for segment in &segments {
        if let Some(heading) = &segment.heading {
            content.push(ContentBlock::Heading {
                level: heading.level,
                text: heading.title.to_string(),
            });
        }
        blocks::classify_chunks(segment.content, &mut content);
    }

    if content.is_empty() {
        content.push(ContentBlock::Paragraph {
            html: NO_CONTENT.to_string(),
        });
    }
    content
}

// ── Tests ──
