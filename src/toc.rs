use serde::Serialize;

use crate::parser::blocks::ContentBlock;
use crate::parser::sections::heading_id;

const MAX_TOC_LEVEL: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub id: String,
    pub title: String,
    pub level: u8,
}

/// Headings of a converted document, in order, with their anchor ids.
pub fn table_of_contents(blocks: &[ContentBlock]) -> Vec<TocEntry> {
    blocks
        .iter()
        .filter_map(|block| match block {
            ContentBlock::Heading { level, text } if *level <= MAX_TOC_LEVEL => Some(TocEntry {
                id: heading_id(text),
                title: text.clone(),
                level: *level,
            }),
            ContentBlock::Heading { .. }
            | ContentBlock::Paragraph { .. }
            | ContentBlock::Math { .. }
            | ContentBlock::Code { .. }
            | ContentBlock::List { .. } => None,
        })
        .collect()
}
