use std::sync::LazyLock;

use regex::Regex;

use crate::parser::blocks::ContentBlock;
use crate::parser::inline::clean_inline_text;

static ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\item\s+").unwrap());
static ITEM_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\item|\\end\{(?:itemize|enumerate)\}").unwrap());

/// Pull list items out of an `itemize`/`enumerate` chunk.
///
/// An item runs from `\item ` up to the next `\item` or list closer; an item
/// with neither after it is dropped. Nested lists are not tracked, their
/// items flatten into the outer list.
pub fn extract(chunk: &str) -> Option<ContentBlock> {
    let ordered = chunk.contains(r"\begin{enumerate}");
    let items = collect_items(chunk);
    if items.is_empty() {
        return None;
    }
    Some(ContentBlock::List { ordered, items })
}

fn collect_items(chunk: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut pos = 0;

    while let Some(opener) = ITEM_RE.find_at(chunk, pos) {
        let Some(end) = ITEM_END_RE.find_at(chunk, opener.end()) else {
            break;
        };
        items.push(clean_inline_text(chunk[opener.end()..end.start()].trim()));
        pos = end.start();
    }

    items
}
