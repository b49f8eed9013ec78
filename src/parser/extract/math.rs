use std::sync::LazyLock;

use regex::Regex;

use crate::parser::blocks::ContentBlock;

static EQUATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\begin\{equation\}(.*?)\\end\{equation\}").unwrap());
static ALIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\begin\{align\}(.*?)\\end\{align\}").unwrap());
static BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\\\[(.*?)\\\]").unwrap());
static DOLLARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)\$\$(.*?)\$\$").unwrap());

/// Pull the display math out of a chunk routed here by the classifier.
///
/// The first delimiter present in the chunk decides the variant
/// (equation, align, `\[`, `$$`); if that variant never closes, nothing is
/// emitted even when a later one would match.
pub fn extract(chunk: &str) -> Option<ContentBlock> {
    let re: &Regex = if chunk.contains(r"\begin{equation}") {
        &*EQUATION_RE
    } else if chunk.contains(r"\begin{align}") {
        &*ALIGN_RE
    } else if chunk.contains(r"\[") {
        &*BRACKET_RE
    } else if chunk.contains("$$") {
        &*DOLLARS_RE
    } else {
        return None;
    };

    let latex = re.captures(chunk)?[1].trim().to_string();
    if latex.is_empty() {
        return None;
    }
    Some(ContentBlock::Math { latex })
}
