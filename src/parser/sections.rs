use std::sync::LazyLock;

use regex::Regex;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\(section|subsection|subsubsection)\{([^}]+)\}").unwrap());
static SECTION_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(?:section|subsection|subsubsection)\{|\\end\{document\}").unwrap()
});
static DOCUMENT_BODY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\begin\{document\}(.*?)\\end\{document\}").unwrap());
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeading<'a> {
    pub level: u8,
    pub title: &'a str,
}

/// A heading plus the raw text that follows it. `heading` is `None` only
/// for the unsectioned document-body fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub heading: Option<SectionHeading<'a>>,
    pub content: &'a str,
}

/// Split the source at `\section`, `\subsection` and `\subsubsection` markers.
///
/// A segment's content runs from the end of its title argument to the next
/// marker, `\end{document}`, or the end of input. With no markers at all, the
/// whole `document` body becomes one untitled segment; with no body either,
/// the result is empty.
pub fn split_sections(source: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while let Some(caps) = SECTION_RE.captures_at(source, pos) {
        let (Some(marker), Some(kind), Some(title)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            break;
        };
        let start = marker.end();
        let end = SECTION_END_RE
            .find_at(source, start)
            .map_or(source.len(), |m| m.start());

        segments.push(Segment {
            heading: Some(SectionHeading {
                level: level_for(kind.as_str()),
                title: title.as_str(),
            }),
            content: source[start..end].trim(),
        });
        pos = end;
    }

    if segments.is_empty() {
        if let Some(body) = DOCUMENT_BODY_RE.captures(source).and_then(|c| c.get(1)) {
            segments.push(Segment {
                heading: None,
                content: body.as_str(),
            });
        }
    }

    segments
}

fn level_for(kind: &str) -> u8 {
    match kind {
        "subsection" => 2,
        "subsubsection" => 3,
        _ => 1,
    }
}

/// Anchor id for a heading: lowercased, whitespace runs collapsed to `-`.
/// Punctuation is kept and ids may collide.
pub fn heading_id(title: &str) -> String {
    WHITESPACE_RE.replace_all(&title.to_lowercase(), "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline(source: &str) -> Vec<(u8, String)> {
        split_sections(source)
            .into_iter()
            .filter_map(|s| s.heading.map(|h| (h.level, h.title.to_string())))
            .collect()
    }

    #[test]
    fn three_levels_in_order() {
        let src = r"\section{A} a \subsection{B} b \subsubsection{C} c";
        assert_eq!(
            outline(src),
            vec![(1, "A".into()), (2, "B".into()), (3, "C".into())]
        );
        let contents: Vec<_> = split_sections(src).iter().map(|s| s.content).collect();
        assert_eq!(contents, vec!["a", "b", "c"]);
    }

    #[test]
    fn content_stops_at_end_document() {
        let src = "\\begin{document}\n\\section{Intro}\nHello\n\\end{document}\ntrailing junk";
        let segs = split_sections(src);
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].content, "Hello");
    }

    #[test]
    fn preamble_before_first_section_is_ignored() {
        let segs = split_sections("Preamble text\n\\section{Only}\nbody");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].content, "body");
    }

    #[test]
    fn falls_back_to_document_body() {
        let segs = split_sections("\\documentclass{article}\n\\begin{document}\nJust text.\n\\end{document}");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].heading, None);
        assert_eq!(segs[0].content.trim(), "Just text.");
    }

    #[test]
    fn nothing_to_split() {
        assert!(split_sections("").is_empty());
        assert!(split_sections("plain words, no markup").is_empty());
    }

    #[test]
    fn starred_and_empty_markers_are_not_sections() {
        // `\section{}` still ends the previous segment
        let segs = split_sections(r"\section{A} one \section{} two \section*{B} three");
        assert_eq!(segs.len(), 1);
        assert_eq!(segs[0].content, "one");
    }

    #[test]
    fn heading_ids() {
        assert_eq!(heading_id("Basic Definitions"), "basic-definitions");
        assert_eq!(heading_id("What's  New?\tNow"), "what's-new?-now");
        assert_eq!(heading_id("Same"), heading_id("same"));
    }
}
