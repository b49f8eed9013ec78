use std::sync::LazyLock;

use regex::Regex;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\title\{([^}]+)\}").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\date\{([^}]+)\}").unwrap());
static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\category\{([^}]+)\}").unwrap());
static KEYWORDS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\keywords\{([^}]+)\}").unwrap());
static ABSTRACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\begin\{abstract\}(.*?)\\end\{abstract\}").unwrap());

/// Document-level fields pulled from marker commands. Captures are verbatim, never cleaned.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    pub tags: Vec<String>,
}

pub fn extract_title(source: &str) -> Option<String> {
    first_arg(&TITLE_RE, source)
}

pub fn extract(source: &str) -> Metadata {
    Metadata {
        description: ABSTRACT_RE
            .captures(source)
            .map(|c| c[1].trim().to_string()),
        category: first_arg(&CATEGORY_RE, source),
        date: first_arg(&DATE_RE, source),
        tags: extract_tags(source),
    }
}

fn extract_tags(source: &str) -> Vec<String> {
    let Some(raw) = first_arg(&KEYWORDS_RE, source) else {
        return Vec::new();
    };
    raw.split(',').map(|t| t.trim().to_string()).collect()
}

fn first_arg(re: &Regex, source: &str) -> Option<String> {
    re.captures(source).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_verbatim() {
        assert_eq!(extract_title(r"\title{Foo Bar}").as_deref(), Some("Foo Bar"));
        assert_eq!(
            extract_title(r"\title{The \textbf{Big} One}").as_deref(),
            Some(r"The \textbf{Big")
        );
        assert_eq!(extract_title("no title here"), None);
        assert_eq!(extract_title(r"\title{}"), None);
    }

    #[test]
    fn first_title_wins() {
        assert_eq!(extract_title(r"\title{One}\title{Two}").as_deref(), Some("One"));
    }

    #[test]
    fn tags_trimmed_in_order() {
        let m = extract(r"\keywords{a, b ,c}");
        assert_eq!(m.tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn tags_keep_duplicates() {
        let m = extract(r"\keywords{graphs, BFS, graphs}");
        assert_eq!(m.tags, vec!["graphs", "BFS", "graphs"]);
    }

    #[test]
    fn empty_keywords_yield_no_tags() {
        // `{}` has no argument to match
        assert!(extract(r"\keywords{}").tags.is_empty());
        assert!(extract("").tags.is_empty());
    }

    #[test]
    fn empty_pieces_are_kept() {
        assert_eq!(extract(r"\keywords{a,,b}").tags, vec!["a", "", "b"]);
        assert_eq!(extract(r"\keywords{a,,b, }").tags, vec!["a", "", "b", ""]);
    }

    #[test]
    fn blank_abstract_is_empty_not_missing() {
        let m = extract("\\begin{abstract}\n   \n\\end{abstract}");
        assert_eq!(m.description.as_deref(), Some(""));
    }

    #[test]
    fn abstract_is_trimmed_not_cleaned() {
        let m = extract("\\begin{abstract}\n  Learn \\emph{graphs}.\n\\end{abstract}");
        assert_eq!(m.description.as_deref(), Some(r"Learn \emph{graphs}."));
    }

    #[test]
    fn fields_are_independent() {
        let m = extract(r"\date{May 15, 2023} \category{Algorithms}");
        assert_eq!(m.date.as_deref(), Some("May 15, 2023"));
        assert_eq!(m.category.as_deref(), Some("Algorithms"));
        assert_eq!(m.description, None);
        assert!(m.tags.is_empty());
    }
}
