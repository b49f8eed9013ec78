use std::sync::LazyLock;

use regex::Regex;

static BOLD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\textbf\{([^}]+)\}").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\textit\{([^}]+)\}").unwrap());
static EMPH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\emph\{([^}]+)\}").unwrap());
static UNDERLINE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\underline\{([^}]+)\}").unwrap());
static CITE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\cite\{([^}]+)\}").unwrap());
static REF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\ref\{([^}]+)\}").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\url\{([^}]+)\}").unwrap());
static HREF_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\href\{([^}]+)\}\{([^}]+)\}").unwrap());
static FOOTNOTE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\footnote\{([^}]+)\}").unwrap());
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\\\").unwrap());
static ESCAPED_CHAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\([%&_#{}])").unwrap());
static DOUBLE_STAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\[a-zA-Z]+(\{[^}]*\})?").unwrap());

/// Rewrite inline LaTeX markup into display HTML and drop every other command.
///
/// Rules run in a fixed order, so earlier rules see the raw text and later
/// ones see the partially rewritten string. Only the first `\\` becomes a
/// `<br>`. Math and code payloads never pass through here.
pub fn clean_inline_text(text: &str) -> String {
    let s = BOLD_RE.replace_all(text, "<strong>${1}</strong>");
    let s = ITALIC_RE.replace_all(&s, "<em>${1}</em>");
    let s = EMPH_RE.replace_all(&s, "<em>${1}</em>");
    let s = UNDERLINE_RE.replace_all(&s, "<u>${1}</u>");
    let s = CITE_RE.replace_all(&s, "[Citation: ${1}]");
    let s = REF_RE.replace_all(&s, "[Ref: ${1}]");
    let s = URL_RE.replace_all(&s, "<a href='${1}'>${1}</a>");
    let s = HREF_RE.replace_all(&s, "<a href='${1}'>${2}</a>");
    let s = FOOTNOTE_RE.replace_all(&s, "");
    let s = LINE_BREAK_RE.replace(&s, "<br>");
    let s = s.replace('~', " ");
    let s = ESCAPED_CHAR_RE.replace_all(&s, "${1}");
    let s = DOUBLE_STAR_RE.replace_all(&s, "<strong>${1}</strong>");
    strip_commands(&s).trim().to_string()
}

/// Remove leftover `\command` / `\command{arg}` tokens.
///
/// Repeats until nothing matches: deleting `\foo{x}` out of `\\foo{x}bar`
/// would otherwise leave a fresh `\bar` behind.
fn strip_commands(text: &str) -> String {
    let mut out = text.to_string();
    while COMMAND_RE.is_match(&out) {
        out = COMMAND_RE.replace_all(&out, "").into_owned();
    }
    out
}

/// True if `text` still holds anything the generic command rule would strip.
#[cfg(test)]
pub(crate) fn has_command(text: &str) -> bool {
    COMMAND_RE.is_match(text)
}
