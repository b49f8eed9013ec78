use std::sync::LazyLock;

use regex::Regex;

use crate::parser::blocks::ContentBlock;

static VERBATIM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\begin\{verbatim\}(.*?)\\end\{verbatim\}").unwrap());
static LSTLISTING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\\begin\{lstlisting\}(?:\[([^\]]*)\])?(.*?)\\end\{lstlisting\}").unwrap()
});
static MINTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\\begin\{minted\}\{([^}]*)\}(.*?)\\end\{minted\}").unwrap());
static LANGUAGE_OPT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"language=([A-Za-z0-9_]+)").unwrap());

pub const DEFAULT_LANGUAGE: &str = "text";

/// Pull a code listing out of a chunk routed here by the classifier.
///
/// - `verbatim`: body only, language stays `text`
/// - `lstlisting`: optional `[...]` options, `language=` key sets the language
/// - `minted`: the `{lang}` argument is the language
pub fn extract(chunk: &str) -> Option<ContentBlock> {
    let (language, source) = if chunk.contains(r"\begin{verbatim}") {
        let caps = VERBATIM_RE.captures(chunk)?;
        (None, caps[1].trim().to_string())
    } else if chunk.contains(r"\begin{lstlisting}") {
        let caps = LSTLISTING_RE.captures(chunk)?;
        let language = caps
            .get(1)
            .and_then(|opts| LANGUAGE_OPT_RE.captures(opts.as_str()))
            .map(|c| c[1].to_string());
        (language, caps[2].trim().to_string())
    } else if chunk.contains(r"\begin{minted}") {
        let caps = MINTED_RE.captures(chunk)?;
        let language = Some(caps[1].trim().to_string()).filter(|l| !l.is_empty());
        (language, caps[2].trim().to_string())
    } else {
        return None;
    };

    if source.is_empty() {
        return None;
    }
    Some(ContentBlock::Code {
        language: language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        source,
    })
}
