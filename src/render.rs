//! HTML output for converted documents.
//!
//! Math and code are emitted as containers for an external typesetter and
//! highlighter; nothing is typeset here. Paragraph and list markup is
//! trusted (it comes out of the inline cleaner) but `$` is turned into an
//! entity so a page-level math renderer does not pick it up.

use std::fmt::Write;

use crate::parser::blocks::ContentBlock;
use crate::parser::sections::heading_id;
use crate::parser::ParsedDocument;
use crate::store::Tutorial;

pub fn escape_dollars(text: &str) -> String {
    text.replace('$', "&#36;")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_block(block: &ContentBlock) -> String {
    match block {
        ContentBlock::Heading { level, text } => format!(
            "<h{level} id=\"{}\">{}</h{level}>",
            escape_html(&heading_id(text)),
            escape_dollars(&escape_html(text)),
        ),
        ContentBlock::Paragraph { html } => format!("<p>{}</p>", escape_dollars(html)),
        ContentBlock::Math { latex } => {
            format!("<div class=\"math\">\\[{}\\]</div>", escape_html(latex))
        }
        ContentBlock::Code { language, source } => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>",
            escape_html(language),
            escape_html(source),
        ),
        ContentBlock::List { ordered, items } => {
            let tag = if *ordered { "ol" } else { "ul" };
            let mut out = format!("<{tag}>");
            for item in items {
                let _ = write!(out, "<li>{}</li>", escape_dollars(item));
            }
            let _ = write!(out, "</{tag}>");
            out
        }
    }
}

pub fn render_blocks(blocks: &[ContentBlock]) -> String {
    blocks.iter().map(render_block).collect::<Vec<_>>().join("\n")
}

/// Full `<article>` with a header carrying the document metadata.
pub fn render_document(doc: &ParsedDocument) -> String {
    let mut meta: Vec<&str> = Vec::new();
    meta.extend(doc.category.as_deref());
    meta.extend(doc.date.as_deref());
    meta.push(&doc.read_time);
    let description = doc.description.as_deref().filter(|d| !d.is_empty());
    article(&doc.title, description, &meta, &doc.tags, &doc.content)
}

/// Same as [`render_document`], using the store's filled-in fields.
pub fn render_tutorial(t: &Tutorial) -> String {
    let meta = [t.category.as_str(), t.date.as_str(), t.read_time.as_str()];
    article(&t.title, Some(t.description.as_str()), &meta, &t.tags, &t.content)
}

fn article(
    title: &str,
    description: Option<&str>,
    meta: &[&str],
    tags: &[String],
    blocks: &[ContentBlock],
) -> String {
    let mut out = String::from("<article>\n<header>\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_dollars(&escape_html(title)));
    if let Some(description) = description {
        let _ = writeln!(out, "<p class=\"description\">{}</p>", escape_html(description));
    }
    let meta: Vec<_> = meta.iter().map(|m| escape_html(m)).collect();
    let _ = writeln!(out, "<p class=\"meta\">{}</p>", meta.join(" · "));
    if !tags.is_empty() {
        let tags: Vec<_> = tags
            .iter()
            .map(|t| format!("<span class=\"tag\">{}</span>", escape_html(t)))
            .collect();
        let _ = writeln!(out, "<p class=\"tags\">{}</p>", tags.join(" "));
    }
    out.push_str("</header>\n");
    out.push_str(&render_blocks(blocks));
    out.push_str("\n</article>\n");
    out
}
