use std::cmp::Reverse;

use regex::Regex;
use serde::Serialize;

use crate::parser::blocks::ContentBlock;
use crate::parser::sections::heading_id;
use crate::store::Tutorial;

const TITLE_WEIGHT: u32 = 10;
const TAG_WEIGHT: u32 = 5;
const CATEGORY_WEIGHT: u32 = 3;
const DESCRIPTION_WEIGHT: u32 = 2;
const HEADING_WEIGHT: u32 = 3;
const BODY_WEIGHT: u32 = 1;
const CONTEXT_CHARS: usize = 40;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub url: String,
    pub title: String,
    pub relevance: u32,
    pub section_title: Option<String>,
    pub description: String,
    pub match_context: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
}

/// Case-insensitive substring search over converted tutorials, best match first.
pub fn search(tutorials: &[Tutorial], query: &str) -> Vec<SearchResult> {
    let query = query.trim();
    if query.is_empty() {
        return Vec::new();
    }
    let Ok(re) = Regex::new(&format!("(?i){}", regex::escape(query))) else {
        return Vec::new();
    };

    let mut results: Vec<_> = tutorials.iter().filter_map(|t| score(t, &re)).collect();
    results.sort_by(|a, b| {
        Reverse(a.relevance)
            .cmp(&Reverse(b.relevance))
            .then_with(|| a.title.cmp(&b.title))
    });
    results
}

fn score(tutorial: &Tutorial, re: &Regex) -> Option<SearchResult> {
    let mut relevance = 0;
    if re.is_match(&tutorial.title) {
        relevance += TITLE_WEIGHT;
    }
    relevance += TAG_WEIGHT * tutorial.tags.iter().filter(|t| re.is_match(t)).count() as u32;
    if re.is_match(&tutorial.category) {
        relevance += CATEGORY_WEIGHT;
    }
    if re.is_match(&tutorial.description) {
        relevance += DESCRIPTION_WEIGHT;
    }

    let mut section: Option<&str> = None;
    let mut first_hit: Option<(Option<&str>, String)> = None;
    for block in &tutorial.content {
        if let ContentBlock::Heading { text, .. } = block {
            section = Some(text.as_str());
        }
        let text = block.plain_text();
        let Some(m) = re.find(&text) else {
            continue;
        };
        relevance += match block {
            ContentBlock::Heading { .. } => HEADING_WEIGHT,
            _ => BODY_WEIGHT,
        };
        if first_hit.is_none() {
            first_hit = Some((section, context(&text, m.start(), m.end())));
        }
    }

    if relevance == 0 {
        return None;
    }

    let (section_title, match_context) = match first_hit {
        Some((section, ctx)) => (section.map(String::from), Some(ctx)),
        None => (None, None),
    };
    let url = match &section_title {
        Some(s) => format!("/tutorials/{}#{}", tutorial.slug, heading_id(s)),
        None => format!("/tutorials/{}", tutorial.slug),
    };

    Some(SearchResult {
        url,
        title: tutorial.title.clone(),
        relevance,
        section_title,
        description: tutorial.description.clone(),
        match_context,
        category: tutorial.category.clone(),
        tags: tutorial.tags.clone(),
    })
}

/// Up to `CONTEXT_CHARS` characters either side of the match, whitespace flattened.
fn context(text: &str, start: usize, end: usize) -> String {
    let from = text[..start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map_or(0, |(i, _)| i);
    let to = text[end..]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map_or(text.len(), |(i, _)| end + i);

    let mut snippet = text[from..to].split_whitespace().collect::<Vec<_>>().join(" ");
    if from > 0 {
        snippet.insert_str(0, "...");
    }
    if to < text.len() {
        snippet.push_str("...");
    }
    snippet
}
