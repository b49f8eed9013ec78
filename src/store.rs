use std::cmp::Reverse;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::parser::blocks::ContentBlock;
use crate::parser::parse_latex;
use crate::settings::Settings;

const DEFAULT_CATEGORY: &str = "Uncategorized";
const DATE_FORMATS: &[&str] = &["%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d %B %Y"];

/// A converted tutorial file with every display field filled in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub date: String,
    pub read_time: String,
    pub content: Vec<ContentBlock>,
    pub file_path: PathBuf,
}

/// Directory of LaTeX tutorial files, one per slug.
pub struct TutorialStore {
    dir: PathBuf,
    extension: String,
}

impl TutorialStore {
    pub fn new(dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tutorials_dir.clone(), &settings.extension)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, slug: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", slug, self.extension))
    }

    /// Slugs of all tutorial files, sorted. A missing directory is created and yields none.
    pub fn slugs(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("Failed to create {}", self.dir.display()))?;
            info!("Created tutorials directory {}", self.dir.display());
            return Ok(Vec::new());
        }

        let mut slugs = Vec::new();
        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to read {}", self.dir.display()))?
        {
            let path = entry?.path();
            let ext = path.extension().and_then(|e| e.to_str());
            if !path.is_file() || ext != Some(self.extension.as_str()) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                slugs.push(stem.to_string());
            }
        }
        slugs.sort();
        Ok(slugs)
    }

    /// Load and convert one tutorial. `Ok(None)` when the file does not exist.
    pub fn load(&self, slug: &str) -> Result<Option<Tutorial>> {
        let path = self.path_for(slug);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
        };

        let source = String::from_utf8_lossy(&bytes);
        let doc = parse_latex(&source);

        Ok(Some(Tutorial {
            slug: slug.to_string(),
            title: doc.title,
            description: doc
                .description
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| format!("A tutorial on {}", slug)),
            category: doc.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            tags: doc.tags,
            date: doc.date.unwrap_or_else(today),
            read_time: doc.read_time,
            content: doc.content,
            file_path: path,
        }))
    }

    /// Every tutorial, newest first. Files that vanish mid-scan are skipped.
    pub fn load_all(&self) -> Result<Vec<Tutorial>> {
        let slugs = self.slugs()?;
        let results: Vec<_> = slugs.par_iter().map(|slug| self.load(slug)).collect();

        let mut tutorials = Vec::with_capacity(results.len());
        for (slug, result) in slugs.iter().zip(results) {
            match result {
                Ok(Some(t)) => tutorials.push(t),
                Ok(None) => warn!("Tutorial {} disappeared while loading", slug),
                Err(e) => return Err(e),
            }
        }

        sort_newest_first(&mut tutorials);
        Ok(tutorials)
    }
}

/// Previous and next tutorial around `slug` in the given ordering.
pub fn neighbors<'a>(
    tutorials: &'a [Tutorial],
    slug: &str,
) -> (Option<&'a Tutorial>, Option<&'a Tutorial>) {
    let Some(idx) = tutorials.iter().position(|t| t.slug == slug) else {
        return (None, None);
    };
    let prev = idx.checked_sub(1).and_then(|i| tutorials.get(i));
    (prev, tutorials.get(idx + 1))
}

/// Stable sort: parsed dates descending, unparseable dates last.
pub fn sort_newest_first(tutorials: &mut [Tutorial]) {
    tutorials.sort_by_key(|t| Reverse(parse_date(&t.date)));
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            // "%B %Y" has no day; pin it to the first
            NaiveDate::parse_from_str(&format!("1 {}", raw), "%d %B %Y").ok()
        })
}

fn today() -> String {
    Local::now().format("%-m/%-d/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn missing_directory_is_created() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join("tutorials");
        let store = TutorialStore::new(&dir, "tex");
        assert!(store.slugs().unwrap().is_empty());
        assert!(dir.is_dir());
    }

    #[test]
    fn only_matching_extension() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "b.tex", "");
        write(tmp.path(), "a.tex", "");
        write(tmp.path(), "notes.md", "");
        let store = TutorialStore::new(tmp.path(), ".tex");
        assert_eq!(store.slugs().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = TutorialStore::new(tmp.path(), "tex");
        assert!(store.load("nope").unwrap().is_none());
    }

    #[test]
    fn fallbacks_for_unset_metadata() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "bare.tex", "\\section{Hi}\nthere");
        let store = TutorialStore::new(tmp.path(), "tex");
        let t = store.load("bare").unwrap().unwrap();
        assert_eq!(t.title, "Untitled Tutorial");
        assert_eq!(t.description, "A tutorial on bare");
        assert_eq!(t.category, "Uncategorized");
        assert!(t.tags.is_empty());
        assert!(parse_date(&t.date).is_some(), "today's date {:?} should parse", t.date);
        assert_eq!(t.file_path, tmp.path().join("bare.tex"));
    }

    #[test]
    fn blank_abstract_gets_fallback_description() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "quiet.tex", "\\begin{abstract}  \\end{abstract}\n\\section{A}\nb");
        let store = TutorialStore::new(tmp.path(), "tex");
        let t = store.load("quiet").unwrap().unwrap();
        assert_eq!(t.description, "A tutorial on quiet");
    }

    #[test]
    fn invalid_utf8_still_converts() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("bin.tex"), b"\\title{Bin}\xff\xfe").unwrap();
        let store = TutorialStore::new(tmp.path(), "tex");
        let t = store.load("bin").unwrap().unwrap();
        assert_eq!(t.title, "Bin");
        assert!(!t.content.is_empty());
    }

    #[test]
    fn load_all_sorts_newest_first() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "old.tex", "\\title{Old}\\date{May 15, 2023}");
        write(tmp.path(), "new.tex", "\\title{New}\\date{2024-01-02}");
        write(tmp.path(), "odd.tex", "\\title{Odd}\\date{someday}");
        let store = TutorialStore::new(tmp.path(), "tex");
        let slugs: Vec<_> = store.load_all().unwrap().into_iter().map(|t| t.slug).collect();
        assert_eq!(slugs, vec!["new", "old", "odd"]);
    }

    #[test]
    fn neighbors_in_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.tex", "\\date{2024-03-01}");
        write(tmp.path(), "b.tex", "\\date{2024-02-01}");
        write(tmp.path(), "c.tex", "\\date{2024-01-01}");
        let all = TutorialStore::new(tmp.path(), "tex").load_all().unwrap();

        let (prev, next) = neighbors(&all, "b");
        assert_eq!(prev.map(|t| t.slug.as_str()), Some("a"));
        assert_eq!(next.map(|t| t.slug.as_str()), Some("c"));

        let (prev, next) = neighbors(&all, "a");
        assert!(prev.is_none());
        assert_eq!(next.map(|t| t.slug.as_str()), Some("b"));

        assert_eq!(neighbors(&all, "zzz").0.map(|t| t.slug.clone()), None);
    }

    #[test]
    fn date_formats() {
        let d = NaiveDate::from_ymd_opt(2023, 8, 5).unwrap();
        assert_eq!(parse_date("August 5, 2023"), Some(d));
        assert_eq!(parse_date("Aug 05, 2023"), Some(d));
        assert_eq!(parse_date("2023-08-05"), Some(d));
        assert_eq!(parse_date("8/5/2023"), Some(d));
        assert_eq!(parse_date("August 2023"), NaiveDate::from_ymd_opt(2023, 8, 1));
        assert_eq!(parse_date("soon"), None);
    }
}
