use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use latex_blocks::parser::blocks::ContentBlock;
use latex_blocks::settings::Settings;
use latex_blocks::store::{neighbors, Tutorial, TutorialStore};
use latex_blocks::{parse_latex, render, search, toc};

#[derive(Parser)]
#[command(name = "latex_blocks", about = "Convert LaTeX tutorials into structured content blocks")]
struct Cli {
    /// Tutorials directory (overrides settings)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single .tex file
    Parse {
        file: PathBuf,
        /// Print the full document as JSON
        #[arg(long)]
        json: bool,
    },
    /// Tutorials overview table, newest first
    List {
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
    /// Show one tutorial
    Show {
        slug: String,
        #[arg(long)]
        json: bool,
    },
    /// Table of contents for one tutorial
    Toc { slug: String },
    /// Render one tutorial as HTML
    Render {
        slug: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search all tutorials
    Search {
        query: String,
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },
    /// Convert every tutorial and count blocks by kind
    Stats,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(dir) = cli.dir {
        settings.tutorials_dir = dir;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| settings.log.as_str().into()),
        )
        .init();

    let t0 = Instant::now();
    let store = TutorialStore::from_settings(&settings);
    info!("Tutorials directory: {}", store.dir().display());

    let result = match cli.command {
        Commands::Parse { file, json } => {
            let bytes = fs::read(&file).with_context(|| format!("Failed to read {}", file.display()))?;
            let doc = parse_latex(&String::from_utf8_lossy(&bytes));
            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("{} ({})", doc.title, doc.read_time);
                print_blocks(&doc.content);
            }
            Ok(())
        }
        Commands::List { category, limit } => {
            let mut tutorials = store.load_all()?;
            if let Some(cat) = &category {
                tutorials.retain(|t| t.category.eq_ignore_ascii_case(cat));
            }
            if tutorials.is_empty() {
                println!("No tutorials found in {}.", store.dir().display());
                return Ok(());
            }

            println!(
                "{:>3} | {:<24} | {:<32} | {:<14} | {:<14} | {:>11}",
                "#", "Slug", "Title", "Category", "Date", "Read"
            );
            println!("{}", "-".repeat(112));
            for (i, t) in tutorials.iter().take(limit).enumerate() {
                println!(
                    "{:>3} | {:<24} | {:<32} | {:<14} | {:<14} | {:>11}",
                    i + 1,
                    truncate(&t.slug, 24),
                    truncate(&t.title, 32),
                    truncate(&t.category, 14),
                    truncate(&t.date, 14),
                    t.read_time
                );
            }

            let with_tags: Vec<_> = tutorials.iter().take(limit).filter(|t| !t.tags.is_empty()).collect();
            if !with_tags.is_empty() {
                println!("\n--- Tags ---");
                for t in &with_tags {
                    println!("  {}: {}", truncate(&t.slug, 24), t.tags.join(", "));
                }
            }

            println!("\n{} tutorials", tutorials.len());
            Ok(())
        }
        Commands::Show { slug, json } => {
            let tutorials = store.load_all()?;
            let Some(tutorial) = tutorials.iter().find(|t| t.slug == slug) else {
                bail!("Tutorial '{}' not found", slug);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(tutorial)?);
                return Ok(());
            }

            print_header(tutorial);
            print_blocks(&tutorial.content);

            let (prev, next) = neighbors(&tutorials, &slug);
            println!();
            if let Some(p) = prev {
                println!("< previous: {} ({})", p.title, p.slug);
            }
            if let Some(n) = next {
                println!("> next:     {} ({})", n.title, n.slug);
            }
            Ok(())
        }
        Commands::Toc { slug } => {
            let tutorial = load_or_bail(&store, &slug)?;
            for entry in toc::table_of_contents(&tutorial.content) {
                let indent = "  ".repeat(usize::from(entry.level.saturating_sub(1)));
                println!("{}{}  #{}", indent, entry.title, entry.id);
            }
            Ok(())
        }
        Commands::Render { slug, output } => {
            let tutorial = load_or_bail(&store, &slug)?;
            let html = render::render_tutorial(&tutorial);
            match output {
                Some(path) => {
                    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", html),
            }
            Ok(())
        }
        Commands::Search { query, limit } => {
            let tutorials = store.load_all()?;
            let results = search::search(&tutorials, &query);
            if results.is_empty() {
                println!("No results for \"{}\".", query);
                return Ok(());
            }
            for r in results.iter().take(limit) {
                println!("[{:>3}] {}  {}", r.relevance, r.title, r.url);
                if let Some(section) = &r.section_title {
                    println!("      in: {}", section);
                }
                if let Some(ctx) = &r.match_context {
                    println!("      {}", ctx);
                }
            }
            println!("\n{} results", results.len());
            Ok(())
        }
        Commands::Stats => {
            let slugs = store.slugs()?;
            if slugs.is_empty() {
                println!("No tutorials in {}.", store.dir().display());
                return Ok(());
            }
            let counts = collect_stats(&store, &slugs)?;
            counts.print();
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn load_or_bail(store: &TutorialStore, slug: &str) -> anyhow::Result<Tutorial> {
    match store.load(slug)? {
        Some(t) => Ok(t),
        None => bail!("Tutorial '{}' not found", slug),
    }
}

fn print_header(t: &Tutorial) {
    println!("{}", t.title);
    println!("{}", "=".repeat(t.title.chars().count()));
    println!("{}", t.description);
    println!("{} | {} | {}", t.category, t.date, t.read_time);
    if !t.tags.is_empty() {
        println!("Tags: {}", t.tags.join(", "));
    }
    println!();
}

fn print_blocks(blocks: &[ContentBlock]) {
    for block in blocks {
        match block {
            ContentBlock::Heading { level, text } => {
                println!("\n{} {}", "#".repeat(usize::from(*level)), text)
            }
            ContentBlock::Paragraph { html } => println!("{}\n", html),
            ContentBlock::Math { latex } => println!("  [math] {}\n", latex.replace('\n', " ")),
            ContentBlock::Code { language, source } => {
                println!("  [code: {}]", language);
                for line in source.lines() {
                    println!("    {}", line);
                }
                println!();
            }
            ContentBlock::List { ordered, items } => {
                for (i, item) in items.iter().enumerate() {
                    if *ordered {
                        println!("  {}. {}", i + 1, item);
                    } else {
                        println!("  - {}", item);
                    }
                }
                println!();
            }
        }
    }
}

const BLOCK_KINDS: [&str; 5] = ["heading", "paragraph", "math", "code", "list"];

#[derive(Default)]
struct BlockCounts {
    tutorials: usize,
    by_kind: HashMap<&'static str, usize>,
}

impl BlockCounts {
    fn add(&mut self, blocks: &[ContentBlock]) {
        self.tutorials += 1;
        for block in blocks {
            *self.by_kind.entry(block.kind()).or_default() += 1;
        }
    }

    fn print(&self) {
        println!("Converted {} tutorials", self.tutorials);
        for kind in BLOCK_KINDS {
            let n = self.by_kind.get(kind).copied().unwrap_or(0);
            println!("  {:<10} {:>6}", kind, n);
        }
    }
}

fn collect_stats(store: &TutorialStore, slugs: &[String]) -> anyhow::Result<BlockCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(slugs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
            .progress_chars("#>-"),
    );

    let mut counts = BlockCounts::default();
    for chunk in slugs.chunks(64) {
        let results: Vec<_> = chunk.par_iter().map(|slug| store.load(slug)).collect();
        for tutorial in results {
            if let Some(t) = tutorial? {
                counts.add(&t.content);
            }
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

/// Fit `s` into a table column of `width` chars, ending in `…` when cut.
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.2}s", d.as_secs_f64())
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}
