//! docmark - documentation comment scanner and highlighter
//!
//! Command-line front end over the docmark library.

mod cli;

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process;

use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;
use unicode_width::UnicodeWidthChar;

use docmark::config::Config;
use docmark::render::{highlight, StyleSheet};
use docmark::syntax::locate;
use docmark::{parse_document, Category, ClassifiedSpan, Result, SourceText};

use cli::{Cli, Commands, OutputFormat};

/// Display width of span excerpts in text output
const EXCERPT_WIDTH: usize = 48;

fn main() {
    let cli = Cli::parse();
    initialize_logging(&cli);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging unavailable: {}", e);
    }
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Spans { file, format } => print_spans(&read_source(file)?, *format),
        Commands::Regions { file } => print_regions(&read_source(file)?),
        Commands::Highlight {
            file,
            no_bold_tags,
            no_italic,
            opacity,
        } => {
            let config = match &cli.config {
                Some(path) => Config::load_from(path)?,
                None => Config::load()?,
            };
            let mut options = config.render_options();
            options.bold_tags &= !no_bold_tags;
            options.italic_descriptions &= !no_italic;
            if let Some(opacity) = *opacity {
                options.opacity = opacity.clamp(0.0, 1.0);
            }

            let source = read_source(file)?;
            let result = parse_document(&source)?;
            let sheet = StyleSheet::new(&options);
            highlight(&source, &result, &sheet, &mut io::stdout().lock())
        }
    }
}

/// Read a file, or standard input for `-`
fn read_source(path: &Path) -> Result<SourceText> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)?
    };
    debug!(path = %path.display(), bytes = text.len(), "read source");
    Ok(SourceText::new(text))
}

fn print_spans(source: &SourceText, format: OutputFormat) -> Result<()> {
    let result = parse_document(source)?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let mut all: Vec<(Category, &ClassifiedSpan)> = result
        .iter()
        .flat_map(|(category, spans)| spans.iter().map(move |span| (category, span)))
        .collect();
    all.sort_by_key(|(category, span)| (span.start, span.end, *category));

    for (category, span) in all {
        let range = span.range;
        println!(
            "{}:{}-{}:{}  {:<16}  {:?}",
            range.start.line + 1,
            range.start.column + 1,
            range.end.line + 1,
            range.end.column + 1,
            category.name(),
            excerpt(span.slice(source.text()))
        );
    }
    Ok(())
}

fn print_regions(source: &SourceText) -> Result<()> {
    for region in locate(source.text()) {
        let start = source.position_at(region.start)?;
        println!(
            "{}:{}  offset {}  {} line(s)",
            start.line + 1,
            start.column + 1,
            region.start,
            region.text.matches('\n').count() + 1
        );
    }
    Ok(())
}

/// Single-line excerpt truncated to `EXCERPT_WIDTH` display columns
fn excerpt(s: &str) -> String {
    let flat = s.replace('\n', "\\n");
    let mut result = String::new();
    let mut width = 0;

    for ch in flat.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > EXCERPT_WIDTH {
            result.push('…');
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}
