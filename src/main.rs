use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};
use template_tokenizer::parser::positions::line_cols;
use template_tokenizer::{ContentType, Error, Result, Token, render, tokenize, tokenize_templates};
use tracing_subscriber::filter::LevelFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "tmpltok")]
#[command(about = "Tokenize html`` and css`` template content")]
struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a file, a directory or stdin
    Tokenize {
        /// Path to an .html/.css/script file or a directory
        #[arg(required_unless_present = "stdin")]
        file: Option<PathBuf>,

        /// Read from stdin
        #[arg(long)]
        stdin: bool,

        /// Content type (html or css); overrides detection for .html/.css files
        #[arg(long = "type")]
        content_type: Option<ContentType>,

        /// Output as JSON
        #[arg(long, conflicts_with = "color")]
        json: bool,

        /// Print the source with ANSI highlighting instead of a token list
        #[arg(long)]
        color: bool,
    },
    /// Print the number of tokens of each kind
    Count {
        #[arg(required_unless_present = "stdin")]
        file: Option<PathBuf>,

        #[arg(long)]
        stdin: bool,

        #[arg(long = "type")]
        content_type: Option<ContentType>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Lines,
    Json,
    Color,
}

/// One tokenized piece of a file: the whole file, or one template literal
#[derive(Debug, Serialize)]
struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<PathBuf>,
    #[serde(rename = "type")]
    content_type: ContentType,
    /// Byte offset of the tokenized text within its file
    offset: usize,
    #[serde(skip)]
    content: String,
    /// Token offsets are file offsets
    tokens: Vec<Token>,
    /// 0-indexed (line, column) of each token start
    #[serde(skip)]
    positions: Vec<(usize, usize)>,
}

impl Section {
    fn new(
        path: Option<PathBuf>,
        file_source: &str,
        content_type: ContentType,
        offset: usize,
        content: String,
        tokens: Vec<Token>,
    ) -> Self {
        let starts: Vec<usize> = tokens.iter().map(|t| t.start).collect();
        let positions = line_cols(file_source, &starts);
        Self { path, content_type, offset, content, tokens, positions }
    }
}

enum FileKind {
    Content(ContentType),
    Script,
}

fn classify(path: &Path) -> Option<FileKind> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "html" | "htm" => Some(FileKind::Content(ContentType::Html)),
        "css" => Some(FileKind::Content(ContentType::Css)),
        "js" | "mjs" | "cjs" | "jsx" | "ts" | "mts" | "tsx" => Some(FileKind::Script),
        _ => None,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

/// Where content is read from
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Stdin,
    Path(&'a Path),
}

impl<'a> Input<'a> {
    /// `--stdin` wins over a path. clap requires one of the two.
    fn new(file: Option<&'a Path>, stdin: bool) -> Self {
        match file {
            Some(path) if !stdin => Input::Path(path),
            _ => Input::Stdin,
        }
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Tokenize { file, stdin, content_type, json, color } => {
            let format = if json {
                Format::Json
            } else if color {
                Format::Color
            } else {
                Format::Lines
            };
            let start = Instant::now();
            let input = Input::new(file.as_deref(), stdin);
            let (sections, file_count) = collect(&input, content_type)?;
            print_sections(&sections, format)?;
            if matches!(input, Input::Path(_)) {
                print_summary(&Summary::new(&sections, file_count, start.elapsed()));
            }
            Ok(())
        }
        Commands::Count { file, stdin, content_type } => {
            let (sections, _) = collect(&Input::new(file.as_deref(), stdin), content_type)?;
            print_counts(&sections)
        }
    }
}

/// Gather sections from stdin, a file or a directory. Returns the sections
/// and the number of files read.
fn collect(input: &Input<'_>, content_type: Option<ContentType>) -> Result<(Vec<Section>, usize)> {
    let path = match *input {
        Input::Path(path) => path,
        Input::Stdin => {
            let content_type = content_type.ok_or(Error::MissingContentType)?;
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            return Ok((vec![section_for_content(None, source, content_type)], 0));
        }
    };

    if path.is_dir() {
        let mut sections = Vec::new();
        let mut file_count = 0;
        for entry in WalkDir::new(path)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && classify(e.path()).is_some())
        {
            sections.extend(file_sections(entry.path(), content_type)?);
            file_count += 1;
        }
        if file_count == 0 {
            return Err(Error::NoInput(path.to_path_buf()));
        }
        Ok((sections, file_count))
    } else {
        Ok((file_sections(path, content_type)?, 1))
    }
}

fn file_sections(path: &Path, content_type: Option<ContentType>) -> Result<Vec<Section>> {
    let kind = classify(path).ok_or_else(|| Error::UnsupportedFile(path.to_path_buf()))?;
    let source = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = source.len(), "read file");

    match kind {
        FileKind::Content(detected) => {
            let content_type = content_type.unwrap_or(detected);
            Ok(vec![section_for_content(Some(path.to_path_buf()), source, content_type)])
        }
        FileKind::Script => Ok(script_sections(path, &source)),
    }
}

/// One section per tagged template literal in a script file
fn script_sections(path: &Path, source: &str) -> Vec<Section> {
    tokenize_templates(source)
        .into_iter()
        .map(|found| {
            Section::new(
                Some(path.to_path_buf()),
                source,
                found.template.content_type,
                found.template.start,
                found.template.content.to_string(),
                found.tokens,
            )
        })
        .collect()
}

fn section_for_content(path: Option<PathBuf>, content: String, content_type: ContentType) -> Section {
    let tokens = tokenize(&content, content_type);
    Section::new(path, &content, content_type, 0, content.clone(), tokens)
}

fn print_sections(sections: &[Section], format: Format) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, sections)?;
            writeln!(out)?;
        }
        Format::Lines => {
            for section in sections {
                if let Some(path) = &section.path {
                    writeln!(out, "== {} ({} @ {})", path.display(), section.content_type, section.offset)?;
                }
                for (token, (line, col)) in section.tokens.iter().zip(&section.positions) {
                    writeln!(
                        out,
                        "{:>4}:{:<4} {:>6}..{:<6} d{:<3} {:<10} {:?}",
                        line + 1,
                        col + 1,
                        token.start,
                        token.end,
                        token.depth,
                        token.kind,
                        token.value
                    )?;
                }
            }
        }
        Format::Color => {
            for section in sections {
                let local: Vec<Token> = section
                    .tokens
                    .iter()
                    .map(|token| Token {
                        start: token.start - section.offset,
                        end: token.end - section.offset,
                        ..token.clone()
                    })
                    .collect();
                writeln!(out, "{}", render::highlight(&section.content, &local))?;
            }
        }
    }
    Ok(())
}

fn print_counts(sections: &[Section]) -> Result<()> {
    let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    for token in sections.iter().flat_map(|s| &s.tokens) {
        *counts.entry(token.kind.as_str()).or_default() += 1;
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (kind, count) in counts {
        writeln!(out, "{:<10} {}", kind, count)?;
    }
    Ok(())
}

/// What a `tokenize` run over files produced
struct Summary {
    files: usize,
    sections: usize,
    tokens: usize,
    elapsed: Duration,
}

impl Summary {
    fn new(sections: &[Section], files: usize, elapsed: Duration) -> Self {
        Self {
            files,
            sections: sections.len(),
            tokens: sections.iter().map(|s| s.tokens.len()).sum(),
            elapsed,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        write!(
            f,
            "{} token{} in {} section{} from {} file{} ({:.1?})",
            self.tokens,
            plural(self.tokens),
            self.sections,
            plural(self.sections),
            self.files,
            plural(self.files),
            self.elapsed
        )
    }
}

fn print_summary(summary: &Summary) {
    if io::stderr().is_terminal() {
        eprintln!("\n\x1b[1m{}\x1b[0m", summary);
    } else {
        eprintln!("\n{}", summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert!(matches!(classify(Path::new("a/index.HTML")), Some(FileKind::Content(ContentType::Html))));
        assert!(matches!(classify(Path::new("theme.css")), Some(FileKind::Content(ContentType::Css))));
        assert!(matches!(classify(Path::new("hero.ts")), Some(FileKind::Script)));
        assert!(classify(Path::new("README.md")).is_none());
        assert!(classify(Path::new("Makefile")).is_none());
    }

    #[test]
    fn test_input_prefers_stdin() {
        let path = Path::new("page.html");
        assert_eq!(Input::new(Some(path), false), Input::Path(path));
        assert_eq!(Input::new(Some(path), true), Input::Stdin);
        assert_eq!(Input::new(None, true), Input::Stdin);
    }

    #[test]
    fn test_stdin_needs_content_type() {
        assert!(matches!(collect(&Input::Stdin, None), Err(Error::MissingContentType)));
    }

    #[test]
    fn test_section_positions() {
        let source = "const a = 1;\nconst b = html`<p>\n${x}</p>`;";
        let sections = script_sections(Path::new("b.js"), source);
        assert_eq!(sections.len(), 1);
        let section = &sections[0];
        let expected: Vec<_> = section
            .tokens
            .iter()
            .map(|t| template_tokenizer::parser::positions::line_col(source, t.start))
            .collect();
        assert_eq!(section.positions, expected);
        assert_eq!(section.positions[0], (1, 16));
    }

    #[test]
    fn test_summary() {
        let content = "<p>${x}</p>".to_string();
        let section = section_for_content(None, content, ContentType::Html);
        let summary = Summary::new(&[section], 1, Duration::from_micros(1500));
        assert_eq!(summary.to_string(), "3 tokens in 1 section from 1 file (1.5ms)");
    }
}
