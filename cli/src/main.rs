//! unmark CLI - turn PDF highlights into study material

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unmark::render::{self, PageSize};
use unmark::{
    Artifact, ExtractOptions, HighlightSet, JsonFormat, PageSelection, QuestionBank, Quiz,
    RenderOptions, Rgb, TextAlign, Unmark, UnmarkResult, Verdict, DEFAULT_LABEL,
};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "unmark")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Turn PDF highlights into summaries, flashcards and quizzes", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Label used in titles and file names
    #[arg(short, long, env = "UNMARK_LABEL", default_value = DEFAULT_LABEL)]
    label: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Where highlights come from and how they are collected.
#[derive(Args)]
struct SourceArgs {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Also collect underlines, strike-outs and squiggles
    #[arg(long)]
    all_markup: bool,

    /// Skip unreadable pages instead of failing
    #[arg(long)]
    lenient: bool,
}

/// Look of the generated documents.
#[derive(Args)]
struct StyleArgs {
    /// Label used in titles and file names
    #[arg(short, long, env = "UNMARK_LABEL", default_value = DEFAULT_LABEL)]
    label: String,

    /// Accent color (#RRGGBB)
    #[arg(long, value_name = "COLOR")]
    accent: Option<String>,

    /// Left-align body text instead of justifying it
    #[arg(long)]
    left: bool,

    /// Page size of PDF outputs (a4, letter)
    #[arg(long, default_value = "a4")]
    page_size: String,

    /// JSON question bank replacing the built-in questions
    #[arg(long, value_name = "FILE")]
    bank: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every study artifact into a directory
    Build {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Print the extracted highlights
    Extract {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExtractFormat,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write the summary as PDF or Word
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Document format
        #[arg(short, long, value_enum, default_value = "pdf")]
        format: SummaryFormat,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write the question-and-answer sheet
    #[command(alias = "qa")]
    Questions {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Write the flashcards
    Flashcards {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        style: StyleArgs,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Answer a "Certo ou Errado" quiz in the terminal
    Quiz {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of statements
        #[arg(short = 'n', long, default_value_t = unmark::study::DEFAULT_QUIZ_SIZE)]
        size: usize,
    },

    /// Show document information and a preview of the highlights
    Info {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ExtractFormat {
    Json,
    Text,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SummaryFormat {
    Pdf,
    Docx,
}

impl From<SummaryFormat> for Artifact {
    fn from(format: SummaryFormat) -> Self {
        match format {
            SummaryFormat::Pdf => Artifact::SummaryPdf,
            SummaryFormat::Docx => Artifact::SummaryDocx,
        }
    }
}

impl SourceArgs {
    fn extract_options(&self) -> Result<ExtractOptions, Box<dyn std::error::Error>> {
        let mut options = ExtractOptions::new();
        if let Some(ref p) = self.pages {
            options = options.with_pages(PageSelection::parse(p)?);
        }
        if self.all_markup {
            options = options.all_markup();
        }
        if self.lenient {
            options = options.lenient();
        }
        Ok(options)
    }

    fn extract(&self) -> Result<HighlightSet, Box<dyn std::error::Error>> {
        Ok(unmark::extract_file_with_options(&self.input, self.extract_options()?)?)
    }
}

impl StyleArgs {
    fn render_options(&self) -> Result<RenderOptions, Box<dyn std::error::Error>> {
        let mut options = RenderOptions::new().with_page_size(self.page_size.parse::<PageSize>()?);
        if let Some(ref accent) = self.accent {
            options = options.with_accent(accent.parse::<Rgb>()?);
        }
        if self.left {
            options = options.with_alignment(TextAlign::Left);
        }
        Ok(options)
    }

    fn builder(&self) -> Result<Unmark, Box<dyn std::error::Error>> {
        let mut builder = Unmark::new()
            .with_label(&self.label)
            .with_render_options(self.render_options()?);
        if let Some(ref path) = self.bank {
            builder = builder.with_question_bank(QuestionBank::from_path(path)?);
        }
        Ok(builder)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            source,
            style,
            output,
        }) => cmd_build(&source, &style, output.as_deref()),
        Some(Commands::Extract {
            source,
            format,
            compact,
            output,
        }) => cmd_extract(&source, format, compact, output.as_deref()),
        Some(Commands::Summary {
            source,
            style,
            format,
            output,
        }) => cmd_artifact(&source, &style, format.into(), output.as_deref()),
        Some(Commands::Questions {
            source,
            style,
            output,
        }) => cmd_artifact(&source, &style, Artifact::Questions, output.as_deref()),
        Some(Commands::Flashcards {
            source,
            style,
            output,
        }) => cmd_artifact(&source, &style, Artifact::Flashcards, output.as_deref()),
        Some(Commands::Quiz { source, size }) => cmd_quiz(&source, size),
        Some(Commands::Info { source }) => cmd_info(&source),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: build if input is provided
            if let Some(input) = cli.input {
                let source = SourceArgs {
                    input,
                    pages: None,
                    all_markup: false,
                    lenient: false,
                };
                let style = StyleArgs {
                    label: cli.label,
                    accent: None,
                    left: false,
                    page_size: "a4".to_string(),
                    bank: None,
                };
                cmd_build(&source, &style, cli.output.as_deref())
            } else {
                println!("{}", "Usage: unmark <FILE> [OUTPUT]".yellow());
                println!("       unmark --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Extract with a spinner; `None` (after a warning) when nothing is highlighted.
fn load(
    source: &SourceArgs,
    style: &StyleArgs,
    pb: &ProgressBar,
) -> Result<Option<UnmarkResult>, Box<dyn std::error::Error>> {
    pb.set_message("Reading highlights...");
    let highlights = source.extract()?;
    pb.inc(1);

    if highlights.is_empty() {
        pb.finish_and_clear();
        warn_empty();
        return Ok(None);
    }

    Ok(Some(style.builder()?.from_highlights(highlights)))
}

fn progress(len: u64) -> Result<ProgressBar, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn warn_empty() {
    println!(
        "{} {}",
        "Warning:".yellow().bold(),
        "Nenhum destaque (highlight) encontrado no PDF. Certifique-se de marcar os trechos importantes."
    );
}

fn cmd_build(source: &SourceArgs, style: &StyleArgs, output: Option<&Path>) -> CmdResult {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = source.input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_estudo", stem))
    });

    let pb = progress(1 + Artifact::ALL.len() as u64)?;
    let Some(result) = load(source, style, &pb)? else {
        return Ok(());
    };

    fs::create_dir_all(&output_dir)?;
    let mut written = Vec::with_capacity(Artifact::ALL.len());
    for artifact in Artifact::ALL {
        pb.set_message(format!("Writing {}...", artifact.description()));
        let name = artifact.file_name(result.label());
        let path = output_dir.join(&name);
        fs::write(&path, result.render(artifact)?)?;
        log::debug!("Wrote {}", path.display());
        written.push(name);
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} highlights",
        "Extracted".green().bold(),
        result.highlights.len()
    );
    println!("{}", result.preview().dimmed());

    println!("\n{} {}", "Output files:".green().bold(), output_dir.display());
    for (i, name) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn cmd_artifact(
    source: &SourceArgs,
    style: &StyleArgs,
    artifact: Artifact,
    output: Option<&Path>,
) -> CmdResult {
    let pb = progress(2)?;
    let Some(result) = load(source, style, &pb)? else {
        return Ok(());
    };

    pb.set_message(format!("Writing {}...", artifact.description()));
    let path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(artifact.file_name(result.label())));
    fs::write(&path, result.render(artifact)?)?;
    pb.finish_with_message("Done!");

    println!("{} {}", "Saved to".green(), path.display());
    Ok(())
}

fn cmd_extract(
    source: &SourceArgs,
    format: ExtractFormat,
    compact: bool,
    output: Option<&Path>,
) -> CmdResult {
    let highlights = source.extract()?;
    if highlights.is_empty() {
        warn_empty();
    }

    let content = match format {
        ExtractFormat::Json => {
            let json_format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            render::to_json(&highlights, json_format)?
        }
        ExtractFormat::Text => render::to_text(&highlights),
    };

    if let Some(path) = output {
        fs::write(path, &content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }

    Ok(())
}

fn cmd_quiz(source: &SourceArgs, size: usize) -> CmdResult {
    let highlights = source.extract()?;
    if highlights.is_empty() {
        warn_empty();
        return Ok(());
    }

    let quiz = Quiz::sample(&highlights, size);
    println!("{}", "Certo ou Errado?".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut answers = Vec::with_capacity(quiz.len());

    'items: for item in quiz.items() {
        println!(
            "\n{} {}",
            format!("{:02}.", item.number).bold(),
            format!("(Pág. {})", item.page).dimmed()
        );
        println!("{}", item.statement);

        let answer = loop {
            print!("{} ", "Certo (c) ou Errado (e)?".yellow());
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                break 'items;
            };
            match line?.parse::<Verdict>() {
                Ok(verdict) => break verdict,
                Err(e) => println!("{}", e.to_string().red()),
            }
        };

        if item.is_correct(answer) {
            println!("{}", item.feedback(answer).green());
        } else {
            println!("{}", item.feedback(answer).red());
        }
        answers.push(answer);
    }

    let score = quiz.grade(&answers);
    println!("\n{} {}", "Score:".cyan().bold(), score);

    Ok(())
}

fn cmd_info(source: &SourceArgs) -> CmdResult {
    let highlights = source.extract()?;
    let meta = &highlights.source;
    let stats = render::ExtractionStats::from_set(&highlights);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), source.input.display());
    println!("{}: PDF {}", "Format".bold(), meta.pdf_version);
    println!("{}: {}", "Pages".bold(), meta.page_count);
    println!(
        "{}: {}",
        "Encrypted".bold(),
        if meta.encrypted { "Yes" } else { "No" }
    );

    if let Some(ref title) = meta.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = meta.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref created) = meta.created {
        println!("{}: {}", "Created".bold(), created);
    }

    println!();
    println!("{}", "Highlights".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if highlights.is_empty() {
        warn_empty();
        return Ok(());
    }

    println!("{}: {}", "Count".bold(), stats.highlight_count);
    println!(
        "{}: {} ({:.0}%)",
        "Pages with highlights".bold(),
        stats.highlighted_pages,
        stats.coverage()
    );
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!();
    println!("{}", render::preview(&highlights, render::DEFAULT_PREVIEW_ITEMS));

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unmark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF highlights to study material");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unmark".dimmed());
    println!("License: MIT");
}
