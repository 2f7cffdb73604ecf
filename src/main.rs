use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rapid_summarizer::nlp::language::language_name;
use rapid_summarizer::pipeline::spec::SummarySpec;
use rapid_summarizer::pipeline::validation::ValidationEngine;
use rapid_summarizer::{
    OutputLayout, Summarizer, SummarizerConfig, SummaryRequest, TextRequest, TextResponse,
};

/// Extract the most informative sentences from a text
#[derive(Parser, Debug)]
#[command(name = "rapid-summarize", version, about)]
struct Cli {
    /// Input text file; reads stdin when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Number of sentences to extract
    #[arg(short = 'n', long = "sentences", value_name = "N")]
    sentences: Option<String>,

    /// Language code (e.g. 'en', 'fr'); detected from the text when omitted
    #[arg(short, long)]
    language: Option<String>,

    /// Print one sentence per line
    #[arg(long)]
    lines: bool,

    /// Print the full response as JSON
    #[arg(long)]
    json: bool,

    /// JSON summary spec to load settings from
    #[arg(long, value_name = "SPEC")]
    spec: Option<PathBuf>,

    /// Prompt for texts until EXIT
    #[arg(short, long)]
    interactive: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn load_spec(path: &Path, base: &SummarizerConfig) -> Result<SummarizerConfig> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read spec file {}", path.display()))?;
    let spec = SummarySpec::from_json(&json)
        .with_context(|| format!("Failed to parse spec file {}", path.display()))?;

    let report = ValidationEngine::with_defaults().validate(&spec);
    for warning in report.warnings() {
        tracing::warn!("{}", warning);
    }
    if report.has_errors() {
        let errors: Vec<String> = report.errors().map(|e| e.to_string()).collect();
        bail!("Invalid spec {}:\n  {}", path.display(), errors.join("\n  "));
    }

    Ok(spec.to_config(base)?)
}

fn build_config(cli: &Cli) -> Result<SummarizerConfig> {
    let mut config = SummarizerConfig::default();
    if let Some(path) = &cli.spec {
        config = load_spec(path, &config)?;
    }
    if let Some(raw) = &cli.sentences {
        config.num_sentences = SummaryRequest::parse_count(raw)?;
    }
    if let Some(language) = &cli.language {
        config.language = Some(language.clone());
    }
    if cli.lines {
        config.layout = OutputLayout::OnePerLine;
    }
    Ok(config)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn report_language(response: &TextResponse) {
    let name = language_name(&response.language).unwrap_or(response.language.as_str());
    match &response.detected {
        Some(detected) => eprintln!(
            "Detected language: {} ({:.0}% confidence)",
            name,
            detected.confidence * 100.0
        ),
        None => eprintln!("Language: {}", name),
    }
}

/// Read one line, `None` at end of input
fn read_line(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn prompt(out: &mut impl Write, message: &str) -> io::Result<()> {
    write!(out, "{}", message)?;
    out.flush()
}

fn run_interactive(
    summarizer: &Summarizer,
    mut input: impl BufRead,
    mut out: impl Write,
) -> Result<()> {
    loop {
        writeln!(out, "Enter text, then END on its own line (EXIT quits, case-insensitive):")?;
        let mut text = String::new();
        loop {
            let Some(line) = read_line(&mut input)? else {
                return Ok(());
            };
            match line.trim().to_uppercase().as_str() {
                "EXIT" => return Ok(()),
                "END" => break,
                _ => text.push_str(&line),
            }
        }

        prompt(&mut out, "Number of sentences: ")?;
        let Some(raw) = read_line(&mut input)? else {
            return Ok(());
        };
        let k = match SummaryRequest::parse_count(&raw) {
            Ok(k) => k,
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        };

        prompt(&mut out, "One sentence per line? (y/n): ")?;
        let Some(answer) = read_line(&mut input)? else {
            return Ok(());
        };
        let layout: OutputLayout = answer.trim().parse().unwrap_or_default();

        let request = TextRequest::new(text, k).with_layout(layout);
        match summarizer.summarize_text(&request) {
            Ok(response) => {
                report_language(&response);
                writeln!(out, "\n{}\n", response.summary)?;
            }
            Err(err) => writeln!(out, "Error: {}", err)?,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;
    let summarizer = Summarizer::new(config).context("Invalid configuration")?;

    if cli.interactive {
        let stdin = io::stdin();
        return run_interactive(&summarizer, stdin.lock(), io::stdout().lock());
    }

    let text = read_input(cli.input.as_deref())?;
    let request = TextRequest::new(text, summarizer.config().num_sentences);
    let response = summarizer
        .summarize_text(&request)
        .context("Summarization failed")?;

    report_language(&response);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", response.summary);
    }
    Ok(())
}
