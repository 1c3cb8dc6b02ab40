use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rapid_summarize::pipeline::observer::TracingObserver;
use rapid_summarize::pipeline::spec::SummarySpec;
use rapid_summarize::{Summarizer, SummarizerConfig, SummaryBudget};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rapid-summarize",
    version,
    about = "Extractive TextRank summarization"
)]
struct Cli {
    /// Document to summarize; reads stdin when omitted or "-"
    input: Option<PathBuf>,

    /// Target summary length in words; wins over --ratio
    #[arg(short, long)]
    words: Option<usize>,

    /// Target summary length as a fraction of the sentences, in (0, 1]
    #[arg(short, long)]
    ratio: Option<f64>,

    /// Language of the built-in stopword list
    #[arg(long, env = "RAPID_SUMMARIZE_LANGUAGE")]
    language: Option<String>,

    /// Extra stopword (repeatable)
    #[arg(long = "stopword", value_name = "WORD")]
    stopwords: Vec<String>,

    /// Disable stopword filtering
    #[arg(long)]
    no_stopwords: bool,

    /// JSON summary spec with budget, rank and stopword settings
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the summary with scores and ranks as JSON
    #[arg(long)]
    json: bool,

    /// Fail when the document contains no sentences
    #[arg(long)]
    require_non_empty: bool,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "rapid_summarize=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let (mut config, spec_budget) = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            SummarySpec::from_json(&json)
                .and_then(SummarySpec::into_config)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => (SummarizerConfig::default(), SummaryBudget::default()),
    };

    if let Some(language) = cli.language {
        config.language = language;
    }
    config.stopwords.extend(cli.stopwords);
    if cli.no_stopwords {
        config.use_stopwords = false;
    }

    let budget = if cli.words.is_some() || cli.ratio.is_some() {
        SummaryBudget::resolve(cli.words, cli.ratio)?
    } else {
        spec_budget
    };

    let text = read_input(cli.input.as_deref())?;
    let summarizer = Summarizer::with_config(config)?;

    let summary = summarizer.summarize_with_observer(&text, budget, &mut TracingObserver)?;
    if cli.require_non_empty && summary.is_empty() {
        anyhow::bail!(rapid_summarize::SummarizeError::DocumentEmpty);
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for sentence in summary.texts() {
            println!("{sentence}");
        }
    }

    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
