use clap::{ArgAction, Parser};
use crossterm::style::Stylize;
use sequencer_core::config::DataFiles;
use sequencer_core::{
    OriginPolicy, RepeatPolicy, SequencerConfig, SequencerEngine, StudyPlan, WordGraph, WordList,
};
use std::error::Error;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Orders vocabulary so that every word follows the components it is built from.
#[derive(Parser)]
#[command(name = "sequencer", version, about, long_about = None)]
struct Cli {
    /// Word list of already known words
    #[arg(long, value_name = "FILE")]
    known: Option<PathBuf>,

    /// Target word list; repeat to schedule several lists in order
    #[arg(long, value_name = "FILE", required = true)]
    vocab: Vec<PathBuf>,

    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the lexicon tables under their standard names
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// New siblings introduced alongside each new prerequisite
    #[arg(short, long, value_name = "N")]
    expansion: Option<usize>,

    /// Cache the built word graph at this path
    #[arg(long, value_name = "FILE")]
    cache: Option<PathBuf>,

    /// Re-emit targets that were already scheduled
    #[arg(long)]
    allow_repeats: bool,

    /// Fall back to the secondary origin table for unlisted units
    #[arg(long)]
    secondary_origins: bool,

    /// Print pronunciation, depth, frequency and definition next to each word
    #[arg(long)]
    annotate: bool,

    /// Print a per-stage summary to stderr
    #[arg(long)]
    stats: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Config file values, overridden by whatever was given on the command line.
    fn sequencer_config(&self) -> sequencer_core::Result<SequencerConfig> {
        let mut config = match &self.config {
            Some(path) => SequencerConfig::from_file(path)?,
            None => SequencerConfig::default(),
        };
        if let Some(dir) = &self.data_dir {
            config.data = DataFiles::in_dir(dir);
        }
        if let Some(expansion) = self.expansion {
            config.expansion = expansion;
        }
        if let Some(cache) = &self.cache {
            config.graph_cache = Some(cache.clone());
        }
        if self.allow_repeats {
            config.repeat_policy = RepeatPolicy::AllowRepeats;
        }
        if self.secondary_origins {
            config.origin_policy = OriginPolicy::PrimaryThenSecondary;
        }
        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let engine = SequencerEngine::load(cli.sequencer_config()?)?;

    let known = match &cli.known {
        Some(path) => WordList::from_file(path)?,
        None => WordList::default(),
    };
    let mut targets = WordList::default();
    for path in &cli.vocab {
        targets.append_file(path)?;
    }

    // The whole plan is computed before anything is printed.
    let plan = engine.plan(&known, &targets);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for word in plan.words() {
        if cli.annotate {
            writeln!(out, "{}", annotated_line(engine.graph(), word))?;
        } else {
            writeln!(out, "{word}")?;
        }
    }
    out.flush()?;

    if cli.stats {
        print_stats(&plan);
    }
    Ok(())
}

fn annotated_line(graph: &WordGraph, word: &str) -> String {
    match graph.get(word) {
        Some(unit) => format!(
            "{}\t{}\t{}\t{}\t{}",
            unit.word,
            unit.pronunciation.as_deref().unwrap_or(""),
            unit.depth,
            unit.frequency,
            unit.definition
        ),
        None => format!("{word}\t\t0\t0\t"),
    }
}

fn print_stats(plan: &StudyPlan) {
    eprintln!("\n{}", "Study plan".bold());
    eprintln!("---------------------------------------------------------------");
    for (i, stage) in plan.stages.iter().enumerate() {
        let name = if stage.name.is_empty() { "(unnamed)" } else { stage.name.as_str() };
        eprintln!(
            "  {:>3}. {} {:>5} targets -> {} cards",
            i + 1,
            format!("{name:<24}").cyan(),
            stage.targets,
            format!("{:>5}", stage.words.len()).green()
        );
    }
    eprintln!("  total: {} cards", plan.len().to_string().bold());
}
