//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use trackr::output::OutputMode;

use super::commands;

/// trackr - coursework task extraction and priority ranking
#[derive(Parser, Debug)]
#[command(
    name = "trackr",
    version,
    about = "Extract coursework tasks from a page and rank them by priority",
    long_about = "Scrapes assignment titles out of raw page markup, ranks them with a\n\
                  generative model (falling back to a deterministic heuristic when the\n\
                  model is unavailable), and persists jobs and ranked tasks locally."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the full pipeline: scrape, rank, persist
    Run {
        /// Source URL to fetch
        #[arg(short, long, default_value = "")]
        source: String,

        /// Read markup from a local file instead of fetching
        #[arg(long)]
        html_file: Option<PathBuf>,

        /// Scrape mode: http or browser
        #[arg(short, long, default_value = "http")]
        mode: String,

        /// Custom ranking instruction for the model
        #[arg(short, long, default_value = "")]
        prompt: String,
    },

    /// Scrape only: extract assignments without ranking or persisting
    Scrape {
        /// Source URL to fetch
        #[arg(short, long, default_value = "")]
        source: String,

        /// Read markup from a local file instead of fetching
        #[arg(long)]
        html_file: Option<PathBuf>,

        /// Scrape mode: http or browser
        #[arg(short, long, default_value = "http")]
        mode: String,
    },

    /// Rank tasks from a JSON file without persisting
    Rate {
        /// Path to a JSON array of tasks
        tasks_file: PathBuf,

        /// Custom ranking instruction for the model
        #[arg(short, long, default_value = "")]
        prompt: String,

        /// Sampling temperature in [0, 1]
        #[arg(short, long, default_value_t = trackr::workflow::DEFAULT_TEMPERATURE)]
        temperature: f64,
    },

    /// List stored jobs
    Jobs {
        /// Maximum number of jobs to show
        #[arg(short, long, default_value_t = 200)]
        limit: usize,
    },

    /// List stored tasks
    Tasks {
        /// Maximum number of tasks to show
        #[arg(short, long, default_value_t = 200)]
        limit: usize,
    },

    /// Run the HTTP API server
    Serve {
        /// Listen port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Command::Run {
            source,
            html_file,
            mode,
            prompt,
        } => commands::run(&source, html_file.as_deref(), &mode, &prompt, output_mode),
        Command::Scrape {
            source,
            html_file,
            mode,
        } => commands::scrape(&source, html_file.as_deref(), &mode, output_mode),
        Command::Rate {
            tasks_file,
            prompt,
            temperature,
        } => commands::rate(&tasks_file, &prompt, temperature, output_mode),
        Command::Jobs { limit } => commands::jobs(limit, output_mode),
        Command::Tasks { limit } => commands::tasks(limit, output_mode),
        Command::Serve { port } => commands::serve(port),
        Command::Version => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": trackr::VERSION
                    })
                );
            } else {
                println!("trackr v{}", trackr::VERSION);
            }
            Ok(())
        },
    }
}
