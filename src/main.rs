use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use docx_summary::{AnalyzeOptions, DocumentAnalysis, analyze_with_options, report};

#[derive(Parser)]
#[command(name = "docx-summary")]
#[command(version)]
#[command(about = "Extract paragraphs, runs, tables, images and WordArt from a DOCX file", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the document summary as JSON
    Summary {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Print a human-readable structure report
    Report {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Write the document statistics and assessment as JSON
    Analysis {
        /// Input DOCX file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        options: OptionArgs,
    },
}

#[derive(Args)]
struct OptionArgs {
    /// Archive folder holding the parts to analyze
    #[arg(long, default_value = "word/")]
    content_root: String,

    /// Keep runs exactly as written
    #[arg(long)]
    no_merge_runs: bool,

    /// Skip the cross-part text style index
    #[arg(long)]
    no_merge_sources: bool,

    /// Skip table parsing
    #[arg(long)]
    no_tables: bool,

    /// Skip image parsing
    #[arg(long)]
    no_images: bool,

    /// Largest part to read, in bytes
    #[arg(long, value_name = "BYTES")]
    max_part_size: Option<u64>,
}

impl OptionArgs {
    fn to_options(&self) -> AnalyzeOptions {
        let mut options = AnalyzeOptions::new()
            .with_content_root(self.content_root.as_str())
            .with_merge_runs(!self.no_merge_runs)
            .with_merge_sources(!self.no_merge_sources)
            .with_tables(!self.no_tables)
            .with_images(!self.no_images);
        if let Some(limit) = self.max_part_size {
            options = options.with_max_part_size(limit);
        }
        options
    }
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Summary {
            input,
            output,
            compact,
            options,
        } => {
            let summary = analyze_with_options(&input, &options.to_options())?;
            let json = to_json(&summary, compact)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Report { input, options } => {
            let summary = analyze_with_options(&input, &options.to_options())?;
            println!("{}", report::render(&DocumentAnalysis::from_summary(&summary)));
        }
        Command::Analysis {
            input,
            compact,
            options,
        } => {
            let summary = analyze_with_options(&input, &options.to_options())?;
            let analysis = DocumentAnalysis::from_summary(&summary);
            println!("{}", to_json(&analysis, compact)?);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
