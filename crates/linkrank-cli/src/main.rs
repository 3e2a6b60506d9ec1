#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use linkrank_core::AnalysisError;
use output::{CliError, OutputMode, render_error, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "linkrank: link graph analysis for crawled sites",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overridden by LINKRANK_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format. Defaults to pretty on a terminal and text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags and environment.
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Score and classify every page of a crawl",
        long_about = "Build the link graph from crawl records, run PageRank, HITS and \
                      centrality, and assign each page a structural role.",
        after_help = "EXAMPLES:\n    # Analyze a crawl export\n    linkrank analyze crawl.json\n\n    # Use a config file and override the damping factor\n    linkrank analyze crawl.jsonl --config linkrank.toml --damping 0.9\n\n    # Emit machine-readable output\n    linkrank analyze crawl.json --format json"
    )]
    Analyze(cmd::analyze::AnalyzeArgs),

    #[command(
        about = "Summarize the link graph structure",
        long_about = "Build the link graph from crawl records and print node, edge and \
                      connectivity counts without scoring.",
        after_help = "EXAMPLES:\n    # Graph statistics\n    linkrank stats crawl.json\n\n    # Read records from stdin\n    cat crawl.json | linkrank stats -"
    )]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    linkrank completions bash\n\n    # Generate zsh completions\n    linkrank completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("LINKRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "linkrank=debug,info"
        } else {
            "linkrank=info,warn"
        })
    });

    let format = env::var("LINKRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Convert any command failure into the structured error shape, keeping
/// the code and hint of an underlying [`AnalysisError`].
fn to_cli_error(err: &anyhow::Error) -> CliError {
    let message = format!("{err:#}");
    match err.downcast_ref::<AnalysisError>() {
        Some(analysis) => CliError {
            message,
            ..CliError::from(analysis)
        },
        None => CliError {
            message,
            suggestion: None,
            error_code: None,
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = cli.output_mode();
    debug!(?output, "resolved output mode");

    let command_result = match cli.command {
        Commands::Analyze(ref args) => cmd::analyze::run_analyze(args, output),
        Commands::Stats(ref args) => cmd::stats::run_stats(args, output),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    };

    match command_result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if render_error(output, &to_cli_error(&err)).is_err() {
                eprintln!("error: {err:#}");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn format_flag_parses_after_subcommand() {
        let cli = Cli::parse_from(["linkrank", "analyze", "crawl.json", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputMode::Json));
        assert_eq!(cli.output_mode(), OutputMode::Json);
    }

    #[test]
    fn json_flag_sets_output_mode() {
        let cli = Cli::parse_from(["linkrank", "--json", "stats", "crawl.json"]);
        assert!(cli.json);
        assert_eq!(cli.output_mode(), OutputMode::Json);
    }

    #[test]
    fn analyze_overrides_parse() {
        let cli = Cli::parse_from([
            "linkrank",
            "analyze",
            "crawl.json",
            "--config",
            "linkrank.toml",
            "--damping",
            "0.9",
            "--top-k",
            "5",
            "--normalize-betweenness",
            "--sequential",
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.records.to_str(), Some("crawl.json"));
        assert!(args.damping.is_some_and(|d| (d - 0.9).abs() < f64::EPSILON));
        assert_eq!(args.top_k, Some(5));
        assert!(args.normalize_betweenness);
        assert!(args.sequential);
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["linkrank", "stats", "crawl.json", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn completions_subcommand_parses() {
        let cli = Cli::parse_from(["linkrank", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions(cmd::completions::CompletionsArgs {
                shell: clap_complete::Shell::Bash,
            })
        ));
    }

    #[test]
    fn records_path_is_required() {
        assert!(Cli::try_parse_from(["linkrank", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["linkrank", "stats"]).is_err());
    }

    #[test]
    fn cli_error_keeps_analysis_code_through_context() {
        let err = Err::<(), _>(AnalysisError::ConfigParse("bad".into()))
            .context("loading linkrank.toml")
            .expect_err("error");
        let cli = to_cli_error(&err);
        assert_eq!(cli.error_code.as_deref(), Some("E1002"));
        assert!(cli.message.starts_with("loading linkrank.toml: "));
        assert!(cli.suggestion.is_some());
    }

    #[test]
    fn cli_error_for_io_has_no_code() {
        let err = anyhow::anyhow!("failed to read records from crawl.json");
        let cli = to_cli_error(&err);
        assert!(cli.error_code.is_none());
        assert_eq!(cli.message, "failed to read records from crawl.json");
    }
}
