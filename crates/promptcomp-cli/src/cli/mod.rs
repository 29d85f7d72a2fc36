//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use promptcomp_core::config::{self, Config};
use promptcomp_core::{TableDetection, logging};

mod commands;

#[derive(Parser)]
#[command(name = "promptcomp")]
#[command(version)]
#[command(about = "Render backend text responses as HTML")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Rendering switches shared by `format` and `classify`.
#[derive(clap::Args, Debug, Clone, Default)]
struct RenderArgs {
    /// Table heuristic (strict, loose); overrides the config file
    #[arg(long, value_name = "MODE")]
    table_detection: Option<TableDetection>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Render a response as HTML
    Format {
        /// Input file (reads stdin when omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,

        /// Escape HTML special characters in the response
        #[arg(long)]
        escape_html: bool,

        /// Only convert line breaks and double spaces, no table/list detection
        #[arg(long, conflicts_with = "table_detection")]
        display: bool,
    },

    /// Print the detected shape (table, list, plain)
    Classify {
        /// Input file (reads stdin when omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Copy a response to the clipboard
    Copy {
        /// Input file (reads stdin when omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Write a markdown comparison of two responses
    Export {
        /// Left side (new version)
        #[arg(long, value_name = "FILE")]
        left: PathBuf,

        /// Right side (reference)
        #[arg(long, value_name = "FILE")]
        right: PathBuf,

        /// Output directory (default: export.output_dir from config, else cwd)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Write a markdown comparison of two prompt setups and their responses
    ExportPrompts {
        /// TOML file with `template_name`, `[left]` and `[right]` prompt settings
        #[arg(long, value_name = "FILE")]
        params: PathBuf,

        /// Response produced by the left (previous) setup
        #[arg(long, value_name = "FILE")]
        left_response: PathBuf,

        /// Response produced by the right (current) setup
        #[arg(long, value_name = "FILE")]
        right_response: PathBuf,

        /// Template name; overrides `template_name` in the params file
        #[arg(long, value_name = "NAME")]
        template: Option<String>,

        /// Output directory (default: export.output_dir from config, else cwd)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config_path = config::paths::config_path();
    let config = Config::load_from(&config_path).context("load config")?;
    logging::init(&config.log);
    tracing::debug!(path = %config_path.display(), "config loaded");

    dispatch(cli, config)
}

fn dispatch(cli: Cli, mut config: Config) -> Result<()> {
    match cli.command {
        Commands::Format {
            input,
            render,
            escape_html,
            display,
        } => {
            if let Some(detection) = render.table_detection {
                config.format.table_detection = detection;
            }
            config.format.escape_html |= escape_html;
            commands::format::format(input.as_deref(), &config.format, display)
        }
        Commands::Classify { input, render } => {
            let detection = render
                .table_detection
                .unwrap_or(config.format.table_detection);
            commands::format::classify(input.as_deref(), detection)
        }
        Commands::Copy { input } => commands::copy::run(input.as_deref()),
        Commands::Export { left, right, out } => {
            commands::export::run(&left, &right, out, &config.export)
        }
        Commands::ExportPrompts {
            params,
            left_response,
            right_response,
            template,
            out,
        } => commands::export::run_prompts(
            &commands::export::PromptExportArgs {
                params,
                left_response,
                right_response,
                template,
                out,
            },
            &config.export,
        ),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
