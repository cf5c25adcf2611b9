// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use panelwise::app_config::{Config, LogLevel};
use panelwise::providers::gemini::Gemini;
use panelwise::{BatchOutcome, Controller, ProjectContext};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for panelwise
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// panelwise - translate a chapter of comic pages with a multimodal model
///
/// Reads every image in projects/<PROJECT>/input_images in file name order,
/// writes one translation per page plus a combined chapter file to
/// projects/<PROJECT>/output_translations, and grows
/// projects/<PROJECT>/glossary.json as new terms appear.
#[derive(Parser, Debug)]
#[command(name = "panelwise")]
#[command(version)]
#[command(about = "Comic page translation with a running glossary")]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
#[command(long_about = "panelwise translates the pages of one project in order, feeding each page's translation to the next as context.

EXAMPLES:
    panelwise solo-leveling                      # Translate projects/solo-leveling
    panelwise -m gemini-2.5-pro solo-leveling    # Use a specific model
    panelwise --projects-dir /data/comics demo   # Use another projects root
    panelwise completions bash > panelwise.bash  # Generate bash completions

CREDENTIALS:
    The API key is read from GOOGLE_API_KEY (or the variable named by
    provider.api_key_env in the config file). A .env file in the working
    directory is loaded first.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Project name (folder under the projects directory)
    #[arg(value_name = "PROJECT", required = true)]
    project: Option<String>,

    /// Configuration file path (JSON)
    #[arg(short, long = "config")]
    config_path: Option<PathBuf>,

    /// Model name to use for translation
    #[arg(short, long)]
    model: Option<String>,

    /// Root directory holding the projects
    #[arg(long)]
    projects_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI colour for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("✖", "1;31"),
            Level::Warn => ("!", "1;33"),
            Level::Info => ("·", "1;32"),
            Level::Debug => ("?", "1;36"),
            Level::Trace => ("~", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (marker, colour) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                colour,
                now,
                marker,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "panelwise", &mut std::io::stdout());
        return Ok(());
    }

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        return Err(e);
    }
    Ok(())
}

async fn run(options: CommandLineOptions) -> Result<()> {
    let project_name = options
        .project
        .clone()
        .context("PROJECT is required when no subcommand is specified")?;

    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    // Missing .env is normal; the variable may come from the shell.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            warn!("Ignoring unreadable .env file: {}", e);
        }
    }
    let api_key = config.api_key_from_env()?;

    let provider = Gemini::new(
        api_key,
        &config.provider.endpoint,
        &config.provider.model,
        config.provider.timeout_secs,
    )?
    .with_temperature(config.provider.temperature);
    info!("Gemini API ready (model {})", config.provider.model);

    let project = ProjectContext::resolve(&config.projects_dir, &project_name)?;

    match Controller::new(&project, &provider).run().await? {
        BatchOutcome::NoImages => {
            info!("Nothing to translate for project '{}'", project.name());
        }
        BatchOutcome::Completed { pages, chapter_file } => {
            info!("Done: {} page(s) translated, chapter saved to {:?}", pages, chapter_file);
        }
    }

    Ok(())
}

fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = match &options.config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(model) = &options.model {
        config.provider.model = model.clone();
    }

    if let Some(projects_dir) = &options.projects_dir {
        config.projects_dir = projects_dir.clone();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}
