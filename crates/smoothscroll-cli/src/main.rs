use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use smoothscroll_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "smoothscroll")]
#[command(author, version, about = "Terminal pager with interruptible smooth scrolling")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// File to view (shorthand for `view`)
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a text file in the pager
    View {
        /// Path to the file
        file: PathBuf,
    },
    /// Run one animation headlessly and print every step
    Simulate {
        /// Starting offset
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        from: f64,
        /// Target offset
        #[arg(long, allow_negative_numbers = true)]
        target: f64,
        /// Maximum animation duration in ms (defaults to the configured value)
        #[arg(long)]
        max_duration: Option<f64>,
        /// Inject a wheel signal this many ms after the start
        #[arg(long)]
        wheel_at: Option<u64>,
    },
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the configuration file path
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Install the tracing subscriber
///
/// The pager owns the terminal, so it logs to a file in the data directory;
/// everything else logs to stderr.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // These must work even when the existing file does not parse
    match &cli.command {
        Some(Commands::Config {
            action: ConfigAction::Path,
        }) => return commands::config::path(),
        Some(Commands::Config {
            action: ConfigAction::Init { force },
        }) => return commands::config::init(*force),
        _ => {}
    }

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let view_file = match &cli.command {
        Some(Commands::View { file }) => Some(file.clone()),
        None => cli.file.clone(),
        _ => None,
    };
    init_logging(&config, view_file.is_some())?;

    if let Some(file) = view_file {
        return commands::view::run(config, &file).await;
    }

    match cli.command {
        Some(Commands::Simulate {
            from,
            target,
            max_duration,
            wheel_at,
        }) => {
            let max_duration = max_duration.unwrap_or(config.scroll.max_duration_ms);
            commands::simulate::run(from, target, max_duration, wheel_at).await
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path | ConfigAction::Init { .. } => Ok(()),
        },
        Some(Commands::View { .. }) | None => {
            println!("Usage: smoothscroll <FILE>  (see --help)");
            Ok(())
        }
    }
}
