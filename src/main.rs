use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lidarr_bulk_adder::config::{Configuration, EnvOverrides};
use lidarr_bulk_adder::reconcile::{
    decode_upload, reconcile_text, BatchObserver, ItemOutcome, PacingPolicy, RunOptions,
};
use lidarr_bulk_adder::server::ServerConfig;
use lidarr_bulk_adder::{run_server, ClientTimeouts, RequestsLoggingLevel};

#[derive(Parser, Debug)]
#[clap(about = "Bulk-add artists to Lidarr from a list of names")]
struct CliArgs {
    /// Path to the JSON settings file (LIDARR_URL, API_KEY, ROOT_FOLDER_PATH).
    #[clap(long, default_value = "config.json")]
    pub config: PathBuf,

    /// Timeout in seconds for artist lookups.
    #[clap(long, default_value_t = 30)]
    pub lookup_timeout_sec: u64,

    /// Timeout in seconds for listing tracked artists.
    #[clap(long, default_value_t = 15)]
    pub list_timeout_sec: u64,

    /// Timeout in seconds for adding an artist.
    #[clap(long, default_value_t = 30)]
    pub create_timeout_sec: u64,

    /// Pause in milliseconds after each processed artist.
    #[clap(long, default_value_t = 500)]
    pub pacing_ms: u64,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add every artist listed in FILE, one per line. Reads stdin when FILE is omitted.
    Add {
        file: Option<PathBuf>,

        /// Do not draw a progress bar.
        #[clap(long)]
        no_progress: bool,
    },
    /// Serve the HTTP interface.
    Serve {
        /// The port to listen on.
        #[clap(short, long, default_value_t = 5000)]
        port: u16,

        /// The level of logging to perform on each request.
        #[clap(long, default_value = "path")]
        logging_level: RequestsLoggingLevel,
    },
}

impl CliArgs {
    fn run_options(&self) -> RunOptions {
        RunOptions {
            timeouts: ClientTimeouts {
                lookup: Duration::from_secs(self.lookup_timeout_sec),
                list_tracked: Duration::from_secs(self.list_timeout_sec),
                create: Duration::from_secs(self.create_timeout_sec),
            },
            pacing: PacingPolicy {
                delay: Duration::from_millis(self.pacing_ms),
            },
        }
    }
}

struct ProgressObserver {
    bar: ProgressBar,
}

impl ProgressObserver {
    fn new(enabled: bool) -> Self {
        let bar = ProgressBar::new(0);
        if !enabled {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        } else if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar }
    }
}

impl BatchObserver for ProgressObserver {
    fn on_item(&self, index: usize, total: usize, outcome: &ItemOutcome) {
        if index == 0 {
            self.bar.set_length(total as u64);
        }
        self.bar.set_message(outcome.name().to_string());
        self.bar.set_position(index as u64 + 1);
        if index + 1 == total {
            self.bar.finish_and_clear();
        }
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    let bytes = match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Error reading input file {:?}", path))?
        }
        None => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("Error reading standard input")?;
            buffer
        }
    };
    Ok(decode_upload(&bytes)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let run_options = cli_args.run_options();

    match &cli_args.command {
        Command::Add { file, no_progress } => {
            let text = read_input(file.as_ref())?;
            let config = Configuration::load(&cli_args.config);
            let observer = ProgressObserver::new(!no_progress);

            let summary = reconcile_text(&text, &config, run_options, &observer).await?;

            println!("{}", summary.headline());
            for message in &summary.messages {
                println!("  {}", message);
            }
            if !summary.errors.is_empty() {
                println!("--- Detailed Errors ---");
                for detail in &summary.errors {
                    println!("{}: {}", detail.name, detail.message);
                }
                bail!("{} artist(s) could not be added", summary.errors.len());
            }
            Ok(())
        }
        Command::Serve {
            port,
            logging_level,
        } => {
            info!("Using settings file {:?}", cli_args.config);
            run_server(ServerConfig {
                requests_logging_level: *logging_level,
                port: *port,
                settings_path: cli_args.config.clone(),
                env: EnvOverrides::from_env(),
                run_options,
            })
            .await
        }
    }
}
