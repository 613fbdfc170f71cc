mod cli;
mod config;
mod domain;
mod error;
mod infra;
mod media;
mod workflows;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use infra::http::HttpClient;
use infra::shooter::{Language, ShooterClient};
use workflows::fetcher::SubtitleFetcher;
use workflows::pipeline::SubtitleDownloader;
use workflows::walker::{self, FileHandler};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.log {
        init_logging()?;
    }

    let settings = config::load_settings()?;

    let mut http = HttpClient::new()?;
    if cli.ise || settings.ignore_ssl_errors {
        http.set_ignore_ssl_errors(true)?;
    }
    debug!(
        ignore_ssl_errors = http.ignores_ssl_errors(),
        builds = http.builds(),
        endpoint = %settings.endpoint,
        "HTTP client ready"
    );

    let mut downloader = SubtitleDownloader::new(
        ShooterClient::new(&http, settings.endpoint),
        SubtitleFetcher::new(&http),
        Language::default(),
    );

    match (cli.dir, cli.file) {
        (Some(dir), _) => {
            let summary = walker::walk(&dir, &mut downloader)?;
            info!(
                visited = summary.visited,
                failed = summary.failed,
                "finished {}",
                dir.display()
            );
        }
        (None, Some(file)) => {
            if let Err(e) = downloader.handle(&file) {
                warn!(file = %file.display(), "{e}");
            }
        }
        (None, None) => {
            Cli::command().print_help()?;
        }
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sub_downloader=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
