mod config;
mod form;
mod headless;
mod ui;
mod webhook;

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::config::{AppConfig, DEFAULT_WEBHOOK_URL, Theme, WEBHOOK_URL_ENV};
use crate::webhook::client::{Submitter, WebhookClient};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliTheme {
    Dark,
    Light,
}

impl From<CliTheme> for Theme {
    fn from(value: CliTheme) -> Self {
        match value {
            CliTheme::Dark => Theme::Dark,
            CliTheme::Light => Theme::Light,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "overlaydash",
    version,
    about = "Send an overlay start/end second range to an n8n webhook"
)]
struct Cli {
    #[arg(long, env = WEBHOOK_URL_ENV, default_value = DEFAULT_WEBHOOK_URL)]
    webhook_url: String,

    #[arg(long, value_enum, default_value_t = CliTheme::Dark)]
    theme: CliTheme,

    /// Submit once without opening the window.
    #[arg(long)]
    send: bool,

    #[arg(
        long,
        allow_hyphen_values = true,
        requires = "send",
        required_if_eq("send", "true")
    )]
    start: Option<String>,

    #[arg(
        long,
        allow_hyphen_values = true,
        requires = "send",
        required_if_eq("send", "true")
    )]
    end: Option<String>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_url(&cli.webhook_url)
        .context("failed to load webhook configuration")?
        .with_theme(cli.theme.into());
    log::info!("using webhook {}", config.webhook_url);

    let submitter: Arc<dyn Submitter> = Arc::new(WebhookClient::new()?);

    if cli.send {
        let start = cli.start.unwrap_or_default();
        let end = cli.end.unwrap_or_default();
        return headless::send_once(&config, submitter, &start, &end, &mut io::stdout().lock());
    }

    ui::app::run_gui(config, submitter)
}
