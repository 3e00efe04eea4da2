use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use homework_bot::api::PracticumClient;
use homework_bot::cli::Cli;
use homework_bot::config::Config;
use homework_bot::notifier::TelegramNotifier;
use homework_bot::poller::{Poller, PollerSettings};

// ureq logs request URLs, and the Telegram URL carries the bot token.
const DEFAULT_LOG_FILTER: &str = "debug,ureq=warn,rustls=warn";

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .init();
}

fn main() {
    // Variables already set in the environment take precedence over .env.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging();

    info!("homework-bot starting");

    let config = match Config::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            error!(critical = true, error = %e, "failed to load config");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.credentials.check() {
        error!(critical = true, error = %e, "check environment variables");
        std::process::exit(1);
    }

    info!(?config, "config loaded");

    let api = PracticumClient::new(
        &config.endpoint,
        &config.credentials.practicum_token,
        config.request_timeout(),
    );
    let notifier = TelegramNotifier::new(
        &config.telegram_api_url,
        &config.credentials.telegram_token,
        &config.credentials.chat_id,
        config.request_timeout(),
    );
    info!(endpoint = api.endpoint(), "polling review API");

    let mut poller = Poller::new(api, notifier, PollerSettings::from(&config));
    let max_cycles = if config.once { Some(1) } else { config.max_cycles };
    poller.run(max_cycles);
}
