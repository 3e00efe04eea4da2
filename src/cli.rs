use clap::Parser;

/// homework-bot — watches a homework review and reports status changes to Telegram
#[derive(Parser, Debug, Clone)]
#[command(name = "homework-bot", version, about)]
pub struct Cli {
    /// Path to config file (default: homework-bot.toml, if present)
    #[arg(long)]
    pub config: Option<String>,

    /// Review API endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Seconds to sleep between poll cycles
    #[arg(long = "poll-seconds", alias = "poll-interval")]
    pub poll_seconds: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub request_timeout: Option<u64>,

    /// Initial cursor (unix seconds) sent as `from_date`
    #[arg(long)]
    pub from_date: Option<i64>,

    /// Advance the cursor to the API's `current_date` after each successful poll
    #[arg(long)]
    pub advance_cursor: bool,

    /// Run a single poll cycle then exit
    #[arg(long)]
    pub once: bool,

    /// Stop after this many poll cycles
    #[arg(long, conflicts_with = "once")]
    pub max_cycles: Option<u32>,
}
