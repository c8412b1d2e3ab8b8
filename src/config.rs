use std::time::Duration;

use clap::{Parser, ValueEnum};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

#[derive(Parser, Debug, Clone)]
#[command(name = "jobscout", about = "Aggregate job postings from several job boards")]
pub struct Config {
    /// Query term used by GET /jobs
    #[arg(long, env = "DEFAULT_QUERY", default_value = "software developer")]
    pub query: String,

    /// Timeout for every outbound request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS", default_value = "30")]
    pub request_timeout: u64,

    /// User-Agent header sent to job boards
    #[arg(long, env = "SCRAPER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// What to do with a site's batch when one of its detail pages fails
    #[arg(long, env = "ON_DETAIL_ERROR", value_enum, default_value_t = DetailErrorPolicy::DropSite)]
    pub on_detail_error: DetailErrorPolicy,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the web server (default when no subcommand given)
    Serve {
        /// Listen address
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8080")]
        listen_addr: String,
    },
    /// Run a single aggregation and print the jobs as JSON
    Collect {
        /// Query term, defaults to --query
        #[arg(long)]
        query: Option<String>,
    },
}

/// Behavior when a detail page of a site fails to load.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailErrorPolicy {
    /// Discard every job of the site for this run.
    #[default]
    DropSite,
    /// Keep the jobs that loaded and skip only the failed URLs.
    KeepPartial,
}

impl Config {
    /// Resolve the command, defaulting to Serve if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve {
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}
