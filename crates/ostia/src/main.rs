//! Ostia - minimal DNS stub client.
//!
//! Sends a single A-record query to one upstream resolver over UDP and
//! prints the decoded response.

use anyhow::{Context, Result};
use clap::Parser;
use ostia_client::{resolve_a, ExchangeConfig};
use ostia_proto::Message;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ostia DNS stub client - one query, one answer
#[derive(Parser, Debug)]
#[command(name = "ostia")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Domain name to look up
    domain: String,

    /// Upstream resolver address
    #[arg(short, long, default_value = "8.8.8.8:53", value_name = "ADDR")]
    server: SocketAddr,

    /// Receive deadline in seconds; 0 waits forever
    #[arg(short, long, default_value_t = 5, value_name = "SECS")]
    timeout: u64,

    /// Print the answer section as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

/// Parse log level from string
fn parse_log_level(level: &str) -> Level {
    match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Initialize the tracing subscriber
fn init_logging(cli_level: Option<&str>, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        cli_level.map(parse_log_level).unwrap_or(Level::WARN)
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

/// Print a decoded response in dig-like columns
fn print_response(response: &Message) {
    println!(";; {}", response.header());

    if let Some(question) = response.question() {
        println!(";{question}");
    }

    if response.answers().is_empty() {
        println!(";; no answers");
    }
    for record in response.answers() {
        println!("{record}");
    }
    for record in response.authority() {
        println!("{record}");
    }
    for record in response.additional() {
        println!("{record}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref(), cli.quiet);

    let mut config = ExchangeConfig::new(cli.server);
    if cli.timeout > 0 {
        config.read_timeout = Some(Duration::from_secs(cli.timeout));
    }
    debug!(domain = %cli.domain, server = %cli.server, "starting lookup");

    let response = resolve_a(&cli.domain, &config)
        .with_context(|| format!("lookup for {} via {} failed", cli.domain, cli.server))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(response.answers())?);
    } else {
        print_response(&response);
    }

    Ok(())
}
