//! CLI entry point - the composition root for the dashboard server.
//!
//! Parses arguments, initializes logging, prints the startup banner, and
//! hands off to the Axum adapter.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use runboard_axum::{ServerConfig, start_server};

#[derive(Parser, Debug)]
#[command(
    name = "runboard",
    version,
    about = "Live dashboard server over structured run logs"
)]
struct Cli {
    /// Port for the HTTP server.
    #[arg(long, env = "RUNBOARD_PORT", default_value_t = 8888)]
    port: u16,

    /// Directory containing the current and archived run logs.
    #[arg(long, env = "RUNBOARD_LOG_DIR", default_value = "ralph-logs")]
    log_dir: PathBuf,

    /// Directory with the prebuilt dashboard UI bundle; API-only if omitted.
    #[arg(long, env = "RUNBOARD_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Tail-polling cadence in milliseconds.
    #[arg(long, env = "RUNBOARD_POLL_INTERVAL_MS", default_value_t = 500)]
    poll_interval_ms: u64,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::new(self.log_dir)
            .with_port(self.port)
            .with_poll_interval(Duration::from_millis(self.poll_interval_ms));
        if let Some(dir) = self.static_dir {
            config = config.with_static_dir(dir);
        }
        config
    }
}

fn print_banner(cli: &Cli) {
    let port = cli.port;
    println!();
    if let Some(ref dir) = cli.static_dir {
        println!("  runboard dashboard starting...");
        println!();
        println!("  Serving UI from: {}", dir.display());
        println!("  Dashboard: http://localhost:{port}");
    } else {
        println!("  runboard dashboard starting (API only)...");
    }
    println!();
    println!("  Log API:   http://localhost:{port}/api/log");
    println!("  Stream:    http://localhost:{port}/api/log/stream");
    println!("  Archives:  http://localhost:{port}/api/logs");
    println!();
    if cli.static_dir.is_none() {
        println!("  Tip: use --static-dir to serve the dashboard bundle");
        println!();
    }
    println!("  Press Ctrl+C to stop");
    println!();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    print_banner(&cli);

    start_server(cli.into_config()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_served_conventions() {
        let cli = Cli::parse_from(["runboard"]);
        assert_eq!(cli.port, 8888);
        assert_eq!(cli.log_dir, PathBuf::from("ralph-logs"));
        assert!(cli.static_dir.is_none());
        assert_eq!(cli.poll_interval_ms, 500);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "runboard",
            "--port",
            "9000",
            "--log-dir",
            "/var/log/runs",
            "--static-dir",
            "./dist",
            "--poll-interval-ms",
            "250",
        ]);
        let config = cli.into_config();
        assert_eq!(config.port, 9000);
        assert_eq!(config.logs.root, PathBuf::from("/var/log/runs"));
        assert_eq!(config.static_dir, Some(PathBuf::from("./dist")));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
    }
}
