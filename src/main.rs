//! `logline`: write indented log lines from the command line.
//!
//! ```text
//! logline --config logline.toml --level "info|error" "disk full"
//! printf '>> import\nrow 1\n<< done\n' | logline --echo
//! ```

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;

use logline::config::{load_config, LoglineConfig};
use logline::observability::init_subscriber;
use logline::LogFacade;

#[derive(Parser)]
#[command(name = "logline")]
#[command(about = "Write indented log lines through the logline façade", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pipe-separated level list.
    #[arg(short, long, default_value = "info")]
    level: String,

    /// Category; inferred from the caller when omitted.
    #[arg(short = 'C', long)]
    category: Option<String>,

    /// Mirror entries to stdout.
    #[arg(short, long)]
    echo: bool,

    /// Prefix for every entry.
    #[arg(short, long)]
    prefix: Option<String>,

    /// Skip installing the tracing subscriber.
    #[arg(long)]
    no_subscriber: bool,

    /// Messages to log; read from stdin, one per line, when empty.
    messages: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoglineConfig::default(),
    };
    if cli.echo {
        config.echo = true;
    }
    if let Some(prefix) = cli.prefix.clone() {
        config.prefix = Some(prefix);
    }
    if cli.no_subscriber {
        config.subscriber.enabled = false;
    }

    if config.subscriber.enabled {
        init_subscriber(&config.subscriber)?;
    }

    // Always a command-line session, even with stdout redirected.
    let facade = LogFacade::builder_from_config(&config)?
        .cli_probe(|| true)
        .build();
    tracing::debug!(level = %cli.level, echo = config.echo, "logline ready");

    if cli.messages.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            facade.log(cli.category.as_deref(), &line, &cli.level);
        }
    } else {
        for message in &cli.messages {
            facade.log(cli.category.as_deref(), message, &cli.level);
        }
    }

    Ok(())
}
