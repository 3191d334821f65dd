//! Imperial MCP Server
//!
//! Line-delimited JSON-RPC over stdin/stdout. Logs go to stderr.
//!
//! Tools: one per library function (convert, list_units, format_result,
//! to_meters, conversion_guide, convert_input) plus help.
//!
//! Resources:
//! - imperial://guide - Conversion guide (markdown)
//! - imperial://units - Unit table (JSON)

mod config;
mod handlers;
mod protocol;

use config::Config;
use handlers::{handle_line, PROTOCOL_VERSION};
use imperial::Imperial;
use std::io::{self, BufRead, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() {
    init_logging();

    let config = Config::from_env();
    let imperial = Imperial::with_standard_library()
        .with_locale(config.locale.tag)
        .with_unknown_unit_policy(config.unknown_units);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        protocol = PROTOCOL_VERSION,
        locale = config.locale.tag,
        unknown_units = %config.unknown_units,
        "Imperial MCP server started"
    );

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let Some(reply) = handle_line(&imperial, &line) else {
                    continue;
                };
                let mut stdout = io::stdout().lock();
                if let Err(e) = writeln!(stdout, "{}", reply).and_then(|_| stdout.flush()) {
                    error!(error = %e, "failed to write response");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        }
    }

    info!("server shutting down");
}
