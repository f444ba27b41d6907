use std::io::{self, BufRead, Write};
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use tracing::{error, info};

use phrase_core::config::CoreConfig;
use phrase_core::logging;
use phrase_core::protocol;
use phrase_core::session::Session;

/// Headless state core for the localization admin UI.
/// Reads one JSON request per line on stdin and answers on stdout.
#[derive(Parser, Debug)]
#[command(name = "phrase-core", version)]
struct Args {
    /// JSON config file (language catalog, seed cultures, page sizes)
    #[arg(long, env = "PHRASE_CORE_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter when PHRASE_CORE_LOG is not set, e.g. "phrase_core=debug"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.log_level.as_deref())?;

    let config = CoreConfig::load(args.config.as_deref())
        .with_context(|| match &args.config {
            Some(p) => format!("failed to load config from {}", p.display()),
            None => "invalid default config".to_string(),
        })?;
    let mut session = Session::new(&config);
    info!(
        languages = config.languages.languages().len(),
        cultures = config.cultures.len(),
        "phrase-core ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => continue,
        };

        if line.trim().is_empty() {
            continue;
        }

        let result =
            std::panic::catch_unwind(AssertUnwindSafe(|| protocol::handle(&mut session, &line)));

        let response = match result {
            Ok(resp) => resp,
            Err(_) => {
                error!("handler panicked");
                json!({
                    "status": "error",
                    "message": "internal core error"
                })
                .to_string()
            }
        };

        if writeln!(stdout, "{response}").is_err() {
            break;
        }

        let _ = stdout.flush();
    }

    info!("stdin closed, shutting down");
    Ok(())
}
