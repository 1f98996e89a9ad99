#![allow(missing_docs)]
//! IPC server for the BIOFEAST plugin
//!
//! Runs as a subprocess and answers JSON-RPC requests over stdin/stdout, so
//! any runtime (TypeScript, Python, Go, ...) can use the responder.
//!
//! ## Usage
//!
//! ```bash
//! cargo build --features ipc --bin biofeast-ipc
//! ./biofeast-ipc
//! ```
//!
//! Resources are taken from the `BIOFEAST_*` environment variables (a `.env`
//! file in the working directory is honoured). Logs go to stderr and are
//! filtered with `RUST_LOG`.
//!
//! ## Protocol
//!
//! One request per stdin line, one response per stdout line.
//!
//! ### Example Request
//! ```json
//! {"id": 1, "method": "respond", "params": {"input": "How do I compost?"}}
//! ```
//!
//! ### Example Response
//! ```json
//! {"id": 1, "result": {"response": "Mix green scraps with brown material ...", "matched": true}}
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Context;
use elizaos_plugin_biofeast::interop::{handle_ipc_request, init_with_config, IpcRequest, IpcResponse};
use elizaos_plugin_biofeast::BiofeastConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let config = BiofeastConfig::from_env().context("reading BIOFEAST_* environment")?;
    init_with_config(&config).context("loading responder resources")?;

    tracing::info!("Server started, waiting for requests");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                tracing::warn!(error = %e, "Error reading input");
                continue;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<IpcRequest>(&line) {
            Ok(request) => handle_ipc_request(&request),
            Err(e) => IpcResponse::error(0, &format!("Invalid JSON: {}", e)),
        };

        match serde_json::to_string(&response) {
            Ok(output) => {
                writeln!(stdout, "{}", output)?;
                stdout.flush()?;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error serializing response");
            }
        }
    }

    tracing::info!("Server shutting down");
    Ok(())
}
