//! Mind map bridge server: the file bridge over stdin/stdout.
//!
//! Drives the same bridge and host handling as the desktop window, with the
//! headless platform standing in for the GUI toolkit (dialogs report
//! canceled with an error). See [`mindmap::bridge::server`] for the protocol.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, BufReader};

use mindmap::bridge::server::BridgeServer;
use mindmap::config::{AppConfig, CliArgs};
use mindmap::logging;
use mindmap::platform::headless::Sink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::from_env();
    let (config, source) = AppConfig::load();
    let config = config.with_cli(&args);
    logging::init(&config.log_filter);
    source.log();

    let sink: Sink = Arc::new(Mutex::new(std::io::stdout()));
    let mut server = BridgeServer::new(config, sink)?;
    server.announce_ready();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        server.handle_line(&line).await;
    }

    server.shutdown();
    Ok(())
}
