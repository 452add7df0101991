//! Binary entry point for the remote sync server.

use clap::Parser;

use remote_sync_server::config::Cli;
use remote_sync_server::lifecycle::{signals, startup, Shutdown};
use remote_sync_server::net::transport::{service_router, HttpsTransport};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let shutdown = Shutdown::new();
    signals::spawn(shutdown.clone());

    let transport = HttpsTransport::new(service_router(), shutdown);
    if let Err(err) = startup::run(&cli, &transport).await {
        // The log sink may not exist yet; stderr always does.
        eprintln!("{err}");
        std::process::exit(1);
    }
}
