//! `trackr serve` - run the HTTP API

use trackr::config::Config;
use trackr::server;

/// Start the API server
pub fn serve(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = Config::load();
    if let Some(port) = port {
        config.server_port = port;
    }
    server::serve(&config)
}
