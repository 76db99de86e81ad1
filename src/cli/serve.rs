use std::sync::Arc;

use reqwest::Client;

use crate::{
    api::GatewayState,
    config::{self, Settings},
    discord::SignatureVerifier,
    error,
    job::JobRunner,
    server,
};

/// Runs the interaction webhook until the process is stopped.
pub async fn serve() {
    let settings = match Settings::from_env() {
        Ok(settings) => Arc::new(settings),
        Err(e) => error!("Cannot load settings. Err: {}", e),
    };

    let verifier = match SignatureVerifier::from_hex(&settings.discord.public_key) {
        Ok(verifier) => verifier,
        Err(e) => error!("Invalid DISCORD_PUBLIC_KEY. Err: {}", e),
    };

    let command_name = settings.discord.command_name.clone();
    let runner = JobRunner::new(Arc::clone(&settings), Client::new());
    let state = Arc::new(GatewayState::new(verifier, Arc::new(runner), command_name));

    if let Err(e) = server::start_gateway_server(&config::server_addr(), state).await {
        error!("Server stopped. Err: {}", e);
    }
}
