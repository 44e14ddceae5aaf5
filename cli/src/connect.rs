//! Client construction from flags, config file, and persisted session.

use crate::args::Cli;
use crate::config::CliConfig;
use crate::credentials::FileSessionStore;
use crate::error::{CliError, Result};
use std::time::Duration;
use trainify_link::session::SessionContext;
use trainify_link::{TrainifyClient, TrainifyTimeouts};

/// Resolve the management and inference URLs. Flags beat the config file.
pub fn resolve_urls(cli: &Cli, config: &CliConfig) -> Result<(String, String)> {
    let base = cli
        .url
        .as_deref()
        .or_else(|| config.server_url())
        .ok_or_else(|| {
            CliError::Configuration(
                "No server URL configured. Pass --url or set [server] url in the config file."
                    .into(),
            )
        })?
        .to_string();

    let inference = cli
        .python_url
        .as_deref()
        .or_else(|| config.python_url())
        .unwrap_or(&base)
        .to_string();

    Ok((base, inference))
}

/// Build a client with the persisted session hydrated.
pub fn build_client(
    cli: &Cli,
    config: &CliConfig,
    store: &FileSessionStore,
) -> Result<TrainifyClient> {
    let (base_url, inference_url) = resolve_urls(cli, config)?;
    log::debug!(
        "[CONNECT] base_url={} inference_url={}",
        base_url,
        inference_url
    );

    let session = SessionContext::new();
    session.hydrate(store)?;

    let timeouts = TrainifyTimeouts::builder()
        .request_timeout(Duration::from_secs(config.timeout_secs()))
        .build();

    Ok(TrainifyClient::builder()
        .base_url(base_url)
        .inference_url(inference_url)
        .session(session)
        .timeouts(timeouts)
        .build()?)
}

/// Fail fast when a command requires a logged-in session.
pub fn require_session(client: &TrainifyClient) -> Result<()> {
    if client.session().is_authenticated() {
        Ok(())
    } else {
        Err(CliError::Configuration(
            "Not logged in. Run `trainify login <email>` first.".into(),
        ))
    }
}
