//! `agenthub serve` — run the HTTP chat server.

use std::sync::Arc;

use tracing::{info, warn};

use agenthub_agent::ScriptedAgent;
use agenthub_config::AppConfig;
use agenthub_core::AgentRegistry;
use agenthub_gateway::GatewayState;
use agenthub_history::{HistoryLoader, RemoteStore};

pub async fn run(port: Option<u16>) -> anyhow::Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(port) = port {
        config.gateway.port = port;
    }

    let mut registry = AgentRegistry::new();
    for entry in &config.agents {
        registry.register(
            entry.name.clone(),
            Arc::new(ScriptedAgent::new(
                entry.description.clone(),
                entry.model.clone(),
                entry.reply.clone(),
            )),
        );
    }
    info!(
        agents = registry.len(),
        default = %config.default_agent,
        "Agents registered"
    );
    if registry.get(&config.default_agent).is_none() {
        warn!(
            agent = %config.default_agent,
            "Default agent is not registered; requests without an explicit agent will fail"
        );
    }

    let history = match &config.history.url {
        Some(url) => {
            info!(url = %url, collection = %config.history.collection, "History store configured");
            HistoryLoader::new(Box::new(
                RemoteStore::new(url, &config.history.collection)
                    .with_page_size(config.history.page_size),
            ))
        }
        None => {
            info!("No history store configured; conversations start empty");
            HistoryLoader::disabled()
        }
    };

    let state = Arc::new(GatewayState {
        registry,
        history,
        default_agent: config.default_agent.clone(),
    });

    agenthub_gateway::serve(&config, state).await
}
