//! The agent registry — name → agent lookup table.
//!
//! Built once at startup and handed to request handlers by reference;
//! there is no process-wide singleton. Lookup failure is not an error
//! here — callers decide whether a missing agent is a 404, an error
//! frame, or something else.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agent::Agent;

/// A registry of named agents.
pub struct AgentRegistry {
    agents: HashMap<String, Arc<dyn Agent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
        }
    }

    /// Register an agent. Replaces any existing agent with the same name.
    pub fn register(&mut self, name: impl Into<String>, agent: Arc<dyn Agent>) {
        self.agents.insert(name.into(), agent);
    }

    /// Get an agent by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Agent>> {
        self.agents.get(name).cloned()
    }

    /// List all registered agent names, sorted for stable output.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.agents.keys().cloned().collect();
        names.sort();
        names
    }

    /// Iterate over (name, agent) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn Agent>)> {
        self.agents.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::EventSink;
    use crate::error::ExecutionError;
    use crate::turn::ConversationTurn;
    use async_trait::async_trait;

    /// A trivial agent for registry tests.
    struct EchoAgent;

    #[async_trait]
    impl Agent for EchoAgent {
        fn description(&self) -> &str {
            "Echoes back the input"
        }

        fn model(&self) -> &str {
            "none"
        }

        async fn invoke(
            &self,
            message: &str,
            _history: &[ConversationTurn],
            _events: &EventSink,
        ) -> std::result::Result<String, ExecutionError> {
            Ok(message.to_string())
        }
    }

    #[test]
    fn register_and_get() {
        let mut registry = AgentRegistry::new();
        registry.register("echo", Arc::new(EchoAgent));

        assert!(registry.get("echo").is_some());
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_replaces_existing() {
        let mut registry = AgentRegistry::new();
        registry.register("echo", Arc::new(EchoAgent));
        registry.register("echo", Arc::new(EchoAgent));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn list_is_sorted() {
        let mut registry = AgentRegistry::new();
        registry.register("zeta", Arc::new(EchoAgent));
        registry.register("alpha", Arc::new(EchoAgent));
        assert_eq!(registry.list(), vec!["alpha", "zeta"]);
    }
}
