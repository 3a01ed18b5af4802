use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::context::ExecutionContext;

/// A capability that an agent can invoke dynamically.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name of the tool (e.g., "Scan Document").
    fn name(&self) -> &str;

    /// Description for the LLM prompt.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's parameters.
    fn parameters(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments on behalf of `ctx`.
    async fn execute(&self, args: serde_json::Value, ctx: &ExecutionContext) -> Result<String>;
}

/// A named bundle of tools a host runtime discovers at plugin load time.
pub trait Toolkit: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// The tools this toolkit provides, in a fixed order.
    fn get_tools(&self) -> Vec<Arc<dyn Tool>>;

    /// Environment keys the toolkit needs configured before use.
    fn get_env_keys(&self) -> Vec<String>;
}
