use std::collections::HashMap;
use std::sync::Arc;

use crate::traits::{Tool, Toolkit};

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Register every tool a toolkit provides. Returns how many were added.
    pub fn register_toolkit(&mut self, toolkit: &dyn Toolkit) -> usize {
        let tools = toolkit.get_tools();
        let count = tools.len();
        for tool in tools {
            self.register(tool);
        }
        count
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
