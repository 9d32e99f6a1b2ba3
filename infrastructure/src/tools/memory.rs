//! In-memory key/value store and the `memory` tool over it
//!
//! The store is created once at startup and handed to the tool through
//! [`ToolContext`](super::ToolContext); other components can share the same
//! `Arc`.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use hostagent_domain::{ToolCall, ToolDefinition, ToolError, ToolParameter, ToolResult};
use serde_json::Value;

use super::LocalTool;

pub const MEMORY: &str = "memory";

/// Shared key/value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    /// Insert or replace; returns the previous value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.lock().insert(key.into(), value.into())
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.lock().remove(key)
    }

    /// Keys in sorted order
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // A poisoned map is still a valid map
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

pub struct MemoryTool {
    store: Arc<MemoryStore>,
}

impl MemoryTool {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    fn run(&self, call: &ToolCall) -> Result<String, ToolError> {
        let operation = call
            .require_string("operation")
            .map_err(ToolError::invalid_argument)?;
        let key = || call.require_string("key").map_err(ToolError::invalid_argument);

        match operation {
            "get" => {
                let key = key()?;
                self.store
                    .get(key)
                    .ok_or_else(|| ToolError::not_found(format!("key '{}'", key)))
            }
            "set" => {
                let key = key()?;
                let value = match call.arguments.get("value") {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Null) | None => {
                        return Err(ToolError::invalid_argument(
                            "Missing required argument: value",
                        ));
                    }
                    Some(other) => other.to_string(),
                };
                self.store.set(key, value);
                Ok(format!("Stored '{}'", key))
            }
            "delete" => {
                let key = key()?;
                self.store
                    .remove(key)
                    .map(|_| format!("Deleted '{}'", key))
                    .ok_or_else(|| ToolError::not_found(format!("key '{}'", key)))
            }
            "list" => {
                let keys = self.store.keys();
                if keys.is_empty() {
                    Ok("(empty)".to_string())
                } else {
                    Ok(keys.join(", "))
                }
            }
            other => Err(ToolError::invalid_argument(format!(
                "Invalid operation '{}'. Only get, set, delete, and list are allowed.",
                other
            ))),
        }
    }
}

impl LocalTool for MemoryTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(MEMORY, "Store and recall short text values by key")
            .with_parameter(
                ToolParameter::new("operation", "Operation to perform", true)
                    .with_allowed_values(["get", "set", "delete", "list"]),
            )
            .with_parameter(ToolParameter::new(
                "key",
                "Entry key (required for get, set, delete)",
                false,
            ))
            .with_parameter(ToolParameter::new("value", "Value to store (set only)", false))
    }

    fn execute(&self, call: &ToolCall) -> ToolResult {
        match self.run(call) {
            Ok(output) => ToolResult::success(MEMORY, output),
            Err(e) => ToolResult::failure(MEMORY, e),
        }
    }
}
