// ABOUTME: Session state store - a key/value map tools read and write through
// ABOUTME: the execution context. Includes the in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::ContextError;

/// Key/value session state.
///
/// A missing key is `Ok(None)`, not an error.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, ContextError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), ContextError>;
}

/// State kept in process memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryState {
    values: Arc<RwLock<HashMap<String, Value>>>,
}

impl InMemoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every key currently stored.
    pub async fn snapshot(&self) -> HashMap<String, Value> {
        self.values.read().await.clone()
    }
}

#[async_trait]
impl StateStore for InMemoryState {
    async fn get(&self, key: &str) -> Result<Option<Value>, ContextError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), ContextError> {
        self.values.write().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn missing_key_is_none() {
        let state = InMemoryState::new();
        assert_eq!(state.get("user:preferences").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites() {
        let state = InMemoryState::new();
        state.set("k", json!(1)).await.unwrap();
        state.set("k", json!({"a": 2})).await.unwrap();
        assert_eq!(state.get("k").await.unwrap(), Some(json!({"a": 2})));
        assert_eq!(state.snapshot().await.len(), 1);
    }
}
