// ABOUTME: Memory service - long-term entries a tool can search by text.
// ABOUTME: The in-memory implementation matches on shared lowercase words.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ContextError;

/// One remembered piece of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub author: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl MemoryEntry {
    /// An entry stamped with the current time.
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Searchable long-term memory.
#[async_trait]
pub trait MemoryService: Send + Sync {
    async fn add(&self, entry: MemoryEntry) -> Result<(), ContextError>;

    /// Entries relevant to the query. No match is an empty vec.
    async fn search(&self, query: &str) -> Result<Vec<MemoryEntry>, ContextError>;
}

/// Memory kept in process memory.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMemory {
    entries: Arc<RwLock<Vec<MemoryEntry>>>,
}

impl InMemoryMemory {
    pub fn new() -> Self {
        Self::default()
    }
}

fn words(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[async_trait]
impl MemoryService for InMemoryMemory {
    async fn add(&self, entry: MemoryEntry) -> Result<(), ContextError> {
        self.entries.write().await.push(entry);
        Ok(())
    }

    async fn search(&self, query: &str) -> Result<Vec<MemoryEntry>, ContextError> {
        let query_words = words(query);
        if query_words.is_empty() {
            return Ok(Vec::new());
        }
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| !words(&e.text).is_disjoint(&query_words))
            .cloned()
            .collect())
    }
}
