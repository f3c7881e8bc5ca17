//! Sources for queries and saved filters.

use crate::model::{sample_queries, sample_saved_filters, FilterConfig, Query, SavedFilter};
use chrono::Utc;

/// Where dashboard queries come from.
pub trait QuerySource: Send + Sync {
    fn list(&self) -> Vec<Query>;
}

/// A fixed list of queries.
pub struct StaticQuerySource {
    queries: Vec<Query>,
}

impl StaticQuerySource {
    pub fn new(queries: Vec<Query>) -> Self {
        Self { queries }
    }
}

impl Default for StaticQuerySource {
    fn default() -> Self {
        Self::new(sample_queries())
    }
}

impl QuerySource for StaticQuerySource {
    fn list(&self) -> Vec<Query> {
        self.queries.clone()
    }
}

/// Persistence for named filter presets.
pub trait FilterStore: Send + Sync {
    fn save(&mut self, name: &str, config: FilterConfig) -> SavedFilter;
    fn list(&self) -> Vec<SavedFilter>;
    fn get(&self, id: &str) -> Option<SavedFilter>;
}

/// Keeps saved filters for the lifetime of the process.
pub struct MemoryFilterStore {
    filters: Vec<SavedFilter>,
}

impl MemoryFilterStore {
    pub fn new(filters: Vec<SavedFilter>) -> Self {
        Self { filters }
    }

    /// Millisecond timestamp, bumped past any id already taken.
    fn next_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.filters.iter().any(|f| f.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }
}

impl Default for MemoryFilterStore {
    fn default() -> Self {
        Self::new(sample_saved_filters())
    }
}

impl FilterStore for MemoryFilterStore {
    fn save(&mut self, name: &str, config: FilterConfig) -> SavedFilter {
        let saved = SavedFilter {
            id: self.next_id(),
            name: name.to_string(),
            config,
        };
        self.filters.push(saved.clone());
        saved
    }

    fn list(&self) -> Vec<SavedFilter> {
        self.filters.clone()
    }

    fn get(&self, id: &str) -> Option<SavedFilter> {
        self.filters.iter().find(|f| f.id == id).cloned()
    }
}
