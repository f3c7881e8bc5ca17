//! Dashboard over moderation queries: active filter, saved presets and the
//! derived view.

mod pipeline;
mod store;

pub use pipeline::*;
pub use store::*;

use crate::model::{
    ConsoleError, ContentCategory, FilterConfig, Query, SavedFilter, Severity, SortOption,
    TimeRange,
};

use chrono::Utc;
use std::collections::BTreeSet;

pub struct DashboardState {
    filters: FilterConfig,
    source: Box<dyn QuerySource>,
    saved: Box<dyn FilterStore>,
    apply_time_range: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(
            Box::new(StaticQuerySource::default()),
            Box::new(MemoryFilterStore::default()),
            false,
        )
    }
}

impl DashboardState {
    pub fn new(
        source: Box<dyn QuerySource>,
        saved: Box<dyn FilterStore>,
        apply_time_range: bool,
    ) -> Self {
        Self {
            filters: FilterConfig::default(),
            source,
            saved,
            apply_time_range,
        }
    }

    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    /// Filtered and sorted queries for the active filter, computed fresh.
    pub fn view(&self) -> Vec<Query> {
        let queries = self.source.list();
        if self.apply_time_range {
            filter_and_sort_within(&queries, &self.filters, Utc::now())
        } else {
            filter_and_sort(&queries, &self.filters)
        }
    }

    // --- Filter editing ---

    pub fn set_filters(&mut self, filters: FilterConfig) {
        self.filters = filters;
    }

    pub fn set_time_range(&mut self, time_range: TimeRange) {
        self.filters.time_range = time_range;
    }

    pub fn set_sort(&mut self, sort_by: SortOption) {
        self.filters.sort_by = sort_by;
    }

    pub fn toggle_severity(&mut self, severity: Severity) {
        toggle(&mut self.filters.severities, severity);
    }

    pub fn toggle_category(&mut self, category: ContentCategory) {
        toggle(&mut self.filters.categories, category);
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterConfig::default();
    }

    // --- Saved filters ---

    pub fn saved_filters(&self) -> Vec<SavedFilter> {
        self.saved.list()
    }

    /// Save the active filter under `name`.
    pub fn save_filter(&mut self, name: &str) -> Result<SavedFilter, ConsoleError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConsoleError::invalid("name"));
        }
        let saved = self.saved.save(name, self.filters.clone());
        tracing::info!("Saved filter {} ({})", saved.name, saved.id);
        Ok(saved)
    }

    /// Make a saved filter the active one, verbatim.
    pub fn load_filter(&mut self, id: &str) -> Result<&FilterConfig, ConsoleError> {
        let saved = self
            .saved
            .get(id)
            .ok_or_else(|| ConsoleError::NotFound(id.to_string()))?;
        tracing::debug!("Loading saved filter {}", saved.name);
        self.filters = saved.config;
        Ok(&self.filters)
    }
}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

/// Summary text for a multi-select control.
pub fn selection_summary(selected: usize, total: usize) -> String {
    if selected == 0 {
        "None selected".to_string()
    } else if selected == total {
        "All selected".to_string()
    } else {
        format!("{} selected", selected)
    }
}
