//! Runtime catalog of production configs, indexed by id and by category.
//!
//! No global singleton: a registry instance is constructed explicitly and
//! passed to consumers. Reads during occasional writes are safe -- the
//! primary map and the category index mutate under one write lock, so a
//! reader never observes them out of sync, and every returned collection
//! is a snapshot, never a live view.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::ProductionConfig;
use crate::types::Category;

#[derive(Default)]
struct Inner {
    by_id: HashMap<String, Arc<ProductionConfig>>,
    by_category: HashMap<Category, Vec<Arc<ProductionConfig>>>,
}

/// A mutable, queryable catalog of [`ProductionConfig`]s.
#[derive(Default)]
pub struct Registry {
    inner: RwLock<Inner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a config, replacing any existing entry with the same id.
    ///
    /// Replacement is a diagnostic, not an error: the old entry is removed
    /// from its (possibly different) category bucket before the new one is
    /// indexed, all under one write guard.
    pub fn register(&self, config: ProductionConfig) {
        let id = config.id().to_string();
        let category = config.category();
        let config = Arc::new(config);

        let mut inner = self.inner.write();
        if let Some(old) = inner.by_id.insert(id.clone(), Arc::clone(&config)) {
            log::warn!("production '{id}' is already registered, overwriting");
            if let Some(bucket) = inner.by_category.get_mut(&old.category()) {
                bucket.retain(|c| c.id() != id);
            }
        }
        inner.by_category.entry(category).or_default().push(config);
        drop(inner);

        log::info!("registered production: {id} ({})", category.display_name());
    }

    /// Remove a config from both indexes. Returns whether anything was
    /// removed.
    pub fn unregister(&self, id: &str) -> bool {
        let mut inner = self.inner.write();
        match inner.by_id.remove(id) {
            Some(removed) => {
                if let Some(bucket) = inner.by_category.get_mut(&removed.category()) {
                    bucket.retain(|c| c.id() != id);
                }
                drop(inner);
                log::info!("unregistered production: {id}");
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<ProductionConfig>> {
        self.inner.read().by_id.get(id).cloned()
    }

    pub fn has(&self, id: &str) -> bool {
        self.inner.read().by_id.contains_key(id)
    }

    /// Snapshot of every registered config.
    pub fn get_all(&self) -> Vec<Arc<ProductionConfig>> {
        self.inner.read().by_id.values().cloned().collect()
    }

    /// Snapshot of the configs in one category.
    pub fn get_by_category(&self, category: Category) -> Vec<Arc<ProductionConfig>> {
        self.inner
            .read()
            .by_category
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.inner.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Empty both indexes. Intended for test isolation, not regular
    /// operation.
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.by_id.clear();
        inner.by_category.clear();
        drop(inner);
        log::warn!("production registry cleared");
    }

    /// Log a category-grouped dump of the catalog.
    pub fn log_summary(&self) {
        log::info!("production registry: {} productions", self.count());
        for category in Category::ALL {
            let configs = self.get_by_category(category);
            if !configs.is_empty() {
                log::info!("{} ({} types)", category.display_name(), configs.len());
                for config in configs {
                    log::info!("  - {} ({})", config.id(), config.display_name());
                }
            }
        }
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("count", &self.count())
            .finish()
    }
}
