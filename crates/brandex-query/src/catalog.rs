//! Caller-owned handle over the current canonical table.
//!
//! Readers take an `Arc` snapshot and keep it for as long as they need;
//! a reload swaps the whole table and never touches a snapshot in use.

use std::sync::{Arc, PoisonError, RwLock};

use brandex_core::CanonicalTable;

#[derive(Debug, Clone)]
pub struct Catalog {
    current: Arc<RwLock<Arc<CanonicalTable>>>,
}

impl Catalog {
    #[must_use]
    pub fn new(table: CanonicalTable) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    /// The table as of this call. Later swaps do not affect it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CanonicalTable> {
        // The guarded value is a single Arc, so a poisoned lock still holds a
        // complete table.
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Swap in `table`, returning the previous snapshot.
    pub fn replace(&self, table: CanonicalTable) -> Arc<CanonicalTable> {
        self.install(Arc::new(table))
    }

    fn install(&self, next: Arc<CanonicalTable>) -> Arc<CanonicalTable> {
        let records = next.len();
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        tracing::info!(
            records,
            previous_records = previous.len(),
            "catalog table replaced"
        );
        previous
    }

    /// Run `load` and swap in its table on success, returning that table.
    /// On failure the current table stays in place and the error is returned.
    ///
    /// # Errors
    ///
    /// Returns whatever `load` returns.
    pub fn reload<F, E>(&self, load: F) -> Result<Arc<CanonicalTable>, E>
    where
        F: FnOnce() -> Result<CanonicalTable, E>,
        E: std::fmt::Display,
    {
        match load() {
            Ok(table) => {
                let loaded = Arc::new(table);
                self.install(Arc::clone(&loaded));
                Ok(loaded)
            }
            Err(e) => {
                tracing::warn!(error = %e, "catalog reload failed; keeping current table");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use brandex_core::BrandRecord;

    use super::*;

    fn table_of(names: &[&str]) -> CanonicalTable {
        CanonicalTable::new(
            names.iter().map(|n| BrandRecord::new(*n)).collect(),
            vec!["test".to_string()],
        )
    }

    #[test]
    fn snapshot_survives_replace() {
        let catalog = Catalog::new(table_of(&["Acme"]));
        let before = catalog.snapshot();

        catalog.replace(table_of(&["Acme", "Bolt"]));

        assert_eq!(before.len(), 1);
        assert_eq!(catalog.snapshot().len(), 2);
    }

    #[test]
    fn reload_failure_keeps_current_table() {
        let catalog = Catalog::new(table_of(&["Acme"]));
        let result: Result<_, String> = catalog.reload(|| Err("source missing".to_string()));
        assert_eq!(result.unwrap_err(), "source missing");
        assert_eq!(catalog.snapshot().records()[0].brand_name, "Acme");
    }

    #[test]
    fn reload_success_swaps_table() {
        let catalog = Catalog::new(table_of(&["Acme"]));
        let fresh = catalog
            .reload(|| Ok::<_, String>(table_of(&["Bolt", "Core"])))
            .unwrap();
        assert_eq!(fresh.len(), 2);
        assert_eq!(catalog.snapshot().records()[0].brand_name, "Bolt");
    }

    #[test]
    fn reload_returns_the_table_it_loaded() {
        let catalog = Catalog::new(table_of(&["Acme"]));
        let other = catalog.clone();
        let loaded = catalog
            .reload(|| Ok::<_, String>(table_of(&["Bolt"])))
            .unwrap();
        assert!(Arc::ptr_eq(&loaded, &catalog.snapshot()));

        // A later swap through another handle does not change what reload returned.
        other.replace(table_of(&["Core", "Dune"]));
        assert_eq!(loaded.records()[0].brand_name, "Bolt");
        assert!(!Arc::ptr_eq(&loaded, &catalog.snapshot()));
    }

    #[test]
    fn clones_share_the_same_table() {
        let catalog = Catalog::new(table_of(&["Acme"]));
        let other = catalog.clone();
        other.replace(table_of(&["Bolt"]));
        assert_eq!(catalog.snapshot().records()[0].brand_name, "Bolt");
    }

    #[test]
    fn readers_on_other_threads_see_whole_tables() {
        let catalog = Catalog::new(table_of(&["Acme"]));
        let reader = catalog.clone();
        let handle = std::thread::spawn(move || {
            for _ in 0..100 {
                let snap = reader.snapshot();
                assert!(snap.len() == 1 || snap.len() == 3);
            }
        });
        for _ in 0..10 {
            catalog.replace(table_of(&["Acme", "Bolt", "Core"]));
            catalog.replace(table_of(&["Acme"]));
        }
        handle.join().unwrap();
    }
}
