//! The invocation queue: selected tasks plus anything notified while running.

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::registry::Registry;

/// Ordered queue of task indices with run-at-most-once bookkeeping.
#[derive(Debug, Default)]
pub struct Manifest {
    queue: VecDeque<usize>,
    consumed: Vec<usize>,
}

impl Manifest {
    /// Queues every task addressed by `names`, in order, without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] for a name nothing is registered under.
    pub fn select<S: AsRef<str>>(registry: &Registry, names: &[S]) -> Result<Self> {
        let mut manifest = Self::default();
        for name in names {
            let name = name.as_ref();
            let ids =
                registry.matching(name).ok_or_else(|| Error::UnknownSession(name.to_string()))?;
            if ids.is_empty() {
                tracing::warn!("session {name} has no parameters to run; skipping");
            }
            for id in ids {
                if !manifest.contains(id) {
                    manifest.queue.push_back(id);
                }
            }
        }
        Ok(manifest)
    }

    /// Appends the tasks addressed by `name` unless they are already queued
    /// or have already run. Returns how many were added.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] for an unregistered name.
    pub fn notify(&mut self, registry: &Registry, name: &str) -> Result<usize> {
        let ids = registry.matching(name).ok_or_else(|| Error::UnknownSession(name.to_string()))?;
        let mut added = 0;
        for id in ids {
            if !self.contains(id) {
                self.queue.push_back(id);
                added += 1;
            }
        }
        Ok(added)
    }

    /// Takes the next task to run.
    pub fn next_task(&mut self) -> Option<usize> {
        let id = self.queue.pop_front()?;
        self.consumed.push(id);
        Some(id)
    }

    /// Tasks still waiting.
    #[must_use]
    pub fn pending(&self) -> Vec<usize> {
        self.queue.iter().copied().collect()
    }

    fn contains(&self, id: usize) -> bool {
        self.queue.contains(&id) || self.consumed.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SessionDef;
    use crate::session::Session;

    fn noop(_: &mut Session<'_>, _: Option<&str>) -> Result<()> {
        Ok(())
    }

    fn registry() -> Registry {
        let mut registry = Registry::new();
        for name in ["lint", "typing", "static", "formatters", "spelling", "actionlint"] {
            registry.register(SessionDef::new(name, noop));
        }
        registry.register(
            SessionDef::new("pip-compile", noop).parametrize("req", vec!["a".into(), "b".into()]),
        );
        registry
    }

    #[test]
    fn select_deduplicates_and_rejects_unknown_names() {
        let registry = registry();
        let names = ["static", "pip-compile", "pip-compile(a)", "static"];
        let manifest = Manifest::select(&registry, &names).unwrap();
        assert_eq!(manifest.pending(), vec![2, 6, 7]);

        let err = Manifest::select(&registry, &["static", "docs"]).unwrap_err();
        assert!(matches!(err, Error::UnknownSession(name) if name == "docs"));
    }

    #[test]
    fn notified_tasks_run_at_most_once() {
        let registry = registry();
        let mut manifest = Manifest::select(&registry, &["lint", "static"]).unwrap();

        assert_eq!(manifest.next_task(), Some(0));
        let mut added = 0;
        for name in ["typing", "static", "formatters", "spelling", "actionlint"] {
            added += manifest.notify(&registry, name).unwrap();
        }
        // `static` was already queued by the selection.
        assert_eq!(added, 4);
        assert_eq!(manifest.pending(), vec![2, 1, 3, 4, 5]);

        // Re-notifying something already run or queued is a no-op.
        assert_eq!(manifest.notify(&registry, "lint").unwrap(), 0);
        assert_eq!(manifest.notify(&registry, "typing").unwrap(), 0);

        let mut ran = vec![0];
        while let Some(id) = manifest.next_task() {
            ran.push(id);
        }
        assert_eq!(ran, vec![0, 2, 1, 3, 4, 5]);
    }

    #[test]
    fn notify_unknown_session_fails() {
        let registry = registry();
        let mut manifest = Manifest::default();
        assert!(manifest.notify(&registry, "make").is_err());
    }
}
