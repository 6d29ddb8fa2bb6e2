//! Per-slug in-flight tracking.

use std::collections::HashSet;
use std::sync::Mutex;

/// Slugs with an operation currently running.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    slugs: Mutex<HashSet<String>>,
}

impl InFlight {
    /// Claim `slug`, or `None` when it is already claimed. The claim is
    /// released when the guard drops, including when the owning future is
    /// cancelled.
    pub(crate) fn try_acquire(&self, slug: &str) -> Option<InFlightGuard<'_>> {
        let mut slugs = self.slugs.lock().unwrap_or_else(|e| e.into_inner());
        if !slugs.insert(slug.to_string()) {
            return None;
        }
        Some(InFlightGuard {
            owner: self,
            slug: slug.to_string(),
        })
    }

    pub(crate) fn is_busy(&self, slug: &str) -> bool {
        self.slugs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(slug)
    }
}

pub(crate) struct InFlightGuard<'a> {
    owner: &'a InFlight,
    slug: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.owner
            .slugs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.slug);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_claim_fails() {
        let gate = InFlight::default();
        let guard = gate.try_acquire("home");
        assert!(guard.is_some());
        assert!(gate.try_acquire("home").is_none());
        assert!(gate.is_busy("home"));
    }

    #[test]
    fn test_slugs_are_independent() {
        let gate = InFlight::default();
        let _home = gate.try_acquire("home").unwrap();
        assert!(gate.try_acquire("sale").is_some());
    }

    #[test]
    fn test_drop_releases() {
        let gate = InFlight::default();
        drop(gate.try_acquire("home"));
        assert!(!gate.is_busy("home"));
        assert!(gate.try_acquire("home").is_some());
    }
}
