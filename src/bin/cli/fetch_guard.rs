use std::collections::HashMap;
use std::time::{Duration, Instant};

/// The resources the CLI caches list responses for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Menu,
    Orders,
    Reservations,
}

/// Tracks when each resource was last fetched so watch loops can skip
/// refreshes that would land inside the freshness window. Mutations call
/// `invalidate` so the next tick fetches again immediately.
#[derive(Debug)]
pub struct FetchGuard {
    window: Duration,
    last_fetched: HashMap<Resource, Instant>,
}

/// Default freshness window between refreshes of the same resource
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(10);

impl FetchGuard {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_fetched: HashMap::new(),
        }
    }

    /// Returns true when the resource is stale and records the fetch.
    ///
    /// The first call for a resource always returns true; subsequent calls
    /// return false until the window has elapsed or the entry is invalidated.
    pub fn should_fetch(&mut self, resource: Resource) -> bool {
        let now = Instant::now();
        match self.last_fetched.get(&resource) {
            Some(at) if now.duration_since(*at) < self.window => false,
            _ => {
                self.last_fetched.insert(resource, now);
                true
            }
        }
    }

    /// Drops the freshness record for a resource, typically after a mutation
    pub fn invalidate(&mut self, resource: Resource) {
        self.last_fetched.remove(&resource);
    }

    /// Drops all freshness records
    pub fn reset(&mut self) {
        self.last_fetched.clear();
    }
}

impl Default for FetchGuard {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}
