//! Holder for the most recently computed patrol route.
//!
//! The slot replaces an implicit process-wide variable. Writers replace the
//! whole value; readers receive a shared handle that stays valid after later
//! writes. When two writers race, the one that acquires the lock last wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::PatrolRoute;

/// Last-write-wins slot for a [`PatrolRoute`].
///
/// # Examples
/// ```
/// use patrol_core::LastRouteSlot;
///
/// let slot = LastRouteSlot::new();
/// assert!(slot.latest().is_none());
/// ```
#[derive(Debug, Default)]
pub struct LastRouteSlot {
    latest: Mutex<Option<Arc<PatrolRoute>>>,
}

impl LastRouteSlot {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latest: Mutex::new(None),
        }
    }

    /// Store `route`, returning the route it displaced.
    pub fn replace(&self, route: Arc<PatrolRoute>) -> Option<Arc<PatrolRoute>> {
        self.lock().replace(route)
    }

    /// The most recently stored route.
    #[must_use]
    pub fn latest(&self) -> Option<Arc<PatrolRoute>> {
        self.lock().clone()
    }

    /// Empty the slot, returning its previous content.
    pub fn clear(&self) -> Option<Arc<PatrolRoute>> {
        self.lock().take()
    }

    // A panic while holding the lock cannot leave a half-written `Option`.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<PatrolRoute>>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
