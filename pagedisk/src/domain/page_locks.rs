//! Per-page mutual exclusion.
//!
//! Every read or write segment holds the lock of its page from cache lookup
//! through write-back, so operations on the same page run one at a time
//! while operations on different pages interleave freely.

use crate::domain::value_objects::PageIndex;
use alloc::{collections::BTreeMap, sync::Arc};
use async_lock::{Mutex, MutexGuardArc};

/// Table of per-page async mutexes, created on demand.
#[derive(Default)]
pub(crate) struct PageLocks {
    table: Mutex<BTreeMap<PageIndex, Arc<Mutex<()>>>>,
}

/// Exclusive access to one page; released on drop.
pub(crate) struct PageGuard {
    _guard: MutexGuardArc<()>,
}

impl PageLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait until `index` is free and take it.
    pub(crate) async fn lock(&self, index: PageIndex) -> PageGuard {
        let slot = {
            let mut table = self.table.lock().await;
            // Entries only the table refers to have no holder and no waiter
            table.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(table.entry(index).or_default())
        };

        PageGuard {
            _guard: slot.lock_arc().await,
        }
    }

    /// Number of pages with a live lock entry.
    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.table.lock().await.len()
    }
}
