/*!
    Acquire/release bookkeeping for session resources.
*/

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/**
    Kinds of resource a session holds.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Opened and probed source container.
    FormatHandle,
    /// Opened decoder, including its reusable picture buffer.
    CodecContext,
    /// Destination file handle. Discarding sinks hold none.
    DestinationFile,
}

impl Resource {
    pub const ALL: [Resource; 3] = [
        Resource::FormatHandle,
        Resource::CodecContext,
        Resource::DestinationFile,
    ];

    const fn slot(self) -> usize {
        match self {
            Self::FormatHandle => 0,
            Self::CodecContext => 1,
            Self::DestinationFile => 2,
        }
    }
}

#[derive(Default)]
struct Counters {
    acquired: AtomicU32,
    released: AtomicU32,
}

/**
    Counts how often each kind of resource was acquired and released.

    Pass one to a session to check afterwards that everything it acquired
    was released exactly once.
*/
#[derive(Default)]
pub struct ResourceLedger {
    counters: [Counters; 3],
}

impl ResourceLedger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn acquired(&self, resource: Resource) -> u32 {
        self.counters[resource.slot()].acquired.load(Ordering::SeqCst)
    }

    pub fn released(&self, resource: Resource) -> u32 {
        self.counters[resource.slot()].released.load(Ordering::SeqCst)
    }

    /**
        True if every kind was released as often as it was acquired.
    */
    pub fn is_balanced(&self) -> bool {
        Resource::ALL
            .iter()
            .all(|&r| self.acquired(r) == self.released(r))
    }
}

impl fmt::Debug for ResourceLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for resource in Resource::ALL {
            map.entry(
                &resource,
                &(self.acquired(resource), self.released(resource)),
            );
        }
        map.finish()
    }
}

/**
    Records an acquisition when created and the matching release when dropped.

    Usually wrapped in [`Held`] together with the resource it tracks.
*/
#[must_use]
#[derive(Debug)]
pub(crate) struct LedgerGuard {
    ledger: Option<Arc<ResourceLedger>>,
    resource: Resource,
}

impl LedgerGuard {
    pub(crate) fn acquire(ledger: Option<&Arc<ResourceLedger>>, resource: Resource) -> Self {
        if let Some(ledger) = ledger {
            ledger.counters[resource.slot()]
                .acquired
                .fetch_add(1, Ordering::SeqCst);
        }
        Self {
            ledger: ledger.cloned(),
            resource,
        }
    }
}

impl Drop for LedgerGuard {
    fn drop(&mut self) {
        if let Some(ledger) = &self.ledger {
            ledger.counters[self.resource.slot()]
                .released
                .fetch_add(1, Ordering::SeqCst);
        }
    }
}

/**
    A resource together with its ledger guard.

    Field order makes the resource drop before the guard records the
    release, whether the pair is a local or a struct field.
*/
#[derive(Debug)]
pub(crate) struct Held<T> {
    pub(crate) value: T,
    pub(crate) guard: LedgerGuard,
}

impl<T> Held<T> {
    /**
        Record `value` as an acquired `resource`. Call only once the
        resource actually exists.
    */
    pub(crate) fn new(ledger: Option<&Arc<ResourceLedger>>, resource: Resource, value: T) -> Self {
        Self {
            value,
            guard: LedgerGuard::acquire(ledger, resource),
        }
    }
}

impl<T> Deref for Held<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Held<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_balances_on_drop() {
        let ledger = ResourceLedger::new();
        {
            let _source = LedgerGuard::acquire(Some(&ledger), Resource::FormatHandle);
            assert_eq!(ledger.acquired(Resource::FormatHandle), 1);
            assert_eq!(ledger.released(Resource::FormatHandle), 0);
            assert!(!ledger.is_balanced());
        }
        assert_eq!(ledger.released(Resource::FormatHandle), 1);
        assert!(ledger.is_balanced());
    }

    #[test]
    fn untracked_guard_is_inert() {
        let ledger = ResourceLedger::new();
        drop(LedgerGuard::acquire(None, Resource::CodecContext));
        assert_eq!(ledger.acquired(Resource::CodecContext), 0);
        assert!(ledger.is_balanced());
    }

    struct ReleaseOrder {
        ledger: Arc<ResourceLedger>,
        released_before_drop: Arc<AtomicU32>,
    }

    impl Drop for ReleaseOrder {
        fn drop(&mut self) {
            let released = self.ledger.released(Resource::FormatHandle);
            self.released_before_drop.store(released, Ordering::SeqCst);
        }
    }

    #[test]
    fn held_value_drops_before_release_is_recorded() {
        let ledger = ResourceLedger::new();
        let observed = Arc::new(AtomicU32::new(u32::MAX));
        let held = Held::new(
            Some(&ledger),
            Resource::FormatHandle,
            ReleaseOrder {
                ledger: ledger.clone(),
                released_before_drop: observed.clone(),
            },
        );
        assert_eq!(ledger.acquired(Resource::FormatHandle), 1);
        assert_eq!(held.ledger.released(Resource::FormatHandle), 0);

        drop(held);
        assert_eq!(observed.load(Ordering::SeqCst), 0);
        assert_eq!(ledger.released(Resource::FormatHandle), 1);
    }

    #[test]
    fn debug_lists_every_kind() {
        let ledger = ResourceLedger::new();
        let text = format!("{ledger:?}");
        for resource in Resource::ALL {
            assert!(text.contains(&format!("{resource:?}")));
        }
    }
}
