// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications and observer subscriptions.
//!
//! Adapters report structural and content changes as [`ChangeEvent`]s. The
//! decorated adapter re-emits every inner event through a
//! [`ChangeObservers`] registry after translating its positions, so
//! observers never see inner-space indices.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

/// A change to an adapter's item sequence.
///
/// Positions are expressed in the index space of the adapter that emits the
/// event. Events are delivered synchronously and in the order they occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChangeEvent<P> {
    /// `count` items were inserted starting at `start`.
    Inserted {
        /// First inserted position.
        start: usize,
        /// Number of inserted items.
        count: usize,
    },
    /// `count` items starting at `start` changed content.
    Changed {
        /// First changed position.
        start: usize,
        /// Number of changed items.
        count: usize,
        /// Optional partial-update payload.
        payload: Option<P>,
    },
    /// `count` items starting at `start` were removed.
    Removed {
        /// First removed position, valid before the removal.
        start: usize,
        /// Number of removed items.
        count: usize,
    },
    /// `count` items moved from `from` to `to`.
    Moved {
        /// Source position.
        from: usize,
        /// Destination position.
        to: usize,
        /// Number of moved items.
        count: usize,
    },
    /// Anything may have changed; observers must re-query everything.
    Reset,
}

impl<P> ChangeEvent<P> {
    /// Returns `true` if this event changes the number or order of items.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::Changed { .. })
    }
}

/// Receives [`ChangeEvent`]s from an adapter.
///
/// Implemented for every `FnMut(&ChangeEvent<P>)` closure.
pub trait ChangeObserver<P> {
    /// Called once per event, in emission order.
    fn on_change(&mut self, event: &ChangeEvent<P>);
}

impl<P, F> ChangeObserver<P> for F
where
    F: FnMut(&ChangeEvent<P>),
{
    fn on_change(&mut self, event: &ChangeEvent<P>) {
        self(event);
    }
}

/// Handle returned by [`ChangeObservers::register`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// A registry of [`ChangeObserver`]s.
///
/// Observers are notified in registration order.
pub struct ChangeObservers<P> {
    entries: Vec<(ObserverId, Box<dyn ChangeObserver<P>>)>,
    next_id: u64,
}

impl<P> ChangeObservers<P> {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers `observer` and returns a handle for unregistering it.
    pub fn register(&mut self, observer: impl ChangeObserver<P> + 'static) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Removes the observer registered under `id`.
    ///
    /// Returns `false` if no such observer is registered.
    pub fn unregister(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    /// Returns the number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no observer is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Delivers `event` to every observer.
    pub fn notify(&mut self, event: &ChangeEvent<P>) {
        for (_, observer) in &mut self.entries {
            observer.on_change(event);
        }
    }
}

impl<P> Default for ChangeObservers<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for ChangeObservers<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeObservers")
            .field("len", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
