// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The position-remapping adapter.
//!
//! [`LoadingAdapter`] decorates an inner [`ListAdapter`] with up to four
//! synthetic loading rows and keeps every position-based operation consistent
//! between the inner index space and the decorated one.
//!
//! ## Reporting inner changes
//!
//! The decorated adapter owns its inner adapter. Changes made to the inner
//! adapter must be reported through [`LoadingAdapter::inner_changed`] (or
//! made inside [`LoadingAdapter::update_inner`]) so they can be re-emitted in
//! decorated space:
//!
//! ```rust
//! use understory_paginate::{ChangeEvent, ListAdapter, LoadingAdapter};
//!
//! #[derive(Debug)]
//! struct Names(Vec<&'static str>);
//!
//! impl ListAdapter for Names {
//!     type Row = String;
//!     type Payload = ();
//!
//!     fn item_count(&self) -> usize {
//!         self.0.len()
//!     }
//!
//!     fn create_row(&mut self, _view_type: understory_paginate::ViewType) -> String {
//!         String::new()
//!     }
//!
//!     fn bind_row(&mut self, row: &mut String, index: usize) {
//!         *row = self.0[index].to_string();
//!     }
//! }
//!
//! let mut adapter = LoadingAdapter::new(Names(vec!["a", "b"]));
//! adapter.set_start_loading(true);
//!
//! let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
//! let log = seen.clone();
//! adapter.register_observer(move |event: &ChangeEvent<()>| log.borrow_mut().push(event.clone()));
//!
//! adapter.update_inner(|names, changes| {
//!     names.0.push("c");
//!     changes.push(ChangeEvent::Inserted { start: 2, count: 1 });
//! });
//!
//! // Inner index 2 sits at decorated position 3, after the start row.
//! assert_eq!(*seen.borrow(), [ChangeEvent::Inserted { start: 3, count: 1 }]);
//! assert_eq!(adapter.item_count(), 4);
//! ```

use alloc::vec::Vec;
use core::fmt;

use crate::adapter::{DefaultLoadingRow, ItemId, ListAdapter, LoadingRowRenderer, ViewType};
use crate::error::PaginateError;
use crate::event::{ChangeEvent, ChangeObserver, ChangeObservers, ObserverId};
use crate::rows::{LoadingRowPositions, LoadingRows};

/// How showing, moving, or hiding an internal loading row is notified.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InternalRowPolicy {
    /// Emit a single [`ChangeEvent::Reset`].
    #[default]
    Reset,
    /// Emit a removal at the old position followed by an insertion at the new
    /// one.
    Granular,
}

/// Which internal row a setter addresses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Internal {
    Start,
    End,
}

/// Decorates an inner [`ListAdapter`] with loading rows.
///
/// The decorated sequence is `[start?] [inner items with internal rows
/// spliced in] [end?]`; see [`LoadingRows`] for the exact geometry. No
/// loading row is shown while the inner adapter is empty.
pub struct LoadingAdapter<A: ListAdapter, R = DefaultLoadingRow> {
    inner: A,
    renderer: R,
    rows: LoadingRows,
    policy: InternalRowPolicy,
    observers: ChangeObservers<A::Payload>,
    /// Inner item count as last reported to observers.
    reported_len: usize,
}

impl<A: ListAdapter> LoadingAdapter<A> {
    /// Wraps `inner` with the default loading-row renderer.
    #[must_use]
    pub fn new(inner: A) -> Self {
        Self::with_renderer(inner, DefaultLoadingRow)
    }
}

impl<A: ListAdapter, R> LoadingAdapter<A, R> {
    /// Wraps `inner`, rendering loading rows with `renderer`.
    #[must_use]
    pub fn with_renderer(inner: A, renderer: R) -> Self {
        let reported_len = inner.item_count();
        Self {
            inner,
            renderer,
            rows: LoadingRows::new(),
            policy: InternalRowPolicy::default(),
            observers: ChangeObservers::new(),
            reported_len,
        }
    }

    /// Sets how internal-row changes are notified.
    #[must_use]
    pub fn with_internal_row_policy(mut self, policy: InternalRowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns how internal-row changes are notified.
    #[must_use]
    pub fn internal_row_policy(&self) -> InternalRowPolicy {
        self.policy
    }

    /// Returns the inner adapter.
    #[must_use]
    pub fn inner(&self) -> &A {
        &self.inner
    }

    /// Returns the inner adapter mutably.
    ///
    /// Structural changes made through this reference must be reported with
    /// [`LoadingAdapter::inner_changed`].
    pub fn inner_mut(&mut self) -> &mut A {
        &mut self.inner
    }

    /// Returns the loading-row renderer.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Discards the decoration and returns the inner adapter.
    #[must_use]
    pub fn into_inner(self) -> A {
        self.inner
    }

    /// Returns the current loading-row flags.
    #[must_use]
    pub fn rows(&self) -> &LoadingRows {
        &self.rows
    }

    /// Returns the decorated positions of all shown loading rows.
    #[must_use]
    pub fn positions(&self) -> LoadingRowPositions {
        self.rows.positions(self.inner.item_count())
    }

    /// Returns the inner anchor of the internal-start row.
    #[must_use]
    pub fn internal_start(&self) -> Option<usize> {
        self.rows.internal_start()
    }

    /// Returns the inner anchor of the internal-end row.
    #[must_use]
    pub fn internal_end(&self) -> Option<usize> {
        self.rows.internal_end()
    }

    /// Returns `true` if a loading row sits at decorated `position`.
    #[must_use]
    pub fn is_loading_row(&self, position: usize) -> bool {
        self.rows.is_loading_row(position, self.inner.item_count())
    }

    /// Maps a decorated position to an inner index.
    ///
    /// Returns `None` for loading rows and positions past the end.
    #[must_use]
    pub fn to_inner(&self, position: usize) -> Option<usize> {
        self.rows.to_inner(position, self.inner.item_count())
    }

    /// Maps an inner index to its decorated position.
    #[must_use]
    pub fn from_inner(&self, index: usize) -> usize {
        self.rows.from_inner(index)
    }

    /// Returns the observer registry for decorated-space events.
    pub fn observers_mut(&mut self) -> &mut ChangeObservers<A::Payload> {
        &mut self.observers
    }

    /// Registers an observer of decorated-space events.
    pub fn register_observer(
        &mut self,
        observer: impl ChangeObserver<A::Payload> + 'static,
    ) -> ObserverId {
        self.observers.register(observer)
    }

    /// Unregisters an observer; returns `false` if it was not registered.
    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unregister(id)
    }

    /// Shows or hides the start loading row.
    pub fn set_start_loading(&mut self, visible: bool) {
        if !self.rows.set_start(visible) || self.inner.item_count() == 0 {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(visible, "start loading row toggled");
        let event = if visible {
            ChangeEvent::Inserted { start: 0, count: 1 }
        } else {
            ChangeEvent::Removed { start: 0, count: 1 }
        };
        self.observers.notify(&event);
    }

    /// Shows or hides the end loading row.
    pub fn set_end_loading(&mut self, visible: bool) {
        let inner_len = self.inner.item_count();
        let before = self.rows.end_position(inner_len);
        if !self.rows.set_end(visible) || inner_len == 0 {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(visible, "end loading row toggled");
        let event = match before {
            Some(start) => ChangeEvent::Removed { start, count: 1 },
            None => ChangeEvent::Inserted {
                start: self.rows.item_count(inner_len) - 1,
                count: 1,
            },
        };
        self.observers.notify(&event);
    }

    /// Anchors the internal-start row before inner item `anchor`, or hides it
    /// for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginateError::InvalidInternalPosition`] unless
    /// `0 < anchor < inner_len - 1`; the row is left unchanged.
    pub fn set_internal_start(&mut self, anchor: Option<usize>) -> Result<(), PaginateError> {
        self.set_internal(Internal::Start, anchor)
    }

    /// Anchors the internal-end row before inner item `anchor`, or hides it
    /// for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginateError::InvalidInternalPosition`] unless
    /// `0 < anchor < inner_len - 1`; the row is left unchanged.
    pub fn set_internal_end(&mut self, anchor: Option<usize>) -> Result<(), PaginateError> {
        self.set_internal(Internal::End, anchor)
    }

    fn set_internal(
        &mut self,
        which: Internal,
        anchor: Option<usize>,
    ) -> Result<(), PaginateError> {
        let inner_len = self.inner.item_count();
        if let Some(index) = anchor {
            if !LoadingRows::is_valid_internal(index, inner_len) {
                return Err(PaginateError::InvalidInternalPosition { index, inner_len });
            }
        }
        let current = match which {
            Internal::Start => self.rows.internal_start(),
            Internal::End => self.rows.internal_end(),
        };
        if current == anchor {
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(?which, ?current, ?anchor, "internal loading row moved");

        let old = self.internal_position(which, inner_len);
        match which {
            Internal::Start => self.rows.set_internal_start(anchor),
            Internal::End => self.rows.set_internal_end(anchor),
        };
        match self.policy {
            InternalRowPolicy::Reset => {
                if old.is_some() || anchor.is_some() {
                    self.observers.notify(&ChangeEvent::Reset);
                }
            }
            InternalRowPolicy::Granular => {
                if let Some(start) = old {
                    self.observers.notify(&ChangeEvent::Removed { start, count: 1 });
                }
                if let Some(start) = self.internal_position(which, inner_len) {
                    self.observers.notify(&ChangeEvent::Inserted { start, count: 1 });
                }
            }
        }
        Ok(())
    }

    fn internal_position(&self, which: Internal, inner_len: usize) -> Option<usize> {
        match which {
            Internal::Start => self.rows.internal_start_position(inner_len),
            Internal::End => self.rows.internal_end_position(inner_len),
        }
    }

    /// Runs `f` against the inner adapter and forwards the change events it
    /// records, in order.
    ///
    /// If the inner item count after `f` disagrees with the recorded events,
    /// a [`ChangeEvent::Reset`] is emitted to resynchronize observers.
    pub fn update_inner<T>(
        &mut self,
        f: impl FnOnce(&mut A, &mut Vec<ChangeEvent<A::Payload>>) -> T,
    ) -> T {
        let mut changes = Vec::new();
        let result = f(&mut self.inner, &mut changes);
        for event in changes {
            self.inner_changed(event);
        }
        if self.reported_len != self.inner.item_count() {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                reported = self.reported_len,
                actual = self.inner.item_count(),
                "recorded changes disagree with the inner count, resetting"
            );
            self.inner_changed(ChangeEvent::Reset);
        }
        result
    }

    /// Re-emits an inner-space change event in decorated space.
    ///
    /// Call this after the inner adapter has applied the change. Internal
    /// rows stay before the item they were anchored to; an internal row whose
    /// anchor leaves the interior of the inner sequence is hidden.
    pub fn inner_changed(&mut self, event: ChangeEvent<A::Payload>) {
        match event {
            ChangeEvent::Inserted { start, count } => self.forward_inserted(start, count),
            ChangeEvent::Removed { start, count } => self.forward_removed(start, count),
            ChangeEvent::Changed {
                start,
                count,
                payload,
            } => {
                for (start, count) in self.rows.decorated_runs(start, count) {
                    self.observers.notify(&ChangeEvent::Changed {
                        start,
                        count,
                        payload: payload.clone(),
                    });
                }
            }
            ChangeEvent::Moved { from, to, count } => {
                if self.rows.has_internal() {
                    // A move can carry items across an internal row.
                    self.observers.notify(&ChangeEvent::Reset);
                } else {
                    self.observers.notify(&ChangeEvent::Moved {
                        from: self.rows.from_inner(from),
                        to: self.rows.from_inner(to),
                        count,
                    });
                }
            }
            ChangeEvent::Reset => {
                self.reported_len = self.inner.item_count();
                self.drop_stale_internal_rows(false);
                self.observers.notify(&ChangeEvent::Reset);
            }
        }
    }

    fn forward_inserted(&mut self, start: usize, count: usize) {
        if count == 0 {
            return;
        }
        let before = self.reported_len;
        self.reported_len += count;
        if before == 0 {
            // The loading rows appear together with the first items.
            let count = self.rows.item_count(self.reported_len);
            self.observers.notify(&ChangeEvent::Inserted { start: 0, count });
            return;
        }
        let at = self.rows.from_inner(start);
        let shift = |anchor: Option<usize>| anchor.map(|a| if start < a { a + count } else { a });
        let (internal_start, internal_end) = (
            shift(self.rows.internal_start()),
            shift(self.rows.internal_end()),
        );
        self.rows.set_internal_start(internal_start);
        self.rows.set_internal_end(internal_end);
        self.observers.notify(&ChangeEvent::Inserted { start: at, count });
    }

    fn forward_removed(&mut self, start: usize, count: usize) {
        if count == 0 {
            return;
        }
        let before = self.reported_len;
        self.reported_len = before.saturating_sub(count);
        if self.reported_len == 0 {
            // Every loading row disappears with the last item.
            let count = self.rows.item_count(before);
            self.rows.set_internal_start(None);
            self.rows.set_internal_end(None);
            if count > 0 {
                self.observers.notify(&ChangeEvent::Removed { start: 0, count });
            }
            return;
        }
        // Back to front, so every start is valid when it is delivered.
        for (start, count) in self.rows.decorated_runs(start, count).into_iter().rev() {
            self.observers.notify(&ChangeEvent::Removed { start, count });
        }
        let end = start + count;
        let shift = |anchor: Option<usize>| {
            // Rows inside the removed span collapse onto its first survivor.
            anchor.map(|a| if a >= end { a - count } else { a.min(start) })
        };
        let (old_start, old_end) = (self.rows.internal_start(), self.rows.internal_end());
        let (internal_start, internal_end) = (shift(old_start), shift(old_end));
        self.rows.set_internal_start(internal_start);
        self.rows.set_internal_end(internal_end);
        self.drop_stale_internal_rows(true);
        // An end row that sat before the start row now follows it on the
        // shared anchor, so both rows are rebound at their new positions.
        let inverted = matches!((old_start, old_end), (Some(s), Some(e)) if e < s);
        let shared = self.rows.internal_start() == self.rows.internal_end();
        let rebind = self
            .rows
            .internal_start_position(self.reported_len)
            .filter(|_| inverted && shared);
        if let Some(start) = rebind {
            self.observers.notify(&ChangeEvent::Changed {
                start,
                count: 2,
                payload: None,
            });
        }
    }

    /// Hides internal rows whose anchor is no longer a valid interior index.
    fn drop_stale_internal_rows(&mut self, notify: bool) {
        let inner_len = self.reported_len;
        for which in [Internal::Start, Internal::End] {
            let anchor = match which {
                Internal::Start => self.rows.internal_start(),
                Internal::End => self.rows.internal_end(),
            };
            let Some(anchor) = anchor else {
                continue;
            };
            if LoadingRows::is_valid_internal(anchor, inner_len) {
                continue;
            }
            #[cfg(feature = "tracing")]
            tracing::debug!(?which, anchor, inner_len, "dropping stale internal loading row");
            let position = self.internal_position(which, inner_len);
            match which {
                Internal::Start => self.rows.set_internal_start(None),
                Internal::End => self.rows.set_internal_end(None),
            };
            if let (true, Some(start)) = (notify, position) {
                self.observers.notify(&ChangeEvent::Removed { start, count: 1 });
            }
        }
    }
}

impl<A, R> ListAdapter for LoadingAdapter<A, R>
where
    A: ListAdapter,
    R: LoadingRowRenderer<A::Row>,
{
    type Row = A::Row;
    type Payload = A::Payload;

    fn item_count(&self) -> usize {
        self.rows.item_count(self.inner.item_count())
    }

    fn view_type(&self, index: usize) -> ViewType {
        match self.to_inner(index) {
            Some(inner) => {
                let view_type = self.inner.view_type(inner);
                debug_assert_ne!(
                    view_type,
                    ViewType::LOADING,
                    "inner adapters must not use the loading view type"
                );
                view_type
            }
            None => ViewType::LOADING,
        }
    }

    fn has_stable_ids(&self) -> bool {
        self.inner.has_stable_ids()
    }

    fn item_id(&self, index: usize) -> Option<ItemId> {
        self.to_inner(index).and_then(|inner| self.inner.item_id(inner))
    }

    fn create_row(&mut self, view_type: ViewType) -> Self::Row {
        if view_type == ViewType::LOADING {
            self.renderer.create_row()
        } else {
            self.inner.create_row(view_type)
        }
    }

    fn bind_row(&mut self, row: &mut Self::Row, index: usize) {
        match self.to_inner(index) {
            Some(inner) => self.inner.bind_row(row, inner),
            None => self.renderer.bind_row(row, index),
        }
    }
}

impl<A, R> fmt::Debug for LoadingAdapter<A, R>
where
    A: ListAdapter + fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingAdapter")
            .field("inner", &self.inner)
            .field("renderer", &self.renderer)
            .field("rows", &self.rows)
            .field("policy", &self.policy)
            .field("observers", &self.observers)
            .field("reported_len", &self.reported_len)
            .finish()
    }
}
