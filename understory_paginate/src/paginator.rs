// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary-trigger controller and its builder.
//!
//! A [`Paginator`] is attached to one list: it owns the (decorated) adapter,
//! a snapshot of the layout's visible range, and the caller's callbacks. On
//! every scroll tick the host refreshes the layout snapshot and calls
//! [`Paginator::on_scrolled`], which fires a load-more callback for each
//! boundary whose loading row has come within the trigger threshold.
//!
//! ```rust
//! use understory_paginate::{
//!     LinearLayout, ListAdapter, PaginationCallbacks, Paginator, Triggered, ViewType,
//! };
//!
//! #[derive(Debug)]
//! struct Feed(usize);
//!
//! impl ListAdapter for Feed {
//!     type Row = usize;
//!     type Payload = ();
//!
//!     fn item_count(&self) -> usize {
//!         self.0
//!     }
//!
//!     fn create_row(&mut self, _view_type: ViewType) -> usize {
//!         0
//!     }
//!
//!     fn bind_row(&mut self, row: &mut usize, index: usize) {
//!         *row = index;
//!     }
//! }
//!
//! #[derive(Debug, Default)]
//! struct Pages {
//!     loading: bool,
//! }
//!
//! impl PaginationCallbacks for Pages {
//!     fn on_load_more(&mut self) {
//!         self.loading = true;
//!     }
//!
//!     fn is_loading(&self) -> bool {
//!         self.loading
//!     }
//!
//!     fn has_loaded_all_items(&self) -> bool {
//!         false
//!     }
//! }
//!
//! let mut paginator = Paginator::builder(Pages::default())
//!     .adapter(Feed(20))
//!     .layout(LinearLayout::new(20))
//!     .build()
//!     .unwrap();
//! paginator.set_has_more_data_to_load(true);
//!
//! // The end row sits at position 20; 20 <= 16 + 5 fires once.
//! let count = paginator.adapter().item_count();
//! paginator.layout_mut().set_item_count(count);
//! paginator.layout_mut().set_visible(10, 16);
//! assert_eq!(paginator.on_scrolled(), Triggered::END);
//! assert_eq!(paginator.on_scrolled(), Triggered::empty());
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use bitflags::bitflags;

use crate::adapter::{DefaultLoadingRow, ItemId, ListAdapter, LoadingRowRenderer, ViewType};
use crate::callbacks::PaginationCallbacks;
use crate::error::PaginateError;
use crate::event::{ChangeEvent, ChangeObserver, ChangeObservers, ObserverId};
use crate::layout::{VisibleItems, VisibleRange};
use crate::loading_adapter::{InternalRowPolicy, LoadingAdapter};
use crate::rows::LoadingRowPositions;
use crate::span::{FullSpan, LoadingSpanLookup, LoadingSpanSizeLookup, SingleSpan, SpanSizeLookup};

/// Default distance, in items, between a boundary and the visible range at
/// which load-more fires.
pub const DEFAULT_LOADING_TRIGGER_THRESHOLD: usize = 5;

bitflags! {
    /// The load-more callbacks fired by one [`Paginator::on_scrolled`] pass.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Triggered: u8 {
        /// [`PaginationCallbacks::on_load_more`] on the main callbacks.
        const END = 1;
        /// [`PaginationCallbacks::on_load_more_from_start`] on the main callbacks.
        const START = 1 << 1;
        /// [`PaginationCallbacks::on_load_more`] on the internal callbacks.
        const INTERNAL_END = 1 << 2;
        /// [`PaginationCallbacks::on_load_more_from_start`] on the internal callbacks.
        const INTERNAL_START = 1 << 3;
    }
}

/// The adapter a [`Paginator`] presents to the list widget.
pub enum Attached<A: ListAdapter, R = DefaultLoadingRow> {
    /// The inner adapter decorated with loading rows.
    Decorated(LoadingAdapter<A, R>),
    /// The inner adapter as-is, when loading rows are disabled.
    Bare {
        /// The inner adapter.
        inner: A,
        /// Observers of the adapter's change events.
        observers: ChangeObservers<A::Payload>,
    },
}

impl<A: ListAdapter, R> Attached<A, R> {
    /// Returns the decorated adapter, if loading rows are enabled.
    #[must_use]
    pub fn decorated(&self) -> Option<&LoadingAdapter<A, R>> {
        match self {
            Self::Decorated(adapter) => Some(adapter),
            Self::Bare { .. } => None,
        }
    }

    /// Returns the inner adapter.
    #[must_use]
    pub fn inner(&self) -> &A {
        match self {
            Self::Decorated(adapter) => adapter.inner(),
            Self::Bare { inner, .. } => inner,
        }
    }

    /// Returns the inner adapter mutably.
    ///
    /// Structural changes must be reported with [`Attached::inner_changed`].
    pub fn inner_mut(&mut self) -> &mut A {
        match self {
            Self::Decorated(adapter) => adapter.inner_mut(),
            Self::Bare { inner, .. } => inner,
        }
    }

    /// Returns the decorated positions of all shown loading rows.
    #[must_use]
    pub fn positions(&self) -> LoadingRowPositions {
        match self {
            Self::Decorated(adapter) => adapter.positions(),
            Self::Bare { .. } => LoadingRowPositions::default(),
        }
    }

    /// Maps a decorated position to an inner index.
    #[must_use]
    pub fn to_inner(&self, position: usize) -> Option<usize> {
        match self {
            Self::Decorated(adapter) => adapter.to_inner(position),
            Self::Bare { inner, .. } => (position < inner.item_count()).then_some(position),
        }
    }

    /// Maps an inner index to a decorated position.
    #[must_use]
    pub fn from_inner(&self, index: usize) -> usize {
        match self {
            Self::Decorated(adapter) => adapter.from_inner(index),
            Self::Bare { .. } => index,
        }
    }

    /// Registers an observer of the presented adapter's events.
    pub fn register_observer(
        &mut self,
        observer: impl ChangeObserver<A::Payload> + 'static,
    ) -> ObserverId {
        match self {
            Self::Decorated(adapter) => adapter.register_observer(observer),
            Self::Bare { observers, .. } => observers.register(observer),
        }
    }

    /// Unregisters an observer; returns `false` if it was not registered.
    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        match self {
            Self::Decorated(adapter) => adapter.unregister_observer(id),
            Self::Bare { observers, .. } => observers.unregister(id),
        }
    }

    /// Reports an inner-space change event, see
    /// [`LoadingAdapter::inner_changed`].
    pub fn inner_changed(&mut self, event: ChangeEvent<A::Payload>) {
        match self {
            Self::Decorated(adapter) => adapter.inner_changed(event),
            Self::Bare { observers, .. } => observers.notify(&event),
        }
    }

    /// Runs `f` against the inner adapter and forwards the events it records,
    /// see [`LoadingAdapter::update_inner`].
    pub fn update_inner<T>(
        &mut self,
        f: impl FnOnce(&mut A, &mut Vec<ChangeEvent<A::Payload>>) -> T,
    ) -> T {
        match self {
            Self::Decorated(adapter) => adapter.update_inner(f),
            Self::Bare { inner, observers } => {
                let mut changes = Vec::new();
                let result = f(inner, &mut changes);
                for event in &changes {
                    observers.notify(event);
                }
                result
            }
        }
    }

    fn into_inner(self) -> A {
        match self {
            Self::Decorated(adapter) => adapter.into_inner(),
            Self::Bare { inner, .. } => inner,
        }
    }
}

impl<A, R> ListAdapter for Attached<A, R>
where
    A: ListAdapter,
    R: LoadingRowRenderer<A::Row>,
{
    type Row = A::Row;
    type Payload = A::Payload;

    fn item_count(&self) -> usize {
        match self {
            Self::Decorated(adapter) => adapter.item_count(),
            Self::Bare { inner, .. } => inner.item_count(),
        }
    }

    fn view_type(&self, index: usize) -> ViewType {
        match self {
            Self::Decorated(adapter) => adapter.view_type(index),
            Self::Bare { inner, .. } => inner.view_type(index),
        }
    }

    fn has_stable_ids(&self) -> bool {
        self.inner().has_stable_ids()
    }

    fn item_id(&self, index: usize) -> Option<ItemId> {
        match self {
            Self::Decorated(adapter) => adapter.item_id(index),
            Self::Bare { inner, .. } => inner.item_id(index),
        }
    }

    fn create_row(&mut self, view_type: ViewType) -> Self::Row {
        match self {
            Self::Decorated(adapter) => adapter.create_row(view_type),
            Self::Bare { inner, .. } => inner.create_row(view_type),
        }
    }

    fn bind_row(&mut self, row: &mut Self::Row, index: usize) {
        match self {
            Self::Decorated(adapter) => adapter.bind_row(row, index),
            Self::Bare { inner, .. } => inner.bind_row(row, index),
        }
    }
}

impl<A, R> fmt::Debug for Attached<A, R>
where
    A: ListAdapter + fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decorated(adapter) => f.debug_tuple("Decorated").field(adapter).finish(),
            Self::Bare { inner, observers } => f
                .debug_struct("Bare")
                .field("inner", inner)
                .field("observers", observers)
                .finish(),
        }
    }
}

enum Spans {
    None,
    Host(Box<dyn SpanSizeLookup>),
    Decorated(LoadingSpanSizeLookup),
}

/// Everything a [`Paginator`] held, returned by [`Paginator::unbind`].
pub struct Detached<A, L, C> {
    /// The inner, undecorated adapter.
    pub adapter: A,
    /// The layout snapshot.
    pub layout: L,
    /// The main callbacks.
    pub callbacks: C,
    /// The internal callbacks, if any were configured.
    pub internal_callbacks: Option<Box<dyn PaginationCallbacks>>,
    /// The host's span lookup, without the loading-row override.
    pub span_lookup: Option<Box<dyn SpanSizeLookup>>,
}

impl<A: fmt::Debug, L: fmt::Debug, C: fmt::Debug> fmt::Debug for Detached<A, L, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Detached")
            .field("adapter", &self.adapter)
            .field("layout", &self.layout)
            .field("callbacks", &self.callbacks)
            .field("has_internal_callbacks", &self.internal_callbacks.is_some())
            .field("has_span_lookup", &self.span_lookup.is_some())
            .finish()
    }
}

/// Infinite-scroll pagination attached to one list.
pub struct Paginator<A: ListAdapter, L, C, R = DefaultLoadingRow> {
    adapter: Attached<A, R>,
    layout: L,
    callbacks: C,
    internal_callbacks: Option<Box<dyn PaginationCallbacks>>,
    threshold: usize,
    spans: Spans,
}

impl<A, L, C> Paginator<A, L, C>
where
    A: ListAdapter,
    L: VisibleItems,
    C: PaginationCallbacks,
{
    /// Starts configuring a paginator around `callbacks`.
    #[must_use]
    pub fn builder(callbacks: C) -> PaginatorBuilder<A, L, C> {
        PaginatorBuilder::new(callbacks)
    }
}

impl<A, L, C, R> Paginator<A, L, C, R>
where
    A: ListAdapter,
    L: VisibleItems,
    C: PaginationCallbacks,
{
    /// Returns the adapter the list widget should render through.
    #[must_use]
    pub fn adapter(&self) -> &Attached<A, R> {
        &self.adapter
    }

    /// Returns the adapter mutably, for binding rows and reporting changes.
    pub fn adapter_mut(&mut self) -> &mut Attached<A, R> {
        &mut self.adapter
    }

    /// Returns the layout snapshot.
    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Returns the layout snapshot mutably, for refreshing it before a
    /// scroll check.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    /// Returns the main callbacks.
    #[must_use]
    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    /// Returns the main callbacks mutably.
    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    /// Returns the internal callbacks mutably, if configured.
    pub fn internal_callbacks_mut(&mut self) -> Option<&mut (dyn PaginationCallbacks + 'static)> {
        self.internal_callbacks.as_deref_mut()
    }

    /// Returns the load-more trigger threshold.
    #[must_use]
    pub fn loading_trigger_threshold(&self) -> usize {
        self.threshold
    }

    /// Checks every boundary against the visible range and fires the
    /// matching load-more callbacks.
    ///
    /// Call this on every scroll event, after refreshing the layout snapshot.
    /// Each callback fires only while its callbacks report neither loading
    /// nor completion, so repeated calls over the same range are idempotent
    /// once the caller marks itself as loading.
    pub fn on_scrolled(&mut self) -> Triggered {
        let mut fired = Triggered::empty();
        if self.layout.item_count() == 0 {
            return fired;
        }
        let visible = self.layout.visible_range().unwrap_or_default();
        let boundaries = self.boundaries();
        #[cfg(feature = "tracing")]
        tracing::trace!(?visible, ?boundaries, "checking pagination boundaries");

        if fire_end(&mut self.callbacks, boundaries.end, visible, self.threshold) {
            fired |= Triggered::END;
        }
        if fire_start(&mut self.callbacks, boundaries.start, visible, self.threshold) {
            fired |= Triggered::START;
        }
        if let Some(internal) = self.internal_callbacks.as_deref_mut() {
            if fire_end(internal, boundaries.internal_end, visible, self.threshold) {
                fired |= Triggered::INTERNAL_END;
            }
            if fire_start(internal, boundaries.internal_start, visible, self.threshold) {
                fired |= Triggered::INTERNAL_START;
            }
        }

        #[cfg(feature = "tracing")]
        if !fired.is_empty() {
            tracing::debug!(?fired, ?visible, "load more triggered");
        }
        fired
    }

    /// Positions checked against the threshold.
    ///
    /// Without loading rows, the first and last items stand in for the start
    /// and end boundaries.
    fn boundaries(&self) -> LoadingRowPositions {
        match &self.adapter {
            Attached::Decorated(adapter) => adapter.positions(),
            Attached::Bare { inner, .. } => {
                let count = inner.item_count();
                LoadingRowPositions {
                    start: (count > 0).then_some(0),
                    end: count.checked_sub(1),
                    ..LoadingRowPositions::default()
                }
            }
        }
    }

    /// Shows or hides the end loading row.
    pub fn set_has_more_data_to_load(&mut self, has_more: bool) {
        if let Attached::Decorated(adapter) = &mut self.adapter {
            adapter.set_end_loading(has_more);
        }
    }

    /// Shows or hides the start loading row.
    pub fn set_has_more_data_to_load_on_start(&mut self, has_more: bool) {
        if let Attached::Decorated(adapter) = &mut self.adapter {
            adapter.set_start_loading(has_more);
        }
    }

    /// Anchors the internal-end loading row before inner item `position`, or
    /// hides it for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginateError::InvalidInternalPosition`] for anchors outside
    /// the interior of the inner sequence.
    pub fn set_has_more_internal_data_to_load(
        &mut self,
        position: Option<usize>,
    ) -> Result<(), PaginateError> {
        match &mut self.adapter {
            Attached::Decorated(adapter) => adapter.set_internal_end(position),
            Attached::Bare { .. } => Ok(()),
        }
    }

    /// Anchors the internal-start loading row before inner item `position`,
    /// or hides it for `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PaginateError::InvalidInternalPosition`] for anchors outside
    /// the interior of the inner sequence.
    pub fn set_has_more_internal_data_to_load_on_start(
        &mut self,
        position: Option<usize>,
    ) -> Result<(), PaginateError> {
        match &mut self.adapter {
            Attached::Decorated(adapter) => adapter.set_internal_start(position),
            Attached::Bare { .. } => Ok(()),
        }
    }

    /// Returns the inner anchor of the internal-end loading row.
    #[must_use]
    pub fn internal_load_position(&self) -> Option<usize> {
        self.adapter.decorated().and_then(|adapter| adapter.internal_end())
    }

    /// Returns the inner anchor of the internal-start loading row.
    #[must_use]
    pub fn internal_start_load_position(&self) -> Option<usize> {
        self.adapter.decorated().and_then(|adapter| adapter.internal_start())
    }

    /// Maps a decorated position to an inner index.
    #[must_use]
    pub fn map_positions(&self, position: usize) -> Option<usize> {
        self.adapter.to_inner(position)
    }

    /// Maps an inner index to a decorated position.
    #[must_use]
    pub fn map_positions_reverse(&self, index: usize) -> usize {
        self.adapter.from_inner(index)
    }

    /// Registers an observer of the presented adapter's events.
    pub fn register_observer(
        &mut self,
        observer: impl ChangeObserver<A::Payload> + 'static,
    ) -> ObserverId {
        self.adapter.register_observer(observer)
    }

    /// Unregisters an observer; returns `false` if it was not registered.
    pub fn unregister_observer(&mut self, id: ObserverId) -> bool {
        self.adapter.unregister_observer(id)
    }

    /// Returns the grid span size of decorated `position`.
    ///
    /// Loading rows use the loading span lookup on grids and span `1`
    /// otherwise. Other positions are mapped to inner space and answered by
    /// the host's lookup, or `1` without one.
    #[must_use]
    pub fn span_size(&self, position: usize) -> usize {
        match (&self.spans, &self.adapter) {
            (Spans::Decorated(lookup), Attached::Decorated(adapter)) => {
                lookup.span_size(adapter, position)
            }
            (Spans::Host(lookup), Attached::Decorated(adapter)) => adapter
                .to_inner(position)
                .map_or(1, |index| lookup.span_size(index)),
            (Spans::Host(lookup), Attached::Bare { .. }) => lookup.span_size(position),
            _ => 1,
        }
    }

    /// Detaches from the list, returning the undecorated adapter, layout,
    /// callbacks, and span lookup.
    #[must_use]
    pub fn unbind(self) -> Detached<A, L, C> {
        let span_lookup = match self.spans {
            Spans::None => None,
            Spans::Host(lookup) => Some(lookup),
            Spans::Decorated(lookup) => Some(lookup.into_wrapped()),
        };
        Detached {
            adapter: self.adapter.into_inner(),
            layout: self.layout,
            callbacks: self.callbacks,
            internal_callbacks: self.internal_callbacks,
            span_lookup,
        }
    }
}

impl<A, L, C, R> fmt::Debug for Paginator<A, L, C, R>
where
    A: ListAdapter + fmt::Debug,
    L: fmt::Debug,
    C: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Paginator")
            .field("adapter", &self.adapter)
            .field("layout", &self.layout)
            .field("callbacks", &self.callbacks)
            .field("has_internal_callbacks", &self.internal_callbacks.is_some())
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

fn fire_end<C: PaginationCallbacks + ?Sized>(
    callbacks: &mut C,
    row: Option<usize>,
    visible: VisibleRange,
    threshold: usize,
) -> bool {
    let Some(row) = row else {
        return false;
    };
    if row > visible.last.saturating_add(threshold)
        || callbacks.is_loading()
        || callbacks.has_loaded_all_items()
    {
        return false;
    }
    callbacks.on_load_more();
    true
}

fn fire_start<C: PaginationCallbacks + ?Sized>(
    callbacks: &mut C,
    row: Option<usize>,
    visible: VisibleRange,
    threshold: usize,
) -> bool {
    let Some(row) = row else {
        return false;
    };
    // `row >= first - threshold`, without going below zero.
    if row.saturating_add(threshold) < visible.first
        || callbacks.is_loading_from_start()
        || callbacks.has_loaded_all_items_from_start()
    {
        return false;
    }
    callbacks.on_load_more_from_start();
    true
}

/// Configures and builds a [`Paginator`].
pub struct PaginatorBuilder<A, L, C, R = DefaultLoadingRow> {
    callbacks: C,
    adapter: Option<A>,
    layout: Option<L>,
    renderer: R,
    threshold: usize,
    add_loading_row: bool,
    loading_span: Option<Box<dyn LoadingSpanLookup>>,
    span_lookup: Option<Box<dyn SpanSizeLookup>>,
    internal_callbacks: Option<Box<dyn PaginationCallbacks>>,
    policy: InternalRowPolicy,
}

impl<A, L, C> PaginatorBuilder<A, L, C> {
    /// Starts a configuration with the default options.
    #[must_use]
    pub fn new(callbacks: C) -> Self {
        Self {
            callbacks,
            adapter: None,
            layout: None,
            renderer: DefaultLoadingRow,
            threshold: DEFAULT_LOADING_TRIGGER_THRESHOLD,
            add_loading_row: true,
            loading_span: None,
            span_lookup: None,
            internal_callbacks: None,
            policy: InternalRowPolicy::default(),
        }
    }
}

impl<A, L, C, R> PaginatorBuilder<A, L, C, R> {
    /// Sets the adapter to paginate.
    #[must_use]
    pub fn adapter(mut self, adapter: A) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Sets the layout whose visible range drives the triggers.
    #[must_use]
    pub fn layout(mut self, layout: L) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Sets the distance from a boundary, in items, at which load-more fires.
    #[must_use]
    pub fn loading_trigger_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enables or disables loading rows.
    ///
    /// Without loading rows the adapter is presented as-is, the
    /// `set_has_more_*` calls do nothing, and the first and last items act as
    /// the boundaries.
    #[must_use]
    pub fn add_loading_row(mut self, add: bool) -> Self {
        self.add_loading_row = add;
        self
    }

    /// Sets the loading-row renderer.
    #[must_use]
    pub fn loading_row_renderer<R2>(self, renderer: R2) -> PaginatorBuilder<A, L, C, R2> {
        PaginatorBuilder {
            callbacks: self.callbacks,
            adapter: self.adapter,
            layout: self.layout,
            renderer,
            threshold: self.threshold,
            add_loading_row: self.add_loading_row,
            loading_span: self.loading_span,
            span_lookup: self.span_lookup,
            internal_callbacks: self.internal_callbacks,
            policy: self.policy,
        }
    }

    /// Sets the span of loading rows in grid layouts; defaults to the full
    /// line.
    #[must_use]
    pub fn loading_span_lookup(mut self, lookup: impl LoadingSpanLookup + 'static) -> Self {
        self.loading_span = Some(Box::new(lookup));
        self
    }

    /// Sets the host's span lookup for ordinary items, in inner space.
    #[must_use]
    pub fn span_size_lookup(mut self, lookup: impl SpanSizeLookup + 'static) -> Self {
        self.span_lookup = Some(Box::new(lookup));
        self
    }

    /// Sets the callbacks driven by the internal loading rows.
    #[must_use]
    pub fn internal_callbacks(mut self, callbacks: impl PaginationCallbacks + 'static) -> Self {
        self.internal_callbacks = Some(Box::new(callbacks));
        self
    }

    /// Sets how internal-row changes are notified.
    #[must_use]
    pub fn internal_row_policy(mut self, policy: InternalRowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Attaches pagination.
    ///
    /// # Errors
    ///
    /// Returns [`PaginateError::MissingAdapter`] or
    /// [`PaginateError::MissingLayout`] if either was never set.
    pub fn build(self) -> Result<Paginator<A, L, C, R>, PaginateError>
    where
        A: ListAdapter,
        L: VisibleItems,
        C: PaginationCallbacks,
    {
        let Some(adapter) = self.adapter else {
            return Err(PaginateError::MissingAdapter);
        };
        let Some(layout) = self.layout else {
            return Err(PaginateError::MissingLayout);
        };

        let spans = if self.add_loading_row && layout.span_count() > 1 {
            let wrapped = self
                .span_lookup
                .unwrap_or_else(|| Box::new(SingleSpan));
            let loading = self
                .loading_span
                .unwrap_or_else(|| Box::new(FullSpan(layout.span_count())));
            Spans::Decorated(LoadingSpanSizeLookup::new(wrapped, loading))
        } else {
            match self.span_lookup {
                Some(lookup) => Spans::Host(lookup),
                None => Spans::None,
            }
        };

        let adapter = if self.add_loading_row {
            Attached::Decorated(
                LoadingAdapter::with_renderer(adapter, self.renderer)
                    .with_internal_row_policy(self.policy),
            )
        } else {
            Attached::Bare {
                inner: adapter,
                observers: ChangeObservers::new(),
            }
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            threshold = self.threshold,
            add_loading_row = self.add_loading_row,
            span_count = layout.span_count(),
            "paginator attached"
        );

        Ok(Paginator {
            adapter,
            layout,
            callbacks: self.callbacks,
            internal_callbacks: self.internal_callbacks,
            threshold: self.threshold,
            spans,
        })
    }
}

impl<A, L, C, R> fmt::Debug for PaginatorBuilder<A, L, C, R>
where
    A: fmt::Debug,
    L: fmt::Debug,
    C: fmt::Debug,
    R: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatorBuilder")
            .field("callbacks", &self.callbacks)
            .field("adapter", &self.adapter)
            .field("layout", &self.layout)
            .field("renderer", &self.renderer)
            .field("threshold", &self.threshold)
            .field("add_loading_row", &self.add_loading_row)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
