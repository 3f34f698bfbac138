// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_paginate --heading-base-level=0

//! Understory Paginate: infinite-scroll pagination primitives.
//!
//! This crate detects when a list has been scrolled near one of its
//! boundaries and asks the caller to fetch more data, while optionally showing
//! "loading" rows at those boundaries. It is renderer-agnostic: the host list
//! widget keeps owning rendering, recycling, and scroll delivery.
//!
//! The core concepts are:
//!
//! - [`ListAdapter`]: the contract a list widget renders through (item count,
//!   view types, stable ids, row creation and binding).
//! - [`LoadingAdapter`]: a [`ListAdapter`] decorator that splices up to four
//!   synthetic loading rows into the item sequence (start, end, and two
//!   internal rows) and translates every position between the inner index
//!   space and the decorated one. Inner [`ChangeEvent`]s are re-emitted in
//!   decorated space to registered observers.
//! - [`LoadingRows`]: the flag state and index arithmetic behind the
//!   decoration, usable on its own.
//! - [`Paginator`]: the boundary-trigger controller. On every scroll tick it
//!   compares each loading row's position with the layout's
//!   [`VisibleRange`] and fires [`PaginationCallbacks`] once a boundary is
//!   within the trigger threshold.
//! - [`VisibleItems`]: the layout capability the controller needs, with
//!   [`LinearLayout`] (also covering grids) and [`StaggeredGridLayout`]
//!   snapshots provided.
//!
//! The controller keeps no request state of its own. The caller's callbacks
//! report whether a request is in flight and whether everything has been
//! loaded, and the caller toggles the loading rows once a fetch completes.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_paginate::{ListAdapter, LoadingAdapter, ViewType};
//!
//! #[derive(Debug)]
//! struct Numbers(usize);
//!
//! impl ListAdapter for Numbers {
//!     type Row = Option<usize>;
//!     type Payload = ();
//!
//!     fn item_count(&self) -> usize {
//!         self.0
//!     }
//!
//!     fn create_row(&mut self, _view_type: ViewType) -> Option<usize> {
//!         None
//!     }
//!
//!     fn bind_row(&mut self, row: &mut Option<usize>, index: usize) {
//!         *row = Some(index);
//!     }
//! }
//!
//! let mut adapter = LoadingAdapter::new(Numbers(5));
//! adapter.set_start_loading(true);
//! adapter.set_end_loading(true);
//!
//! // [loading] 0 1 2 3 4 [loading]
//! assert_eq!(adapter.item_count(), 7);
//! assert_eq!(adapter.view_type(0), ViewType::LOADING);
//! assert_eq!(adapter.to_inner(1), Some(0));
//! assert_eq!(adapter.from_inner(4), 5);
//! assert!(adapter.is_loading_row(6));
//! ```
//!
//! This crate is `no_std` and uses `alloc`. Enable the `tracing` feature to
//! emit `tracing` events for loading-row toggles and fired callbacks.

#![no_std]

extern crate alloc;

mod adapter;
mod callbacks;
mod error;
mod event;
mod layout;
mod loading_adapter;
mod paginator;
mod rows;
mod span;

pub use adapter::{DefaultLoadingRow, ItemId, ListAdapter, LoadingRowRenderer, ViewType};
pub use callbacks::PaginationCallbacks;
pub use error::PaginateError;
pub use event::{ChangeEvent, ChangeObserver, ChangeObservers, ObserverId};
pub use layout::{LinearLayout, StaggeredGridLayout, VisibleItems, VisibleRange};
pub use loading_adapter::{InternalRowPolicy, LoadingAdapter};
pub use paginator::{
    Attached, DEFAULT_LOADING_TRIGGER_THRESHOLD, Detached, Paginator, PaginatorBuilder, Triggered,
};
pub use rows::{LoadingRowPositions, LoadingRows};
pub use span::{FullSpan, LoadingSpanLookup, LoadingSpanSizeLookup, SingleSpan, SpanSizeLookup};
