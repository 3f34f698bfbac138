// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-side load-more callbacks.

/// Loading state and load-more actions owned by the caller.
///
/// The paginator keeps no in-flight state of its own: it calls
/// [`PaginationCallbacks::on_load_more`] whenever the end boundary is within
/// the trigger threshold, [`is_loading`](PaginationCallbacks::is_loading) is
/// `false`, and [`has_loaded_all_items`](PaginationCallbacks::has_loaded_all_items)
/// is `false`. Callers therefore flip `is_loading` to `true` inside
/// `on_load_more` to avoid duplicate requests.
///
/// The start-direction methods default to a list that never loads towards
/// its start.
pub trait PaginationCallbacks {
    /// Requests the next page at the end of the list.
    fn on_load_more(&mut self);

    /// Returns `true` while an end-direction request is in flight.
    fn is_loading(&self) -> bool;

    /// Returns `true` once nothing more can be loaded at the end.
    fn has_loaded_all_items(&self) -> bool;

    /// Requests the previous page at the start of the list.
    fn on_load_more_from_start(&mut self) {}

    /// Returns `true` while a start-direction request is in flight.
    fn is_loading_from_start(&self) -> bool {
        false
    }

    /// Returns `true` once nothing more can be loaded at the start.
    fn has_loaded_all_items_from_start(&self) -> bool {
        true
    }
}

impl<C: PaginationCallbacks + ?Sized> PaginationCallbacks for &mut C {
    fn on_load_more(&mut self) {
        (**self).on_load_more();
    }

    fn is_loading(&self) -> bool {
        (**self).is_loading()
    }

    fn has_loaded_all_items(&self) -> bool {
        (**self).has_loaded_all_items()
    }

    fn on_load_more_from_start(&mut self) {
        (**self).on_load_more_from_start();
    }

    fn is_loading_from_start(&self) -> bool {
        (**self).is_loading_from_start()
    }

    fn has_loaded_all_items_from_start(&self) -> bool {
        (**self).has_loaded_all_items_from_start()
    }
}
