// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Span-size lookup for grid layouts.
//!
//! Grid layouts ask how many spans each position occupies. Loading rows
//! usually need a different span than ordinary items (by default, the full
//! line), so [`LoadingSpanSizeLookup`] answers for loading rows itself and
//! forwards every other position, mapped into inner space, to the lookup the
//! host had installed.

use alloc::boxed::Box;
use core::fmt;

use crate::adapter::ListAdapter;
use crate::loading_adapter::LoadingAdapter;

/// Per-position span sizes of a grid layout.
pub trait SpanSizeLookup {
    /// Returns the number of spans the item at `position` occupies.
    fn span_size(&self, position: usize) -> usize;
}

impl<F: Fn(usize) -> usize> SpanSizeLookup for F {
    fn span_size(&self, position: usize) -> usize {
        self(position)
    }
}

/// Span size of loading rows.
pub trait LoadingSpanLookup {
    /// Returns the number of spans a loading row occupies.
    fn span_size(&self) -> usize;
}

/// Every item occupies one span.
#[derive(Copy, Clone, Debug, Default)]
pub struct SingleSpan;

impl SpanSizeLookup for SingleSpan {
    fn span_size(&self, _position: usize) -> usize {
        1
    }
}

/// Loading rows occupy the full line of `span_count` spans.
#[derive(Copy, Clone, Debug)]
pub struct FullSpan(pub usize);

impl LoadingSpanLookup for FullSpan {
    fn span_size(&self) -> usize {
        self.0
    }
}

/// Span lookup over a decorated adapter.
pub struct LoadingSpanSizeLookup {
    wrapped: Box<dyn SpanSizeLookup>,
    loading: Box<dyn LoadingSpanLookup>,
}

impl LoadingSpanSizeLookup {
    /// Wraps the host's lookup, answering `loading` for loading rows.
    #[must_use]
    pub fn new(wrapped: Box<dyn SpanSizeLookup>, loading: Box<dyn LoadingSpanLookup>) -> Self {
        Self { wrapped, loading }
    }

    /// Returns the span size of decorated `position`.
    #[must_use]
    pub fn span_size<A: ListAdapter, R>(
        &self,
        adapter: &LoadingAdapter<A, R>,
        position: usize,
    ) -> usize {
        match adapter.to_inner(position) {
            Some(inner) => self.wrapped.span_size(inner),
            None => self.loading.span_size(),
        }
    }

    /// Returns the wrapped lookup, discarding the loading-row override.
    #[must_use]
    pub fn into_wrapped(self) -> Box<dyn SpanSizeLookup> {
        self.wrapped
    }
}

impl fmt::Debug for LoadingSpanSizeLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingSpanSizeLookup")
            .field("loading_span", &self.loading.span_size())
            .finish_non_exhaustive()
    }
}
