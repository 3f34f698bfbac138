// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible-range capability of layout strategies.
//!
//! The paginator only needs to know which decorated positions are on screen.
//! Hosts either implement [`VisibleItems`] on their own layout, or keep one of
//! the snapshot types here up to date from their layout pass.

use smallvec::SmallVec;

/// Inclusive range of visible decorated positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleRange {
    /// First visible position.
    pub first: usize,
    /// Last visible position, `>= first`.
    pub last: usize,
}

impl VisibleRange {
    /// Creates a range, swapping the ends if needed.
    #[must_use]
    pub fn new(first: usize, last: usize) -> Self {
        Self {
            first: first.min(last),
            last: first.max(last),
        }
    }
}

/// A layout strategy that can report its visible item range.
pub trait VisibleItems {
    /// Returns the number of items the layout is laying out.
    fn item_count(&self) -> usize;

    /// Returns the visible range, or `None` while nothing is laid out.
    fn visible_range(&self) -> Option<VisibleRange>;

    /// Returns the number of spans per line; `1` for plain linear layouts.
    fn span_count(&self) -> usize {
        1
    }
}

/// A linear (or, with `span_count > 1`, grid) layout snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinearLayout {
    item_count: usize,
    span_count: usize,
    visible: Option<VisibleRange>,
}

impl LinearLayout {
    /// Creates a single-span layout with nothing visible.
    #[must_use]
    pub fn new(item_count: usize) -> Self {
        Self::grid(item_count, 1)
    }

    /// Creates a grid layout with `span_count` spans per line.
    #[must_use]
    pub fn grid(item_count: usize, span_count: usize) -> Self {
        Self {
            item_count,
            span_count: span_count.max(1),
            visible: None,
        }
    }

    /// Updates the item count.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }

    /// Updates the first and last visible positions.
    pub fn set_visible(&mut self, first: usize, last: usize) {
        self.visible = Some(VisibleRange::new(first, last));
    }

    /// Marks nothing as visible.
    pub fn clear_visible(&mut self) {
        self.visible = None;
    }
}

impl VisibleItems for LinearLayout {
    fn item_count(&self) -> usize {
        self.item_count
    }

    fn visible_range(&self) -> Option<VisibleRange> {
        self.visible
    }

    fn span_count(&self) -> usize {
        self.span_count
    }
}

/// A staggered-grid layout snapshot tracking the visible range of each span.
///
/// The reported range covers every span: the smallest first position and the
/// largest last position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaggeredGridLayout {
    item_count: usize,
    spans: SmallVec<[Option<VisibleRange>; 4]>,
}

impl StaggeredGridLayout {
    /// Creates a layout with `span_count` spans and nothing visible.
    #[must_use]
    pub fn new(item_count: usize, span_count: usize) -> Self {
        Self {
            item_count,
            spans: core::iter::repeat_n(None, span_count.max(1)).collect(),
        }
    }

    /// Updates the item count.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
    }

    /// Updates the visible range of one span; out-of-range spans are ignored.
    pub fn set_span_visible(&mut self, span: usize, first: usize, last: usize) {
        if let Some(slot) = self.spans.get_mut(span) {
            *slot = Some(VisibleRange::new(first, last));
        }
    }

    /// Marks nothing as visible in any span.
    pub fn clear_visible(&mut self) {
        self.spans.iter_mut().for_each(|slot| *slot = None);
    }
}

impl VisibleItems for StaggeredGridLayout {
    fn item_count(&self) -> usize {
        self.item_count
    }

    fn visible_range(&self) -> Option<VisibleRange> {
        self.spans.iter().flatten().fold(None, |acc, span| {
            Some(match acc {
                None => *span,
                Some(acc) => VisibleRange {
                    first: acc.first.min(span.first),
                    last: acc.last.max(span.last),
                },
            })
        })
    }

    fn span_count(&self) -> usize {
        self.spans.len()
    }
}
