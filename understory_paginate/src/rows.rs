// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loading-row state and the decorated/inner index arithmetic.
//!
//! [`LoadingRows`] is a plain value: it holds the four loading-row flags and
//! answers position queries for a given inner item count. Nothing is
//! materialized; every query is recomputed from the flags.
//!
//! The decorated sequence is laid out as
//!
//! ```text
//! [start?] [inner 0 .. k, with internal rows spliced in] [end?]
//! ```
//!
//! An internal row anchored at inner index `k` sits directly before inner
//! item `k`. When both internal rows share an anchor, the internal-start row
//! comes first. While the inner sequence is empty no loading row is shown.

use smallvec::SmallVec;

/// Decorated positions of the loading rows that are currently shown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadingRowPositions {
    /// The row at the start of the list.
    pub start: Option<usize>,
    /// The row at the end of the list.
    pub end: Option<usize>,
    /// The internal row that loads towards the start.
    pub internal_start: Option<usize>,
    /// The internal row that loads towards the end.
    pub internal_end: Option<usize>,
}

impl LoadingRowPositions {
    /// Returns `true` if any loading row sits at `position`.
    #[must_use]
    pub fn contains(&self, position: usize) -> bool {
        [self.start, self.end, self.internal_start, self.internal_end].contains(&Some(position))
    }

    /// Iterates over the present positions in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> {
        let mut sorted: SmallVec<[usize; 4]> = [
            self.start,
            self.internal_start,
            self.internal_end,
            self.end,
        ]
        .into_iter()
        .flatten()
        .collect();
        sorted.sort_unstable();
        sorted.into_iter()
    }
}

/// The four loading-row flags of a decorated adapter.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadingRows {
    start: bool,
    end: bool,
    internal_start: Option<usize>,
    internal_end: Option<usize>,
}

impl LoadingRows {
    /// Creates a state with every loading row hidden.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            start: false,
            end: false,
            internal_start: None,
            internal_end: None,
        }
    }

    /// Returns `true` if the start row is requested.
    #[must_use]
    pub fn start(&self) -> bool {
        self.start
    }

    /// Returns `true` if the end row is requested.
    #[must_use]
    pub fn end(&self) -> bool {
        self.end
    }

    /// Returns the inner anchor of the internal-start row.
    #[must_use]
    pub fn internal_start(&self) -> Option<usize> {
        self.internal_start
    }

    /// Returns the inner anchor of the internal-end row.
    #[must_use]
    pub fn internal_end(&self) -> Option<usize> {
        self.internal_end
    }

    /// Returns `true` if an internal row may be anchored at `index`.
    ///
    /// Internal rows must lie strictly inside the inner sequence:
    /// `0 < index < inner_len - 1`.
    #[must_use]
    pub fn is_valid_internal(index: usize, inner_len: usize) -> bool {
        index > 0 && index < inner_len.saturating_sub(1)
    }

    pub(crate) fn set_start(&mut self, start: bool) -> bool {
        let changed = self.start != start;
        self.start = start;
        changed
    }

    pub(crate) fn set_end(&mut self, end: bool) -> bool {
        let changed = self.end != end;
        self.end = end;
        changed
    }

    pub(crate) fn set_internal_start(&mut self, anchor: Option<usize>) -> bool {
        let changed = self.internal_start != anchor;
        self.internal_start = anchor;
        changed
    }

    pub(crate) fn set_internal_end(&mut self, anchor: Option<usize>) -> bool {
        let changed = self.internal_end != anchor;
        self.internal_end = anchor;
        changed
    }

    /// Returns `true` if an internal row is requested.
    #[must_use]
    pub fn has_internal(&self) -> bool {
        self.internal_start.is_some() || self.internal_end.is_some()
    }

    /// Returns the number of loading rows shown over `inner_len` items.
    #[must_use]
    pub fn extra_rows(&self, inner_len: usize) -> usize {
        if inner_len == 0 {
            return 0;
        }
        usize::from(self.start)
            + usize::from(self.end)
            + usize::from(self.internal_start.is_some())
            + usize::from(self.internal_end.is_some())
    }

    /// Returns the decorated item count over `inner_len` items.
    #[must_use]
    pub fn item_count(&self, inner_len: usize) -> usize {
        inner_len + self.extra_rows(inner_len)
    }

    /// Returns the decorated position of the start row.
    #[must_use]
    pub fn start_position(&self, inner_len: usize) -> Option<usize> {
        (self.start && inner_len > 0).then_some(0)
    }

    /// Returns the decorated position of the end row.
    #[must_use]
    pub fn end_position(&self, inner_len: usize) -> Option<usize> {
        (self.end && inner_len > 0).then(|| self.item_count(inner_len) - 1)
    }

    /// Returns the decorated position of the internal-start row.
    #[must_use]
    pub fn internal_start_position(&self, inner_len: usize) -> Option<usize> {
        if inner_len == 0 {
            return None;
        }
        let anchor = self.internal_start?;
        let before_end = self.internal_end.is_some_and(|end| end < anchor);
        Some(anchor + usize::from(self.start) + usize::from(before_end))
    }

    /// Returns the decorated position of the internal-end row.
    #[must_use]
    pub fn internal_end_position(&self, inner_len: usize) -> Option<usize> {
        if inner_len == 0 {
            return None;
        }
        let anchor = self.internal_end?;
        let after_start = self.internal_start.is_some_and(|start| start <= anchor);
        Some(anchor + usize::from(self.start) + usize::from(after_start))
    }

    /// Returns all loading-row positions over `inner_len` items.
    #[must_use]
    pub fn positions(&self, inner_len: usize) -> LoadingRowPositions {
        LoadingRowPositions {
            start: self.start_position(inner_len),
            end: self.end_position(inner_len),
            internal_start: self.internal_start_position(inner_len),
            internal_end: self.internal_end_position(inner_len),
        }
    }

    /// Returns `true` if a loading row sits at decorated `position`.
    #[must_use]
    pub fn is_loading_row(&self, position: usize, inner_len: usize) -> bool {
        self.positions(inner_len).contains(position)
    }

    /// Maps a decorated position to the inner index it shows.
    ///
    /// Returns `None` for loading rows and positions past the end.
    #[must_use]
    pub fn to_inner(&self, position: usize, inner_len: usize) -> Option<usize> {
        if position >= self.item_count(inner_len) {
            return None;
        }
        let rows = self.positions(inner_len);
        if rows.contains(position) {
            return None;
        }
        let mut decrease = usize::from(self.start);
        if rows.internal_start.is_some_and(|row| position > row) {
            decrease += 1;
        }
        if rows.internal_end.is_some_and(|row| position > row) {
            decrease += 1;
        }
        Some(position - decrease)
    }

    /// Maps an inner index to its decorated position.
    ///
    /// This is pure arithmetic on the flags and accepts any index, including
    /// one past the last item.
    #[must_use]
    pub fn from_inner(&self, index: usize) -> usize {
        let mut increase = usize::from(self.start);
        if self.internal_start.is_some_and(|anchor| index >= anchor) {
            increase += 1;
        }
        if self.internal_end.is_some_and(|anchor| index >= anchor) {
            increase += 1;
        }
        index + increase
    }

    /// Splits the inner range `start..start + count` into contiguous
    /// decorated runs, returned as `(decorated_start, len)` pairs in
    /// ascending order.
    ///
    /// A run ends wherever an internal row sits between two of the items.
    #[must_use]
    pub fn decorated_runs(&self, start: usize, count: usize) -> SmallVec<[(usize, usize); 3]> {
        let end = start + count;
        let mut cuts: SmallVec<[usize; 2]> = [self.internal_start, self.internal_end]
            .into_iter()
            .flatten()
            .filter(|&anchor| anchor > start && anchor < end)
            .collect();
        cuts.sort_unstable();
        cuts.dedup();

        let mut runs = SmallVec::new();
        let mut run_start = start;
        for cut in cuts.into_iter().chain(core::iter::once(end)) {
            if cut > run_start {
                runs.push((self.from_inner(run_start), cut - run_start));
            }
            run_start = cut;
        }
        runs
    }
}
