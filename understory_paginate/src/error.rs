// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type shared by the adapter setters and the paginator builder.

use core::fmt;

/// Errors reported by this crate.
///
/// Every variant signals programmer misuse: nothing here is retried, and a
/// call that returns an error leaves all state untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PaginateError {
    /// [`PaginatorBuilder::build`](crate::PaginatorBuilder::build) was called
    /// without an adapter.
    MissingAdapter,
    /// [`PaginatorBuilder::build`](crate::PaginatorBuilder::build) was called
    /// without a layout.
    MissingLayout,
    /// An internal loading row was anchored outside the interior of the inner
    /// sequence.
    ///
    /// Valid anchors satisfy `0 < index < inner_len - 1`.
    InvalidInternalPosition {
        /// The rejected anchor, in inner space.
        index: usize,
        /// The inner item count at the time of the call.
        inner_len: usize,
    },
}

impl fmt::Display for PaginateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAdapter => f.write_str("an adapter needs to be set before building"),
            Self::MissingLayout => f.write_str("a layout needs to be set before building"),
            Self::InvalidInternalPosition { index, inner_len } => write!(
                f,
                "internal loading row at {index} is outside the interior of {inner_len} items"
            ),
        }
    }
}

impl core::error::Error for PaginateError {}
