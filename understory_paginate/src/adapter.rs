// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The list-adapter contract and loading-row rendering.

/// Identifies a family of interchangeable rows for recycling.
///
/// Rows with equal view types may be reused for one another by the host's
/// recycling pool.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewType(pub u32);

impl ViewType {
    /// The view type reported for loading rows.
    ///
    /// Inner adapters must never produce this value.
    pub const LOADING: Self = Self(u32::MAX - 50);
}

/// A stable item identifier, see [`ListAdapter::has_stable_ids`].
pub type ItemId = u64;

/// Provides items, view types, and rows for a list.
///
/// This is the contract the host list widget renders through. Indices are
/// dense in `0..item_count()`.
pub trait ListAdapter {
    /// The realized row value created and bound by the adapter.
    type Row;
    /// Payload attached to partial content changes.
    type Payload: Clone;

    /// Returns the number of items.
    fn item_count(&self) -> usize;

    /// Returns the view type of the item at `index`.
    fn view_type(&self, index: usize) -> ViewType {
        let _ = index;
        ViewType::default()
    }

    /// Returns `true` if [`ListAdapter::item_id`] is meaningful.
    fn has_stable_ids(&self) -> bool {
        false
    }

    /// Returns the stable id of the item at `index`, or `None` for no id.
    fn item_id(&self, index: usize) -> Option<ItemId> {
        let _ = index;
        None
    }

    /// Creates an unbound row for `view_type`.
    fn create_row(&mut self, view_type: ViewType) -> Self::Row;

    /// Binds `row` to the item at `index`.
    fn bind_row(&mut self, row: &mut Self::Row, index: usize);
}

/// Creates and binds loading rows.
pub trait LoadingRowRenderer<Row> {
    /// Creates an unbound loading row.
    fn create_row(&mut self) -> Row;

    /// Binds `row` for the loading row at decorated `position`.
    fn bind_row(&mut self, row: &mut Row, position: usize);
}

/// The default loading-row renderer: `Row::default()`, bound as-is.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultLoadingRow;

impl<Row: Default> LoadingRowRenderer<Row> for DefaultLoadingRow {
    fn create_row(&mut self) -> Row {
        Row::default()
    }

    fn bind_row(&mut self, _row: &mut Row, _position: usize) {}
}
