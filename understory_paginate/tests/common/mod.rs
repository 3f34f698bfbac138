// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared fixtures for the `understory_paginate` integration tests.

#![allow(dead_code, reason = "not every test file uses every fixture")]

use std::cell::RefCell;
use std::rc::Rc;

use understory_paginate::{
    ChangeEvent, ItemId, ListAdapter, LoadingAdapter, LoadingRowRenderer, ViewType,
};

pub type Event = ChangeEvent<&'static str>;
pub type Log = Rc<RefCell<Vec<Event>>>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Row {
    #[default]
    Blank,
    Item(u32),
    Loading(usize),
}

/// An inner adapter over unique item ids.
#[derive(Debug, Default)]
pub struct Items {
    pub ids: Vec<u32>,
    next: u32,
}

impl Items {
    pub fn with_len(len: usize) -> Self {
        let mut items = Self::default();
        items.insert(0, len);
        items
    }

    /// Inserts `count` fresh ids at `at`.
    pub fn insert(&mut self, at: usize, count: usize) -> Event {
        let count_u32 = u32::try_from(count).expect("test lists stay small");
        let fresh: Vec<u32> = (self.next..self.next + count_u32).collect();
        self.next += count_u32;
        self.ids.splice(at..at, fresh);
        ChangeEvent::Inserted { start: at, count }
    }

    pub fn remove(&mut self, at: usize, count: usize) -> Event {
        self.ids.drain(at..at + count);
        ChangeEvent::Removed { start: at, count }
    }

    /// Moves the block at `from` so it starts at `to` afterwards.
    pub fn move_block(&mut self, from: usize, to: usize, count: usize) -> Event {
        let block: Vec<u32> = self.ids.drain(from..from + count).collect();
        self.ids.splice(to..to, block);
        ChangeEvent::Moved { from, to, count }
    }
}

impl ListAdapter for Items {
    type Row = Row;
    type Payload = &'static str;

    fn item_count(&self) -> usize {
        self.ids.len()
    }

    fn view_type(&self, index: usize) -> ViewType {
        ViewType(self.ids[index] % 3)
    }

    fn has_stable_ids(&self) -> bool {
        true
    }

    fn item_id(&self, index: usize) -> Option<ItemId> {
        Some(u64::from(self.ids[index]))
    }

    fn create_row(&mut self, _view_type: ViewType) -> Row {
        Row::Blank
    }

    fn bind_row(&mut self, row: &mut Row, index: usize) {
        *row = Row::Item(self.ids[index]);
    }
}

/// Loading-row renderer that records the bound position.
#[derive(Debug, Default)]
pub struct Spinner;

impl LoadingRowRenderer<Row> for Spinner {
    fn create_row(&mut self) -> Row {
        Row::Loading(usize::MAX)
    }

    fn bind_row(&mut self, row: &mut Row, position: usize) {
        *row = Row::Loading(position);
    }
}

/// Records every decorated-space event the adapter emits.
pub fn record<R>(adapter: &mut LoadingAdapter<Items, R>) -> Log {
    let log = Log::default();
    let sink = Rc::clone(&log);
    adapter.register_observer(move |event: &Event| sink.borrow_mut().push(event.clone()));
    log
}

/// What the list widget shows: `None` for loading rows, else the item id.
pub fn snapshot<R: LoadingRowRenderer<Row>>(
    adapter: &LoadingAdapter<Items, R>,
) -> Vec<Option<u32>> {
    (0..adapter.item_count())
        .map(|position| {
            adapter
                .to_inner(position)
                .map(|index| adapter.inner().ids[index])
        })
        .collect()
}

/// A list widget's view of the decorated sequence, maintained only from
/// change events.
#[derive(Debug, Default)]
pub struct Mirror {
    /// `None` marks rows inserted since the last check.
    slots: Vec<Option<Option<u32>>>,
    reset: bool,
}

impl Mirror {
    pub fn new(actual: &[Option<u32>]) -> Self {
        Self {
            slots: actual.iter().copied().map(Some).collect(),
            reset: false,
        }
    }

    pub fn apply(&mut self, event: &Event) {
        if self.reset {
            return;
        }
        let len = self.slots.len();
        match *event {
            ChangeEvent::Inserted { start, count } => {
                assert!(start <= len, "insert at {start} past {len}");
                self.slots
                    .splice(start..start, std::iter::repeat_n(None, count));
            }
            ChangeEvent::Removed { start, count } => {
                assert!(start + count <= len, "remove {start}+{count} past {len}");
                self.slots.drain(start..start + count);
            }
            ChangeEvent::Changed { start, count, .. } => {
                assert!(start + count <= len, "change {start}+{count} past {len}");
            }
            ChangeEvent::Moved { from, to, count } => {
                assert!(from + count <= len, "move from {from}+{count} past {len}");
                let block: Vec<_> = self.slots.drain(from..from + count).collect();
                assert!(to <= self.slots.len(), "move to {to} past {len}");
                self.slots.splice(to..to, block);
            }
            ChangeEvent::Reset => self.reset = true,
        }
    }

    /// Compares the mirrored rows with the adapter, then adopts its state.
    pub fn check(&mut self, actual: &[Option<u32>]) {
        if !self.reset {
            assert_eq!(self.slots.len(), actual.len(), "mirrored item count");
            for (position, (slot, actual)) in self.slots.iter().zip(actual).enumerate() {
                if let Some(seen) = slot {
                    assert_eq!(seen, actual, "row at {position}");
                }
            }
        }
        *self = Self::new(actual);
    }
}
