// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change notifications sent to the host list widget.

use smallvec::SmallVec;

/// Receiver of structural change notifications.
///
/// Every mutation the adapter performs is followed by exactly one matching
/// notification (two for a swap). Hosts use these to invalidate realized rows.
pub trait ChangeObserver {
    /// The whole data set changed; all realized rows are stale.
    fn data_set_changed(&mut self);

    /// `count` rows starting at `start` changed in place.
    fn range_changed(&mut self, start: usize, count: usize);

    /// `count` rows were inserted at `start`.
    fn range_inserted(&mut self, start: usize, count: usize);

    /// `count` rows were removed starting at `start`.
    fn range_removed(&mut self, start: usize, count: usize);

    /// The row at `position` changed in place.
    fn item_changed(&mut self, position: usize) {
        self.range_changed(position, 1);
    }
}

/// A single recorded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// See [`ChangeObserver::data_set_changed`].
    DataSetChanged,
    /// See [`ChangeObserver::range_changed`].
    RangeChanged {
        /// First changed position.
        start: usize,
        /// Number of changed rows.
        count: usize,
    },
    /// See [`ChangeObserver::range_inserted`].
    RangeInserted {
        /// Position of the first inserted row.
        start: usize,
        /// Number of inserted rows.
        count: usize,
    },
    /// See [`ChangeObserver::range_removed`].
    RangeRemoved {
        /// Position of the first removed row.
        start: usize,
        /// Number of removed rows.
        count: usize,
    },
    /// See [`ChangeObserver::item_changed`].
    ItemChanged(usize),
}

/// A [`ChangeObserver`] that buffers notifications until the host drains them.
///
/// Hosts that apply invalidation once per frame can let changes accumulate and
/// call [`ChangeLog::take`] when they next lay out the list.
///
/// A buffered [`Change::DataSetChanged`] stands for the whole batch: it drops the
/// entries recorded before it, and later entries are ignored until the log is
/// drained or cleared. A host replaying the batch re-reads the item count once
/// and never applies an insert or removal twice.
#[derive(Debug, Clone, Default)]
pub struct ChangeLog {
    changes: SmallVec<[Change; 4]>,
}

impl ChangeLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the buffered changes in the order they were recorded.
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Returns `true` if nothing was recorded since the last [`take`](Self::take).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Drains the buffered changes.
    pub fn take(&mut self) -> SmallVec<[Change; 4]> {
        core::mem::take(&mut self.changes)
    }

    /// Discards the buffered changes.
    pub fn clear(&mut self) {
        self.changes.clear();
    }

    fn record(&mut self, change: Change) {
        if self.changes.first() != Some(&Change::DataSetChanged) {
            self.changes.push(change);
        }
    }
}

impl ChangeObserver for ChangeLog {
    fn data_set_changed(&mut self) {
        // Subsumes everything recorded before it.
        self.changes.clear();
        self.changes.push(Change::DataSetChanged);
    }

    fn range_changed(&mut self, start: usize, count: usize) {
        self.record(Change::RangeChanged { start, count });
    }

    fn range_inserted(&mut self, start: usize, count: usize) {
        self.record(Change::RangeInserted { start, count });
    }

    fn range_removed(&mut self, start: usize, count: usize) {
        self.record(Change::RangeRemoved { start, count });
    }

    fn item_changed(&mut self, position: usize) {
        self.record(Change::ItemChanged(position));
    }
}

/// Applies `batch` to a host row count the way a recycling list would, checking
/// that every notification addresses rows the host knows about.
#[cfg(test)]
pub(crate) fn replay(host: &mut usize, batch: &[Change], item_count: usize) {
    for change in batch {
        match *change {
            Change::DataSetChanged => *host = item_count,
            Change::RangeInserted { start, count } => {
                assert!(start <= *host, "insert at {start} past {host} rows");
                *host += count;
            }
            Change::RangeRemoved { start, count } => {
                assert!(start + count <= *host, "removal {start}+{count} past {host} rows");
                *host -= count;
            }
            Change::RangeChanged { start, count } => {
                assert!(start + count <= *host, "change {start}+{count} past {host} rows");
            }
            Change::ItemChanged(position) => {
                assert!(position < *host, "change at {position} past {host} rows");
            }
        }
    }
}
