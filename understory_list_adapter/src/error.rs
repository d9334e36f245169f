// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the adapter.

use thiserror::Error;

use crate::{KindShape, ViewType};

/// Error raised by registration, dispatch, and bounds-checked store updates.
///
/// `K` is the item kind tag. Registration errors are meant to surface at startup;
/// dispatch errors mean an item reached the list without a matching registration
/// and rendering of that position must be abandoned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError<K> {
    /// A factory was already registered for this kind.
    #[error("{kind:?} was registered already")]
    DuplicateKind {
        /// The kind registered twice.
        kind: K,
    },
    /// The kind is not a concrete single-row kind.
    #[error("{shape:?} kind {kind:?} is not supported here")]
    UnsupportedKind {
        /// The rejected kind.
        kind: K,
        /// Its declared shape.
        shape: KindShape,
    },
    /// An item in the list has a kind with no registered factory.
    #[error("{kind:?} was not registered")]
    UnregisteredKind {
        /// The unresolved kind.
        kind: K,
    },
    /// The host asked for a view type this adapter never issued.
    #[error("unknown view type {0:?}")]
    UnknownViewType(ViewType),
    /// A position outside the list was addressed.
    #[error("position {index} is out of range for {len} items")]
    IndexOutOfRange {
        /// The offending position.
        index: usize,
        /// Number of items at the time of the call.
        len: usize,
    },
}
