// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Kind registry: maps item kinds to view types and renderer factories.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::{AdapterError, ItemKind, KindShape, ListItem, Renderer, RendererFactory};

/// Small integer the host uses to decide which renderers can be recycled for which rows.
///
/// View types are issued in registration order, starting at zero, and stay stable
/// for the lifetime of the registry that issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewType(u32);

impl ViewType {
    /// Creates a view type from a raw value, for hosts that store view types as integers.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

struct Entry<I: ListItem, R: Renderer> {
    kind: I::Kind,
    factory: Box<dyn RendererFactory<I, R>>,
}

/// Bidirectional map between concrete item kinds and [`ViewType`]s, plus the
/// factory registered for each kind.
///
/// Lookup is by exact kind: a factory registered for a kind never serves rows of
/// a different kind, even one that [`is_a`](ItemKind::is_a) descendant.
pub struct TypeRegistry<I: ListItem, R: Renderer> {
    entries: Vec<Entry<I, R>>,
    view_types: HashMap<I::Kind, ViewType>,
}

impl<I: ListItem, R: Renderer> fmt::Debug for TypeRegistry<I, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field(
                "kinds",
                &self.entries.iter().map(|e| e.kind).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl<I: ListItem, R: Renderer> Default for TypeRegistry<I, R> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            view_types: HashMap::new(),
        }
    }
}

impl<I: ListItem, R: Renderer> TypeRegistry<I, R> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` for rows of `kind` and returns the issued view type.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::UnsupportedKind`] if `kind` is not [`KindShape::Concrete`].
    /// - [`AdapterError::DuplicateKind`] if `kind` already has a factory.
    pub fn register<F>(
        &mut self,
        kind: I::Kind,
        factory: F,
    ) -> Result<ViewType, AdapterError<I::Kind>>
    where
        F: RendererFactory<I, R> + 'static,
    {
        self.register_boxed(kind, Box::new(factory))
    }

    /// Boxed form of [`register`](Self::register).
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn register_boxed(
        &mut self,
        kind: I::Kind,
        factory: Box<dyn RendererFactory<I, R>>,
    ) -> Result<ViewType, AdapterError<I::Kind>> {
        let shape = kind.shape();
        if shape != KindShape::Concrete {
            return Err(AdapterError::UnsupportedKind { kind, shape });
        }
        if self.view_types.contains_key(&kind) {
            return Err(AdapterError::DuplicateKind { kind });
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "An adapter never registers anywhere near u32::MAX kinds."
        )]
        let view_type = ViewType(self.entries.len() as u32);
        self.view_types.insert(kind, view_type);
        self.entries.push(Entry { kind, factory });
        log::debug!("registered {kind:?} as {view_type:?}");
        Ok(view_type)
    }

    /// Number of registered kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `kind` has a factory.
    #[must_use]
    pub fn contains(&self, kind: I::Kind) -> bool {
        self.view_types.contains_key(&kind)
    }

    /// Resolves the view type registered for `kind`.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnregisteredKind`] if nothing was registered for `kind`.
    pub fn view_type_of(&self, kind: I::Kind) -> Result<ViewType, AdapterError<I::Kind>> {
        self.view_types
            .get(&kind)
            .copied()
            .ok_or(AdapterError::UnregisteredKind { kind })
    }

    /// Returns the kind a view type was issued for.
    #[must_use]
    pub fn kind_of(&self, view_type: ViewType) -> Option<I::Kind> {
        self.entries.get(view_type.idx()).map(|e| e.kind)
    }

    /// Builds a renderer for `view_type` with its registered factory.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnknownViewType`] if `view_type` was not issued by this registry.
    pub fn create(
        &self,
        view_type: ViewType,
        parent: &mut R::Parent,
    ) -> Result<R, AdapterError<I::Kind>> {
        let entry = self
            .entries
            .get(view_type.idx())
            .ok_or(AdapterError::UnknownViewType(view_type))?;
        Ok(entry.factory.create(parent))
    }

    /// Binds `item` into `renderer` using the factory registered for the item's kind.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnregisteredKind`] if the item's kind has no factory.
    pub fn bind(&self, renderer: &mut R, item: &I) -> Result<(), AdapterError<I::Kind>> {
        let view_type = self.view_type_of(item.kind())?;
        self.entries[view_type.idx()].factory.bind(renderer, item);
        Ok(())
    }
}
