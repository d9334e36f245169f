// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The base adapter: kind dispatch over an item store, with host notifications.

use alloc::boxed::Box;

use crate::{
    AdapterError, ChangeLog, ChangeObserver, ItemStore, ListItem, Renderer, RendererFactory,
    TypeRegistry, ViewType,
};

/// A list adapter that renders heterogeneous items through per-kind factories.
///
/// The adapter sits between a caller that owns the data and a host list widget
/// that owns the renderers:
///
/// - the caller registers one [`RendererFactory`] per concrete item kind and
///   mutates the item sequence through the adapter,
/// - each mutation is reported to the [`ChangeObserver`] `O` with the smallest
///   matching notification,
/// - the host asks for [`item_count`](Self::item_count) and
///   [`view_type`](Self::view_type), then calls
///   [`create_renderer`](Self::create_renderer) and
///   [`bind_renderer`](Self::bind_renderer).
///
/// Mutating through [`store_mut`](Self::store_mut) skips notification; the
/// caller then reports the change itself through
/// [`observer_mut`](Self::observer_mut).
///
/// ## Example
///
/// ```rust
/// use understory_list_adapter::{
///     Change, ItemKind, ListAdapter, ListItem, Renderer, factory_fn,
/// };
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Kind {
///     Title,
///     Body,
/// }
/// impl ItemKind for Kind {}
///
/// #[derive(Debug, PartialEq)]
/// enum Entry {
///     Title(&'static str),
///     Body(&'static str),
/// }
/// impl ListItem for Entry {
///     type Kind = Kind;
///     fn kind(&self) -> Kind {
///         match self {
///             Self::Title(_) => Kind::Title,
///             Self::Body(_) => Kind::Body,
///         }
///     }
/// }
///
/// #[derive(Default)]
/// struct Text(String);
/// impl Renderer for Text {
///     type Parent = ();
/// }
///
/// let text = |_: &mut ()| Text::default();
/// let mut adapter: ListAdapter<Entry, Text> = ListAdapter::new();
/// adapter
///     .register(Kind::Title, factory_fn(text, |r: &mut Text, e: &Entry| {
///         if let Entry::Title(s) = e {
///             r.0 = s.to_uppercase();
///         }
///     }))
///     .unwrap();
/// adapter
///     .register(Kind::Body, factory_fn(text, |r: &mut Text, e: &Entry| {
///         if let Entry::Body(s) = e {
///             r.0 = s.to_string();
///         }
///     }))
///     .unwrap();
///
/// adapter.set_items([Entry::Title("news"), Entry::Body("all quiet")]);
/// assert_eq!(adapter.observer_mut().take().as_slice(), &[Change::DataSetChanged]);
///
/// // What the host does for position 0.
/// let view_type = adapter.view_type(0).unwrap();
/// let mut renderer = adapter.create_renderer(view_type, &mut ()).unwrap();
/// adapter.bind_renderer(&mut renderer, 0).unwrap();
/// assert_eq!(renderer.0, "NEWS");
/// ```
pub struct ListAdapter<I: ListItem, R: Renderer, O = ChangeLog> {
    registry: TypeRegistry<I, R>,
    store: ItemStore<I>,
    observer: O,
}

impl<I, R, O> core::fmt::Debug for ListAdapter<I, R, O>
where
    I: ListItem + core::fmt::Debug,
    R: Renderer,
    O: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ListAdapter")
            .field("registry", &self.registry)
            .field("store", &self.store)
            .field("observer", &self.observer)
            .finish()
    }
}

impl<I: ListItem, R: Renderer> Default for ListAdapter<I, R> {
    fn default() -> Self {
        Self::with_observer(ChangeLog::new())
    }
}

impl<I: ListItem, R: Renderer> ListAdapter<I, R> {
    /// Creates an adapter that buffers notifications in a [`ChangeLog`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: ListItem, R: Renderer, O: ChangeObserver> ListAdapter<I, R, O> {
    /// Creates an adapter that reports changes to `observer`.
    pub fn with_observer(observer: O) -> Self {
        Self {
            registry: TypeRegistry::new(),
            store: ItemStore::new(),
            observer,
        }
    }

    // --- registration ---

    /// Registers `factory` for items of `kind`.
    ///
    /// # Errors
    ///
    /// See [`TypeRegistry::register`].
    pub fn register<F>(
        &mut self,
        kind: I::Kind,
        factory: F,
    ) -> Result<ViewType, AdapterError<I::Kind>>
    where
        F: RendererFactory<I, R> + 'static,
    {
        self.registry.register(kind, factory)
    }

    /// Registers several factories in order, stopping at the first failure.
    ///
    /// Factories registered before the failure stay registered.
    ///
    /// # Errors
    ///
    /// See [`TypeRegistry::register`].
    pub fn register_all(
        &mut self,
        factories: impl IntoIterator<Item = (I::Kind, Box<dyn RendererFactory<I, R>>)>,
    ) -> Result<(), AdapterError<I::Kind>> {
        for (kind, factory) in factories {
            self.registry.register_boxed(kind, factory)?;
        }
        Ok(())
    }

    /// The kind registry.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry<I, R> {
        &self.registry
    }

    // --- host-facing dispatch ---

    /// Number of rows the host should show.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.store.len()
    }

    /// View type of the row at `position`.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::IndexOutOfRange`] for a position past the end.
    /// - [`AdapterError::UnregisteredKind`] if the item's kind has no factory.
    pub fn view_type(&self, position: usize) -> Result<ViewType, AdapterError<I::Kind>> {
        let item = self.item_at(position)?;
        self.registry.view_type_of(item.kind()).inspect_err(|err| {
            log::warn!("cannot render position {position}: {err}");
        })
    }

    /// Creates a renderer for `view_type`.
    ///
    /// # Errors
    ///
    /// [`AdapterError::UnknownViewType`] if this adapter never issued `view_type`.
    pub fn create_renderer(
        &self,
        view_type: ViewType,
        parent: &mut R::Parent,
    ) -> Result<R, AdapterError<I::Kind>> {
        self.registry.create(view_type, parent)
    }

    /// Binds the item at `position` into `renderer`.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::IndexOutOfRange`] for a position past the end.
    /// - [`AdapterError::UnregisteredKind`] if the item's kind has no factory.
    pub fn bind_renderer(
        &self,
        renderer: &mut R,
        position: usize,
    ) -> Result<(), AdapterError<I::Kind>> {
        let item = self.item_at(position)?;
        self.registry.bind(renderer, item).inspect_err(|err| {
            log::warn!("cannot bind position {position}: {err}");
        })
    }

    /// Forwards the host's attach notification to `renderer`.
    pub fn renderer_attached(&self, renderer: &mut R) {
        renderer.on_attached();
    }

    /// Forwards the host's detach notification to `renderer`.
    pub fn renderer_detached(&self, renderer: &mut R) {
        renderer.on_detached();
    }

    /// Forwards the host's recycle notification to `renderer`.
    pub fn renderer_recycled(&self, renderer: &mut R) {
        renderer.on_recycled();
    }

    // --- reads ---

    /// Item at `position`, or `None` if out of range.
    #[must_use]
    pub fn item(&self, position: usize) -> Option<&I> {
        self.store.get(position)
    }

    /// Items whose kind is `kind` or descends from it.
    pub fn items_of_kind(&self, kind: I::Kind) -> impl Iterator<Item = &I> + '_ {
        self.store.items_of_kind(kind)
    }

    /// Position of the first item equal to `item`.
    #[must_use]
    pub fn position_of(&self, item: &I) -> Option<usize>
    where
        I: PartialEq,
    {
        self.store.position_of(item)
    }

    /// Position of the first item of exactly `kind`.
    #[must_use]
    pub fn position_of_kind(&self, kind: I::Kind) -> Option<usize> {
        self.store.position_of_kind(kind)
    }

    /// Returns `true` if some item has exactly `kind`.
    #[must_use]
    pub fn contains_kind(&self, kind: I::Kind) -> bool {
        self.store.contains_kind(kind)
    }

    /// The item store, read-only.
    #[must_use]
    pub fn store(&self) -> &ItemStore<I> {
        &self.store
    }

    /// The item store, for mutations the caller reports itself.
    pub fn store_mut(&mut self) -> &mut ItemStore<I> {
        &mut self.store
    }

    /// The change observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The change observer, for manual notifications and for draining buffered changes.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    // --- notified mutations ---

    /// Replaces all items and invalidates the whole list.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = I>) {
        self.store.set_all(items);
        self.observer.data_set_changed();
    }

    /// Removes all items and invalidates the whole list.
    pub fn clear(&mut self) {
        self.store.clear();
        self.observer.data_set_changed();
    }

    /// Appends one item.
    pub fn append_item(&mut self, item: I) {
        let start = self.store.len();
        self.store.append(item);
        self.observer.range_inserted(start, 1);
    }

    /// Appends items and returns how many were added.
    pub fn append_items(&mut self, items: impl IntoIterator<Item = I>) -> usize {
        let start = self.store.len();
        let added = self.store.append_all(items);
        if added > 0 {
            self.observer.range_inserted(start, added);
        }
        added
    }

    /// Inserts `item` at `position`; returns `false` if `position > item_count()`.
    pub fn insert_item(&mut self, position: usize, item: I) -> bool {
        let inserted = self.store.insert_at(position, item);
        if inserted {
            self.observer.range_inserted(position, 1);
        }
        inserted
    }

    /// Inserts items at `position` and returns how many were inserted.
    ///
    /// Nothing is inserted if `position > item_count()`.
    pub fn insert_items(&mut self, position: usize, items: impl IntoIterator<Item = I>) -> usize {
        let inserted = self.store.insert_all(position, items);
        if inserted > 0 {
            self.observer.range_inserted(position, inserted);
        }
        inserted
    }

    /// Removes the item at `position`, if any.
    pub fn remove_item_at(&mut self, position: usize) -> Option<I> {
        let removed = self.store.remove_at(position)?;
        self.observer.range_removed(position, 1);
        Some(removed)
    }

    /// Removes the first item equal to `item`, if any.
    pub fn remove_item(&mut self, item: &I) -> Option<I>
    where
        I: PartialEq,
    {
        let position = self.store.position_of(item)?;
        self.remove_item_at(position)
    }

    /// Removes up to `count` items from `start` and returns how many were removed.
    pub fn remove_items(&mut self, start: usize, count: usize) -> usize {
        let removed = self.store.remove_range(start, count);
        if removed > 0 {
            self.observer.range_removed(start, removed);
        }
        removed
    }

    /// Replaces the item at `position`, returning the previous item.
    ///
    /// # Errors
    ///
    /// [`AdapterError::IndexOutOfRange`] if `position >= item_count()`.
    pub fn update(&mut self, position: usize, item: I) -> Result<I, AdapterError<I::Kind>> {
        let previous = self.store.update(position, item)?;
        self.observer.item_changed(position);
        Ok(previous)
    }

    /// Replaces consecutive items starting at `start`.
    ///
    /// The whole range is checked before anything is replaced.
    ///
    /// # Errors
    ///
    /// [`AdapterError::IndexOutOfRange`] if the range runs past the end.
    pub fn update_range(
        &mut self,
        start: usize,
        items: impl IntoIterator<Item = I, IntoIter: ExactSizeIterator>,
    ) -> Result<(), AdapterError<I::Kind>> {
        let items = items.into_iter();
        let count = items.len();
        if count == 0 {
            return Ok(());
        }
        let len = self.store.len();
        let last = start.saturating_add(count - 1);
        if last >= len {
            return Err(AdapterError::IndexOutOfRange { index: last, len });
        }
        for (offset, item) in items.enumerate() {
            self.store.update(start + offset, item)?;
        }
        self.observer.range_changed(start, count);
        Ok(())
    }

    /// Swaps the items at `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`AdapterError::IndexOutOfRange`] if either position is out of range.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), AdapterError<I::Kind>> {
        self.store.swap(a, b)?;
        if a != b {
            self.observer.item_changed(a);
            self.observer.item_changed(b);
        }
        Ok(())
    }

    fn item_at(&self, position: usize) -> Result<&I, AdapterError<I::Kind>> {
        self.store.get(position).ok_or(AdapterError::IndexOutOfRange {
            index: position,
            len: self.store.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use alloc::{format, vec};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::ListAdapter;
    use crate::change::replay;
    use crate::{
        AdapterError, Change, ItemKind, ListItem, Renderer, RendererFactory, ViewType, factory_fn,
    };

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Kind {
        Song,
        Artist,
        Ad,
    }

    impl ItemKind for Kind {}

    #[derive(Clone, Debug, PartialEq)]
    enum Item {
        Song(u32),
        Artist(&'static str),
        Ad,
    }

    impl ListItem for Item {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            match self {
                Self::Song(_) => Kind::Song,
                Self::Artist(_) => Kind::Artist,
                Self::Ad => Kind::Ad,
            }
        }
    }

    #[derive(Debug, Default)]
    struct Row {
        text: String,
        binds: u32,
        events: Vec<&'static str>,
    }

    impl Renderer for Row {
        type Parent = u32;

        fn on_attached(&mut self) {
            self.events.push("attached");
        }

        fn on_detached(&mut self) {
            self.events.push("detached");
        }

        fn on_recycled(&mut self) {
            self.events.push("recycled");
        }
    }

    fn adapter() -> ListAdapter<Item, Row> {
        let mut adapter = ListAdapter::new();
        adapter
            .register(
                Kind::Song,
                factory_fn(
                    |created: &mut u32| {
                        *created += 1;
                        Row::default()
                    },
                    |row: &mut Row, item: &Item| {
                        row.binds += 1;
                        if let Item::Song(n) = item {
                            row.text = format!("song {n}");
                        }
                    },
                ),
            )
            .unwrap();
        adapter
            .register(
                Kind::Artist,
                factory_fn(
                    |created: &mut u32| {
                        *created += 1;
                        Row::default()
                    },
                    |row: &mut Row, item: &Item| {
                        row.binds += 1;
                        if let Item::Artist(name) = item {
                            row.text = name.to_string();
                        }
                    },
                ),
            )
            .unwrap();
        adapter
    }

    fn changes(adapter: &mut ListAdapter<Item, Row>) -> Vec<Change> {
        adapter.observer_mut().take().into_vec()
    }

    #[test]
    fn host_round_trip_creates_and_binds() {
        let mut adapter = adapter();
        adapter.set_items([Item::Artist("Nina"), Item::Song(1), Item::Song(2)]);
        assert_eq!(adapter.item_count(), 3);

        let mut created = 0;
        let song = adapter.view_type(1).unwrap();
        assert_eq!(song, adapter.view_type(2).unwrap());
        assert_ne!(song, adapter.view_type(0).unwrap());

        let mut row = adapter.create_renderer(song, &mut created).unwrap();
        assert_eq!(created, 1);
        adapter.bind_renderer(&mut row, 1).unwrap();
        assert_eq!(row.text, "song 1");
        // Recycled slot shows a different item of the same kind.
        adapter.bind_renderer(&mut row, 2).unwrap();
        assert_eq!(row.text, "song 2");
        assert_eq!(row.binds, 2);
    }

    #[test]
    fn unregistered_items_abort_rendering() {
        let mut adapter = adapter();
        adapter.set_items([Item::Song(1), Item::Ad]);
        assert_eq!(
            adapter.view_type(1),
            Err(AdapterError::UnregisteredKind { kind: Kind::Ad })
        );
        let mut row = Row::default();
        assert_eq!(
            adapter.bind_renderer(&mut row, 1),
            Err(AdapterError::UnregisteredKind { kind: Kind::Ad })
        );
        assert_eq!(
            adapter.view_type(2),
            Err(AdapterError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert!(matches!(
            adapter.create_renderer(ViewType::from_raw(9), &mut 0),
            Err(AdapterError::UnknownViewType(_))
        ));
    }

    #[test]
    fn register_all_keeps_entries_before_a_failure() {
        let mut adapter: ListAdapter<Item, Row> = ListAdapter::new();
        fn noop() -> Box<dyn RendererFactory<Item, Row>> {
            Box::new(factory_fn::<Item, Row, _, _>(
                |_: &mut u32| Row::default(),
                |_: &mut Row, _: &Item| {},
            ))
        }
        let result = adapter.register_all([
            (Kind::Song, noop()),
            (Kind::Song, noop()),
            (Kind::Ad, noop()),
        ]);
        assert_eq!(result, Err(AdapterError::DuplicateKind { kind: Kind::Song }));
        assert!(adapter.registry().contains(Kind::Song));
        assert!(!adapter.registry().contains(Kind::Ad));
    }

    #[test]
    fn lifecycle_hooks_are_forwarded() {
        let adapter = adapter();
        let mut row = Row::default();
        adapter.renderer_attached(&mut row);
        adapter.renderer_detached(&mut row);
        adapter.renderer_recycled(&mut row);
        assert_eq!(row.events, ["attached", "detached", "recycled"]);
    }

    #[test]
    fn each_mutation_reports_its_minimal_notification() {
        let mut adapter = adapter();
        adapter.set_items([Item::Song(1), Item::Song(2)]);
        assert_eq!(changes(&mut adapter), [Change::DataSetChanged]);

        adapter.append_item(Item::Song(3));
        assert_eq!(adapter.append_items([Item::Song(4), Item::Song(5)]), 2);
        assert_eq!(adapter.append_items([]), 0);
        assert_eq!(
            changes(&mut adapter),
            [
                Change::RangeInserted { start: 2, count: 1 },
                Change::RangeInserted { start: 3, count: 2 },
            ]
        );

        assert!(adapter.insert_item(0, Item::Artist("A")));
        assert!(!adapter.insert_item(99, Item::Artist("B")));
        assert_eq!(adapter.insert_items(1, vec![Item::Song(10), Item::Song(11)]), 2);
        assert_eq!(
            changes(&mut adapter),
            [
                Change::RangeInserted { start: 0, count: 1 },
                Change::RangeInserted { start: 1, count: 2 },
            ]
        );

        assert_eq!(adapter.remove_item_at(0), Some(Item::Artist("A")));
        assert_eq!(adapter.remove_item_at(50), None);
        assert_eq!(adapter.remove_item(&Item::Song(11)), Some(Item::Song(11)));
        assert_eq!(adapter.remove_items(3, 10), 3);
        assert_eq!(adapter.remove_items(10, 1), 0);
        assert_eq!(
            changes(&mut adapter),
            [
                Change::RangeRemoved { start: 0, count: 1 },
                Change::RangeRemoved { start: 1, count: 1 },
                Change::RangeRemoved { start: 3, count: 3 },
            ]
        );
        assert_eq!(
            adapter.store().as_slice(),
            &[Item::Song(10), Item::Song(1), Item::Song(2)]
        );

        assert_eq!(adapter.update(1, Item::Song(7)), Ok(Item::Song(1)));
        adapter.swap(0, 2).unwrap();
        adapter.swap(1, 1).unwrap();
        adapter
            .update_range(1, vec![Item::Song(8), Item::Song(9)])
            .unwrap();
        assert_eq!(
            changes(&mut adapter),
            [
                Change::ItemChanged(1),
                Change::ItemChanged(0),
                Change::ItemChanged(2),
                Change::RangeChanged { start: 1, count: 2 },
            ]
        );
        assert_eq!(
            adapter.store().as_slice(),
            &[Item::Song(2), Item::Song(8), Item::Song(9)]
        );
    }

    #[test]
    fn failed_updates_leave_items_and_observer_untouched() {
        let mut adapter = adapter();
        adapter.set_items([Item::Song(1)]);
        adapter.observer_mut().clear();

        assert_eq!(
            adapter.update(1, Item::Song(2)),
            Err(AdapterError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            adapter.update_range(0, vec![Item::Song(2), Item::Song(3)]),
            Err(AdapterError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(adapter.swap(0, 1).is_err());
        assert_eq!(adapter.item(0), Some(&Item::Song(1)));
        assert!(adapter.observer().is_empty());
    }

    #[test]
    fn store_mut_skips_notification() {
        let mut adapter = adapter();
        adapter.set_items([Item::Song(1)]);
        adapter.observer_mut().clear();

        adapter.store_mut().append(Item::Song(2));
        assert!(adapter.observer().is_empty());
        assert_eq!(adapter.item_count(), 2);
    }

    #[test]
    fn lookups_by_kind_and_value() {
        let mut adapter = adapter();
        adapter.set_items([Item::Song(1), Item::Artist("X"), Item::Song(2)]);
        let songs: Vec<_> = adapter.items_of_kind(Kind::Song).cloned().collect();
        assert_eq!(songs, [Item::Song(1), Item::Song(2)]);
        assert_eq!(adapter.position_of_kind(Kind::Artist), Some(1));
        assert_eq!(adapter.position_of(&Item::Song(2)), Some(2));
        assert!(!adapter.contains_kind(Kind::Ad));
        assert_eq!(adapter.item(3), None);
    }

    /// A host that only sees the notifications always agrees on the row count.
    #[test]
    fn replayed_notifications_track_the_item_count() {
        fn songs(rng: &mut StdRng, next: &mut u32) -> Vec<Item> {
            (0..rng.random_range(0..4))
                .map(|_| {
                    *next += 1;
                    Item::Song(*next)
                })
                .collect()
        }

        let mut rng = StdRng::seed_from_u64(0xada9_7e55);
        let mut adapter = adapter();
        let mut host = 0_usize;
        let mut next = 0_u32;
        for _step in 0..2_000 {
            let len = adapter.item_count();
            match rng.random_range(0..12) {
                0 => adapter.set_items(songs(&mut rng, &mut next)),
                1 => adapter.clear(),
                2 => {
                    next += 1;
                    adapter.append_item(Item::Song(next));
                }
                3 => {
                    let items = songs(&mut rng, &mut next);
                    adapter.append_items(items);
                }
                4 => {
                    let position = rng.random_range(0..=len + 1);
                    adapter.insert_item(position, Item::Artist("guest"));
                }
                5 => {
                    let position = rng.random_range(0..=len + 1);
                    let items = songs(&mut rng, &mut next);
                    adapter.insert_items(position, items);
                }
                6 => {
                    adapter.remove_item_at(rng.random_range(0..=len));
                }
                7 => {
                    adapter.remove_item(&Item::Song(rng.random_range(0..=next)));
                }
                8 => {
                    let start = rng.random_range(0..=len);
                    adapter.remove_items(start, rng.random_range(0..4));
                }
                9 => {
                    let _ = adapter.update(rng.random_range(0..=len), Item::Artist("cover"));
                }
                10 => {
                    let start = rng.random_range(0..=len);
                    let items = vec![Item::Artist("medley"); rng.random_range(0..3)];
                    let _ = adapter.update_range(start, items);
                }
                _ => {
                    let _ = adapter.swap(rng.random_range(0..=len), rng.random_range(0..=len));
                }
            }
            // Hosts drain once per frame, so batches span several mutations.
            if rng.random_bool(0.3) {
                let batch = adapter.observer_mut().take();
                replay(&mut host, &batch, adapter.item_count());
                assert_eq!(host, adapter.item_count(), "host count diverged");
            }
        }
        let batch = adapter.observer_mut().take();
        replay(&mut host, &batch, adapter.item_count());
        assert_eq!(host, adapter.item_count(), "host count diverged");
    }
}
