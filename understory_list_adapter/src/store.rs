// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered, position-addressed item storage.

use alloc::vec::Vec;

use crate::{AdapterError, ItemKind, ListItem};

/// The ordered sequence of items behind a list.
///
/// All operations are synchronous and never notify anyone; pairing mutations
/// with host notifications is the job of [`ListAdapter`](crate::ListAdapter).
///
/// Positional probes are forgiving: reads and bounded inserts/removals report
/// `None`, `false`, or a count of zero for out-of-range positions instead of
/// failing. In-place replacement ([`update`](Self::update), [`swap`](Self::swap))
/// is bounds-checked and reports [`AdapterError::IndexOutOfRange`].
#[derive(Debug, Clone)]
pub struct ItemStore<I> {
    items: Vec<I>,
}

impl<I> Default for ItemStore<I> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<I: ListItem> ItemStore<I> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `position`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&I> {
        self.items.get(position)
    }

    /// Mutable item at `position`, or `None` if out of range.
    pub fn get_mut(&mut self, position: usize) -> Option<&mut I> {
        self.items.get_mut(position)
    }

    /// Iterates all items in order.
    pub fn iter(&self) -> core::slice::Iter<'_, I> {
        self.items.iter()
    }

    /// All items as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[I] {
        &self.items
    }

    /// Items whose kind is `kind` or descends from it, in store order.
    pub fn items_of_kind(&self, kind: I::Kind) -> impl Iterator<Item = &I> + '_ {
        self.items.iter().filter(move |item| item.kind().is_a(kind))
    }

    /// Position of the first item whose kind is exactly `kind`.
    #[must_use]
    pub fn position_of_kind(&self, kind: I::Kind) -> Option<usize> {
        self.items.iter().position(|item| item.kind() == kind)
    }

    /// Returns `true` if some item has exactly `kind`.
    #[must_use]
    pub fn contains_kind(&self, kind: I::Kind) -> bool {
        self.position_of_kind(kind).is_some()
    }

    /// Position of the first item matching `predicate`.
    pub fn position(&self, predicate: impl FnMut(&I) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    /// Position of the first item equal to `item`.
    #[must_use]
    pub fn position_of(&self, item: &I) -> Option<usize>
    where
        I: PartialEq,
    {
        self.items.iter().position(|candidate| candidate == item)
    }

    /// Replaces the whole sequence.
    pub fn set_all(&mut self, items: impl IntoIterator<Item = I>) {
        self.items.clear();
        self.items.extend(items);
        log::trace!("store reset to {} items", self.items.len());
    }

    /// Removes every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Appends one item.
    pub fn append(&mut self, item: I) {
        self.items.push(item);
    }

    /// Appends items in order and returns how many were added.
    pub fn append_all(&mut self, items: impl IntoIterator<Item = I>) -> usize {
        let before = self.items.len();
        self.items.extend(items);
        self.items.len() - before
    }

    /// Inserts `item` at `position`.
    ///
    /// Returns `false`, leaving the store untouched, if `position > len`.
    pub fn insert_at(&mut self, position: usize, item: I) -> bool {
        if position > self.items.len() {
            return false;
        }
        self.items.insert(position, item);
        true
    }

    /// Inserts items at `position`, keeping their order, and returns how many were inserted.
    ///
    /// Inserts nothing if `position > len`.
    pub fn insert_all(&mut self, position: usize, items: impl IntoIterator<Item = I>) -> usize {
        if position > self.items.len() {
            return 0;
        }
        let tail = self.items.split_off(position);
        self.items.extend(items);
        let inserted = self.items.len() - position;
        self.items.extend(tail);
        inserted
    }

    /// Removes and returns the item at `position`, or `None` if out of range.
    pub fn remove_at(&mut self, position: usize) -> Option<I> {
        if position < self.items.len() {
            Some(self.items.remove(position))
        } else {
            None
        }
    }

    /// Removes up to `count` items starting at `start` and returns how many were removed.
    ///
    /// The count is clamped to the items available after `start`.
    pub fn remove_range(&mut self, start: usize, count: usize) -> usize {
        if start >= self.items.len() {
            return 0;
        }
        let end = start.saturating_add(count).min(self.items.len());
        self.items.drain(start..end);
        end - start
    }

    /// Replaces the item at `position` and returns the previous one.
    ///
    /// # Errors
    ///
    /// [`AdapterError::IndexOutOfRange`] if `position >= len`.
    pub fn update(&mut self, position: usize, item: I) -> Result<I, AdapterError<I::Kind>> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(position)
            .ok_or(AdapterError::IndexOutOfRange { index: position, len })?;
        Ok(core::mem::replace(slot, item))
    }

    /// Swaps the items at `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`AdapterError::IndexOutOfRange`] if either position is out of range.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), AdapterError<I::Kind>> {
        let len = self.items.len();
        for index in [a, b] {
            if index >= len {
                return Err(AdapterError::IndexOutOfRange { index, len });
            }
        }
        self.items.swap(a, b);
        Ok(())
    }
}

impl<'a, I> IntoIterator for &'a ItemStore<I> {
    type Item = &'a I;
    type IntoIter = core::slice::Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::ItemStore;
    use crate::{AdapterError, ItemKind, KindShape, ListItem};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Kind {
        Shape,
        Circle,
        Square,
        Note,
    }

    impl ItemKind for Kind {
        fn shape(self) -> KindShape {
            match self {
                Self::Shape => KindShape::Abstract,
                _ => KindShape::Concrete,
            }
        }

        fn parent(self) -> Option<Self> {
            match self {
                Self::Circle | Self::Square => Some(Self::Shape),
                Self::Shape | Self::Note => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct Item(Kind, u32);

    impl ListItem for Item {
        type Kind = Kind;

        fn kind(&self) -> Kind {
            self.0
        }
    }

    fn store(items: &[Item]) -> ItemStore<Item> {
        let mut store = ItemStore::new();
        store.set_all(items.iter().copied());
        store
    }

    const C1: Item = Item(Kind::Circle, 1);
    const S2: Item = Item(Kind::Square, 2);
    const N3: Item = Item(Kind::Note, 3);
    const C4: Item = Item(Kind::Circle, 4);

    #[test]
    fn reads_outside_bounds_are_absent() {
        let store = store(&[C1, S2]);
        assert_eq!(store.get(1), Some(&S2));
        assert_eq!(store.get(2), None);
        assert_eq!(store.get(usize::MAX), None);
    }

    #[test]
    fn kind_queries_distinguish_exact_and_descendant_matches() {
        let store = store(&[C1, S2, N3, C4]);
        let shapes: Vec<_> = store.items_of_kind(Kind::Shape).copied().collect();
        assert_eq!(shapes, [C1, S2, C4]);
        let circles: Vec<_> = store.items_of_kind(Kind::Circle).copied().collect();
        assert_eq!(circles, [C1, C4]);

        assert_eq!(store.position_of_kind(Kind::Note), Some(2));
        // Exact lookup never matches a grouping.
        assert_eq!(store.position_of_kind(Kind::Shape), None);
        assert!(store.contains_kind(Kind::Square));
        assert_eq!(store.position_of(&C4), Some(3));
        assert_eq!(store.position_of(&Item(Kind::Circle, 9)), None);
    }

    #[test]
    fn bounded_insertions() {
        let mut store = store(&[C1]);
        assert!(store.insert_at(1, S2));
        assert!(store.insert_at(0, N3));
        assert!(!store.insert_at(4, C4));
        assert_eq!(store.as_slice(), &[N3, C1, S2]);

        assert_eq!(store.insert_all(1, [C4, C4]), 2);
        assert_eq!(store.as_slice(), &[N3, C4, C4, C1, S2]);
        assert_eq!(store.insert_all(9, [C4]), 0);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn insert_all_counts_only_the_new_items() {
        // A tail longer than the batch.
        let mut store = store(&[C1, S2, N3]);
        assert_eq!(store.insert_all(0, [C4]), 1);
        assert_eq!(store.as_slice(), &[C4, C1, S2, N3]);

        assert_eq!(store.insert_all(2, []), 0);
        assert_eq!(store.insert_all(3, [C1, C1, C1]), 3);
        assert_eq!(store.as_slice(), &[C4, C1, S2, C1, C1, C1, N3]);
        assert_eq!(store.insert_all(7, [S2]), 1);
        assert_eq!(store.len(), 8);
    }

    #[test]
    fn removals_are_clamped() {
        let mut store = store(&[C1, S2, N3, C4]);
        assert_eq!(store.remove_at(4), None);
        assert_eq!(store.remove_at(1), Some(S2));
        assert_eq!(store.remove_range(1, 10), 2);
        assert_eq!(store.as_slice(), &[C1]);
        assert_eq!(store.remove_range(1, 1), 0);
        assert_eq!(store.remove_range(0, usize::MAX), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn update_and_swap_are_bounds_checked() {
        let mut store = store(&[C1, S2]);
        assert_eq!(store.update(1, N3), Ok(S2));
        assert_eq!(
            store.update(2, C4),
            Err(AdapterError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(store.swap(0, 1), Ok(()));
        assert_eq!(store.as_slice(), &[N3, C1]);
        assert_eq!(
            store.swap(0, 5),
            Err(AdapterError::IndexOutOfRange { index: 5, len: 2 })
        );
        assert_eq!(store.as_slice(), &[N3, C1]);
    }

    /// Random mutation sequences keep the store identical to a plain `Vec` model.
    #[test]
    fn random_mutations_match_reference_model() {
        let mut rng = StdRng::seed_from_u64(0x5eed_1157);
        for _round in 0..32 {
            let mut store: ItemStore<Item> = ItemStore::new();
            let mut model: Vec<Item> = Vec::new();
            let mut next = 0_u32;
            let mut fresh = |rng: &mut StdRng| {
                next += 1;
                let kind = [Kind::Circle, Kind::Square, Kind::Note][rng.random_range(0..3)];
                Item(kind, next)
            };

            for _step in 0..200 {
                let len = model.len();
                match rng.random_range(0..8) {
                    0 => {
                        let items: Vec<_> =
                            (0..rng.random_range(0..4)).map(|_| fresh(&mut rng)).collect();
                        store.set_all(items.clone());
                        model = items;
                    }
                    1 => {
                        let item = fresh(&mut rng);
                        store.append(item);
                        model.push(item);
                    }
                    2 => {
                        let items: Vec<_> =
                            (0..rng.random_range(0..4)).map(|_| fresh(&mut rng)).collect();
                        assert_eq!(store.append_all(items.clone()), items.len());
                        model.extend(items);
                    }
                    3 => {
                        let pos = rng.random_range(0..=len + 1);
                        let item = fresh(&mut rng);
                        let inserted = store.insert_at(pos, item);
                        assert_eq!(inserted, pos <= len);
                        if inserted {
                            model.insert(pos, item);
                        }
                    }
                    4 => {
                        let pos = rng.random_range(0..=len + 1);
                        let items: Vec<_> =
                            (0..rng.random_range(0..4)).map(|_| fresh(&mut rng)).collect();
                        let inserted = store.insert_all(pos, items.clone());
                        if pos <= len {
                            assert_eq!(inserted, items.len());
                            let tail = model.split_off(pos);
                            model.extend(items);
                            model.extend(tail);
                        } else {
                            assert_eq!(inserted, 0);
                        }
                    }
                    5 => {
                        let pos = rng.random_range(0..=len);
                        let removed = store.remove_at(pos);
                        if pos < len {
                            assert_eq!(removed, Some(model.remove(pos)));
                        } else {
                            assert_eq!(removed, None);
                        }
                    }
                    6 => {
                        let start = rng.random_range(0..=len);
                        let count = rng.random_range(0..5);
                        let removed = store.remove_range(start, count);
                        let expected = if start < len { count.min(len - start) } else { 0 };
                        assert_eq!(removed, expected);
                        model.drain(start.min(len)..start.min(len) + expected);
                    }
                    _ => {
                        if len > 0 {
                            let a = rng.random_range(0..len);
                            let b = rng.random_range(0..len);
                            store.swap(a, b).unwrap();
                            model.swap(a, b);
                        }
                    }
                }
                assert_eq!(store.len(), model.len());
                assert_eq!(store.as_slice(), model.as_slice());
            }
        }
    }
}
