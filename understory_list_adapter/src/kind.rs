// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item type tags.
//!
//! Rows are dispatched by an explicit tag rather than by inspecting runtime types.
//! Each item reports the concrete [`ItemKind`] it belongs to, and factories are
//! registered against those same tags.

use core::fmt::Debug;
use core::hash::Hash;

/// Structural shape of a kind tag.
///
/// Only [`KindShape::Concrete`] tags describe a single renderable row. The other
/// shapes exist so that tag enums can also name groupings (for queries such as
/// [`ItemStore::items_of_kind`](crate::ItemStore::items_of_kind)) without those
/// groupings ever being registered for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KindShape {
    /// A single concrete row type.
    #[default]
    Concrete,
    /// An interface-like or abstract grouping of other kinds.
    Abstract,
    /// A sequence, array, or map of items rather than one item.
    Collection,
}

/// Tag identifying the kind of a list item.
///
/// Tags are small copyable values, typically a field-less enum. Kinds may form a
/// hierarchy through [`ItemKind::parent`]: the parent of a concrete kind is
/// usually an [`Abstract`](KindShape::Abstract) grouping.
///
/// ```rust
/// use understory_list_adapter::{ItemKind, KindShape};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// enum Kind {
///     Message,
///     Text,
///     Image,
/// }
///
/// impl ItemKind for Kind {
///     fn shape(self) -> KindShape {
///         match self {
///             Self::Message => KindShape::Abstract,
///             _ => KindShape::Concrete,
///         }
///     }
///
///     fn parent(self) -> Option<Self> {
///         match self {
///             Self::Message => None,
///             _ => Some(Self::Message),
///         }
///     }
/// }
///
/// assert!(Kind::Text.is_a(Kind::Message));
/// assert!(Kind::Text.is_a(Kind::Text));
/// assert!(!Kind::Text.is_a(Kind::Image));
/// ```
pub trait ItemKind: Copy + Eq + Hash + Debug {
    /// Structural shape of this tag. Defaults to [`KindShape::Concrete`].
    fn shape(self) -> KindShape {
        KindShape::Concrete
    }

    /// Grouping this kind belongs to, if any.
    fn parent(self) -> Option<Self> {
        None
    }

    /// Returns `true` if `self` is `ancestor` or descends from it.
    fn is_a(self, ancestor: Self) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == ancestor {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

/// A value that can be shown as one row of a list.
pub trait ListItem {
    /// Tag type used for dispatch.
    type Kind: ItemKind;

    /// The exact concrete kind of this item.
    fn kind(&self) -> Self::Kind;
}

#[cfg(test)]
mod tests {
    use super::{ItemKind, KindShape};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Kind {
        Any,
        Message,
        Text,
        Separator,
    }

    impl ItemKind for Kind {
        fn shape(self) -> KindShape {
            match self {
                Self::Any | Self::Message => KindShape::Abstract,
                Self::Text | Self::Separator => KindShape::Concrete,
            }
        }

        fn parent(self) -> Option<Self> {
            match self {
                Self::Any => None,
                Self::Message | Self::Separator => Some(Self::Any),
                Self::Text => Some(Self::Message),
            }
        }
    }

    #[test]
    fn is_a_walks_the_whole_parent_chain() {
        assert!(Kind::Text.is_a(Kind::Message));
        assert!(Kind::Text.is_a(Kind::Any));
        assert!(Kind::Separator.is_a(Kind::Any));
        assert!(!Kind::Separator.is_a(Kind::Message));
        assert!(!Kind::Message.is_a(Kind::Text));
    }

    #[test]
    fn default_shape_is_concrete() {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        struct Plain;
        impl ItemKind for Plain {}

        assert_eq!(Plain.shape(), KindShape::Concrete);
        assert_eq!(Plain.parent(), None);
        assert!(Plain.is_a(Plain));
    }
}
