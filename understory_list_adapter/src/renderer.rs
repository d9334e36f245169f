// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer and renderer factory contracts.

use alloc::boxed::Box;
use core::fmt;
use core::marker::PhantomData;

/// A recyclable on-screen slot owned by the host list widget.
///
/// The adapter never looks inside a renderer. It only creates renderers through
/// a [`RendererFactory`], binds items into them, and forwards lifecycle hooks.
/// Hosts with several row shapes usually pick an enum or a boxed widget here.
pub trait Renderer {
    /// Container the host builds new renderers into.
    type Parent: ?Sized;

    /// The renderer became visible.
    fn on_attached(&mut self) {}

    /// The renderer left the visible area.
    fn on_detached(&mut self) {}

    /// The renderer was returned to the recycling pool.
    fn on_recycled(&mut self) {}
}

/// Creates renderers for one item kind and binds items of that kind into them.
pub trait RendererFactory<I: ?Sized, R: Renderer> {
    /// Builds a fresh renderer. Called once per recyclable slot.
    fn create(&self, parent: &mut R::Parent) -> R;

    /// Shows `item` in an existing renderer, replacing whatever it showed before.
    fn bind(&self, renderer: &mut R, item: &I);
}

impl<I, R, F> RendererFactory<I, R> for Box<F>
where
    I: ?Sized,
    R: Renderer,
    F: RendererFactory<I, R> + ?Sized,
{
    fn create(&self, parent: &mut R::Parent) -> R {
        (**self).create(parent)
    }

    fn bind(&self, renderer: &mut R, item: &I) {
        (**self).bind(renderer, item);
    }
}

/// A [`RendererFactory`] built from two closures. See [`factory_fn`].
pub struct FnFactory<I: ?Sized, R, C, B> {
    create: C,
    bind: B,
    _marker: PhantomData<fn(&I) -> R>,
}

impl<I: ?Sized, R, C, B> fmt::Debug for FnFactory<I, R, C, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFactory").finish_non_exhaustive()
    }
}

impl<I, R, C, B> RendererFactory<I, R> for FnFactory<I, R, C, B>
where
    I: ?Sized,
    R: Renderer,
    C: Fn(&mut R::Parent) -> R,
    B: Fn(&mut R, &I),
{
    fn create(&self, parent: &mut R::Parent) -> R {
        (self.create)(parent)
    }

    fn bind(&self, renderer: &mut R, item: &I) {
        (self.bind)(renderer, item);
    }
}

/// Builds a [`RendererFactory`] from a `create` closure and a `bind` closure.
///
/// ```rust
/// use understory_list_adapter::{Renderer, RendererFactory, factory_fn};
///
/// #[derive(Default)]
/// struct Label(String);
///
/// impl Renderer for Label {
///     type Parent = ();
/// }
///
/// let factory = factory_fn(
///     |_: &mut ()| Label::default(),
///     |label: &mut Label, text: &&str| label.0 = text.to_string(),
/// );
/// let mut label = factory.create(&mut ());
/// factory.bind(&mut label, &"hello");
/// assert_eq!(label.0, "hello");
/// ```
pub fn factory_fn<I, R, C, B>(create: C, bind: B) -> FnFactory<I, R, C, B>
where
    I: ?Sized,
    R: Renderer,
    C: Fn(&mut R::Parent) -> R,
    B: Fn(&mut R, &I),
{
    FnFactory {
        create,
        bind,
        _marker: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::{Renderer, RendererFactory, factory_fn};

    #[derive(Debug, Default)]
    struct Cell {
        text: String,
        attached: bool,
    }

    impl Renderer for Cell {
        type Parent = Vec<&'static str>;

        fn on_attached(&mut self) {
            self.attached = true;
        }

        fn on_detached(&mut self) {
            self.attached = false;
        }
    }

    #[test]
    fn closures_create_and_bind() {
        let factory = factory_fn(
            |parent: &mut Vec<&'static str>| {
                parent.push("cell");
                Cell::default()
            },
            |cell: &mut Cell, value: &u32| cell.text = value.to_string(),
        );
        let mut parent = Vec::new();
        let mut cell = factory.create(&mut parent);
        assert_eq!(parent, ["cell"]);

        factory.bind(&mut cell, &7);
        assert_eq!(cell.text, "7");
        factory.bind(&mut cell, &8);
        assert_eq!(cell.text, "8");
    }

    #[test]
    fn default_lifecycle_hooks_are_no_ops() {
        struct Inert;
        impl Renderer for Inert {
            type Parent = ();
        }
        let mut inert = Inert;
        inert.on_attached();
        inert.on_detached();
        inert.on_recycled();

        let mut cell = Cell::default();
        cell.on_attached();
        assert!(cell.attached);
        cell.on_detached();
        assert!(!cell.attached);
    }
}
