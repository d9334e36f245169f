// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_list_adapter --heading-base-level=0

//! Understory List Adapter: type-keyed data adapters for recycling list widgets.
//!
//! A recycling list widget only knows positions, view types and renderers. This
//! crate supplies the other half: an ordered item store whose rows are rendered
//! by per-kind factories, plus two optional layers on top.
//!
//! - [`ListAdapter`]: registers one [`RendererFactory`] per concrete [`ItemKind`],
//!   answers the host's `view_type` / `create_renderer` / `bind_renderer` calls,
//!   and reports every structural mutation to a [`ChangeObserver`].
//! - [`PlaceholderAdapter`]: swaps the whole content for a loading, empty or error
//!   row, with an optional message and retry callback.
//! - [`PagingAdapter`]: keeps a footer after the content and requests the next
//!   page when the host binds rows near the end, one request at a time.
//!
//! Items report their kind through [`ListItem::kind`]. Kinds are plain tags, usually
//! a field-less enum, and may name abstract groupings through [`ItemKind::parent`]
//! for queries such as [`ItemStore::items_of_kind`]. Only
//! [`KindShape::Concrete`] kinds can be registered.
//!
//! The crate does not know about any particular UI framework. Hosts are responsible for:
//!
//! - Owning the renderers and recycling them by [`ViewType`].
//! - Applying the buffered [`Change`]s (or implementing [`ChangeObserver`] directly).
//! - Calling [`PagingAdapter::bind_renderer`] for rows as they scroll into view.
//!
//! ## Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_list_adapter::{
//!     FooterState, ItemKind, ListItem, PagingAdapter, Renderer, StatusKind, StatusRenderer,
//!     StatusView, factory_fn,
//! };
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! struct Headline;
//! impl ItemKind for Headline {}
//!
//! struct Story(u32);
//! impl ListItem for Story {
//!     type Kind = Headline;
//!     fn kind(&self) -> Headline {
//!         Headline
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Line(String);
//! impl Renderer for Line {
//!     type Parent = ();
//! }
//! impl StatusRenderer for Line {
//!     fn create_status(_: &mut (), _: StatusKind) -> Self {
//!         Self::default()
//!     }
//!     fn show_status(&mut self, status: &StatusView<'_>) {
//!         self.0 = format!("{status:?}");
//!     }
//! }
//!
//! let mut feed: PagingAdapter<Story, Line> = PagingAdapter::new();
//! feed.register(
//!     Headline,
//!     factory_fn(|_: &mut ()| Line::default(), |l: &mut Line, s: &Story| {
//!         l.0 = format!("story {}", s.0);
//!     }),
//! )
//! .unwrap();
//!
//! let requested = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&requested);
//! feed.set_on_load_next_page(move |page| sink.borrow_mut().push(page));
//!
//! feed.show_loading();
//! feed.set_page_items((0..3).map(Story), true);
//! assert_eq!(feed.item_count(), 4);
//! assert_eq!(feed.footer_state(), FooterState::LoadingMore);
//!
//! // The host binds the footer: page 2 is requested once.
//! let mut line = feed.create_renderer(feed.view_type(3).unwrap(), &mut ()).unwrap();
//! feed.bind_renderer(&mut line, 3).unwrap();
//! feed.bind_renderer(&mut line, 3).unwrap();
//! assert_eq!(*requested.borrow(), [2]);
//!
//! feed.append_page_items((3..5).map(Story), false);
//! assert_eq!(feed.item_count(), 6);
//! assert_eq!(feed.footer_state(), FooterState::Ended);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod adapter;
mod change;
mod error;
mod kind;
mod paging;
mod placeholder;
mod registry;
mod renderer;
mod store;

pub use adapter::ListAdapter;
pub use change::{Change, ChangeLog, ChangeObserver};
pub use error::AdapterError;
pub use kind::{ItemKind, KindShape, ListItem};
pub use paging::{FirstPage, FooterState, LoadNextPageFn, PagingAdapter, PagingConfig};
pub use placeholder::{
    Activation, DEFAULT_EMPTY_MESSAGE, DEFAULT_ERROR_MESSAGE, Placeholder, PlaceholderAdapter,
    PlaceholderFactories, PlaceholderInfo, RetryFn, Row, RowKind, StatusFactory, StatusKind,
    StatusRenderer, StatusView,
};
pub use registry::{TypeRegistry, ViewType};
pub use renderer::{FnFactory, Renderer, RendererFactory, factory_fn};
pub use store::ItemStore;
