// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paged loading driven by how far the host has scrolled.
//!
//! [`PagingAdapter`] keeps a footer row after the content. While the footer is
//! [`FooterState::LoadingMore`], binding any row within `load_threshold` of the
//! end asks the caller for the next page. The caller answers with
//! [`append_page_items`](PagingAdapter::append_page_items) or
//! [`on_load_page_failed`](PagingAdapter::on_load_page_failed); until then no
//! further page is requested.
//!
//! Footer transitions:
//!
//! - `set_page_items` and `append_page_items` move to `LoadingMore` or `Ended`
//!   depending on whether more pages exist.
//! - `on_load_page_failed` moves a shown footer to `Failed`.
//! - `retry` moves `Failed` back to `LoadingMore`.
//! - Any `show_*` placeholder moves to `Ended`.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::num::NonZeroUsize;

use crate::placeholder::FooterRows;
use crate::{
    Activation, AdapterError, ChangeLog, ChangeObserver, ListItem, PlaceholderAdapter,
    PlaceholderFactories, PlaceholderInfo, Renderer, RendererFactory, Row, RowKind,
    StatusFactory, StatusKind, StatusRenderer, ViewType,
};

/// What the paging footer shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FooterState {
    /// More pages exist; reaching the end requests the next one.
    LoadingMore,
    /// The last page request failed; activating the footer retries it.
    Failed,
    /// There is nothing more to load.
    Ended,
}

/// Paging configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PagingConfig {
    /// How many rows before the last one binding starts requesting the next page.
    pub load_threshold: usize,
    /// Whether the footer row is shown at all.
    pub show_footer: bool,
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            load_threshold: 0,
            show_footer: true,
        }
    }
}

impl PagingConfig {
    /// Sets [`load_threshold`](Self::load_threshold).
    #[must_use]
    pub const fn with_load_threshold(mut self, load_threshold: usize) -> Self {
        self.load_threshold = load_threshold;
        self
    }

    /// Sets [`show_footer`](Self::show_footer).
    #[must_use]
    pub const fn with_show_footer(mut self, show_footer: bool) -> Self {
        self.show_footer = show_footer;
        self
    }
}

/// Outcome of the first page request, for [`PagingAdapter::set_first_page`].
#[derive(Debug)]
pub enum FirstPage<T> {
    /// The first page arrived.
    Items {
        /// Content of the page.
        items: Vec<T>,
        /// Whether another page follows.
        has_more: bool,
    },
    /// There is no content at all.
    Empty(PlaceholderInfo),
    /// The result is not known yet; nothing changes.
    Pending,
}

/// Callback asked to start loading a page. Receives the page number.
pub type LoadNextPageFn = Box<dyn FnMut(u32)>;

/// A [`PlaceholderAdapter`] that requests pages as the host nears the end of the list.
///
/// Pages are numbered from 1. [`set_page_items`](Self::set_page_items) installs
/// page 1; each automatic request asks for the page after the current one;
/// [`retry`](Self::retry) asks for the current page again.
///
/// The next-page callback only gets a page number. It cannot reach the adapter,
/// so it typically queues the fetch, and the caller later reports the result
/// through [`append_page_items`](Self::append_page_items) or
/// [`on_load_page_failed`](Self::on_load_page_failed).
pub struct PagingAdapter<T: ListItem, R: Renderer, O = ChangeLog> {
    inner: PlaceholderAdapter<T, R, O>,
    config: PagingConfig,
    footer: FooterState,
    page: u32,
    loading: bool,
    on_load_next_page: Option<LoadNextPageFn>,
}

impl<T, R, O> fmt::Debug for PagingAdapter<T, R, O>
where
    T: ListItem + fmt::Debug,
    R: Renderer,
    O: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagingAdapter")
            .field("inner", &self.inner)
            .field("config", &self.config)
            .field("footer", &self.footer)
            .field("page", &self.page)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl<T: ListItem, R: StatusRenderer + 'static> Default for PagingAdapter<T, R> {
    fn default() -> Self {
        Self::with_config(PagingConfig::default())
    }
}

impl<T: ListItem, R: StatusRenderer + 'static> PagingAdapter<T, R> {
    /// Creates an adapter whose placeholders and footer are drawn by `R` itself.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Like [`new`](Self::new), with a custom configuration.
    #[must_use]
    pub fn with_config(config: PagingConfig) -> Self {
        Self::with_factories(
            PlaceholderFactories::default(),
            StatusFactory::new(StatusKind::Footer),
            config,
            ChangeLog::new(),
        )
    }
}

impl<T, R, O> PagingAdapter<T, R, O>
where
    T: ListItem,
    R: Renderer + 'static,
    O: ChangeObserver,
{
    /// Creates an adapter with custom placeholder and footer factories that
    /// reports to `observer`.
    pub fn with_factories(
        placeholders: PlaceholderFactories<R>,
        footer: impl RendererFactory<FooterState, R> + 'static,
        config: PagingConfig,
        observer: O,
    ) -> Self {
        let mut inner = PlaceholderAdapter::with_factories(placeholders, observer);
        let registered = inner.rows_mut().register(RowKind::Footer, FooterRows(footer));
        debug_assert!(registered.is_ok(), "the footer registers once per adapter");
        Self {
            inner,
            config,
            footer: FooterState::Ended,
            page: 1,
            loading: false,
            on_load_next_page: None,
        }
    }

    /// Registers `factory` for content of `kind`.
    ///
    /// # Errors
    ///
    /// See [`TypeRegistry::register`](crate::TypeRegistry::register).
    pub fn register<F>(
        &mut self,
        kind: T::Kind,
        factory: F,
    ) -> Result<ViewType, AdapterError<RowKind<T::Kind>>>
    where
        F: RendererFactory<T, R> + 'static,
    {
        self.inner.register(kind, factory)
    }

    // --- configuration ---

    /// Sets the callback asked to load a page.
    pub fn set_on_load_next_page(&mut self, on_load_next_page: impl FnMut(u32) + 'static) {
        self.on_load_next_page = Some(Box::new(on_load_next_page));
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> PagingConfig {
        self.config
    }

    /// See [`PagingConfig::load_threshold`].
    pub fn set_load_threshold(&mut self, load_threshold: usize) {
        self.config.load_threshold = load_threshold;
    }

    /// See [`PagingConfig::show_footer`]. Takes effect with the next page.
    pub fn set_show_footer(&mut self, show_footer: bool) {
        self.config.show_footer = show_footer;
    }

    // --- state ---

    /// Current footer state.
    #[must_use]
    pub fn footer_state(&self) -> FooterState {
        self.footer
    }

    /// Number of the last page requested or installed.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.page
    }

    /// Returns `true` while a page request is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Position of the footer row, if present.
    #[must_use]
    pub fn footer_position(&self) -> Option<usize> {
        self.inner.rows().store().position(Row::is_footer)
    }

    // --- page results ---

    /// Replaces all content with the first page.
    ///
    /// Empty `items` leave everything untouched and return `false`; use
    /// [`set_first_page`](Self::set_first_page) to show the empty placeholder instead.
    pub fn set_page_items(&mut self, items: impl IntoIterator<Item = T>, has_more: bool) -> bool {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            log::debug!("ignoring empty first page");
            return false;
        }
        self.inner.set_items(items);
        self.page = 1;
        self.loading = false;
        self.set_footer_state(Self::state_after_page(has_more));
        if self.config.show_footer && self.footer_position().is_none() {
            self.inner.rows_mut().append_item(Row::Footer(self.footer));
        }
        true
    }

    /// Installs the outcome of the first page request.
    ///
    /// A page with no items shows the empty placeholder with default settings.
    pub fn set_first_page(&mut self, first: FirstPage<T>) {
        match first {
            FirstPage::Items { items, has_more } => {
                if items.is_empty() {
                    self.show_empty(PlaceholderInfo::new());
                } else {
                    self.set_page_items(items, has_more);
                }
            }
            FirstPage::Empty(info) => self.show_empty(info),
            FirstPage::Pending => {}
        }
    }

    /// Adds a page after the current content.
    pub fn append_page_items(&mut self, items: impl IntoIterator<Item = T>, has_more: bool) {
        if !self.loading {
            log::warn!("page arrived with no request outstanding (page {})", self.page);
        }
        self.loading = false;
        let state = Self::state_after_page(has_more);
        let footer_at = self.set_footer_state(state);
        match (self.config.show_footer, footer_at) {
            (true, Some(position)) => {
                let inserted = self.inner.insert_items(position, items);
                self.inner.observer_mut().item_changed(position + inserted);
            }
            (true, None) => {
                self.inner.append_items(items);
                self.inner.rows_mut().append_item(Row::Footer(state));
            }
            (false, footer_at) => {
                if let Some(position) = footer_at {
                    self.inner.remove_row_at(position);
                }
                self.inner.append_items(items);
            }
        }
    }

    /// Reports that the outstanding page request failed.
    ///
    /// The footer, if present, switches to [`FooterState::Failed`]. Without a
    /// footer the state stays as it was, so the next bind near the end asks again.
    pub fn on_load_page_failed(&mut self) {
        self.loading = false;
        if self.footer_position().is_none() {
            log::debug!("page {} failed with no footer to show it", self.page);
            return;
        }
        if let Some(position) = self.set_footer_state(FooterState::Failed) {
            self.inner.observer_mut().item_changed(position);
        }
    }

    /// Requests the current page again.
    ///
    /// With a footer shown, only a [`FooterState::Failed`] footer can be retried.
    /// Without one, a failed request leaves the state at
    /// [`FooterState::LoadingMore`] and that is retried instead. Returns `false`
    /// if a request is outstanding or nothing can be retried.
    pub fn retry(&mut self) -> bool {
        let retryable = match self.footer {
            FooterState::Failed => true,
            FooterState::LoadingMore => self.footer_position().is_none(),
            FooterState::Ended => false,
        };
        if self.loading || !retryable {
            return false;
        }
        self.loading = true;
        if let Some(position) = self.set_footer_state(FooterState::LoadingMore) {
            self.inner.observer_mut().item_changed(position);
        }
        log::debug!("retrying page {}", self.page);
        self.notify_load(self.page);
        true
    }

    // --- placeholders ---

    /// See [`PlaceholderAdapter::show_loading`]. Stops paging.
    pub fn show_loading(&mut self) {
        self.inner.show_loading();
        self.stop();
    }

    /// See [`PlaceholderAdapter::show_empty`]. Stops paging.
    pub fn show_empty(&mut self, info: PlaceholderInfo) {
        self.inner.show_empty(info);
        self.stop();
    }

    /// See [`PlaceholderAdapter::show_error`]. Stops paging.
    pub fn show_error(&mut self, info: PlaceholderInfo) {
        self.inner.show_error(info);
        self.stop();
    }

    /// See [`PlaceholderAdapter::hide_loading`].
    pub fn hide_loading(&mut self) -> bool {
        self.inner.hide_loading()
    }

    /// See [`PlaceholderAdapter::hide_empty`].
    pub fn hide_empty(&mut self) -> bool {
        self.inner.hide_empty()
    }

    /// See [`PlaceholderAdapter::hide_error`].
    pub fn hide_error(&mut self) -> bool {
        self.inner.hide_error()
    }

    /// Handles user activation of the row at `position`.
    ///
    /// A failed footer retries its page; placeholders behave as in
    /// [`PlaceholderAdapter::activate`].
    pub fn activate(&mut self, position: usize) -> Activation {
        match self.inner.row(position) {
            Some(Row::Footer(_)) => {
                if self.footer == FooterState::Failed && self.retry() {
                    Activation::PageRequested { page: self.page }
                } else {
                    Activation::Ignored
                }
            }
            _ => self.inner.activate(position),
        }
    }

    // --- host-facing dispatch ---

    /// Number of rows the host should show, footer included.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.inner.item_count()
    }

    /// See [`ListAdapter::view_type`](crate::ListAdapter::view_type).
    ///
    /// # Errors
    ///
    /// See [`ListAdapter::view_type`](crate::ListAdapter::view_type).
    pub fn view_type(&self, position: usize) -> Result<ViewType, AdapterError<RowKind<T::Kind>>> {
        self.inner.view_type(position)
    }

    /// See [`ListAdapter::create_renderer`](crate::ListAdapter::create_renderer).
    ///
    /// # Errors
    ///
    /// See [`ListAdapter::create_renderer`](crate::ListAdapter::create_renderer).
    pub fn create_renderer(
        &self,
        view_type: ViewType,
        parent: &mut R::Parent,
    ) -> Result<R, AdapterError<RowKind<T::Kind>>> {
        self.inner.create_renderer(view_type, parent)
    }

    /// Binds the row at `position`, then requests the next page if the row is
    /// close enough to the end.
    ///
    /// # Errors
    ///
    /// See [`ListAdapter::bind_renderer`](crate::ListAdapter::bind_renderer).
    /// Nothing is requested when binding fails.
    pub fn bind_renderer(
        &mut self,
        renderer: &mut R,
        position: usize,
    ) -> Result<(), AdapterError<RowKind<T::Kind>>> {
        self.inner.bind_renderer(renderer, position)?;
        let near_end = position
            .saturating_add(1)
            .saturating_add(self.config.load_threshold)
            >= self.inner.item_count();
        if self.footer == FooterState::LoadingMore && near_end {
            self.request_next_page();
        }
        Ok(())
    }

    /// See [`ListAdapter::renderer_attached`](crate::ListAdapter::renderer_attached).
    pub fn renderer_attached(&self, renderer: &mut R) {
        self.inner.renderer_attached(renderer);
    }

    /// See [`ListAdapter::renderer_detached`](crate::ListAdapter::renderer_detached).
    pub fn renderer_detached(&self, renderer: &mut R) {
        self.inner.renderer_detached(renderer);
    }

    /// See [`ListAdapter::renderer_recycled`](crate::ListAdapter::renderer_recycled).
    pub fn renderer_recycled(&self, renderer: &mut R) {
        self.inner.renderer_recycled(renderer);
    }

    /// See [`PlaceholderAdapter::span_size`].
    #[must_use]
    pub fn span_size(&self, position: usize, span_count: NonZeroUsize) -> usize {
        self.inner.span_size(position, span_count)
    }

    /// Content item at `position`; `None` for the footer and placeholders.
    #[must_use]
    pub fn item(&self, position: usize) -> Option<&T> {
        self.inner.item(position)
    }

    /// See [`PlaceholderAdapter::position_of`].
    #[must_use]
    pub fn position_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.inner.position_of(item)
    }

    /// See [`PlaceholderAdapter::position_of_kind`].
    #[must_use]
    pub fn position_of_kind(&self, kind: T::Kind) -> Option<usize> {
        self.inner.position_of_kind(kind)
    }

    /// See [`PlaceholderAdapter::contains_kind`].
    #[must_use]
    pub fn contains_kind(&self, kind: T::Kind) -> bool {
        self.inner.contains_kind(kind)
    }

    /// See [`PlaceholderAdapter::remove_item`].
    pub fn remove_item(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.inner.remove_item(item)
    }

    /// See [`PlaceholderAdapter::remove_items`]. The footer stays.
    pub fn remove_items(&mut self, start: usize, count: usize) -> usize {
        self.inner.remove_items(start, count)
    }

    /// See [`PlaceholderAdapter::swap`].
    ///
    /// # Errors
    ///
    /// See [`PlaceholderAdapter::swap`].
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), AdapterError<RowKind<T::Kind>>> {
        self.inner.swap(a, b)
    }

    /// The placeholder layer, read-only.
    #[must_use]
    pub fn placeholders(&self) -> &PlaceholderAdapter<T, R, O> {
        &self.inner
    }

    /// The placeholder layer, for content edits outside the paging flow.
    ///
    /// Replacing all content here also drops the footer; the next
    /// [`set_page_items`](Self::set_page_items) restores it.
    pub fn placeholders_mut(&mut self) -> &mut PlaceholderAdapter<T, R, O> {
        &mut self.inner
    }

    /// The change observer, for manual notifications and for draining buffered changes.
    pub fn observer_mut(&mut self) -> &mut O {
        self.inner.observer_mut()
    }

    fn state_after_page(has_more: bool) -> FooterState {
        if has_more {
            FooterState::LoadingMore
        } else {
            FooterState::Ended
        }
    }

    /// Updates the footer state and the footer row, without notifying. Returns
    /// the footer position.
    fn set_footer_state(&mut self, state: FooterState) -> Option<usize> {
        if self.footer != state {
            log::debug!("footer {:?} -> {state:?}", self.footer);
            self.footer = state;
        }
        let position = self.footer_position()?;
        if let Some(row) = self.inner.rows_mut().store_mut().get_mut(position) {
            *row = Row::Footer(state);
        }
        Some(position)
    }

    fn request_next_page(&mut self) {
        if self.loading {
            log::trace!("page {} is still loading", self.page);
            return;
        }
        self.loading = true;
        self.page += 1;
        log::debug!("requesting page {}", self.page);
        self.notify_load(self.page);
    }

    fn notify_load(&mut self, page: u32) {
        if let Some(on_load_next_page) = self.on_load_next_page.as_mut() {
            on_load_next_page(page);
        }
    }

    fn stop(&mut self) {
        self.loading = false;
        self.set_footer_state(FooterState::Ended);
    }
}
