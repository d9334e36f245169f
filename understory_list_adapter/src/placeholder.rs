// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placeholder overlay: loading, empty and error rows that stand in for content.
//!
//! [`PlaceholderAdapter`] stores [`Row`]s rather than bare items. A row is either
//! caller content, one of the three placeholders, or the paging footer. At most
//! one placeholder is present at a time and, while it is, it is the only row.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;
use core::num::NonZeroUsize;

use crate::{
    AdapterError, ChangeLog, ChangeObserver, FooterState, ItemKind, KindShape, ListAdapter,
    ListItem, Renderer, RendererFactory, ViewType,
};

/// Message shown by the empty placeholder when the caller gives none.
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data";

/// Message shown by the error placeholder when the caller gives none.
pub const DEFAULT_ERROR_MESSAGE: &str = "Failed to load";

/// Callback run when the user activates a retry affordance.
pub type RetryFn = Box<dyn FnMut()>;

/// Optional message and retry callback carried by the empty and error placeholders.
#[derive(Default)]
pub struct PlaceholderInfo {
    message: Option<Cow<'static, str>>,
    retry: Option<RetryFn>,
}

impl fmt::Debug for PlaceholderInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderInfo")
            .field("message", &self.message)
            .field("has_retry", &self.retry.is_some())
            .finish_non_exhaustive()
    }
}

impl PlaceholderInfo {
    /// No message, no retry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message shown instead of the default one.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the callback run when the user activates the placeholder.
    #[must_use]
    pub fn with_retry(mut self, retry: impl FnMut() + 'static) -> Self {
        self.retry = Some(Box::new(retry));
        self
    }

    /// The caller-provided message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns `true` if a retry callback is attached.
    #[must_use]
    pub fn has_retry(&self) -> bool {
        self.retry.is_some()
    }

    /// Runs the retry callback once. Returns `false` if there is none.
    pub fn retry(&mut self) -> bool {
        match self.retry.as_mut() {
            Some(retry) => {
                retry();
                true
            }
            None => false,
        }
    }
}

/// One of the three full-list placeholders.
#[derive(Debug)]
pub enum Placeholder {
    /// Data is being fetched.
    Loading,
    /// The fetch returned nothing.
    Empty(PlaceholderInfo),
    /// The fetch failed.
    Error(PlaceholderInfo),
}

impl Placeholder {
    /// Which status row this is.
    #[must_use]
    pub fn status_kind(&self) -> StatusKind {
        match self {
            Self::Loading => StatusKind::Loading,
            Self::Empty(_) => StatusKind::Empty,
            Self::Error(_) => StatusKind::Error,
        }
    }

    /// Message and retry callback, for the empty and error placeholders.
    #[must_use]
    pub fn info(&self) -> Option<&PlaceholderInfo> {
        match self {
            Self::Loading => None,
            Self::Empty(info) | Self::Error(info) => Some(info),
        }
    }

    /// What a status renderer should display, with default messages filled in.
    #[must_use]
    pub fn view(&self) -> StatusView<'_> {
        match self {
            Self::Loading => StatusView::Loading,
            Self::Empty(info) => StatusView::Empty {
                message: info.message().unwrap_or(DEFAULT_EMPTY_MESSAGE),
                can_retry: info.has_retry(),
            },
            Self::Error(info) => StatusView::Error {
                message: info.message().unwrap_or(DEFAULT_ERROR_MESSAGE),
                can_retry: info.has_retry(),
            },
        }
    }

    fn info_mut(&mut self) -> Option<&mut PlaceholderInfo> {
        match self {
            Self::Loading => None,
            Self::Empty(info) | Self::Error(info) => Some(info),
        }
    }
}

/// A row of a [`PlaceholderAdapter`] or [`PagingAdapter`](crate::PagingAdapter).
#[derive(Debug)]
pub enum Row<T> {
    /// Caller content.
    Item(T),
    /// A full-list placeholder.
    Placeholder(Placeholder),
    /// The paging footer, carrying the state it was last refreshed with.
    Footer(FooterState),
}

impl<T> Row<T> {
    /// The content item, if this row holds one.
    #[must_use]
    pub fn as_item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Consumes the row, returning its content item if it holds one.
    #[must_use]
    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// The placeholder, if this row is one.
    #[must_use]
    pub fn placeholder(&self) -> Option<&Placeholder> {
        match self {
            Self::Placeholder(placeholder) => Some(placeholder),
            _ => None,
        }
    }

    /// Returns `true` for placeholder rows.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }

    /// Returns `true` for the paging footer.
    #[must_use]
    pub fn is_footer(&self) -> bool {
        matches!(self, Self::Footer(_))
    }

    /// Returns `true` for rows that occupy a whole grid line.
    #[must_use]
    pub fn is_full_span(&self) -> bool {
        !matches!(self, Self::Item(_))
    }
}

/// Kind tag of a [`Row`]: the content kind, or one of the built-in rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowKind<K> {
    /// Content of kind `K`.
    Item(K),
    /// [`Placeholder::Loading`].
    Loading,
    /// [`Placeholder::Empty`].
    Empty,
    /// [`Placeholder::Error`].
    Error,
    /// [`Row::Footer`].
    Footer,
}

impl<K: ItemKind> ItemKind for RowKind<K> {
    fn shape(self) -> KindShape {
        match self {
            Self::Item(kind) => kind.shape(),
            _ => KindShape::Concrete,
        }
    }

    fn parent(self) -> Option<Self> {
        match self {
            Self::Item(kind) => kind.parent().map(Self::Item),
            _ => None,
        }
    }
}

impl<T: ListItem> ListItem for Row<T> {
    type Kind = RowKind<T::Kind>;

    fn kind(&self) -> Self::Kind {
        match self {
            Self::Item(item) => RowKind::Item(item.kind()),
            Self::Placeholder(Placeholder::Loading) => RowKind::Loading,
            Self::Placeholder(Placeholder::Empty(_)) => RowKind::Empty,
            Self::Placeholder(Placeholder::Error(_)) => RowKind::Error,
            Self::Footer(_) => RowKind::Footer,
        }
    }
}

/// The built-in row a status renderer is created for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Loading placeholder.
    Loading,
    /// Empty placeholder.
    Empty,
    /// Error placeholder.
    Error,
    /// Paging footer.
    Footer,
}

/// Resolved content of a built-in row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusView<'a> {
    /// Show a progress indicator.
    Loading,
    /// Nothing to show.
    Empty {
        /// Caller message or [`DEFAULT_EMPTY_MESSAGE`].
        message: &'a str,
        /// Whether activating the row retries.
        can_retry: bool,
    },
    /// Loading failed.
    Error {
        /// Caller message or [`DEFAULT_ERROR_MESSAGE`].
        message: &'a str,
        /// Whether activating the row retries.
        can_retry: bool,
    },
    /// The paging footer. A [`FooterState::Failed`] footer retries on activation.
    Footer(FooterState),
}

/// A renderer that can also draw the built-in rows.
///
/// Implementing this gives [`PlaceholderFactories::default`] and
/// [`PagingAdapter::new`](crate::PagingAdapter::new) something to build with, so
/// hosts that are happy with one generic status row never write a factory for it.
pub trait StatusRenderer: Renderer + Sized {
    /// Builds a renderer for a built-in row.
    fn create_status(parent: &mut Self::Parent, kind: StatusKind) -> Self;

    /// Shows `status`, replacing whatever the renderer showed before.
    fn show_status(&mut self, status: &StatusView<'_>);
}

/// Factory for built-in rows drawn by a [`StatusRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusFactory(StatusKind);

impl StatusFactory {
    /// A factory whose renderers are created for `kind`.
    #[must_use]
    pub const fn new(kind: StatusKind) -> Self {
        Self(kind)
    }
}

impl<R: StatusRenderer> RendererFactory<Placeholder, R> for StatusFactory {
    fn create(&self, parent: &mut R::Parent) -> R {
        R::create_status(parent, self.0)
    }

    fn bind(&self, renderer: &mut R, item: &Placeholder) {
        renderer.show_status(&item.view());
    }
}

impl<R: StatusRenderer> RendererFactory<FooterState, R> for StatusFactory {
    fn create(&self, parent: &mut R::Parent) -> R {
        R::create_status(parent, self.0)
    }

    fn bind(&self, renderer: &mut R, item: &FooterState) {
        renderer.show_status(&StatusView::Footer(*item));
    }
}

/// Factories for the three placeholder rows.
pub struct PlaceholderFactories<R: Renderer> {
    loading: Box<dyn RendererFactory<Placeholder, R>>,
    empty: Box<dyn RendererFactory<Placeholder, R>>,
    error: Box<dyn RendererFactory<Placeholder, R>>,
}

impl<R: Renderer> fmt::Debug for PlaceholderFactories<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderFactories").finish_non_exhaustive()
    }
}

impl<R: StatusRenderer> Default for PlaceholderFactories<R> {
    fn default() -> Self {
        Self {
            loading: Box::new(StatusFactory::new(StatusKind::Loading)),
            empty: Box::new(StatusFactory::new(StatusKind::Empty)),
            error: Box::new(StatusFactory::new(StatusKind::Error)),
        }
    }
}

impl<R: Renderer> PlaceholderFactories<R> {
    /// Uses the given factories for the loading, empty and error rows.
    pub fn new(
        loading: impl RendererFactory<Placeholder, R> + 'static,
        empty: impl RendererFactory<Placeholder, R> + 'static,
        error: impl RendererFactory<Placeholder, R> + 'static,
    ) -> Self {
        Self {
            loading: Box::new(loading),
            empty: Box::new(empty),
            error: Box::new(error),
        }
    }

    /// Replaces the loading row factory.
    #[must_use]
    pub fn with_loading(mut self, factory: impl RendererFactory<Placeholder, R> + 'static) -> Self {
        self.loading = Box::new(factory);
        self
    }

    /// Replaces the empty row factory.
    #[must_use]
    pub fn with_empty(mut self, factory: impl RendererFactory<Placeholder, R> + 'static) -> Self {
        self.empty = Box::new(factory);
        self
    }

    /// Replaces the error row factory.
    #[must_use]
    pub fn with_error(mut self, factory: impl RendererFactory<Placeholder, R> + 'static) -> Self {
        self.error = Box::new(factory);
        self
    }
}

/// Outcome of [`PlaceholderAdapter::activate`] and
/// [`PagingAdapter::activate`](crate::PagingAdapter::activate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Activation {
    /// A placeholder's retry callback ran.
    Retried,
    /// The failed footer requested `page` again.
    PageRequested {
        /// Page handed to the next-page callback.
        page: u32,
    },
    /// The row has no retry affordance.
    Ignored,
}

struct ItemRows<F>(F);

impl<T, R, F> RendererFactory<Row<T>, R> for ItemRows<F>
where
    R: Renderer,
    F: RendererFactory<T, R>,
{
    fn create(&self, parent: &mut R::Parent) -> R {
        self.0.create(parent)
    }

    fn bind(&self, renderer: &mut R, row: &Row<T>) {
        if let Row::Item(item) = row {
            self.0.bind(renderer, item);
        }
    }
}

struct PlaceholderRows<F>(F);

impl<T, R, F> RendererFactory<Row<T>, R> for PlaceholderRows<F>
where
    R: Renderer,
    F: RendererFactory<Placeholder, R>,
{
    fn create(&self, parent: &mut R::Parent) -> R {
        self.0.create(parent)
    }

    fn bind(&self, renderer: &mut R, row: &Row<T>) {
        if let Row::Placeholder(placeholder) = row {
            self.0.bind(renderer, placeholder);
        }
    }
}

pub(crate) struct FooterRows<F>(pub(crate) F);

impl<T, R, F> RendererFactory<Row<T>, R> for FooterRows<F>
where
    R: Renderer,
    F: RendererFactory<FooterState, R>,
{
    fn create(&self, parent: &mut R::Parent) -> R {
        self.0.create(parent)
    }

    fn bind(&self, renderer: &mut R, row: &Row<T>) {
        if let Row::Footer(state) = row {
            self.0.bind(renderer, state);
        }
    }
}

/// A [`ListAdapter`] over [`Row`]s that can swap its content for a placeholder.
///
/// - [`show_loading`](Self::show_loading), [`show_empty`](Self::show_empty) and
///   [`show_error`](Self::show_error) replace every row with one placeholder and
///   invalidate the whole list.
/// - Adding content while a placeholder shows removes the placeholder first.
/// - [`activate`](Self::activate) runs the retry callback of an empty or error row.
///
/// ```rust
/// use understory_list_adapter::{
///     ItemKind, ListItem, PlaceholderAdapter, PlaceholderInfo, Renderer, StatusKind,
///     StatusRenderer, StatusView, factory_fn,
/// };
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// struct Note;
/// impl ItemKind for Note {}
///
/// struct Text(&'static str);
/// impl ListItem for Text {
///     type Kind = Note;
///     fn kind(&self) -> Note {
///         Note
///     }
/// }
///
/// #[derive(Default)]
/// struct Label(String);
/// impl Renderer for Label {
///     type Parent = ();
/// }
/// impl StatusRenderer for Label {
///     fn create_status(_: &mut (), _: StatusKind) -> Self {
///         Self::default()
///     }
///     fn show_status(&mut self, status: &StatusView<'_>) {
///         if let StatusView::Empty { message, .. } = status {
///             self.0 = message.to_string();
///         }
///     }
/// }
///
/// let mut adapter: PlaceholderAdapter<Text, Label> = PlaceholderAdapter::new();
/// adapter
///     .register(Note, factory_fn(|_: &mut ()| Label::default(), |l: &mut Label, t: &Text| {
///         l.0 = t.0.to_string();
///     }))
///     .unwrap();
///
/// adapter.show_empty(PlaceholderInfo::new());
/// let mut label = adapter.create_renderer(adapter.view_type(0).unwrap(), &mut ()).unwrap();
/// adapter.bind_renderer(&mut label, 0).unwrap();
/// assert_eq!(label.0, "No data");
///
/// adapter.append_items([Text("first note")]);
/// assert_eq!(adapter.item_count(), 1);
/// assert!(adapter.placeholder().is_none());
/// ```
pub struct PlaceholderAdapter<T: ListItem, R: Renderer, O = ChangeLog> {
    rows: ListAdapter<Row<T>, R, O>,
}

impl<T, R, O> fmt::Debug for PlaceholderAdapter<T, R, O>
where
    T: ListItem + fmt::Debug,
    R: Renderer,
    O: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderAdapter")
            .field("rows", &self.rows)
            .finish()
    }
}

impl<T: ListItem, R: StatusRenderer + 'static> Default for PlaceholderAdapter<T, R> {
    fn default() -> Self {
        Self::with_factories(PlaceholderFactories::default(), ChangeLog::new())
    }
}

impl<T: ListItem, R: StatusRenderer + 'static> PlaceholderAdapter<T, R> {
    /// Creates an adapter whose placeholders are drawn by `R` itself.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, R, O> PlaceholderAdapter<T, R, O>
where
    T: ListItem,
    R: Renderer + 'static,
    O: ChangeObserver,
{
    /// Creates an adapter with custom placeholder factories that reports to `observer`.
    pub fn with_factories(factories: PlaceholderFactories<R>, observer: O) -> Self {
        let PlaceholderFactories {
            loading,
            empty,
            error,
        } = factories;
        let mut rows = ListAdapter::with_observer(observer);
        let registered = rows.register_all([
            (RowKind::Loading, boxed_placeholder_rows(loading)),
            (RowKind::Empty, boxed_placeholder_rows(empty)),
            (RowKind::Error, boxed_placeholder_rows(error)),
        ]);
        debug_assert!(registered.is_ok(), "placeholder rows go into a fresh registry");
        Self { rows }
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
        self.rows.register(RowKind::Item(kind), ItemRows(factory))
    }

    // --- placeholders ---

    /// Replaces every row with the loading placeholder.
    pub fn show_loading(&mut self) {
        self.show(Placeholder::Loading);
    }

    /// Replaces every row with the empty placeholder.
    pub fn show_empty(&mut self, info: PlaceholderInfo) {
        self.show(Placeholder::Empty(info));
    }

    /// Replaces every row with the error placeholder.
    pub fn show_error(&mut self, info: PlaceholderInfo) {
        self.show(Placeholder::Error(info));
    }

    /// Removes the loading placeholder; returns `false` if it was not showing.
    pub fn hide_loading(&mut self) -> bool {
        self.hide(RowKind::Loading)
    }

    /// Removes the empty placeholder; returns `false` if it was not showing.
    pub fn hide_empty(&mut self) -> bool {
        self.hide(RowKind::Empty)
    }

    /// Removes the error placeholder; returns `false` if it was not showing.
    pub fn hide_error(&mut self) -> bool {
        self.hide(RowKind::Error)
    }

    /// The placeholder currently showing, if any.
    #[must_use]
    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.rows.store().iter().find_map(Row::placeholder)
    }

    /// Handles user activation of the row at `position`.
    ///
    /// Empty and error placeholders run their retry callback, once per call.
    pub fn activate(&mut self, position: usize) -> Activation {
        let retried = self
            .rows
            .store_mut()
            .get_mut(position)
            .and_then(|row| match row {
                Row::Placeholder(placeholder) => placeholder.info_mut(),
                _ => None,
            })
            .is_some_and(PlaceholderInfo::retry);
        if retried {
            log::debug!("retry requested from placeholder at {position}");
            Activation::Retried
        } else {
            Activation::Ignored
        }
    }

    /// Grid columns taken by the row at `position`: all of them for placeholder
    /// and footer rows, one otherwise.
    #[must_use]
    pub fn span_size(&self, position: usize, span_count: NonZeroUsize) -> usize {
        match self.rows.item(position) {
            Some(row) if row.is_full_span() => span_count.get(),
            _ => 1,
        }
    }

    // --- content ---

    /// Replaces all rows with `items` and invalidates the whole list.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = T>) {
        self.rows.set_items(items.into_iter().map(Row::Item));
    }

    /// Appends `items`, removing a showing placeholder first. Returns how many were added.
    pub fn append_items(&mut self, items: impl IntoIterator<Item = T>) -> usize {
        self.drop_placeholder();
        self.rows.append_items(items.into_iter().map(Row::Item))
    }

    /// Inserts `items` at `position`, removing a showing placeholder first.
    ///
    /// Returns how many were inserted; nothing is inserted if `position` is past
    /// the end once the placeholder is gone.
    pub fn insert_items(&mut self, position: usize, items: impl IntoIterator<Item = T>) -> usize {
        self.drop_placeholder();
        self.rows
            .insert_items(position, items.into_iter().map(Row::Item))
    }

    /// Removes the row at `position`, if any.
    pub fn remove_row_at(&mut self, position: usize) -> Option<Row<T>> {
        self.rows.remove_item_at(position)
    }

    /// Replaces the row at `position` with `item`, returning the previous row.
    ///
    /// # Errors
    ///
    /// [`AdapterError::IndexOutOfRange`] if `position >= item_count()`.
    pub fn update(
        &mut self,
        position: usize,
        item: T,
    ) -> Result<Row<T>, AdapterError<RowKind<T::Kind>>> {
        self.rows.update(position, Row::Item(item))
    }

    /// Content item at `position`; `None` for built-in rows and out-of-range positions.
    #[must_use]
    pub fn item(&self, position: usize) -> Option<&T> {
        self.rows.item(position).and_then(Row::as_item)
    }

    /// Row at `position`.
    #[must_use]
    pub fn row(&self, position: usize) -> Option<&Row<T>> {
        self.rows.item(position)
    }

    /// Content items whose kind is `kind` or descends from it.
    pub fn items_of_kind(&self, kind: T::Kind) -> impl Iterator<Item = &T> + '_ {
        self.rows
            .items_of_kind(RowKind::Item(kind))
            .filter_map(Row::as_item)
    }

    /// Position of the first content item equal to `item`.
    #[must_use]
    pub fn position_of(&self, item: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.rows.store().position(|row| row.as_item() == Some(item))
    }

    /// Position of the first content item of exactly `kind`.
    #[must_use]
    pub fn position_of_kind(&self, kind: T::Kind) -> Option<usize> {
        self.rows.position_of_kind(RowKind::Item(kind))
    }

    /// Returns `true` if some content item has exactly `kind`.
    #[must_use]
    pub fn contains_kind(&self, kind: T::Kind) -> bool {
        self.rows.contains_kind(RowKind::Item(kind))
    }

    /// Removes the first content item equal to `item`, if any.
    pub fn remove_item(&mut self, item: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let position = self.position_of(item)?;
        self.rows.remove_item_at(position).and_then(Row::into_item)
    }

    /// Removes up to `count` content items from `start` and returns how many were removed.
    ///
    /// Built-in rows are never removed; the count stops at the end of the content.
    pub fn remove_items(&mut self, start: usize, count: usize) -> usize {
        let content = self.content_len();
        if start >= content {
            return 0;
        }
        self.rows.remove_items(start, count.min(content - start))
    }

    /// Swaps the content items at `a` and `b`.
    ///
    /// # Errors
    ///
    /// [`AdapterError::IndexOutOfRange`] if either position is not a content row;
    /// `len` is then the number of content items.
    pub fn swap(&mut self, a: usize, b: usize) -> Result<(), AdapterError<RowKind<T::Kind>>> {
        let len = self.content_len();
        for index in [a, b] {
            if index >= len {
                return Err(AdapterError::IndexOutOfRange { index, len });
            }
        }
        self.rows.swap(a, b)
    }

    // --- host-facing dispatch ---

    /// Number of rows the host should show, built-in rows included.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.rows.item_count()
    }

    /// See [`ListAdapter::view_type`].
    ///
    /// # Errors
    ///
    /// See [`ListAdapter::view_type`].
    pub fn view_type(&self, position: usize) -> Result<ViewType, AdapterError<RowKind<T::Kind>>> {
        self.rows.view_type(position)
    }

    /// See [`ListAdapter::create_renderer`].
    ///
    /// # Errors
    ///
    /// See [`ListAdapter::create_renderer`].
    pub fn create_renderer(
        &self,
        view_type: ViewType,
        parent: &mut R::Parent,
    ) -> Result<R, AdapterError<RowKind<T::Kind>>> {
        self.rows.create_renderer(view_type, parent)
    }

    /// See [`ListAdapter::bind_renderer`].
    ///
    /// # Errors
    ///
    /// See [`ListAdapter::bind_renderer`].
    pub fn bind_renderer(
        &self,
        renderer: &mut R,
        position: usize,
    ) -> Result<(), AdapterError<RowKind<T::Kind>>> {
        self.rows.bind_renderer(renderer, position)
    }

    /// See [`ListAdapter::renderer_attached`].
    pub fn renderer_attached(&self, renderer: &mut R) {
        self.rows.renderer_attached(renderer);
    }

    /// See [`ListAdapter::renderer_detached`].
    pub fn renderer_detached(&self, renderer: &mut R) {
        self.rows.renderer_detached(renderer);
    }

    /// See [`ListAdapter::renderer_recycled`].
    pub fn renderer_recycled(&self, renderer: &mut R) {
        self.rows.renderer_recycled(renderer);
    }

    /// The underlying row adapter.
    #[must_use]
    pub fn rows(&self) -> &ListAdapter<Row<T>, R, O> {
        &self.rows
    }

    /// The underlying row adapter, for row-level mutations.
    pub fn rows_mut(&mut self) -> &mut ListAdapter<Row<T>, R, O> {
        &mut self.rows
    }

    /// The change observer.
    #[must_use]
    pub fn observer(&self) -> &O {
        self.rows.observer()
    }

    /// The change observer, for manual notifications and for draining buffered changes.
    pub fn observer_mut(&mut self) -> &mut O {
        self.rows.observer_mut()
    }

    fn show(&mut self, placeholder: Placeholder) {
        log::debug!("showing {:?} placeholder", placeholder.status_kind());
        self.rows.set_items([Row::Placeholder(placeholder)]);
    }

    fn hide(&mut self, kind: RowKind<T::Kind>) -> bool {
        let Some(position) = self.rows.position_of_kind(kind) else {
            return false;
        };
        log::debug!("hiding {kind:?} placeholder");
        self.rows.remove_item_at(position).is_some()
    }

    /// Content rows come first; this is where the first built-in row would be.
    fn content_len(&self) -> usize {
        self.rows
            .store()
            .position(|row| row.as_item().is_none())
            .unwrap_or_else(|| self.rows.item_count())
    }

    fn drop_placeholder(&mut self) {
        if let Some(position) = self.rows.store().position(Row::is_placeholder) {
            self.rows.remove_item_at(position);
        }
    }
}

fn boxed_placeholder_rows<T, R>(
    factory: Box<dyn RendererFactory<Placeholder, R>>,
) -> Box<dyn RendererFactory<Row<T>, R>>
where
    T: ListItem,
    R: Renderer + 'static,
{
    Box::new(PlaceholderRows(factory))
}
