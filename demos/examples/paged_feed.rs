// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A paged news feed driven through a simulated recycling list.
//!
//! This example shows how a host widget and a data source meet the adapter:
//! - the host recycles renderers by view type and binds the rows in its viewport,
//! - binding near the end of the list queues the next page,
//! - the data source answers each request, failing once to show the retry path.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example paged_feed`

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use understory_list_adapter::{
    Activation, Change, FirstPage, ItemKind, ListItem, PagingAdapter, PagingConfig, Renderer,
    StatusKind, StatusRenderer, StatusView, ViewType, factory_fn,
};

const PAGE_SIZE: u32 = 4;
const LAST_PAGE: u32 = 4;
const VIEWPORT: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum FeedKind {
    Article,
    Sponsored,
}

impl ItemKind for FeedKind {}

#[derive(Clone, Debug)]
enum FeedEntry {
    Article { id: u32, title: String },
    Sponsored { brand: &'static str },
}

impl ListItem for FeedEntry {
    type Kind = FeedKind;

    fn kind(&self) -> FeedKind {
        match self {
            Self::Article { .. } => FeedKind::Article,
            Self::Sponsored { .. } => FeedKind::Sponsored,
        }
    }
}

/// One on-screen line. The host keeps a pool of these per view type.
#[derive(Debug, Default)]
struct Line {
    text: String,
    tappable: bool,
}

impl Renderer for Line {
    /// Counts how many renderers the host had to build.
    type Parent = usize;
}

impl StatusRenderer for Line {
    fn create_status(built: &mut usize, _: StatusKind) -> Self {
        *built += 1;
        Self::default()
    }

    fn show_status(&mut self, status: &StatusView<'_>) {
        (self.text, self.tappable) = match status {
            StatusView::Loading => ("[ loading... ]".to_owned(), false),
            StatusView::Empty { message, can_retry } | StatusView::Error { message, can_retry } => {
                (format!("[ {message} ]"), *can_retry)
            }
            StatusView::Footer(state) => (format!("--- {state:?} ---"), true),
        };
    }
}

/// Fake backend: serves `LAST_PAGE` pages and fails the first request for page 3.
struct Backend {
    failed_once: bool,
}

impl Backend {
    fn fetch(&mut self, page: u32) -> Result<Vec<FeedEntry>, String> {
        if page == 3 && !self.failed_once {
            self.failed_once = true;
            return Err(format!("timeout while fetching page {page}"));
        }
        let first = (page - 1) * PAGE_SIZE;
        let mut entries: Vec<_> = (first..first + PAGE_SIZE)
            .map(|id| FeedEntry::Article {
                id,
                title: format!("Headline number {id}"),
            })
            .collect();
        entries.insert(1, FeedEntry::Sponsored { brand: "Acme" });
        Ok(entries)
    }
}

/// Simulated recycling list widget.
#[derive(Default)]
struct Host {
    pool: HashMap<ViewType, Vec<Line>>,
    built: usize,
    top: usize,
}

impl Host {
    fn render(&mut self, feed: &mut PagingAdapter<FeedEntry, Line>) {
        let changes: Vec<Change> = feed.observer_mut().take().into_vec();
        log::debug!("host applies {changes:?}");
        let end = (self.top + VIEWPORT).min(feed.item_count());
        println!("viewport {}..{end} of {}", self.top, feed.item_count());
        for position in self.top..end {
            let view_type = match feed.view_type(position) {
                Ok(view_type) => view_type,
                Err(err) => {
                    println!("  {position:>2}: <{err}>");
                    continue;
                }
            };
            let mut line = match self.pool.get_mut(&view_type).and_then(Vec::pop) {
                Some(line) => line,
                None => match feed.create_renderer(view_type, &mut self.built) {
                    Ok(line) => line,
                    Err(err) => {
                        println!("  {position:>2}: <{err}>");
                        continue;
                    }
                },
            };
            feed.renderer_attached(&mut line);
            if feed.bind_renderer(&mut line, position).is_ok() {
                let marker = if line.tappable { "*" } else { " " };
                println!("  {position:>2}:{marker}{}", line.text);
            }
            feed.renderer_recycled(&mut line);
            self.pool.entry(view_type).or_default().push(line);
        }
    }

    fn scroll_to_end(&mut self, feed: &PagingAdapter<FeedEntry, Line>) {
        self.top = feed.item_count().saturating_sub(VIEWPORT);
    }
}

fn main() {
    env_logger::init();

    let mut feed: PagingAdapter<FeedEntry, Line> =
        PagingAdapter::with_config(PagingConfig::default().with_load_threshold(1));
    feed.register(
        FeedKind::Article,
        factory_fn(
            |built: &mut usize| {
                *built += 1;
                Line::default()
            },
            |line: &mut Line, entry: &FeedEntry| {
                if let FeedEntry::Article { id, title } = entry {
                    line.text = format!("#{id} {title}");
                    line.tappable = false;
                }
            },
        ),
    )
    .expect("article kind registers once");
    feed.register(
        FeedKind::Sponsored,
        factory_fn(
            |built: &mut usize| {
                *built += 1;
                Line::default()
            },
            |line: &mut Line, entry: &FeedEntry| {
                if let FeedEntry::Sponsored { brand } = entry {
                    line.text = format!("(sponsored by {brand})");
                    line.tappable = false;
                }
            },
        ),
    )
    .expect("sponsored kind registers once");

    let requests = Rc::new(RefCell::new(VecDeque::new()));
    let queue = Rc::clone(&requests);
    feed.set_on_load_next_page(move |page| queue.borrow_mut().push_back(page));

    let mut backend = Backend { failed_once: false };
    let mut host = Host::default();

    feed.show_loading();
    host.render(&mut feed);

    let first = match backend.fetch(1) {
        Ok(items) => FirstPage::Items {
            items,
            has_more: LAST_PAGE > 1,
        },
        Err(_) => FirstPage::Pending,
    };
    feed.set_first_page(first);
    host.render(&mut feed);

    for _ in 0..8 {
        host.scroll_to_end(&feed);
        host.render(&mut feed);

        let next = requests.borrow_mut().pop_front();
        let Some(page) = next else {
            match feed.footer_position() {
                Some(footer) if feed.activate(footer) != Activation::Ignored => {
                    println!("user tapped the footer");
                    continue;
                }
                _ => break,
            }
        };
        match backend.fetch(page) {
            Ok(items) => {
                println!("page {page} arrived");
                feed.append_page_items(items, page < LAST_PAGE);
            }
            Err(err) => {
                println!("page {page} failed: {err}");
                feed.on_load_page_failed();
            }
        }
    }

    host.scroll_to_end(&feed);
    host.render(&mut feed);
    println!(
        "done: {} rows, page {}, footer {:?}, {} renderers built",
        feed.item_count(),
        feed.current_page(),
        feed.footer_state(),
        host.built
    );
}
