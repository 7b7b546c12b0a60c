//! Terminal stand-ins for a list view and its pagination listener.

use crate::api::{self, Comment};
use endless_core::{LayoutKind, Orientation};
use endless_foundation::{ListHost, PaginatedList, RequestListener, ViewportMetrics};
use endless_runtime_std::{Looper, ThreadCall};
use reqwest::blocking::Client;
use std::cell::{Cell, RefCell};
use std::sync::Arc;

pub const VISIBLE_ROWS: usize = 8;

/// A vertical list showing [`VISIBLE_ROWS`] rows of the loaded comments.
#[derive(Debug, Default)]
pub struct ConsoleHost {
    first_visible: Cell<usize>,
    total: Cell<usize>,
    redraws: Cell<usize>,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_total(&self, total: usize) {
        self.total.set(total);
    }

    /// Moves the window down by `rows`, stopping at the last row.
    pub fn scroll_by(&self, rows: usize) {
        let last_start = self.total.get().saturating_sub(VISIBLE_ROWS);
        let next = (self.first_visible.get() + rows).min(last_start);
        self.first_visible.set(next);
    }

    pub fn redraws(&self) -> usize {
        self.redraws.get()
    }
}

impl ListHost for ConsoleHost {
    fn layout_kind(&self) -> LayoutKind {
        LayoutKind::Linear(Orientation::Vertical)
    }

    fn viewport(&self) -> ViewportMetrics {
        let total = self.total.get();
        ViewportMetrics::new(total.min(VISIBLE_ROWS), self.first_visible.get(), total)
    }

    fn is_content_larger_than_viewport(&self) -> bool {
        self.total.get() > VISIBLE_ROWS
    }

    fn notify_data_changed(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }
}

/// Answers page requests with worker-thread fetches and prints progress.
pub struct ConsoleListener {
    looper: Looper,
    client: Arc<Client>,
    base_url: Arc<str>,
    list: RefCell<Option<PaginatedList<Comment>>>,
}

impl ConsoleListener {
    pub fn new(looper: &Looper, client: Client, base_url: &str) -> Self {
        Self {
            looper: looper.clone(),
            client: Arc::new(client),
            base_url: Arc::from(base_url),
            list: RefCell::new(None),
        }
    }

    /// Completes the wiring once the list exists.
    pub fn attach(&self, list: PaginatedList<Comment>) {
        if self.list.replace(Some(list)).is_some() {
            log::warn!("listener re-attached to a new list");
        }
    }

    /// Drops the listener's handle on the list. The list holds the listener,
    /// so the two leak each other until this runs.
    pub fn detach(&self) {
        self.list.take();
    }
}

impl RequestListener for ConsoleListener {
    fn on_request_started(&self) {
        println!("... loading");
    }

    fn on_request_error(&self, message: &str) {
        println!("!!! request error: {message}");
    }

    fn on_request_finished(&self) {
        log::debug!("request finished");
    }

    fn on_final_page_reached(&self) {
        println!("=== no more comments ===");
    }

    fn should_call_new_request(&self, page_index: u32) {
        let Some(list) = self.list.borrow().clone() else {
            log::warn!("page {page_index} requested while detached");
            return;
        };
        let client = Arc::clone(&self.client);
        let base_url = Arc::clone(&self.base_url);
        let call = ThreadCall::new(&self.looper, move |token| {
            api::fetch_page(&client, &base_url, page_index, &token)
        });
        if let Err(err) = list.update_request(call) {
            log::warn!("page {page_index} not requested: {err}");
        }
    }

    fn on_request_failed(&self, message: &str) {
        println!("!!! request failed: {message}");
    }
}
