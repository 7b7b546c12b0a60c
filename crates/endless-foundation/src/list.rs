//! The paginated list: triggers, state, store and coordinator wired to a host.

use crate::config::PaginationConfig;
use crate::host::ListHost;
use crate::item_store::ItemStore;
use crate::listener::{PaginationEvent, RequestListener};
use crate::pagination::{PaginationEvents, PaginationState, SuppressReason, TriggerDecision};
use crate::request::{Completion, FetchOutcome, PageCall, RequestCoordinator, RequestTicket};
use crate::trigger::{FlingGesture, ScrollPosition, TriggerDetector};
use endless_core::{Clock, PaginationError, PaginationResult, Scheduler, TaskId};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

const SCROLL_NOT_AVAILABLE: &str = "added items do not fill the list; increase the item size \
     or the page size, pagination is not available";

struct ListInner<T> {
    config: PaginationConfig,
    state: PaginationState,
    store: ItemStore<T>,
    detector: TriggerDetector,
    coordinator: RequestCoordinator<T>,
    auto_fetch: bool,
    scroll_enabled: bool,
    disposed: bool,
}

struct Shared<T> {
    host: Rc<dyn ListHost>,
    listener: Rc<dyn RequestListener>,
    clock: Rc<dyn Clock>,
    scheduler: Rc<dyn Scheduler>,
    inner: RefCell<ListInner<T>>,
}

impl<T> Drop for Shared<T> {
    fn drop(&mut self) {
        let inner = self.inner.get_mut();
        if let Some(mut call) = inner.coordinator.cancel() {
            call.cancel();
        }
        if let Some(task) = inner.coordinator.take_scroll_check() {
            self.scheduler.cancel(task);
        }
    }
}

/// Infinite-scroll pagination for one list.
///
/// The handle is cheap to clone; clones share state. Everything runs on the
/// UI thread. Listener and host callbacks are made after internal borrows
/// are released, so they may call back into the list.
///
/// Typical flow: the host forwards scroll frames to
/// [`PaginatedList::handle_scroll`] and flings to
/// [`PaginatedList::handle_fling`]; when the end is reached the listener's
/// `should_call_new_request(page)` fires, and the listener answers with
/// [`PaginatedList::update_request`] carrying a [`PageCall`] for that page.
pub struct PaginatedList<T> {
    shared: Rc<Shared<T>>,
}

impl<T> Clone for PaginatedList<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: 'static> PaginatedList<T> {
    /// Attaches pagination to `host`.
    ///
    /// Fails with [`PaginationError::UnsupportedLayout`] unless the host uses a
    /// single-axis linear layout.
    pub fn new(
        host: Rc<dyn ListHost>,
        listener: Rc<dyn RequestListener>,
        clock: Rc<dyn Clock>,
        scheduler: Rc<dyn Scheduler>,
        config: PaginationConfig,
    ) -> PaginationResult<Self> {
        let detector = TriggerDetector::new(host.layout_kind(), &config)?;
        let scroll_enabled = host.is_scroll_enabled();
        if !scroll_enabled {
            log::warn!("scrolling is disabled for the list, enable it to use pagination");
        }
        let inner = ListInner {
            state: PaginationState::new(config.debounce),
            store: ItemStore::new(),
            detector,
            coordinator: RequestCoordinator::new(),
            auto_fetch: false,
            scroll_enabled,
            disposed: false,
            config,
        };
        Ok(Self {
            shared: Rc::new(Shared {
                host,
                listener,
                clock,
                scheduler,
                inner: RefCell::new(inner),
            }),
        })
    }

    /// Binds the initial items and optionally asks for the first page right away.
    ///
    /// Non-empty seed data counts as page zero being loaded, so the page index
    /// moves to 1. With `auto_fetch_first_page` the listener is asked for the
    /// current page immediately, bypassing trigger evaluation, and pages that
    /// leave the viewport underfilled keep being requested.
    pub fn initialize(&self, seed_items: Vec<T>, auto_fetch_first_page: bool) {
        let mut events = PaginationEvents::new();
        let changed = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.disposed {
                log::debug!("ignoring initialize on a disposed list");
                return;
            }
            if !seed_items.is_empty() {
                inner.state.set_page_index(1);
            }
            inner.store.replace(seed_items);
            inner.auto_fetch = auto_fetch_first_page;
            if auto_fetch_first_page {
                let page_index = inner.state.page_index();
                events.push(PaginationEvent::ShouldCallNewRequest(page_index));
            }
            inner.store.take_changed()
        };
        self.flush(changed, events);
    }

    pub fn set_page_index(&self, page_index: u32) {
        self.shared.inner.borrow_mut().state.set_page_index(page_index);
    }

    pub fn page_index(&self) -> u32 {
        self.shared.inner.borrow().state.page_index()
    }

    /// Last page, once known.
    pub fn max_page(&self) -> Option<u32> {
        self.shared.inner.borrow().state.max_page()
    }

    pub fn is_in_flight(&self) -> bool {
        self.shared.inner.borrow().state.is_in_flight()
    }

    pub fn is_final_page_reached(&self) -> bool {
        self.shared.inner.borrow().state.is_final_page_reached()
    }

    pub fn scroll_position(&self) -> Option<ScrollPosition> {
        self.shared.inner.borrow().detector.last_position()
    }

    pub fn len(&self) -> usize {
        self.shared.inner.borrow().store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.inner.borrow().store.is_empty()
    }

    /// Runs `f` with the bound items.
    ///
    /// `f` must not call methods that mutate the list.
    pub fn with_items<R>(&self, f: impl FnOnce(&ItemStore<T>) -> R) -> R {
        let inner = self.shared.inner.borrow();
        f(&inner.store)
    }

    pub fn get(&self, index: usize) -> PaginationResult<T>
    where
        T: Clone,
    {
        self.shared.inner.borrow().store.get(index).cloned()
    }

    /// Feeds one scroll frame from the host.
    pub fn handle_scroll(&self, dx: f32, dy: f32) {
        let viewport = self.shared.host.viewport();
        let events = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.disposed || !inner.scroll_enabled {
                return;
            }
            if !inner.detector.on_scroll(dx, dy, &viewport) {
                return;
            }
            self.evaluate_locked(&mut inner)
        };
        self.flush(false, events);
    }

    /// Feeds one completed fling from the host.
    pub fn handle_fling(&self, fling: FlingGesture) {
        let events = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.disposed || !inner.detector.on_fling(&fling) {
                return;
            }
            self.evaluate_locked(&mut inner)
        };
        self.flush(false, events);
    }

    /// Evaluates a trigger as if the end of the list had been reached.
    ///
    /// Useful for pull gestures the host detects itself. The decision is
    /// also delivered to the listener. A disposed list always answers
    /// `Suppressed(Disposed)`.
    pub fn evaluate_trigger(&self) -> TriggerDecision {
        let now = self.shared.clock.now();
        let decision = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.disposed {
                return TriggerDecision::Suppressed(SuppressReason::Disposed);
            }
            inner.state.evaluate_trigger(now)
        };
        log::trace!("trigger evaluated: {decision:?}");
        if let Some(event) = decision.event() {
            event.dispatch(&*self.shared.listener);
        }
        decision
    }

    /// Issues `call` as the single outstanding request.
    ///
    /// Notifies `on_request_started`, marks the list in flight and enqueues
    /// the call. Fails with [`PaginationError::RequestInFlight`] if a request
    /// is already outstanding; the rejected call is dropped unstarted.
    ///
    /// If the listener clears or disposes the list while the request is
    /// being started, the call is cancelled instead of being left running.
    pub fn update_request(&self, call: impl PageCall<T> + 'static) -> PaginationResult<()> {
        let ticket = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.disposed {
                return Err(PaginationError::Disposed);
            }
            if inner.state.is_in_flight() {
                return Err(PaginationError::RequestInFlight);
            }
            inner.state.mark_in_flight();
            inner.coordinator.begin()
        };
        log::debug!("page request started (seq {})", ticket.seq);
        self.shared.listener.on_request_started();

        let mut call: Box<dyn PageCall<T>> = Box::new(call);
        if self.is_stale(ticket) {
            log::debug!("list reset while request {} was starting", ticket.seq);
            call.cancel();
            return Ok(());
        }
        call.enqueue(self.completion(ticket));

        let (unattached, stale) = {
            let mut inner = self.shared.inner.borrow_mut();
            let stale = inner.disposed || inner.coordinator.epoch() != ticket.epoch;
            (inner.coordinator.attach_call(ticket, call), stale)
        };
        match unattached {
            Some(mut call) if stale => {
                log::debug!("list reset while request {} was enqueued", ticket.seq);
                call.cancel();
            }
            Some(_settled) => log::trace!("request {} settled inside enqueue", ticket.seq),
            None => {}
        }
        Ok(())
    }

    /// Drops every item and restarts pagination from page zero.
    ///
    /// The outstanding call is cancelled and its outcome, should it still
    /// arrive, is ignored. `new_max_page` becomes the known last page
    /// (negative values clamp to zero).
    pub fn clear(&self, new_max_page: i64) {
        let (call, task, changed) = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.coordinator.advance_epoch();
            let call = inner.coordinator.cancel();
            let task = inner.coordinator.take_scroll_check();
            inner.state.clear(new_max_page);
            inner.store.reset();
            (call, task, inner.store.take_changed())
        };
        self.cancel_outstanding(call, task);
        self.flush(changed, PaginationEvents::new());
    }

    /// Detaches the list from its host. Later input and outcomes are ignored.
    pub fn dispose(&self) {
        let (call, task) = {
            let mut inner = self.shared.inner.borrow_mut();
            if inner.disposed {
                return;
            }
            inner.disposed = true;
            inner.coordinator.advance_epoch();
            (inner.coordinator.cancel(), inner.coordinator.take_scroll_check())
        };
        self.cancel_outstanding(call, task);
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.inner.borrow().disposed
    }

    fn is_stale(&self, ticket: RequestTicket) -> bool {
        let inner = self.shared.inner.borrow();
        inner.disposed || inner.coordinator.epoch() != ticket.epoch
    }

    fn evaluate_locked(&self, inner: &mut ListInner<T>) -> PaginationEvents {
        let decision = inner.state.evaluate_trigger(self.shared.clock.now());
        log::trace!("trigger evaluated: {decision:?}");
        decision.event().into_iter().collect()
    }

    fn completion(&self, ticket: RequestTicket) -> Completion<T> {
        let weak = Rc::downgrade(&self.shared);
        Completion::new(move |outcome| match weak.upgrade() {
            Some(shared) => PaginatedList { shared }.deliver(ticket, outcome),
            None => log::debug!("list dropped before page request settled"),
        })
    }

    fn deliver(&self, ticket: RequestTicket, outcome: FetchOutcome<T>) {
        let kind = outcome.kind();
        let (effects, changed, schedule_check) = {
            let mut inner = self.shared.inner.borrow_mut();
            if !inner.coordinator.accept(ticket) {
                log::debug!("ignoring stale {kind} outcome (seq {})", ticket.seq);
                return;
            }
            let inner = &mut *inner;
            let effects = inner.state.on_fetch_outcome(outcome, &mut inner.store);
            let schedule_check = (effects.appended > 0).then_some((
                inner.coordinator.epoch(),
                inner.config.scroll_check_delay,
            ));
            (effects, inner.store.take_changed(), schedule_check)
        };
        log::debug!(
            "page request settled with {kind}, {} items appended",
            effects.appended
        );

        if let Some((epoch, delay)) = schedule_check {
            let weak = Rc::downgrade(&self.shared);
            let task = self.shared.scheduler.post_delayed(
                delay,
                Box::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        PaginatedList { shared }.check_scrollable(epoch);
                    }
                }),
            );
            let replaced = self
                .shared
                .inner
                .borrow_mut()
                .coordinator
                .replace_scroll_check(task);
            if let Some(replaced) = replaced {
                self.shared.scheduler.cancel(replaced);
            }
        }

        self.flush(changed, effects.events);
    }

    fn check_scrollable(&self, epoch: u64) {
        {
            let mut inner = self.shared.inner.borrow_mut();
            inner.coordinator.take_scroll_check();
            if inner.disposed || inner.coordinator.epoch() != epoch {
                return;
            }
        }
        if self.shared.host.is_content_larger_than_viewport() {
            return;
        }

        let event = {
            let inner = self.shared.inner.borrow();
            if !inner.auto_fetch {
                log::warn!("{SCROLL_NOT_AVAILABLE}");
                return;
            }
            if !inner.state.can_request() {
                log::debug!("viewport underfilled but no request is possible right now");
                return;
            }
            PaginationEvent::ShouldCallNewRequest(inner.state.page_index())
        };
        event.dispatch(&*self.shared.listener);
    }

    fn cancel_outstanding(&self, call: Option<Box<dyn PageCall<T>>>, task: Option<TaskId>) {
        if let Some(mut call) = call {
            call.cancel();
        }
        if let Some(task) = task {
            self.shared.scheduler.cancel(task);
        }
    }

    fn flush(&self, data_changed: bool, events: PaginationEvents) {
        if data_changed {
            self.shared.host.notify_data_changed();
        }
        for event in &events {
            event.dispatch(&*self.shared.listener);
        }
    }
}

impl<T> std::fmt::Debug for PaginatedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.shared.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("PaginatedList")
                .field("page_index", &inner.state.page_index())
                .field("max_page", &inner.state.max_page())
                .field("in_flight", &inner.state.is_in_flight())
                .field("items", &inner.store.len())
                .finish(),
            Err(_) => f.debug_struct("PaginatedList").finish_non_exhaustive(),
        }
    }
}
