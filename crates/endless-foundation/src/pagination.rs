//! Page-index bookkeeping and the trigger eligibility policy.

use crate::item_store::ItemStore;
use crate::listener::PaginationEvent;
use crate::request::FetchOutcome;
use endless_core::{Duration, Instant};
use smallvec::SmallVec;

/// Notifications produced by one state transition, in delivery order.
pub type PaginationEvents = SmallVec<[PaginationEvent; 4]>;

/// Why a trigger did not lead to a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuppressReason {
    /// Another trigger was evaluated less than the debounce window ago.
    Debounced,
    /// A fetch is already outstanding.
    InFlight,
    /// The list was disposed.
    Disposed,
}

/// Outcome of [`PaginationState::evaluate_trigger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerDecision {
    /// The caller should fetch this page.
    Request(u32),
    /// The last page is already loaded.
    FinalPageReached,
    /// Nothing to do.
    Suppressed(SuppressReason),
}

impl TriggerDecision {
    /// Notification matching this decision, if any.
    pub fn event(self) -> Option<PaginationEvent> {
        match self {
            TriggerDecision::Request(page_index) => {
                Some(PaginationEvent::ShouldCallNewRequest(page_index))
            }
            TriggerDecision::FinalPageReached => Some(PaginationEvent::FinalPageReached),
            TriggerDecision::Suppressed(_) => None,
        }
    }
}

/// What applying a fetch outcome did.
#[derive(Debug, Default)]
pub struct OutcomeEffects {
    /// Items appended to the store.
    pub appended: usize,
    pub events: PaginationEvents,
}

/// Page index, end-of-data latch, in-flight flag and debounce timestamp.
///
/// `max_page` is `None` until an empty page is seen (or `clear` sets it).
/// Once known, any page index at or past it is final.
#[derive(Clone, Debug)]
pub struct PaginationState {
    page_index: u32,
    max_page: Option<u32>,
    in_flight: bool,
    last_trigger: Option<Instant>,
    debounce: Duration,
}

impl PaginationState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            page_index: 0,
            max_page: None,
            in_flight: false,
            last_trigger: None,
            debounce,
        }
    }

    #[inline]
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn set_page_index(&mut self, page_index: u32) {
        self.page_index = page_index;
    }

    #[inline]
    pub fn max_page(&self) -> Option<u32> {
        self.max_page
    }

    #[inline]
    pub fn is_max_page_known(&self) -> bool {
        self.max_page.is_some()
    }

    #[inline]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn last_trigger(&self) -> Option<Instant> {
        self.last_trigger
    }

    pub fn is_final_page_reached(&self) -> bool {
        matches!(self.max_page, Some(max_page) if self.page_index >= max_page)
    }

    /// Whether a request could be issued right now, ignoring the debounce window.
    pub fn can_request(&self) -> bool {
        !self.in_flight && !self.is_final_page_reached()
    }

    /// Latches the last page. Negative values clamp to zero.
    pub fn set_max_page(&mut self, max_page: i64) {
        self.max_page = Some(max_page.clamp(0, i64::from(u32::MAX)) as u32);
    }

    /// Decides whether a trigger at `now` should request a page.
    ///
    /// Triggers inside the debounce window are dropped without touching the
    /// timestamp. Any trigger past the window refreshes it, whichever
    /// decision follows.
    pub fn evaluate_trigger(&mut self, now: Instant) -> TriggerDecision {
        if let Some(last) = self.last_trigger {
            if now.saturating_duration_since(last) < self.debounce {
                return TriggerDecision::Suppressed(SuppressReason::Debounced);
            }
        }
        self.last_trigger = Some(now);

        if self.in_flight {
            TriggerDecision::Suppressed(SuppressReason::InFlight)
        } else if self.is_final_page_reached() {
            TriggerDecision::FinalPageReached
        } else {
            TriggerDecision::Request(self.page_index)
        }
    }

    pub fn mark_in_flight(&mut self) {
        self.in_flight = true;
    }

    /// Applies a settled fetch to the state and the store.
    ///
    /// `RequestFinished` is always the last event.
    pub fn on_fetch_outcome<T>(
        &mut self,
        outcome: FetchOutcome<T>,
        store: &mut ItemStore<T>,
    ) -> OutcomeEffects {
        let mut effects = OutcomeEffects::default();
        self.in_flight = false;

        match outcome {
            FetchOutcome::Success(items) if !items.is_empty() => {
                self.page_index = self.page_index.saturating_add(1);
                effects.appended = store.append(items);
            }
            FetchOutcome::Success(_) | FetchOutcome::Empty => {
                self.set_max_page(i64::from(self.page_index));
                effects.events.push(PaginationEvent::FinalPageReached);
            }
            FetchOutcome::Error(message) => {
                effects.events.push(PaginationEvent::RequestError(message));
            }
            FetchOutcome::Failure(cause) => {
                log::warn!("page {} request failed: {cause:#}", self.page_index);
                effects
                    .events
                    .push(PaginationEvent::RequestFailed(format!("{cause:#}")));
            }
        }

        effects.events.push(PaginationEvent::RequestFinished);
        effects
    }

    /// Resets to page zero with a known last page and nothing in flight.
    ///
    /// The debounce timestamp is kept.
    pub fn clear(&mut self, new_max_page: i64) {
        self.in_flight = false;
        self.page_index = 0;
        self.set_max_page(new_max_page);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEBOUNCE: Duration = Duration::from_millis(150);

    fn ms(base: Instant, millis: u64) -> Instant {
        base + Duration::from_millis(millis)
    }

    #[test]
    fn first_trigger_requests_current_page() {
        let mut state = PaginationState::new(DEBOUNCE);
        state.set_page_index(1);
        assert_eq!(state.evaluate_trigger(Instant::now()), TriggerDecision::Request(1));
    }

    #[test]
    fn trigger_inside_window_is_debounced() {
        let base = Instant::now();
        let mut state = PaginationState::new(DEBOUNCE);

        assert_eq!(state.evaluate_trigger(base), TriggerDecision::Request(0));
        assert_eq!(
            state.evaluate_trigger(ms(base, 149)),
            TriggerDecision::Suppressed(SuppressReason::Debounced)
        );
        assert_eq!(state.last_trigger(), Some(base));
        assert_eq!(state.evaluate_trigger(ms(base, 150)), TriggerDecision::Request(0));
    }

    #[test]
    fn in_flight_suppresses_and_refreshes_timestamp() {
        let base = Instant::now();
        let mut state = PaginationState::new(DEBOUNCE);
        state.mark_in_flight();

        assert_eq!(
            state.evaluate_trigger(base),
            TriggerDecision::Suppressed(SuppressReason::InFlight)
        );
        assert_eq!(state.last_trigger(), Some(base));
        assert_eq!(
            state.evaluate_trigger(ms(base, 500)),
            TriggerDecision::Suppressed(SuppressReason::InFlight)
        );
        assert_eq!(state.last_trigger(), Some(ms(base, 500)));
    }

    #[test]
    fn successful_pages_advance_index_by_one() {
        let mut state = PaginationState::new(DEBOUNCE);
        let mut store = ItemStore::new();
        state.set_page_index(1);

        for page in 0..5u32 {
            state.mark_in_flight();
            let effects =
                state.on_fetch_outcome(FetchOutcome::Success(vec![page; 20]), &mut store);
            assert_eq!(effects.appended, 20);
            assert_eq!(effects.events.as_slice(), &[PaginationEvent::RequestFinished]);
        }

        assert_eq!(state.page_index(), 6);
        assert_eq!(store.len(), 100);
        assert!(!state.is_in_flight());
    }

    #[test]
    fn empty_page_latches_max_page() {
        let base = Instant::now();
        let mut state = PaginationState::new(DEBOUNCE);
        let mut store = ItemStore::<u8>::new();
        state.set_page_index(3);
        state.mark_in_flight();

        let effects = state.on_fetch_outcome(FetchOutcome::Success(vec![]), &mut store);

        assert_eq!(
            effects.events.as_slice(),
            &[PaginationEvent::FinalPageReached, PaginationEvent::RequestFinished]
        );
        assert_eq!(state.max_page(), Some(3));
        assert!(state.is_max_page_known());
        assert_eq!(state.evaluate_trigger(base), TriggerDecision::FinalPageReached);
        assert_eq!(
            state.evaluate_trigger(ms(base, 1000)),
            TriggerDecision::FinalPageReached
        );
    }

    #[test]
    fn error_keeps_index_and_store() {
        let mut state = PaginationState::new(DEBOUNCE);
        let mut store = ItemStore::from_items(vec![1, 2]);
        state.set_page_index(2);
        state.mark_in_flight();

        let effects =
            state.on_fetch_outcome(FetchOutcome::Error("not found".into()), &mut store);

        assert_eq!(
            effects.events.as_slice(),
            &[
                PaginationEvent::RequestError("not found".into()),
                PaginationEvent::RequestFinished
            ]
        );
        assert_eq!(state.page_index(), 2);
        assert_eq!(state.max_page(), None);
        assert_eq!(store.as_slice(), &[1, 2]);
        assert!(!state.is_in_flight());
    }

    #[test]
    fn failure_ends_with_finished() {
        let mut state = PaginationState::new(DEBOUNCE);
        let mut store = ItemStore::<u8>::new();
        state.mark_in_flight();

        let effects = state.on_fetch_outcome(
            FetchOutcome::failure(anyhow::anyhow!("connection reset")),
            &mut store,
        );

        assert_eq!(
            effects.events.as_slice(),
            &[
                PaginationEvent::RequestFailed("connection reset".into()),
                PaginationEvent::RequestFinished
            ]
        );
        assert!(!state.is_in_flight());
    }

    #[test]
    fn clear_resets_and_clamps() {
        let mut state = PaginationState::new(DEBOUNCE);
        state.set_page_index(7);
        state.mark_in_flight();

        state.clear(-4);

        assert_eq!(state.page_index(), 0);
        assert_eq!(state.max_page(), Some(0));
        assert!(!state.is_in_flight());
        assert_eq!(state.evaluate_trigger(Instant::now()), TriggerDecision::FinalPageReached);
    }

    #[test]
    fn clear_with_room_allows_requests() {
        let mut state = PaginationState::new(DEBOUNCE);
        state.clear(10);
        assert!(state.can_request());
        assert_eq!(state.evaluate_trigger(Instant::now()), TriggerDecision::Request(0));
    }

    #[test]
    fn decision_events() {
        assert_eq!(
            TriggerDecision::Request(2).event(),
            Some(PaginationEvent::ShouldCallNewRequest(2))
        );
        assert_eq!(
            TriggerDecision::FinalPageReached.event(),
            Some(PaginationEvent::FinalPageReached)
        );
        assert_eq!(
            TriggerDecision::Suppressed(SuppressReason::Debounced).event(),
            None
        );
    }
}
