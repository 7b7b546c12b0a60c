//! Virtual time.

use endless_core::{Clock, Duration, Instant, Scheduler, TaskId};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Cell<Duration>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    /// Time elapsed since the clock was created.
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }

    fn set_elapsed(&self, elapsed: Duration) {
        if elapsed > self.elapsed.get() {
            self.elapsed.set(elapsed);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }
}

type DueKey = (Duration, u64);

/// Scheduler running delayed tasks against a [`ManualClock`].
///
/// Nothing runs until [`ManualScheduler::advance_by`] moves time past a
/// task's due time. Tasks run in due order, and the clock reads the task's
/// due time while it runs.
pub struct ManualScheduler {
    clock: Rc<ManualClock>,
    next_id: Cell<u64>,
    tasks: RefCell<BTreeMap<DueKey, Box<dyn FnOnce()>>>,
}

impl ManualScheduler {
    pub fn new(clock: Rc<ManualClock>) -> Self {
        Self {
            clock,
            next_id: Cell::new(0),
            tasks: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Moves time forward by `by`, running every task that falls due.
    ///
    /// Tasks posted while advancing run too if they fall inside the window.
    pub fn advance_by(&self, by: Duration) -> usize {
        let target = self.clock.elapsed() + by;
        let mut ran = 0;
        loop {
            let next = {
                let mut tasks = self.tasks.borrow_mut();
                match tasks.keys().next().copied() {
                    Some(key) if key.0 <= target => tasks.remove(&key).map(|task| (key, task)),
                    _ => None,
                }
            };
            let Some(((due, _), task)) = next else {
                break;
            };
            self.clock.set_elapsed(due);
            task();
            ran += 1;
        }
        self.clock.set_elapsed(target);
        ran
    }

    pub fn advance_millis(&self, millis: u64) -> usize {
        self.advance_by(Duration::from_millis(millis))
    }
}

impl Scheduler for ManualScheduler {
    fn post_delayed(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let due = self.clock.elapsed() + delay;
        self.tasks.borrow_mut().insert((due, id), task);
        TaskId(id)
    }

    fn cancel(&self, id: TaskId) {
        self.tasks.borrow_mut().retain(|(_, task_id), _| *task_id != id.0);
    }
}
