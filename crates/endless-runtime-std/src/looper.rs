use endless_core::{Clock, Duration, Instant, Scheduler, TaskId};
use rustc_hash::FxHashMap;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::sync::mpsc;
use std::thread::ThreadId;

struct Invoke {
    id: u64,
    value: Box<dyn Any + Send>,
}

type Continuation = Box<dyn FnOnce(Box<dyn Any>) + 'static>;
type DelayedTask = Box<dyn FnOnce() + 'static>;

struct LooperInner {
    delayed: RefCell<BTreeMap<(Instant, u64), DelayedTask>>,
    next_task_id: Cell<u64>,
    continuations: RefCell<FxHashMap<u64, Continuation>>,
    next_cont_id: Cell<u64>,
    tx: mpsc::Sender<Invoke>,
    rx: mpsc::Receiver<Invoke>,
    ui_thread_id: ThreadId,
}

/// Run loop for the UI thread.
///
/// Holds delayed tasks and continuations that may capture `Rc`/`RefCell`
/// state, and receives values posted from worker threads through a
/// [`Dispatcher`]. Nothing runs until the owner pumps the loop with
/// [`Looper::run_pending`] or one of the `run_until` methods.
#[derive(Clone)]
pub struct Looper {
    inner: Rc<LooperInner>,
}

/// `Send` handle that delivers values to continuations on a [`Looper`].
#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<Invoke>,
}

impl Dispatcher {
    /// Hands `value` to the continuation registered under `id`.
    ///
    /// Returns `false` if the looper is gone. A continuation that was
    /// cancelled in the meantime silently drops the value.
    pub fn post_invoke<T>(&self, id: u64, value: T) -> bool
    where
        T: Send + 'static,
    {
        self.tx
            .send(Invoke {
                id,
                value: Box::new(value),
            })
            .is_ok()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Looper {
    /// Creates a looper bound to the calling thread.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            inner: Rc::new(LooperInner {
                delayed: RefCell::new(BTreeMap::new()),
                next_task_id: Cell::new(1),
                continuations: RefCell::new(FxHashMap::default()),
                next_cont_id: Cell::new(1),
                tx,
                rx,
                ui_thread_id: std::thread::current().id(),
            }),
        }
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher {
            tx: self.inner.tx.clone(),
        }
    }

    /// Registers a one-shot continuation and returns its id for
    /// [`Dispatcher::post_invoke`].
    pub fn register_continuation<T: 'static>(&self, f: impl FnOnce(T) + 'static) -> u64 {
        debug_assert_eq!(
            std::thread::current().id(),
            self.inner.ui_thread_id,
            "continuation registered off the looper thread",
        );
        let id = self.inner.next_cont_id.get();
        self.inner.next_cont_id.set(id + 1);
        self.inner.continuations.borrow_mut().insert(
            id,
            Box::new(move |value: Box<dyn Any>| match value.downcast::<T>() {
                Ok(value) => f(*value),
                Err(_) => log::error!("continuation {id} received a value of the wrong type"),
            }),
        );
        id
    }

    /// Forgets a continuation. Values posted for it afterwards are dropped.
    pub fn cancel_continuation(&self, id: u64) {
        self.inner.continuations.borrow_mut().remove(&id);
    }

    /// Number of delayed tasks and continuations still waiting.
    pub fn pending_count(&self) -> usize {
        self.inner.delayed.borrow().len() + self.inner.continuations.borrow().len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_count() > 0
    }

    /// Due time of the earliest delayed task.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.delayed.borrow().keys().next().map(|(due, _)| *due)
    }

    /// Runs every delivered continuation and every delayed task that is due.
    ///
    /// Returns how many callbacks ran. Never blocks.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(message) = self.inner.rx.try_recv() {
            ran += usize::from(self.invoke(message));
        }
        loop {
            let now = Instant::now();
            let task = {
                let mut delayed = self.inner.delayed.borrow_mut();
                match delayed.keys().next().copied() {
                    Some(key) if key.0 <= now => delayed.remove(&key),
                    _ => None,
                }
            };
            let Some(task) = task else {
                break;
            };
            task();
            ran += 1;
        }
        ran
    }

    /// Pumps the loop until `done` holds or `deadline` passes.
    ///
    /// Sleeps on the worker channel between callbacks. Returns whether `done`
    /// was satisfied.
    pub fn run_until(&self, deadline: Instant, mut done: impl FnMut() -> bool) -> bool {
        loop {
            self.run_pending();
            if done() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            let wake_at = self
                .next_deadline()
                .map_or(deadline, |next| next.min(deadline));
            let wait = wake_at.saturating_duration_since(now);
            match self.inner.rx.recv_timeout(wait) {
                Ok(message) => {
                    self.invoke(message);
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    log::trace!("looper channel disconnected");
                }
            }
        }
    }

    /// Pumps until nothing is pending, for at most `timeout`.
    pub fn run_until_idle(&self, timeout: Duration) -> bool {
        self.run_until(Instant::now() + timeout, || !self.has_pending())
    }

    fn invoke(&self, message: Invoke) -> bool {
        debug_assert_eq!(
            std::thread::current().id(),
            self.inner.ui_thread_id,
            "continuation invoked off the looper thread",
        );
        let continuation = self.inner.continuations.borrow_mut().remove(&message.id);
        match continuation {
            Some(continuation) => {
                let value: Box<dyn Any> = message.value;
                continuation(value);
                true
            }
            None => {
                log::debug!("dropping value for cancelled continuation {}", message.id);
                false
            }
        }
    }
}

impl Default for Looper {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Looper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Looper")
            .field("delayed", &self.inner.delayed.borrow().len())
            .field("continuations", &self.inner.continuations.borrow().len())
            .finish()
    }
}

impl Clock for Looper {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl Scheduler for Looper {
    fn post_delayed(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId {
        let id = self.inner.next_task_id.get();
        self.inner.next_task_id.set(id + 1);
        let due = Instant::now() + delay;
        self.inner.delayed.borrow_mut().insert((due, id), task);
        TaskId(id)
    }

    fn cancel(&self, id: TaskId) {
        self.inner
            .delayed
            .borrow_mut()
            .retain(|(_, task_id), _| *task_id != id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn delayed_tasks_wait_for_their_deadline() {
        let looper = Looper::new();
        let ran = Rc::new(Cell::new(0));
        let counter = Rc::clone(&ran);
        looper.post_delayed(
            Duration::from_millis(20),
            Box::new(move || counter.set(counter.get() + 1)),
        );

        assert_eq!(looper.run_pending(), 0);
        assert!(looper.run_until_idle(Duration::from_secs(2)));
        assert_eq!(ran.get(), 1);
        assert_eq!(looper.next_deadline(), None);
    }

    #[test]
    fn delayed_tasks_run_in_due_order() {
        let looper = Looper::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (delay, label) in [(30, "late"), (0, "now"), (10, "soon")] {
            let order = Rc::clone(&order);
            looper.post_delayed(
                Duration::from_millis(delay),
                Box::new(move || order.borrow_mut().push(label)),
            );
        }

        assert!(looper.run_until_idle(Duration::from_secs(2)));

        assert_eq!(*order.borrow(), vec!["now", "soon", "late"]);
    }

    #[test]
    fn cancelled_task_never_runs() {
        let looper = Looper::new();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let id = looper.post_delayed(Duration::ZERO, Box::new(move || flag.set(true)));

        looper.cancel(id);
        looper.run_pending();

        assert!(!ran.get());
        assert!(!looper.has_pending());
    }

    #[test]
    fn posted_values_reach_continuation_on_looper_thread() {
        let looper = Looper::new();
        let received = Rc::new(Cell::new(0u32));
        let sink = Rc::clone(&received);
        let id = looper.register_continuation(move |value: u32| sink.set(value));
        let dispatcher = looper.dispatcher();

        let worker = std::thread::spawn(move || dispatcher.post_invoke(id, 42u32));
        assert!(worker.join().expect("worker thread panicked"));

        assert!(looper.run_until_idle(Duration::from_secs(2)));
        assert_eq!(received.get(), 42);
    }

    #[test]
    fn cancelled_continuation_drops_value() {
        let looper = Looper::new();
        let received = Rc::new(Cell::new(false));
        let sink = Rc::clone(&received);
        let id = looper.register_continuation(move |_: u32| sink.set(true));

        looper.cancel_continuation(id);
        assert!(looper.dispatcher().post_invoke(id, 1u32));

        assert_eq!(looper.run_pending(), 0);
        assert!(!received.get());
    }

    #[test]
    fn run_until_gives_up_at_deadline() {
        let looper = Looper::new();
        let _pending = looper.register_continuation(|_: ()| {});

        let start = Instant::now();
        assert!(!looper.run_until(start + Duration::from_millis(20), || false));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
