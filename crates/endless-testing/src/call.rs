//! Page calls completed by the test instead of a network.

use endless_foundation::{Completion, FetchOutcome, PageCall};
use std::cell::RefCell;
use std::rc::Rc;

struct CallSlot<T> {
    completion: Option<Completion<T>>,
    enqueued: bool,
    cancelled: bool,
}

/// A call that waits until its [`CallHandle`] delivers an outcome.
pub struct ScriptedCall<T> {
    slot: Rc<RefCell<CallSlot<T>>>,
}

/// Test-side controls for a [`ScriptedCall`].
pub struct CallHandle<T> {
    slot: Rc<RefCell<CallSlot<T>>>,
}

impl<T> Clone for CallHandle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T> ScriptedCall<T> {
    pub fn pair() -> (Self, CallHandle<T>) {
        let slot = Rc::new(RefCell::new(CallSlot {
            completion: None,
            enqueued: false,
            cancelled: false,
        }));
        (
            Self {
                slot: Rc::clone(&slot),
            },
            CallHandle { slot },
        )
    }
}

impl<T> PageCall<T> for ScriptedCall<T> {
    fn enqueue(&mut self, completion: Completion<T>) {
        let mut slot = self.slot.borrow_mut();
        slot.enqueued = true;
        slot.completion = Some(completion);
    }

    fn cancel(&mut self) {
        self.slot.borrow_mut().cancelled = true;
    }
}

impl<T> CallHandle<T> {
    pub fn is_enqueued(&self) -> bool {
        self.slot.borrow().enqueued
    }

    pub fn is_cancelled(&self) -> bool {
        self.slot.borrow().cancelled
    }

    /// Delivers `outcome`, even after cancellation, the way a late network
    /// response would. Returns `false` if the call was never enqueued or
    /// already completed.
    pub fn complete(&self, outcome: FetchOutcome<T>) -> bool {
        let completion = self.slot.borrow_mut().completion.take();
        match completion {
            Some(completion) => {
                completion.complete(outcome);
                true
            }
            None => false,
        }
    }

    pub fn succeed(&self, items: Vec<T>) -> bool {
        self.complete(FetchOutcome::Success(items))
    }

    pub fn fail_with_error(&self, message: &str) -> bool {
        self.complete(FetchOutcome::Error(message.to_owned()))
    }
}

/// A call that completes synchronously inside `enqueue`.
pub struct ImmediateCall<T> {
    outcome: Option<FetchOutcome<T>>,
}

impl<T> ImmediateCall<T> {
    pub fn new(outcome: FetchOutcome<T>) -> Self {
        Self {
            outcome: Some(outcome),
        }
    }
}

impl<T> PageCall<T> for ImmediateCall<T> {
    fn enqueue(&mut self, completion: Completion<T>) {
        if let Some(outcome) = self.outcome.take() {
            completion.complete(outcome);
        }
    }

    fn cancel(&mut self) {}
}
