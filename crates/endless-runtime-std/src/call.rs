use crate::looper::Looper;
use endless_core::CancelToken;
use endless_foundation::{Completion, FetchOutcome, PageCall};

type Work<T> = Box<dyn FnOnce(CancelToken) -> FetchOutcome<T> + Send + 'static>;

/// A page fetch that runs on a worker thread and settles on the looper thread.
///
/// `work` receives a [`CancelToken`] and should return early once it is
/// cancelled. Its outcome is delivered through the looper, so the list only
/// ever sees completions from the UI thread.
pub struct ThreadCall<T> {
    looper: Looper,
    work: Option<Work<T>>,
    token: CancelToken,
    continuation: Option<u64>,
}

impl<T: Send + 'static> ThreadCall<T> {
    pub fn new(
        looper: &Looper,
        work: impl FnOnce(CancelToken) -> FetchOutcome<T> + Send + 'static,
    ) -> Self {
        Self {
            looper: looper.clone(),
            work: Some(Box::new(work)),
            token: CancelToken::new(),
            continuation: None,
        }
    }
}

impl<T: Send + 'static> PageCall<T> for ThreadCall<T> {
    fn enqueue(&mut self, completion: Completion<T>) {
        let Some(work) = self.work.take() else {
            log::warn!("page call enqueued twice, ignoring");
            return;
        };
        let id = self
            .looper
            .register_continuation(move |outcome: FetchOutcome<T>| completion.complete(outcome));
        self.continuation = Some(id);

        let dispatcher = self.looper.dispatcher();
        let token = self.token.clone();
        let spawned = std::thread::Builder::new()
            .name("endless-page-call".into())
            .spawn({
                let dispatcher = dispatcher.clone();
                move || {
                    let outcome = work(token.clone());
                    if token.is_cancelled() {
                        log::debug!("page call cancelled, discarding {}", outcome.kind());
                        return;
                    }
                    dispatcher.post_invoke(id, outcome);
                }
            });
        if let Err(err) = spawned {
            log::error!("failed to spawn page call worker: {err}");
            dispatcher.post_invoke(id, FetchOutcome::<T>::failure(err));
        }
    }

    fn cancel(&mut self) {
        self.token.cancel();
        if let Some(id) = self.continuation.take() {
            self.looper.cancel_continuation(id);
        }
    }
}

impl<T> std::fmt::Debug for ThreadCall<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadCall")
            .field("started", &self.work.is_none())
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
