//! A list driven by the real looper with worker-thread page calls.

use endless_core::{Duration, Instant};
use endless_foundation::{FetchOutcome, PaginatedList, PaginationConfig, PaginationEvent};
use endless_runtime_std::{Looper, ThreadCall};
use endless_testing::{FakeHost, RecordingListener};
use std::rc::Rc;

struct Fixture {
    looper: Looper,
    host: Rc<FakeHost>,
    listener: Rc<RecordingListener>,
    list: PaginatedList<String>,
}

fn fixture(config: PaginationConfig) -> Fixture {
    let looper = Looper::new();
    let host = Rc::new(FakeHost::default());
    let listener = Rc::new(RecordingListener::new());
    let list = PaginatedList::new(
        host.clone(),
        listener.clone(),
        Rc::new(looper.clone()),
        Rc::new(looper.clone()),
        config,
    )
    .expect("vertical layout is supported");
    Fixture {
        looper,
        host,
        listener,
        list,
    }
}

fn fetch_page(looper: &Looper, page: u32, size: usize) -> ThreadCall<String> {
    ThreadCall::new(looper, move |_token| {
        FetchOutcome::Success((0..size).map(|i| format!("{page}:{i}")).collect())
    })
}

#[test]
fn worker_page_settles_on_looper_thread() {
    let f = fixture(PaginationConfig::default());
    f.list.set_page_index(1);

    f.list
        .update_request(fetch_page(&f.looper, 1, 20))
        .expect("no request outstanding");
    assert!(f.list.is_in_flight());

    assert!(f
        .looper
        .run_until(Instant::now() + Duration::from_secs(5), || {
            !f.list.is_in_flight()
        }));
    assert_eq!(f.list.len(), 20);
    assert_eq!(f.list.page_index(), 2);
    assert_eq!(
        f.listener.events(),
        vec![PaginationEvent::RequestStarted, PaginationEvent::RequestFinished]
    );
    assert_eq!(f.host.data_changed_count(), 1);
}

#[test]
fn underfilled_viewport_keeps_fetching_until_final_page() {
    let f = fixture(PaginationConfig::default().with_scroll_check_delay(Duration::from_millis(10)));
    f.host.set_content_larger_than_viewport(false);
    {
        let list = f.list.clone();
        let looper = f.looper.clone();
        f.listener.on_new_request(move |page| {
            let size = if page < 3 { 5 } else { 0 };
            list.update_request(fetch_page(&looper, page, size))
                .expect("no request outstanding");
        });
    }
    f.list.set_page_index(1);

    f.list.initialize(Vec::new(), true);

    assert!(f
        .looper
        .run_until(Instant::now() + Duration::from_secs(5), || {
            f.list.is_final_page_reached() && !f.looper.has_pending()
        }));
    assert_eq!(f.listener.requested_pages(), vec![1, 2, 3]);
    assert_eq!(f.list.len(), 10);
    assert_eq!(f.list.max_page(), Some(3));
}

#[test]
fn clear_discards_worker_outcome() {
    let f = fixture(PaginationConfig::default());
    let (release_tx, release_rx) = std::sync::mpsc::channel::<()>();
    f.list
        .update_request(ThreadCall::new(&f.looper, move |_token| {
            let _ = release_rx.recv();
            FetchOutcome::Success(vec!["late".to_owned()])
        }))
        .expect("no request outstanding");

    f.list.clear(10);
    release_tx.send(()).expect("worker is waiting");
    f.looper
        .run_until(Instant::now() + Duration::from_millis(100), || false);

    assert!(f.list.is_empty());
    assert!(!f.list.is_in_flight());
    assert_eq!(f.listener.count(&PaginationEvent::RequestFinished), 0);
}
