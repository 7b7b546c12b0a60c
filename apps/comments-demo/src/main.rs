mod api;
mod console;

use anyhow::Context;
use console::{ConsoleHost, ConsoleListener, VISIBLE_ROWS};
use endless_core::{Duration, Instant};
use endless_foundation::{PaginatedList, PaginationConfig};
use endless_runtime_std::{Looper, SystemClock};
use std::rc::Rc;

const DEFAULT_PAGES: u32 = 5;
const FRAME: Duration = Duration::from_millis(50);
const ROW_HEIGHT: f32 = 48.0;
const TIMEOUT: Duration = Duration::from_secs(60);

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args = std::env::args().skip(1);
    let pages = match args.next() {
        Some(arg) => arg
            .parse::<u32>()
            .with_context(|| format!("page count must be a number, got {arg:?}"))?,
        None => DEFAULT_PAGES,
    };
    let base_url = args.next().unwrap_or_else(|| api::BASE_URL.to_owned());

    println!("=== Endless Comments Demo ===");
    println!("Scrolling a {VISIBLE_ROWS}-row window over {base_url}/comments");
    println!("Stopping after {pages} pages or at the last page");
    println!();

    let looper = Looper::new();
    let host = Rc::new(ConsoleHost::new());
    let listener = Rc::new(ConsoleListener::new(&looper, api::client()?, &base_url));
    let list = PaginatedList::new(
        host.clone(),
        listener.clone(),
        Rc::new(SystemClock),
        Rc::new(looper.clone()),
        PaginationConfig::default(),
    )?;
    listener.attach(list.clone());

    list.set_page_index(0);
    list.initialize(Vec::new(), true);

    let deadline = Instant::now() + TIMEOUT;
    let mut printed = 0;
    while list.page_index() < pages && !list.is_final_page_reached() {
        if Instant::now() >= deadline {
            list.dispose();
            listener.detach();
            anyhow::bail!("gave up after {TIMEOUT:?} with {} comments", list.len());
        }
        looper.run_until(Instant::now() + FRAME, || false);

        let shown = printed;
        printed = list.with_items(|items| {
            for comment in items.iter().skip(shown) {
                println!("#{:<4} [post {}] {}", comment.id, comment.post_id, comment.name);
            }
            items.len()
        });
        host.set_total(list.len());
        host.scroll_by(1);
        list.handle_scroll(0.0, ROW_HEIGHT);
    }

    println!();
    println!(
        "Loaded {} comments over {} pages ({} redraws)",
        list.len(),
        list.page_index(),
        host.redraws()
    );
    list.dispose();
    listener.detach();
    Ok(())
}
