//! Panic hook that records every panic (from any thread) so the main thread can report them
//! all once it unwinds.

use crate::*;
use backtrace::Backtrace;

use parking_lot::Mutex;
use std::borrow::Cow;
use std::panic::{PanicInfo, UnwindSafe};

lazy_static! {
    static ref PANICS: Mutex<Vec<Panic>> = Mutex::new(Vec::new());
}

/// Only the first few backtraces are resolved, resolution is slow
const BACKTRACE_RESOLUTION_LIMIT: usize = 4;

#[derive(Debug, Clone)]
pub struct Panic {
    pub message: String,
    pub thread: String,
    pub backtrace: Backtrace,
}

pub fn init_panic_detection() {
    std::panic::set_hook(Box::new(|panic| register_panic(panic)));
    debug!("installed panic hook");
}

fn take_panics() -> Vec<Panic> {
    std::mem::take(&mut *PANICS.lock())
}

fn register_panic(panic: &PanicInfo) {
    let thread = {
        let t = std::thread::current();
        format!("{:?} ({})", t.id(), t.name().unwrap_or("<unnamed>"))
    };

    let message = panic
        .payload()
        .downcast_ref::<&str>()
        .map(|s| Cow::Borrowed(*s))
        .or_else(|| {
            panic
                .payload()
                .downcast_ref::<String>()
                .map(|s| Cow::Owned(s.clone()))
        })
        .unwrap_or_else(|| Cow::Owned(panic.to_string()));

    error!("handling panic"; "thread" => &thread, "message" => %message);

    PANICS.lock().push(Panic {
        message: message.into_owned(),
        thread,
        backtrace: Backtrace::new_unresolved(),
    });
}

/// Runs `do_me`, returning None if it or any other thread panicked
pub fn run_and_handle_panics<R: Debug>(do_me: impl FnOnce() -> R + UnwindSafe) -> Option<R> {
    let result = std::panic::catch_unwind(do_me);
    let panics = take_panics();

    match (result, panics.is_empty()) {
        (Ok(res), true) => return Some(res),
        (Ok(res), false) => {
            warn!("panic occurred in another thread, discarding result"; "result" => ?res);
        }
        (Err(_), _) => {}
    }

    crit!("{count} thread(s) panicked", count = panics.len());
    for (i, mut panic) in panics.into_iter().enumerate() {
        if i < BACKTRACE_RESOLUTION_LIMIT {
            panic.backtrace.resolve();
        }

        crit!("panic";
            "message" => &panic.message,
            "thread" => &panic.thread,
            "backtrace" => ?panic.backtrace,
        );
    }

    None
}
