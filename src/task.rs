//! Background work that must not block the caller or crash the process.

use anyhow::Result;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Run `work` on a named background thread.
///
/// Errors and panics are logged through `tracing` and never reach the
/// caller. The returned handle can be joined, or dropped to detach. Returns
/// None (after logging) if the thread could not be spawned.
pub fn detach<F>(name: &str, work: F) -> Option<JoinHandle<()>>
where
    F: FnOnce() -> Result<()> + Send + 'static,
{
    let task_name = name.to_string();
    let body = move || {
        match panic::catch_unwind(AssertUnwindSafe(work)) {
            Ok(Ok(())) => debug!(task = %task_name, "task:finished"),
            Ok(Err(e)) => warn!(task = %task_name, error = %e, "task:failed"),
            Err(payload) => warn!(
                task = %task_name,
                panic = panic_message(payload.as_ref()),
                "task:panicked"
            ),
        }
    };

    match thread::Builder::new().name(name.to_string()).spawn(body) {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(task = name, error = %e, "task:failed to spawn thread");
            None
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "<non-string panic>"
    }
}
