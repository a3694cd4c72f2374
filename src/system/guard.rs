//! Fault isolation around calls into the metrics source.
//!
//! Both a returned error and a panic raised inside a platform binding are
//! turned into a [`Fault`] local to the single call that produced it.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

thread_local! {
    static GUARD_DEPTH: Cell<u32> = const { Cell::new(0) };
}

/// Why a guarded call produced no value.
#[derive(Debug, Clone, PartialEq)]
pub enum Fault {
    Failed(String),
    Panicked(String),
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Failed(msg) => write!(f, "{msg}"),
            Fault::Panicked(msg) => write!(f, "panicked: {msg}"),
        }
    }
}

/// True while the current thread is inside [`run_guarded`].
///
/// The binary's panic hook uses this to leave the terminal alone for panics
/// that are about to be caught.
pub fn is_guarding() -> bool {
    GUARD_DEPTH.with(|depth| depth.get() > 0)
}

/// Wrap the current panic hook so panics raised inside [`run_guarded`] are
/// not reported. They are logged by the guard instead.
///
/// Install this after any other hook so it sits outermost.
pub fn silence_caught_panics() {
    let inner = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        if is_guarding() {
            return;
        }
        inner(info);
    }));
}

struct DepthGuard;

impl DepthGuard {
    fn enter() -> Self {
        GUARD_DEPTH.with(|depth| depth.set(depth.get() + 1));
        DepthGuard
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        GUARD_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}

pub fn run_guarded<T, E, F>(call: F) -> Result<T, Fault>
where
    E: fmt::Display,
    F: FnOnce() -> Result<T, E>,
{
    let outcome = {
        let _depth = DepthGuard::enter();
        panic::catch_unwind(AssertUnwindSafe(call))
    };
    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(Fault::Failed(err.to_string())),
        Err(payload) => Err(Fault::Panicked(panic_message(&*payload))),
    }
}

/// Resolve one process field, substituting `default` on any fault.
pub fn try_resolve<T, E, F>(field: &'static str, pid: u32, default: T, accessor: F) -> T
where
    E: fmt::Display,
    F: FnOnce() -> Result<T, E>,
{
    match run_guarded(accessor) {
        Ok(value) => value,
        Err(fault @ Fault::Failed(_)) => {
            tracing::debug!(pid, field, %fault, "process field unavailable");
            default
        }
        Err(fault @ Fault::Panicked(_)) => {
            tracing::error!(pid, field, %fault, "recovered from panic while resolving process field");
            default
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
