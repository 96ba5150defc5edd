//! Opt-in, debug-build-only tracing, grounded on the teacher crate's
//! `Log<T>` level enum (`util::logger`). Carried over because the ambient
//! stack keeps it regardless of which guest language or Non-goal trims the
//! rest of a given build — only the payload type and call sites changed,
//! from lexeme-consume tracing to tokenizer/builder tracing.
use std::fmt::{Display, Formatter};

/// An increasing level of verbosity, each wrapping a label to prefix
/// printed lines with. `order()` gives the total order used to decide
/// whether a given trace point should print at the configured level.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Log<T> {
    None,
    Default(T),
    Success(T),
    Result(T),
    Verbose(T),
}

impl<T> Log<T> {
    pub fn order(&self) -> u8 {
        match self {
            Log::None => 0,
            Log::Default(_) => 1,
            Log::Success(_) => 2,
            Log::Result(_) => 3,
            Log::Verbose(_) => 4,
        }
    }
}

impl<T: Display> Display for Log<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Log::None => Ok(()),
            Log::Default(s) | Log::Success(s) | Log::Result(s) | Log::Verbose(s) => {
                write!(f, "{}", s)
            }
        }
    }
}

/// Print `message` (built lazily by `message`) when `level` is at least
/// `Log::Success`, and only in debug builds. A no-op release-build call
/// costs nothing but the `level.order()` comparison.
pub fn trace_success(level: &Log<&str>, message: impl FnOnce() -> String) {
    #[cfg(debug_assertions)]
    {
        if level.order() >= Log::Success("").order() {
            println!("[{level}]: {}", message());
        }
    }
    #[cfg(not(debug_assertions))]
    {
        let _ = (level, message);
    }
}
