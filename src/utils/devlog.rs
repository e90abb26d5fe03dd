//! Request tracing with a thread-local sink for deterministic tests.
//! Every request the builder sends is logged under the `phonecom_sdk::requests` target and, when a
//! sink is enabled on the current thread, captured so tests can assert on the exact request sequence.

use std::cell::RefCell;

/// Log target used for outgoing request traces.
pub const REQUEST_TARGET: &str = "phonecom_sdk::requests";

thread_local! {
    static TL_SINK: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Guard that disables the thread-local sink on drop.
pub struct TraceSinkGuard;
impl Drop for TraceSinkGuard {
    fn drop(&mut self) {
        TL_SINK.with(|s| *s.borrow_mut() = None);
    }
}

/// Enable the thread-local sink for the current thread. Returns a guard that will disable it on drop.
pub fn enable_thread_sink() -> TraceSinkGuard {
    TL_SINK.with(|s| *s.borrow_mut() = Some(Vec::new()));
    TraceSinkGuard
}

/// Push a message into the thread-local sink if enabled.
pub fn write_str(msg: &str) {
    TL_SINK.with(|s| {
        if let Some(buf) = s.borrow_mut().as_mut() {
            buf.push(msg.to_owned());
        }
    });
}

/// Drain and return the captured messages for the current thread. If disabled, returns an empty vec.
pub fn drain() -> Vec<String> {
    TL_SINK.with(|s| match s.borrow_mut().as_mut() {
        Some(buf) => std::mem::take(buf),
        None => Vec::new(),
    })
}

/// Peek at the current captured messages without clearing them.
pub fn snapshot() -> Vec<String> {
    TL_SINK.with(|s| s.borrow().as_ref().cloned().unwrap_or_default())
}

/// Trace an outgoing request and capture it in the thread-local sink if enabled.
#[macro_export]
macro_rules! request_trace {
    ($($arg:tt)*) => {{
        let __s = format!($($arg)*);
        $crate::utils::devlog::write_str(&__s);
        log::log!(target: $crate::utils::devlog::REQUEST_TARGET, log::Level::Trace, "{}", __s);
    }};
}
