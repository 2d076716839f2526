//! Console logging
//!
//! In the worker the engine talks to `console.log` / `console.warn` directly.
//! Native builds (tests, the thread host) write the same lines to stderr.
//!
//! ```rust
//! murmur_engine::console_log!("{} particles", 42);
//! murmur_engine::console_warn!("ignoring {}", "resize");
//! ```

const PREFIX: &str = "[murmur]";

#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::core::utils::logging::emit_log(&format!($($t)*))
    };
}

#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => {
        $crate::core::utils::logging::emit_warn(&format!($($t)*))
    };
}

#[doc(hidden)]
pub fn emit_log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::log_1(&format!("{} {}", PREFIX, message).into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("{} {}", PREFIX, message);
    }
}

#[doc(hidden)]
pub fn emit_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::warn_1(&format!("{} {}", PREFIX, message).into());
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        eprintln!("{} warn: {}", PREFIX, message);
    }
}
