//! Console logging for the browser build.
//!
//! On wasm32 the macros write to `console.*`; native builds (unit tests) go to
//! stderr. `info_log!` and `debug_log!` compile to nothing in release builds.

#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        web_sys::console::error_1(&format!($($arg)*).into());
    }};
}

#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        eprintln!("[ERROR] {}", format!($($arg)*));
    }};
}

#[macro_export]
#[cfg(target_arch = "wasm32")]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        web_sys::console::warn_1(&format!($($arg)*).into());
    }};
}

#[macro_export]
#[cfg(not(target_arch = "wasm32"))]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        eprintln!("[WARN] {}", format!($($arg)*));
    }};
}

#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        web_sys::console::info_1(&format!($($arg)*).into());
    }};
}

#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        eprintln!("[INFO] {}", format!($($arg)*));
    }};
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

#[macro_export]
#[cfg(all(debug_assertions, target_arch = "wasm32"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        web_sys::console::debug_1(&format!($($arg)*).into());
    }};
}

#[macro_export]
#[cfg(all(debug_assertions, not(target_arch = "wasm32")))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        eprintln!("[DEBUG] {}", format!($($arg)*));
    }};
}

#[macro_export]
#[cfg(not(debug_assertions))]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}
