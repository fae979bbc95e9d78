//! Logging shims forwarding to the `log` facade when the `log` feature is on.
//!
//! With the feature off the arguments are still type-checked but nothing is emitted.
//! The warn-level shim is `warning!` since `warn` is taken by the lint attribute.

#[cfg(feature = "log")]
macro_rules! trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! trace {
    ($($arg:tt)*) => {{ let _ = core::format_args!($($arg)*); }};
}

#[cfg(feature = "log")]
macro_rules! debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($arg:tt)*) => {{ let _ = core::format_args!($($arg)*); }};
}

#[cfg(feature = "log")]
macro_rules! warning {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! warning {
    ($($arg:tt)*) => {{ let _ = core::format_args!($($arg)*); }};
}

pub(crate) use {debug, trace, warning};
