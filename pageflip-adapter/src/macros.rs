// Events use the default target, the emitting module's path (e.g.
// `pageflip_adapter::controller`), so one crate-level filter directive covers every module.

#[cfg(feature = "tracing")]
macro_rules! plog {
    ($level:ident, $($arg:tt)+) => {
        tracing::$level!($($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! plog {
    ($level:ident, $($arg:tt)+) => {};
}

macro_rules! ptrace {
    ($($arg:tt)+) => { plog!(trace, $($arg)+) };
}

macro_rules! pdebug {
    ($($arg:tt)+) => { plog!(debug, $($arg)+) };
}

macro_rules! pwarn {
    ($($arg:tt)+) => { plog!(warn, $($arg)+) };
}
