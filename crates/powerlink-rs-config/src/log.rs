use alloc::format;
use alloc::string::String;

/// Something that can describe where a log line comes from.
pub trait LogMetadata {
    fn meta(&self) -> String;
}

/// Identifies the configuration pass and node a log line belongs to.
pub struct LogContext {
    pub system: &'static str,
    pub component: &'static str,
    pub id: u32,
}

impl LogContext {
    pub const fn node(component: &'static str, node_id: u8) -> Self {
        Self {
            system: "config",
            component,
            id: node_id as u32,
        }
    }
}

impl LogMetadata for LogContext {
    fn meta(&self) -> String {
        format!(
            "system={}, component={}, node={}",
            self.system, self.component, self.id
        )
    }
}

/// Forwards to the `log` macro named by `$level`, prefixing the line with
/// the context's metadata when one is given.
macro_rules! log_with_meta {
    ($level:ident, $ctx:expr, $fmt:literal $(, $($arg:tt)+)?) => {{
        let meta = $crate::log::LogMetadata::meta(&$ctx);
        log::$level!(concat!("[{}] ", $fmt), meta $(, $($arg)+)?);
    }};
    ($level:ident, $fmt:literal $(, $($arg:tt)+)?) => {
        log::$level!($fmt $(, $($arg)+)?)
    };
}

macro_rules! my_info {
    ($($t:tt)+) => { $crate::log::log_with_meta!(info, $($t)+) };
}

macro_rules! my_warn {
    ($($t:tt)+) => { $crate::log::log_with_meta!(warn, $($t)+) };
}

macro_rules! my_error {
    ($($t:tt)+) => { $crate::log::log_with_meta!(error, $($t)+) };
}

macro_rules! my_debug {
    ($($t:tt)+) => { $crate::log::log_with_meta!(debug, $($t)+) };
}

macro_rules! my_trace {
    ($($t:tt)+) => { $crate::log::log_with_meta!(trace, $($t)+) };
}

pub(crate) use log_with_meta;
pub(crate) use my_debug;
pub(crate) use my_error;
pub(crate) use my_info;
pub(crate) use my_trace;
pub(crate) use my_warn;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_context_meta() {
        let ctx = LogContext::node("pdo", 240);
        assert_eq!(ctx.meta(), "system=config, component=pdo, node=240");
    }
}
