//! Logging macros for ergonomic message formatting.
//!
//! The macros format like `println!` and forward to a facility's `message`
//! method, so the caller-location tag still points at the call site.
//!
//! # Examples
//!
//! ```
//! use facility_logger::{info, FileConfig, Level, Logger};
//!
//! let logger = Logger::new();
//! logger.set_file(FileConfig::buffer_only());
//! let http = logger.facility("http");
//!
//! info!(http, "server started");
//!
//! let port = 8080;
//! info!(http, "listening on port {}", port);
//! ```

/// Log a message at an explicit level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use facility_logger::{FileConfig, Level, Logger};
/// # let logger = Logger::new();
/// # logger.set_file(FileConfig::buffer_only());
/// # let facility = logger.facility("");
/// use facility_logger::log_msg;
/// log_msg!(facility, Level::Info, "simple message");
/// log_msg!(facility, Level::Err, "error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log_msg {
    ($facility:expr, $level:expr, $($arg:tt)+) => {
        $facility.message($level, format!($($arg)+))
    };
}

/// Log an EMERG-level message (always carries the caller tag).
#[macro_export]
macro_rules! emerg {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Emerg, $($arg)+)
    };
}

/// Log an ALERT-level message.
#[macro_export]
macro_rules! alert {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Alert, $($arg)+)
    };
}

/// Log a CRIT-level message.
#[macro_export]
macro_rules! crit {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Crit, $($arg)+)
    };
}

/// Log an ERR-level message.
#[macro_export]
macro_rules! err {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Err, $($arg)+)
    };
}

/// Log a WARNING-level message.
#[macro_export]
macro_rules! warning {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Warning, $($arg)+)
    };
}

/// Log a NOTICE-level message.
#[macro_export]
macro_rules! notice {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Notice, $($arg)+)
    };
}

/// Log an INFO-level message.
#[macro_export]
macro_rules! info {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Info, $($arg)+)
    };
}

/// Log a DEBUG-level message.
#[macro_export]
macro_rules! debug {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Debug, $($arg)+)
    };
}

/// Log a TRACE1-level message.
#[macro_export]
macro_rules! trace1 {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Trace1, $($arg)+)
    };
}

/// Log a TRACE2-level message.
#[macro_export]
macro_rules! trace2 {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Trace2, $($arg)+)
    };
}

/// Log a TRACE3-level message.
#[macro_export]
macro_rules! trace3 {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Trace3, $($arg)+)
    };
}

/// Log a TRACE4-level message.
#[macro_export]
macro_rules! trace4 {
    ($facility:expr, $($arg:tt)+) => {
        $crate::log_msg!($facility, $crate::Level::Trace4, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::config::FileConfig;
    use crate::core::level::Level;
    use crate::core::logger::Logger;
    use crate::sinks::CaptureSink;

    fn capture_logger() -> (Logger, CaptureSink) {
        let logger = Logger::new();
        let sink = CaptureSink::new();
        logger.set_console_sink(Box::new(sink.clone()));
        logger.set_file(FileConfig::buffer_only());
        (logger, sink)
    }

    #[test]
    fn test_log_msg_macro() {
        let (logger, sink) = capture_logger();
        let facility = logger.facility("");
        log_msg!(facility, Level::Info, "formatted: {}", 42);
        assert!(sink.lines().last().unwrap().contains("formatted: 42"));
    }

    #[test]
    fn test_level_macros() {
        let (logger, sink) = capture_logger();
        let facility = logger.facility("macros");

        info!(facility, "items: {}", 100);
        warning!(facility, "retry {} of {}", 1, 3);
        err!(facility, "code: {}", 500);
        debug!(facility, "counter: {}", 10);

        let lines = sink.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains(" IN "));
        assert!(lines[1].contains(" WA "));
        assert!(lines[2].contains(" ER "));
        assert!(lines[3].contains(" DE "));
        assert!(lines.iter().all(|l| l.contains("[macros]")));
    }

    #[test]
    fn test_trace_macros_suppressed_at_default_level() {
        let (logger, sink) = capture_logger();
        let facility = logger.facility("");

        trace1!(facility, "hidden");
        trace4!(facility, "hidden too");
        assert!(sink.lines().is_empty());

        facility
            .set_level("TRACE4", crate::core::config::CallerMode::None)
            .unwrap();
        sink.clear();
        trace1!(facility, "now visible");
        assert!(sink.lines().last().unwrap().contains("now visible"));
    }
}
