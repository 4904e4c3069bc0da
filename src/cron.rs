//! Scheduler logging adapter
//!
//! Bridges a cron-style scheduler's `info`/`error` logging interface onto a
//! facility: informational scheduler chatter lands at TRACE2, errors at ERR,
//! with key/value pairs rendered inline.

use crate::core::facility::Facility;
use crate::core::level::Level;
use chrono::{DateTime, Utc};
use std::fmt;

/// Value in a scheduler log key/value pair.
pub enum CronValue {
    Str(String),
    Int(i64),
    Float(f64),
    Time(DateTime<Utc>),
}

impl fmt::Display for CronValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CronValue::Str(s) => write!(f, "{}", s),
            CronValue::Int(i) => write!(f, "{}", i),
            CronValue::Float(x) => write!(f, "{}", x),
            CronValue::Time(t) => write!(f, "{}", t.format("%Y-%m-%dT%H:%M:%S%.3fZ")),
        }
    }
}

impl From<&str> for CronValue {
    fn from(s: &str) -> Self {
        CronValue::Str(s.to_string())
    }
}

impl From<String> for CronValue {
    fn from(s: String) -> Self {
        CronValue::Str(s)
    }
}

impl From<i64> for CronValue {
    fn from(i: i64) -> Self {
        CronValue::Int(i)
    }
}

impl From<i32> for CronValue {
    fn from(i: i32) -> Self {
        CronValue::Int(i64::from(i))
    }
}

impl From<f64> for CronValue {
    fn from(x: f64) -> Self {
        CronValue::Float(x)
    }
}

impl From<DateTime<Utc>> for CronValue {
    fn from(t: DateTime<Utc>) -> Self {
        CronValue::Time(t)
    }
}

/// Adapter exposing the scheduler's logging interface on top of a facility.
pub struct CronLog {
    facility: Facility,
}

impl CronLog {
    #[must_use]
    pub fn new(facility: Facility) -> Self {
        Self { facility }
    }

    #[track_caller]
    pub fn info(&self, msg: &str, kv: &[(&str, CronValue)]) {
        self.facility
            .message(Level::Trace2, self.make_msg(None, msg, kv));
    }

    #[track_caller]
    pub fn error(&self, err: &dyn fmt::Display, msg: &str, kv: &[(&str, CronValue)]) {
        self.facility
            .message(Level::Err, self.make_msg(Some(&err.to_string()), msg, kv));
    }

    fn make_msg(&self, err: Option<&str>, msg: &str, kv: &[(&str, CronValue)]) -> String {
        let mut out = String::new();

        if let Some(err) = err {
            out.push_str(err);
        }

        if !msg.is_empty() {
            if !out.is_empty() {
                out.push_str(": ");
            }
            out.push_str(msg);
        }

        let pairs = kv
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect::<Vec<_>>()
            .join(", ");
        if !pairs.is_empty() {
            if out.is_empty() {
                out = pairs;
            } else {
                out = format!("{} ({})", out, pairs);
            }
        }

        format!("[cron] {}", out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FileConfig;
    use crate::core::logger::Logger;

    fn sample_time() -> CronValue {
        CronValue::from(DateTime::from_timestamp(60, 123_456_789).unwrap())
    }

    fn sample_kv() -> Vec<(&'static str, CronValue)> {
        vec![
            ("p1", CronValue::from("v1")),
            ("p2", CronValue::from(3i64)),
            ("p3", sample_time()),
        ]
    }

    #[test]
    fn test_message_assembly() {
        let logger = Logger::new();
        logger.set_file(FileConfig::buffer_only());
        let cron = CronLog::new(logger.facility(""));

        let err = "Something went wrong";
        let msg = "Test message";
        let kv_text = "p1=v1, p2=3, p3=1970-01-01T00:01:00.123Z";

        let cases: Vec<(Option<&str>, &str, Vec<(&str, CronValue)>, String)> = vec![
            (None, "", vec![], "[cron] ".to_string()),
            (None, "", sample_kv(), format!("[cron] {}", kv_text)),
            (None, msg, vec![], "[cron] Test message".to_string()),
            (
                None,
                msg,
                sample_kv(),
                format!("[cron] Test message ({})", kv_text),
            ),
            (Some(err), "", vec![], "[cron] Something went wrong".to_string()),
            (
                Some(err),
                "",
                sample_kv(),
                format!("[cron] Something went wrong ({})", kv_text),
            ),
            (
                Some(err),
                msg,
                vec![],
                "[cron] Something went wrong: Test message".to_string(),
            ),
            (
                Some(err),
                msg,
                sample_kv(),
                format!("[cron] Something went wrong: Test message ({})", kv_text),
            ),
        ];

        for (i, (err, msg, kv, expect)) in cases.iter().enumerate() {
            let got = cron.make_msg(*err, msg, kv);
            assert_eq!(&got, expect, "case {}", i + 1);
        }
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(CronValue::from("x").to_string(), "x");
        assert_eq!(CronValue::from(42i32).to_string(), "42");
        assert_eq!(CronValue::from(1.5).to_string(), "1.5");
        assert_eq!(sample_time().to_string(), "1970-01-01T00:01:00.123Z");
    }
}
