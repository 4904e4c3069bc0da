//! Multi-facility logger engine
//!
//! One `Logger` owns the whole mutable aggregate: the facility registry, the
//! alert subscribers, the ring and pre-open buffers, the current file handle
//! and its day stamp. All of it sits behind a single coarse mutex; the file
//! sink has a second, narrower mutex so the periodic flusher only blocks
//! writers for the duration of the actual write. Logging is deliberately not
//! the throughput-critical path of a host application.

use super::buffers::{PreOpenBuffer, RingBuffer, PRE_OPEN_CAPACITY, RING_CAPACITY};
use super::config::{CallerMode, FileConfig};
use super::error::{LoggerError, Result};
use super::facility::Facility;
use super::level::Level;
use super::redact::Replacer;
use crate::sinks::{ConsoleSink, FileSink, StdoutSink};
use chrono::{DateTime, Local, Utc};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

#[cfg(windows)]
pub(crate) const EOL: &str = "\r\n";
#[cfg(not(windows))]
pub(crate) const EOL: &str = "\n";

const DATE_FORMAT: &str = "%Y.%m.%d";
const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Default flush interval when none is configured.
const DEFAULT_FLUSH_PERIOD: Duration = Duration::from_secs(1);

/// Callback invoked synchronously on every facility level change, with the
/// facility name, the old level and the new level.
///
/// Callbacks run under the engine lock and must not call back into the
/// logger.
pub type AlertFn = Box<dyn Fn(&str, Level, Level) + Send>;

/// Everything mutable, guarded by the one engine mutex.
struct LoggerState {
    facilities: HashMap<String, Level>,
    alert_subscribers: HashMap<u64, AlertFn>,
    next_alert_id: u64,
    ring: RingBuffer,
    pre_open: PreOpenBuffer,
    console: Box<dyn ConsoleSink>,
    caller_mode: CallerMode,
    max_len: usize,
    local_time: bool,
    /// Cleared at shutdown; emits then skip file persistence but keep
    /// feeding the ring buffer and the console mirror.
    active: bool,
    /// The console sees the launch banner once per process.
    banner_pending: bool,
    directory: PathBuf,
    file_name_pattern: Option<String>,
    file_name: Option<PathBuf>,
    last_write_date: Option<String>,
    buffer_size: usize,
    flush_period: Duration,
    dump_file: PathBuf,
    app_name: String,
}

impl LoggerState {
    fn new(app_name: String) -> Self {
        let mut facilities = HashMap::new();
        facilities.insert(String::new(), Level::default());
        let dump_file = PathBuf::from(format!("{}_unsaved.log", app_name));
        Self {
            facilities,
            alert_subscribers: HashMap::new(),
            next_alert_id: 0,
            ring: RingBuffer::new(RING_CAPACITY),
            pre_open: PreOpenBuffer::new(PRE_OPEN_CAPACITY),
            console: Box::new(StdoutSink::new()),
            caller_mode: CallerMode::None,
            max_len: 0,
            local_time: false,
            active: true,
            banner_pending: true,
            directory: PathBuf::new(),
            file_name_pattern: None,
            file_name: None,
            last_write_date: None,
            buffer_size: 0,
            flush_period: DEFAULT_FLUSH_PERIOD,
            dump_file,
            app_name,
        }
    }

    /// Two-phase lookup under the engine lock: find, else create with the
    /// standard facility's current level (or the hardcoded default for the
    /// standard facility itself). Atomic with respect to concurrent creators.
    fn level_or_create(&mut self, name: &str) -> Level {
        if let Some(level) = self.facilities.get(name) {
            return *level;
        }
        let default = if name.is_empty() {
            Level::default()
        } else {
            self.facilities.get("").copied().unwrap_or_default()
        };
        self.facilities.insert(name.to_string(), default);
        default
    }
}

pub(crate) struct Shared {
    enabled: AtomicBool,
    pid: u32,
    start_time: DateTime<Utc>,
    state: Mutex<LoggerState>,
    sink: Mutex<Option<FileSink>>,
}

fn date_time_strings(local: bool) -> (String, String) {
    if local {
        let now = Local::now();
        (
            now.format(DATE_FORMAT).to_string(),
            now.format(TIME_FORMAT).to_string(),
        )
    } else {
        let now = Utc::now();
        (
            now.format(DATE_FORMAT).to_string(),
            now.format(TIME_FORMAT).to_string(),
        )
    }
}

/// Caller tag per the configured mode; always the full form for `Emerg`.
fn caller_tag(mode: CallerMode, level: Level, caller: &Location<'_>) -> String {
    if level == Level::Emerg || mode == CallerMode::Full {
        format!(" {}:{}:", caller.file(), caller.line())
    } else if mode == CallerMode::Short {
        let file = caller
            .file()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_else(|| caller.file());
        format!(" {}:{}:", file, caller.line())
    } else {
        String::new()
    }
}

/// Byte truncation that backs off to the previous char boundary. 0 = unlimited.
fn truncate_to(text: &mut String, max: usize) {
    if max > 0 && text.len() > max {
        let mut cut = max;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
    }
}

enum Destination {
    PreOpen,
    Discard,
    File,
}

impl Shared {
    /// Standard emit path: takes the engine lock for the full format /
    /// filter / persist sequence.
    pub(crate) fn emit(
        &self,
        facility: &str,
        level: Level,
        redactor: Option<&Replacer>,
        caller: &'static Location<'static>,
        text: &str,
    ) {
        if !self.enabled.load(Ordering::Relaxed) {
            return;
        }
        let mut state = self.state.lock();
        self.emit_locked(&mut state, facility, level, redactor, caller, text);
    }

    /// Lock-held filtered emit.
    fn emit_locked(
        &self,
        state: &mut LoggerState,
        facility: &str,
        level: Level,
        redactor: Option<&Replacer>,
        caller: &'static Location<'static>,
        text: &str,
    ) {
        let threshold = state
            .facilities
            .get(facility)
            .or_else(|| state.facilities.get(""))
            .copied()
            .unwrap_or_default();
        if level.code() > threshold.code() {
            return;
        }
        self.emit_unfiltered(state, facility, level, redactor, caller, text);
    }

    /// Format and persist with no threshold check. Used by `set_level` for
    /// its WARNING/INFO self-logs, which must appear even when the facility's
    /// (possibly just-committed) threshold would filter them; calling it with
    /// the lock held also keeps the nested emit from deadlocking. The disable
    /// flag still silences everything.
    fn emit_unfiltered(
        &self,
        state: &mut LoggerState,
        facility: &str,
        level: Level,
        redactor: Option<&Replacer>,
        caller: &'static Location<'static>,
        text: &str,
    ) {
        if !self.enabled.load(Ordering::Relaxed) {
            return;
        }

        let (date, time) = date_time_strings(state.local_time);
        let tag = caller_tag(state.caller_mode, level, caller);
        let facility_tag = if facility.is_empty() {
            String::new()
        } else {
            format!(" [{}]", facility)
        };

        let mut line = format!(
            "[{}] {} {} {}{}{} {}",
            self.pid,
            level.short_name(),
            date,
            time,
            facility_tag,
            tag,
            text
        );
        truncate_to(&mut line, state.max_len);
        if let Some(replacer) = redactor {
            line = replacer.apply(&line);
        }
        line.push_str(EOL);

        if state.active {
            let destination = match state.file_name_pattern.as_deref() {
                None => Destination::PreOpen,
                Some("-") => Destination::Discard,
                Some(_) => Destination::File,
            };
            match destination {
                Destination::PreOpen => state.pre_open.push(line.clone()),
                Destination::Discard => {}
                Destination::File => {
                    if state.file_name.is_none()
                        || state.last_write_date.as_deref() != Some(date.as_str())
                    {
                        self.open_for_date(state, &date);
                    }
                    if state.file_name.is_some() {
                        let mut sink = self.sink.lock();
                        if let Some(sink) = sink.as_mut() {
                            let _ = sink.write_line(&line);
                        }
                        drop(sink);
                        state.last_write_date = Some(date.clone());
                    } else {
                        state.last_write_date = None;
                    }
                }
            }
        }

        state.ring.push(line.clone());
        state.console.write_line(level, &line);
    }

    /// Rotate to the file for `date`. Failure never propagates: messages
    /// simply stop reaching the file until the next attempt, while the ring
    /// buffer and console mirror stay authoritative.
    fn open_for_date(&self, state: &mut LoggerState, date: &str) {
        {
            let mut sink = self.sink.lock();
            if let Some(mut old) = sink.take() {
                let _ = old.flush();
            }
        }
        state.file_name = None;

        let _ = self.try_open(state, date);
    }

    fn try_open(&self, state: &mut LoggerState, date: &str) -> Result<()> {
        let pattern = match state.file_name_pattern.as_deref() {
            Some(p) if p != "-" => p.to_string(),
            _ => return Ok(()),
        };

        fs::create_dir_all(&state.directory).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                format!("cannot create '{}'", state.directory.display()),
                e,
            )
        })?;

        let name = PathBuf::from(pattern.replace("%s", date));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&name)
            .map_err(|e| {
                LoggerError::io_operation(
                    "opening log file",
                    format!("cannot open '{}'", name.display()),
                    e,
                )
            })?;

        let banner = self.banner_line(state);
        {
            let mut slot = self.sink.lock();
            let mut sink = FileSink::new(file, state.buffer_size);
            let _ = sink.write_line(&banner);
            for entry in state.pre_open.drain() {
                let _ = sink.write_line(&entry);
            }
            *slot = Some(sink);
        }
        state.file_name = Some(name);

        // A successful open supersedes any crash-dump fallback.
        let _ = fs::remove_file(&state.dump_file);

        if state.banner_pending {
            state.banner_pending = false;
            state.console.write_line(Level::Info, &banner);
        }
        Ok(())
    }

    fn banner_line(&self, state: &LoggerState) -> String {
        let command_line = std::env::args().collect::<Vec<_>>().join(" ");
        let started = if state.local_time {
            self.start_time
                .with_timezone(&Local)
                .format("%Y.%m.%d %H:%M:%S")
                .to_string()
        } else {
            self.start_time.format("%Y.%m.%d %H:%M:%S").to_string()
        };

        let mut line = format!(
            "[{}] {} *** {} {} was launched at {}Z with command line \"{}\"",
            self.pid,
            Level::Info.short_name(),
            state.app_name,
            env!("CARGO_PKG_VERSION"),
            started,
            command_line
        );
        truncate_to(&mut line, state.max_len);
        line.push_str(EOL);
        line
    }

    fn flush_sink(&self) {
        let mut sink = self.sink.lock();
        if let Some(sink) = sink.as_mut() {
            let _ = sink.flush();
        }
    }

    pub(crate) fn level_of(&self, facility: &str) -> Level {
        self.state.lock().level_or_create(facility)
    }

    /// Parse and apply a new level for one facility.
    ///
    /// Parse failures leave the level untouched, self-log a WARNING to the
    /// facility and return the error. A successful change notifies every
    /// alert subscriber and commits inside the same critical section, then
    /// emits an INFO confirmation. Setting the current value is a no-op.
    pub(crate) fn set_level(
        &self,
        facility: &str,
        level_name: &str,
        mode: CallerMode,
        caller: &'static Location<'static>,
    ) -> Result<Level> {
        let mut state = self.state.lock();
        state.caller_mode = mode;

        let old = state.level_or_create(facility);
        let Some(new) = Level::parse(level_name) else {
            let message = format!(
                "Invalid log level \"{}\", left unchanged \"{}\"",
                level_name,
                old.long_name()
            );
            self.emit_unfiltered(&mut state, facility, Level::Warning, None, caller, &message);
            return Err(LoggerError::invalid_level(
                facility,
                level_name,
                old.long_name(),
            ));
        };

        if new != old {
            for subscriber in state.alert_subscribers.values() {
                subscriber(facility, old, new);
            }
            state.facilities.insert(facility.to_string(), new);
            let message = format!("Current log level was set to \"{}\"", new.long_name());
            self.emit_unfiltered(&mut state, facility, Level::Info, None, caller, &message);
        }

        Ok(old)
    }
}

fn flusher_loop(shared: Arc<Shared>, stop: Receiver<()>) {
    let mut last_flush_date: Option<String> = None;

    loop {
        let (period, local) = {
            let state = shared.state.lock();
            (state.flush_period, state.local_time)
        };
        let period = if period.is_zero() {
            DEFAULT_FLUSH_PERIOD
        } else {
            period
        };

        match stop.recv_timeout(period) {
            Err(RecvTimeoutError::Timeout) => {
                let (date, _) = date_time_strings(local);
                if let Some(previous) = last_flush_date.as_deref() {
                    if previous != date {
                        shared.emit(
                            "",
                            Level::from_code(-Level::Info.code()),
                            None,
                            Location::caller(),
                            "Have a nice day",
                        );
                    }
                }
                last_flush_date = Some(date);
                shared.flush_sink();
            }
            // Shutdown signal or logger dropped: stop promptly.
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// The process-wide logging facility.
///
/// Construct once, hand out [`Facility`] handles, and call
/// [`shutdown`](Logger::shutdown) at process exit. Dropping the logger also
/// shuts it down.
///
/// # Example
///
/// ```
/// use facility_logger::{FileConfig, Level, Logger};
///
/// let mut logger = Logger::new();
/// logger.set_file(FileConfig::buffer_only());
///
/// let http = logger.facility("http");
/// http.message(Level::Info, "listening on :8080");
///
/// assert!(logger.last_log().last().unwrap().contains("listening"));
/// logger.shutdown();
/// ```
pub struct Logger {
    shared: Arc<Shared>,
    stop_tx: Option<Sender<()>>,
    flusher: Option<JoinHandle<()>>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        let app_name = std::env::args()
            .next()
            .as_deref()
            .and_then(|arg| Path::new(arg).file_stem().map(|s| s.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "app".to_string());

        let shared = Arc::new(Shared {
            enabled: AtomicBool::new(true),
            pid: std::process::id(),
            start_time: Utc::now(),
            state: Mutex::new(LoggerState::new(app_name)),
            sink: Mutex::new(None),
        });

        let (stop_tx, stop_rx) = bounded(1);
        let flusher = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || flusher_loop(shared, stop_rx))
        };

        Self {
            shared,
            stop_tx: Some(stop_tx),
            flusher: Some(flusher),
        }
    }

    /// Get or create the facility with `name`. The empty name is the
    /// standard facility; new facilities inherit its current level.
    #[must_use]
    pub fn facility(&self, name: &str) -> Facility {
        self.shared.state.lock().level_or_create(name);
        Facility::new(Arc::clone(&self.shared), name.to_string())
    }

    /// The standard facility (empty name).
    #[must_use]
    pub fn std_facility(&self) -> Facility {
        self.facility("")
    }

    pub fn enable(&self) {
        self.shared.enabled.store(true, Ordering::Relaxed);
    }

    /// Turn every emit into a cheap no-op, without taking any lock.
    pub fn disable(&self) {
        self.shared.enabled.store(false, Ordering::Relaxed);
    }

    /// Set the maximum formatted line length in bytes (0 = unlimited) and
    /// return the previous value.
    pub fn set_max_len(&self, max: usize) -> usize {
        let mut state = self.shared.state.lock();
        std::mem::replace(&mut state.max_len, max)
    }

    /// Configure the file destination. Takes effect at the next rotation;
    /// an empty directory means `./logs/`, the literal `"-"` selects
    /// buffer-only mode.
    pub fn set_file(&self, config: FileConfig) {
        let mut state = self.shared.state.lock();

        let directory = if config.directory.is_empty() {
            "./logs/".to_string()
        } else {
            config.directory.clone()
        };

        state.local_time = config.local_time;
        state.buffer_size = config.buffer_size;
        if config.flush_period_secs > 0 {
            state.flush_period = Duration::from_secs(config.flush_period_secs);
        }

        if directory == "-" {
            state.file_name_pattern = Some("-".to_string());
        } else {
            let suffix = if config.suffix.is_empty() {
                String::new()
            } else {
                format!("-{}", config.suffix)
            };
            let directory = directory.trim_end_matches('/').to_string();
            state.directory = PathBuf::from(&directory);
            state.file_name_pattern = Some(format!("{}/%s{}.log", directory, suffix));
        }
    }

    /// Replace the console mirror target. The last sink set wins.
    pub fn set_console_sink(&self, sink: Box<dyn ConsoleSink>) {
        self.shared.state.lock().console = sink;
    }

    /// Override the crash-dump file used when the process exits before any
    /// log file was opened. Defaults to `<app_name>_unsaved.log`.
    pub fn set_dump_file(&self, path: impl Into<PathBuf>) {
        self.shared.state.lock().dump_file = path.into();
    }

    /// Register a level-change callback; returns a handle for removal.
    pub fn add_alert_fn(&self, f: impl Fn(&str, Level, Level) + Send + 'static) -> u64 {
        let mut state = self.shared.state.lock();
        state.next_alert_id += 1;
        let id = state.next_alert_id;
        state.alert_subscribers.insert(id, Box::new(f));
        id
    }

    pub fn del_alert_fn(&self, id: u64) {
        self.shared.state.lock().alert_subscribers.remove(&id);
    }

    /// Set one facility's level from its textual name, also applying the
    /// process-wide caller-tag mode. Returns the previous level.
    #[track_caller]
    pub fn set_level(&self, facility: &str, level_name: &str, mode: CallerMode) -> Result<Level> {
        self.shared
            .set_level(facility, level_name, mode, Location::caller())
    }

    /// Apply levels to every registered facility: a per-facility override if
    /// present, else `default_level`. Stops at the first error; remaining
    /// facilities keep their levels.
    #[track_caller]
    pub fn set_all_levels(
        &self,
        default_level: &str,
        overrides: &HashMap<String, String>,
        mode: CallerMode,
    ) -> Result<()> {
        let caller = Location::caller();
        let mut names: Vec<String> = {
            let state = self.shared.state.lock();
            state.facilities.keys().cloned().collect()
        };
        names.sort();

        for name in names {
            let text = overrides.get(&name).map(String::as_str).unwrap_or(default_level);
            self.shared.set_level(&name, text, mode, caller)?;
        }
        Ok(())
    }

    /// Current level of a facility with its short and long names. Creates
    /// the facility if it does not exist yet.
    #[must_use]
    pub fn current_level(&self, facility: &str) -> (Level, &'static str, &'static str) {
        let level = self.shared.level_of(facility);
        (level, level.short_name(), level.long_name())
    }

    /// All registered facilities with their current levels, sorted by name.
    #[must_use]
    pub fn all_levels(&self) -> Vec<(String, Level)> {
        let state = self.shared.state.lock();
        let mut levels: Vec<(String, Level)> = state
            .facilities
            .iter()
            .map(|(name, level)| (name.clone(), *level))
            .collect();
        levels.sort_by(|a, b| a.0.cmp(&b.0));
        levels
    }

    /// Snapshot of the most recent emitted lines.
    #[must_use]
    pub fn last_log(&self) -> Vec<String> {
        self.shared.state.lock().ring.snapshot()
    }

    /// The active file-name pattern with the `%s` date placeholder, if a
    /// destination is configured.
    #[must_use]
    pub fn file_name_pattern(&self) -> Option<String> {
        self.shared.state.lock().file_name_pattern.clone()
    }

    /// Name of the currently open log file.
    #[must_use]
    pub fn file_name(&self) -> Option<PathBuf> {
        self.shared.state.lock().file_name.clone()
    }

    /// Cooperative shutdown: logs a final message, dumps a never-persisted
    /// pre-open buffer to the crash-dump file, stops the flusher and closes
    /// the file. Idempotent; also invoked on drop.
    #[track_caller]
    pub fn shutdown(&mut self) {
        let Some(stop_tx) = self.stop_tx.take() else {
            return;
        };

        self.shared.emit(
            "",
            Level::Info,
            None,
            Location::caller(),
            "Log file closed",
        );

        {
            let mut state = self.shared.state.lock();
            if !state.pre_open.is_empty() {
                if let Ok(mut dump) = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&state.dump_file)
                {
                    for line in state.pre_open.entries() {
                        let _ = dump.write_all(line.as_bytes());
                    }
                }
            }
            state.active = false;
        }

        drop(stop_tx);
        if let Some(flusher) = self.flusher.take() {
            let _ = flusher.join();
        }

        let mut sink = self.shared.sink.lock();
        if let Some(mut sink) = sink.take() {
            let _ = sink.flush();
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_respects_char_boundaries() {
        let mut text = "héllo".to_string();
        truncate_to(&mut text, 2);
        assert_eq!(text, "h");

        let mut text = "hello".to_string();
        truncate_to(&mut text, 0);
        assert_eq!(text, "hello");

        let mut text = "hello".to_string();
        truncate_to(&mut text, 3);
        assert_eq!(text, "hel");
    }

    #[test]
    fn test_caller_tag_modes() {
        let caller = Location::caller();

        assert_eq!(caller_tag(CallerMode::None, Level::Info, caller), "");

        let full = caller_tag(CallerMode::Full, Level::Info, caller);
        assert!(full.contains("logger.rs"));
        assert!(full.ends_with(':'));

        let short = caller_tag(CallerMode::Short, Level::Info, caller);
        assert!(short.starts_with(" logger.rs:"));

        // EMERG always carries the full tag
        let forced = caller_tag(CallerMode::None, Level::Emerg, caller);
        assert!(forced.contains("logger.rs"));
    }

    #[test]
    fn test_date_time_strings_shape() {
        let (date, time) = date_time_strings(false);
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], ".");
        assert_eq!(&date[7..8], ".");
        assert_eq!(time.len(), 12);
        assert_eq!(&time[2..3], ":");
        assert_eq!(&time[8..9], ".");
    }
}
