/// In-memory capture of log records for the debug console
///
/// Records go to a bounded ring buffer shown in the drop-down console.
/// Errors are also written to stderr through env_logger.
use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Oldest entries are dropped past this many
const MAX_LOG_ENTRIES: usize = 1000;

/// Crates whose records reach the console when RUST_LOG is unset
const CONSOLE_MODULES: [&str; 3] = ["bc_tui", "bc_pager", "bc_api"];

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// Shared between the logger and the UI
pub type LogBuffer = Arc<Mutex<VecDeque<LogEntry>>>;

pub struct DebugConsoleLogger {
    logs: LogBuffer,
    terminal: env_logger::Logger,
    console_filter: env_logger::Logger,
}

impl DebugConsoleLogger {
    pub fn new(logs: LogBuffer) -> Self {
        let terminal = env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Error)
            .build();

        // RUST_LOG wins when set; otherwise only our own crates at Debug
        let console_filter = if std::env::var("RUST_LOG").is_ok() {
            env_logger::Builder::from_default_env().build()
        } else {
            let mut builder = env_logger::Builder::new();
            for module in CONSOLE_MODULES {
                builder.filter_module(module, LevelFilter::Debug);
            }
            builder.build()
        };

        Self {
            logs,
            terminal,
            console_filter,
        }
    }

    pub fn create_buffer() -> LogBuffer {
        Arc::new(Mutex::new(VecDeque::with_capacity(MAX_LOG_ENTRIES)))
    }
}

/// Append to the ring buffer, evicting the oldest entry when full
fn push_entry(logs: &LogBuffer, entry: LogEntry) {
    let mut logs = logs.lock().unwrap_or_else(PoisonError::into_inner);
    if logs.len() >= MAX_LOG_ENTRIES {
        logs.pop_front();
    }
    logs.push_back(entry);
}

impl Log for DebugConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console_filter.enabled(metadata) || self.terminal.enabled(metadata)
    }

    fn log(&self, record: &Record) {
        if self.console_filter.enabled(record.metadata()) {
            push_entry(
                &self.logs,
                LogEntry {
                    timestamp: Utc::now(),
                    level: record.level(),
                    target: record.target().to_string(),
                    message: record.args().to_string(),
                },
            );
        }

        if self.terminal.enabled(record.metadata()) {
            self.terminal.log(record);
        }
    }

    fn flush(&self) {
        self.terminal.flush();
    }
}

/// Install the debug console logger. Call once, before anything logs.
///
/// Without RUST_LOG the console shows Debug records from bc_tui, bc_pager
/// and bc_api only. With RUST_LOG set (e.g. `RUST_LOG=bc_pager=trace` or
/// `RUST_LOG=info`) that filter is used instead. The terminal only ever
/// receives errors.
pub fn init_logger() -> Result<LogBuffer, SetLoggerError> {
    let logs = DebugConsoleLogger::create_buffer();
    log::set_boxed_logger(Box::new(DebugConsoleLogger::new(logs.clone())))?;
    log::set_max_level(LevelFilter::Trace);

    log::info!("Debug console initialized - press ` to toggle");
    Ok(logs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: String) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: Level::Debug,
            target: "bc_tui".to_string(),
            message,
        }
    }

    #[test]
    fn test_buffer_drops_oldest_entries() {
        let logs = DebugConsoleLogger::create_buffer();
        for i in 0..MAX_LOG_ENTRIES + 5 {
            push_entry(&logs, entry(format!("line {}", i)));
        }

        let logs = logs.lock().unwrap();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs.front().unwrap().message, "line 5");
        assert_eq!(
            logs.back().unwrap().message,
            format!("line {}", MAX_LOG_ENTRIES + 4)
        );
    }
}
