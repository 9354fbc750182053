use chrono::Local;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};

// Every record ever logged, regardless of the console level
static LOGS: Lazy<Arc<Mutex<Vec<LogRecord>>>> = Lazy::new(|| Arc::new(Mutex::new(Vec::new())));

// Minimum level echoed to the console
static LOG_LEVEL: Lazy<Arc<Mutex<LogLevel>>> =
    Lazy::new(|| Arc::new(Mutex::new(LogLevel::Warning)));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Debug => "🔍",
            LogLevel::Info => "ℹ️",
            LogLevel::Warning => "⚠️",
            LogLevel::Error => "❌",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub timestamp: String,
    pub message: String,
}

impl LogRecord {
    /// `[HH:MM:SS] <prefix> message`
    pub fn formatted(&self) -> String {
        format!("[{}] {} {}", self.timestamp, self.level.prefix(), self.message)
    }
}

pub fn set_log_level(level: LogLevel) {
    if let Ok(mut current_level) = LOG_LEVEL.lock() {
        *current_level = level;
    }
}

pub fn get_log_level() -> LogLevel {
    if let Ok(level) = LOG_LEVEL.lock() {
        *level
    } else {
        LogLevel::Warning
    }
}

pub fn log(level: LogLevel, message: &str) {
    let record = LogRecord {
        level,
        timestamp: Local::now().format("%H:%M:%S").to_string(),
        message: message.to_string(),
    };
    let formatted = record.formatted();

    if let Ok(mut logs) = LOGS.lock() {
        logs.push(record);
    }

    if level >= get_log_level() {
        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", formatted),
            _ => println!("{}", formatted),
        }
    }
}

/// All records as formatted lines, oldest first
pub fn get_logs() -> Vec<String> {
    if let Ok(logs) = LOGS.lock() {
        logs.iter().map(LogRecord::formatted).collect()
    } else {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        vec![format!("[{}] ❌ Error accessing logs", timestamp)]
    }
}

/// Messages of the records logged at exactly `level`
pub fn messages_at(level: LogLevel) -> Vec<String> {
    match LOGS.lock() {
        Ok(logs) => logs
            .iter()
            .filter(|record| record.level == level)
            .map(|record| record.message.clone())
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn clear_logs() {
    if let Ok(mut logs) = LOGS.lock() {
        logs.clear();
    }
}

pub fn debug(message: &str) {
    log(LogLevel::Debug, message);
}

pub fn info(message: &str) {
    log(LogLevel::Info, message);
}

pub fn warning(message: &str) {
    log(LogLevel::Warning, message);
}

pub fn error(message: &str) {
    log(LogLevel::Error, message);
}
