//! Logging setup for wpkit binaries
//!
//! Plain levels go through `env_logger` with a 🦀 prefix. A `json:` prefix on
//! the level (`json:debug`, or just `json`) switches to one JSON object per
//! line, written to `WPKIT_LOG_PATH` when set and stderr otherwise.

use chrono::{Local, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;
use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::sync::Mutex;

/// Environment variable holding the log level
pub const LOG_LEVEL_ENV: &str = "WPKIT_LOG_LEVEL";

/// Environment variable holding the JSON log file path
pub const LOG_PATH_ENV: &str = "WPKIT_LOG_PATH";

/// Level used when nothing is configured; progress output goes to stdout anyway
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// JSON logger implementation
#[derive(Debug)]
pub struct JsonLogger {
    level: Level,
    target_file: Mutex<Option<std::fs::File>>,
}

/// Split an optional `json:` prefix off a level string
fn split_level(level_str: &str) -> (bool, &str) {
    if let Some(stripped) = level_str.strip_prefix("json:") {
        (true, stripped)
    } else if level_str == "json" {
        (true, "info")
    } else {
        (false, level_str)
    }
}

fn parse_filter(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}

impl JsonLogger {
    /// Create a new JSON logger
    pub fn new(level: Level, log_path: Option<String>) -> Self {
        let target_file = log_path
            .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());

        JsonLogger {
            level,
            target_file: Mutex::new(target_file),
        }
    }

    /// Initialize logging with the given level; `source` names where the level came from
    pub fn init_with_level(level_str: &str, source: &str) -> (String, String) {
        let (use_json, actual_level) = split_level(level_str);
        let filter = parse_filter(actual_level);

        if !use_json {
            let result = env_logger::Builder::new()
                .filter_level(filter)
                .format(|buf, record| {
                    write!(buf, "🦀 ")?;
                    write!(
                        buf,
                        "[{} {} {}] ",
                        Local::now().format("%Y-%m-%dT%H:%M:%S"),
                        record.level(),
                        record.target()
                    )?;
                    writeln!(buf, "{}", record.args())
                })
                .try_init();
            if let Err(e) = result {
                eprintln!("Failed to initialize logger: {e}");
            }
            return (actual_level.to_string(), source.to_string());
        }

        let level = filter.to_level().unwrap_or(Level::Error);
        let logger = Box::new(JsonLogger::new(level, env::var(LOG_PATH_ENV).ok()));

        if let Err(e) = log::set_boxed_logger(logger) {
            eprintln!("Failed to initialize JSON logger: {e}");
            return (actual_level.to_string(), source.to_string());
        }

        log::set_max_level(filter);
        (actual_level.to_string(), source.to_string())
    }

    /// Initialize from the CLI override, then `WPKIT_LOG_LEVEL`, then the default
    pub fn init(cli_level: Option<&str>) {
        let (level, source) = match cli_level {
            Some(level) => (level.to_string(), "CLI --log-level"),
            None => match env::var(LOG_LEVEL_ENV) {
                Ok(level) => (level, LOG_LEVEL_ENV),
                Err(_) => (DEFAULT_LOG_LEVEL.to_string(), "default"),
            },
        };
        let (level, source) = Self::init_with_level(&level, source);
        log::debug!("🔧 Log level '{}' from {}", level, source);
    }
}

impl Log for JsonLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let log_entry = json!({
            "@timestamp": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            "@level": record.level().to_string().to_lowercase(),
            "@message": record.args().to_string(),
            "@module": record.target(),
            "@pid": std::process::id(),
            "@file": record.file().unwrap_or("unknown"),
            "@line": record.line().unwrap_or(0),
        });

        let json_string = format!(
            "{}\n",
            serde_json::to_string(&log_entry).unwrap_or_default()
        );

        if let Ok(mut file_guard) = self.target_file.lock() {
            if let Some(ref mut file) = *file_guard {
                let _ = file.write_all(json_string.as_bytes());
                let _ = file.flush();
                return;
            }
        }
        let _ = io::stderr().write_all(json_string.as_bytes());
        let _ = io::stderr().flush();
    }

    fn flush(&self) {
        if let Ok(mut file_guard) = self.target_file.lock() {
            if let Some(ref mut file) = *file_guard {
                let _ = file.flush();
            }
        }
        let _ = io::stderr().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_level() {
        assert_eq!(split_level("json:debug"), (true, "debug"));
        assert_eq!(split_level("json"), (true, "info"));
        assert_eq!(split_level("trace"), (false, "trace"));
    }

    #[test]
    fn test_parse_filter_defaults_to_warn() {
        assert_eq!(parse_filter("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_filter("off"), LevelFilter::Off);
        assert_eq!(parse_filter("loud"), LevelFilter::Warn);
    }

    #[test]
    fn test_json_logger_respects_level() {
        let logger = JsonLogger::new(Level::Info, None);
        let debug = Metadata::builder().level(Level::Debug).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&warn));
    }

    #[test]
    fn test_json_logger_writes_lines_to_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let log_path = temp_dir.path().join("wpkit.log");
        let logger = JsonLogger::new(Level::Info, Some(log_path.to_string_lossy().into_owned()));

        logger.log(
            &Record::builder()
                .args(format_args!("archive written"))
                .level(Level::Warn)
                .target("wpkit::archive")
                .build(),
        );
        logger.log(
            &Record::builder()
                .args(format_args!("filtered out"))
                .level(Level::Debug)
                .target("wpkit::archive")
                .build(),
        );
        logger.flush();

        let contents = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 1);

        let entry: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(entry["@level"], "warn");
        assert_eq!(entry["@message"], "archive written");
        assert_eq!(entry["@module"], "wpkit::archive");
        assert_eq!(entry["@pid"], std::process::id());
        assert!(entry["@timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
