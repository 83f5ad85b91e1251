use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use chrono::Local;

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub enum LogSink {
    Stdout,
    File(File),
}

impl LogSink {
    pub fn append_to(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(LogSink::File(file))
    }
}

pub struct Logger {
    prefix: Option<String>,
    sink: Mutex<LogSink>,
}

impl Logger {
    fn new(prefix: Option<String>, sink: LogSink) -> Self {
        Self {
            prefix,
            sink: Mutex::new(sink),
        }
    }

    fn format_line(&self, message: &str) -> String {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if let Some(ref prefix) = self.prefix {
            format!("[{}][{}] {}", timestamp, prefix, message)
        } else {
            format!("[{}] {}", timestamp, message)
        }
    }

    pub fn log(&self, message: &str) {
        let line = self.format_line(message);
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        match &mut *sink {
            LogSink::Stdout => println!("{}", line),
            LogSink::File(file) => {
                // Write errors are ignored.
                let _ = writeln!(file, "{}", line);
            }
        }
    }
}

pub fn init_logger(prefix: Option<String>, sink: LogSink) {
    LOGGER.get_or_init(|| Logger::new(prefix, sink));
}

/// Messages logged before `init_logger` are dropped, so the engine can be
/// embedded (and unit-tested) without any logging setup.
pub fn log(message: &str) {
    if let Some(logger) = LOGGER.get() {
        logger.log(message);
    }
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::log(&format!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_with_prefix() {
        let logger = Logger::new(Some("Snake".to_string()), LogSink::Stdout);
        let line = logger.format_line("hello");
        assert!(line.starts_with('['));
        assert!(line.ends_with("][Snake] hello"));
    }

    #[test]
    fn test_format_line_without_prefix() {
        let logger = Logger::new(None, LogSink::Stdout);
        let line = logger.format_line("hello");
        assert!(line.ends_with("] hello"));
        assert!(!line.contains("]["));
    }

    #[test]
    fn test_file_sink_appends_lines() {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_log_{}.log", random_number));

        let logger = Logger::new(None, LogSink::append_to(&path).unwrap());
        logger.log("first");
        logger.log("second");

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("first"));
        assert!(lines[1].ends_with("second"));

        let _ = std::fs::remove_file(&path);
    }
}
