use slog::{Drain, Level};
use slog_scope::GlobalLoggerGuard;
use slog_term::ThreadSafeTimestampFn;

/// Environment variable holding the minimum log level, e.g. `STICKCAR_LOG=debug`
pub const LOG_ENV_VAR: &str = "STICKCAR_LOG";

pub struct LoggerBuilder {
    level: Level,
}

/// Keeps the global logger installed until dropped
pub struct Logger(Level, GlobalLoggerGuard);

#[derive(Debug, thiserror::Error)]
pub enum LogError {
    #[error("Invalid level {0:?}")]
    BadLevel(String),
}

impl LoggerBuilder {
    pub fn with_env() -> Result<Self, LogError> {
        let mut builder = Self::default();

        if let Ok(env) = std::env::var(LOG_ENV_VAR) {
            builder = builder.level(parse_level(&env)?);
        }

        Ok(builder)
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn init(self, timestamp_fn: impl ThreadSafeTimestampFn) -> Result<Logger, LogError> {
        let decorator = slog_term::TermDecorator::new()
            .stderr()
            .force_color()
            .build();
        let drain = slog_term::CompactFormat::new(decorator)
            .use_custom_timestamp(timestamp_fn)
            .build()
            .fuse();
        let drain = drain.filter_level(self.level).fuse();

        #[cfg(feature = "binary")]
        let drain = slog_async::Async::new(drain)
            .thread_name("logging".to_owned())
            .chan_size(1024)
            .build_no_guard()
            .fuse();

        #[cfg(not(feature = "binary"))]
        let drain = std::sync::Mutex::new(drain).fuse();

        let logger = slog::Logger::root(drain, slog::o!());

        let global = slog_scope::set_global_logger(logger);
        Ok(Logger(self.level, global))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self { level: Level::Info }
    }
}

impl Logger {
    pub fn level(&self) -> Level {
        self.0
    }
}

fn parse_level(s: &str) -> Result<Level, LogError> {
    s.trim().parse().map_err(|_| LogError::BadLevel(s.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels() {
        assert_eq!(parse_level("debug").unwrap(), Level::Debug);
        assert_eq!(parse_level(" trace ").unwrap(), Level::Trace);
        assert!(matches!(parse_level("loud"), Err(LogError::BadLevel(s)) if s == "loud"));
    }

    #[test]
    fn installs_global_logger() {
        let logger = LoggerBuilder::default()
            .level(Level::Debug)
            .init(|out: &mut dyn std::io::Write| out.write_all(b"T0"))
            .expect("logger");
        assert_eq!(logger.level(), Level::Debug);

        // goes through the async or mutex drain, whichever is compiled in
        slog::info!(slog_scope::logger(), "logged"; "feature_binary" => cfg!(feature = "binary"));
        drop(logger);
    }
}
