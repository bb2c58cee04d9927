use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use message::{Arg, Level, Message, Options, SourceLocation, DEFAULT_DELIMITER};
use parking_lot::Mutex;

use crate::conf::LoggerConfig;
use crate::error::{ConfigResult, LoggerResult};
use crate::handler::Handler;

type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Writes rendered messages to a shared sink and fans them out to handlers.
///
/// Builder methods return a new `Logger` that shares the sink, so a tagged
/// child logger and its parent write to the same place.
#[derive(Clone)]
pub struct Logger {
    sink: Sink,
    tag: String,
    options: Options,
    delimiter: String,
    verbose: bool,
    handlers: Vec<Arc<dyn Handler>>,
}

impl Logger {
    pub fn new<W>(writer: W, options: Options) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
            tag: String::new(),
            options,
            delimiter: DEFAULT_DELIMITER.to_string(),
            verbose: true,
            handlers: Vec::new(),
        }
    }

    pub fn stdout(options: Options) -> Self {
        Self::new(io::stdout(), options)
    }

    pub fn from_config<W>(writer: W, config: &LoggerConfig) -> ConfigResult<Self>
    where
        W: Write + Send + 'static,
    {
        let options = config.check()?;

        let mut logger = Self::new(writer, options).verbose(config.verbose);
        logger.delimiter = config.delimiter.clone();
        Ok(logger.tag(&config.tag))
    }

    /// Base tag placed ahead of each message's own tags. Replaces any previous base tag.
    pub fn tag(&self, name: &str) -> Self {
        Self {
            tag: name.to_string(),
            ..self.clone()
        }
    }

    pub fn options(&self, options: Options) -> Self {
        Self {
            options,
            ..self.clone()
        }
    }

    pub fn verbose(&self, verbose: bool) -> Self {
        Self {
            verbose,
            ..self.clone()
        }
    }

    pub fn handlers(&self, handlers: Vec<Arc<dyn Handler>>) -> Self {
        Self {
            handlers,
            ..self.clone()
        }
    }

    /// Same settings, different sink.
    pub fn writer<W>(&self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            sink: Arc::new(Mutex::new(Box::new(writer))),
            ..self.clone()
        }
    }

    /// Parse `format` with `args` and log it, recording the caller as location.
    #[track_caller]
    pub fn printf(&self, format: &str, args: Vec<Arg>) -> LoggerResult<()> {
        let message = Message::builder(format)
            .base_tag(&self.tag)
            .args(args)
            .location(SourceLocation::caller())
            .build();
        self.log(&message)
    }

    /// Write `message` followed by a newline, then pass it to every handler.
    ///
    /// DEBUG messages are dropped entirely when the logger is not verbose. A
    /// failed write is reported but still reaches the handlers.
    pub fn log(&self, message: &Message) -> LoggerResult<()> {
        if !self.verbose && message.level() == Level::DEBUG {
            return Ok(());
        }

        let written = self.write_line(message);
        if let Err(e) = &written {
            tracing::warn!("log write failed: {}", e);
        }

        for handler in &self.handlers {
            handler.handle(message);
        }
        written
    }

    fn write_line(&self, message: &Message) -> LoggerResult<()> {
        let rendered = message.render_with_delimiter(self.options, &self.delimiter)?;
        let mut sink = self.sink.lock();
        sink.write_all(&rendered)?;
        sink.write_all(b"\n")?;
        sink.flush()?;
        Ok(())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("tag", &self.tag)
            .field("options", &self.options)
            .field("delimiter", &self.delimiter)
            .field("verbose", &self.verbose)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

/// Each buffer becomes the text of one message, so a `Logger` can stand in
/// wherever an `io::Write` is expected.
impl Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let message = Message::builder(text.trim_end_matches('\n'))
            .base_tag(&self.tag)
            .build();
        self.log(&message).map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.lock().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::LevelFilter;
    use serde_json::Value;

    /// In-memory sink readable after the logger took ownership of a clone.
    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }

        fn reset(&self) {
            self.0.lock().clear();
        }
    }

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&Message) + Send + Sync + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |m: &Message| sink.lock().push(m.template().to_string()))
    }

    fn recording() -> (Arc<Mutex<Vec<String>>>, Arc<dyn Handler>) {
        let (seen, handler) = recorder();
        (seen, Arc::new(handler))
    }

    // ── Writing ──────────────────────────────────────────────────

    #[test]
    fn test_tagged_colored_line() {
        let buffer = Buffer::default();
        let log = Logger::new(buffer.clone(), Options::LEVELS | Options::TAGS | Options::COLORS).tag("log");

        log.printf("new:err: system %s", vec![Arg::from("failure")]).unwrap();

        assert_eq!(
            buffer.contents(),
            "[\x1b[31;1mERR\x1b[0m] [\x1b[34;1mlog:new\x1b[0m] system failure\n"
        );
    }

    #[test]
    fn test_trace_points_at_caller() {
        let buffer = Buffer::default();
        let log = Logger::new(buffer.clone(), Options::LEVELS | Options::TAGS | Options::TRACE).tag("log");

        let line = line!() + 1;
        log.printf("foo test", vec![]).unwrap();
        assert_eq!(buffer.contents(), format!("[INF] [log] foo test logger.rs:{}\n", line));

        buffer.reset();
        let line = line!() + 1;
        log.tag("test").printf("err: oh no", vec![]).unwrap();
        assert_eq!(buffer.contents(), format!("[ERR] [test] oh no logger.rs:{}\n", line));
    }

    #[test]
    fn test_children_share_the_sink() {
        let buffer = Buffer::default();
        let parent = Logger::new(buffer.clone(), Options::TAGS);
        let child = parent.tag("child");

        parent.printf("one", vec![]).unwrap();
        child.printf("two", vec![]).unwrap();

        assert_eq!(buffer.contents(), "one\n[child] two\n");
    }

    #[test]
    fn test_writer_replaces_sink() {
        let first = Buffer::default();
        let second = Buffer::default();
        let log = Logger::new(first.clone(), Options::empty());

        log.writer(second.clone()).printf("moved", vec![]).unwrap();

        assert_eq!(first.contents(), "");
        assert_eq!(second.contents(), "moved\n");
    }

    #[test]
    fn test_json_line() {
        let buffer = Buffer::default();
        let log = Logger::new(buffer.clone(), Options::JSON).tag("api");

        log.printf(r#"wrn: slow {"ms":1200}"#, vec![]).unwrap();

        let line = buffer.contents();
        assert!(line.ends_with('\n'));
        let value: Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(value["level"], "WARNING");
        assert_eq!(value["tag"], "Api");
        assert_eq!(value["text"], "slow ms=1200");
    }

    // ── Verbosity ────────────────────────────────────────────────

    #[test]
    fn test_quiet_logger_drops_debug() {
        let buffer = Buffer::default();
        let (seen, handler) = recording();
        let log = Logger::new(buffer.clone(), Options::LEVELS)
            .verbose(false)
            .handlers(vec![handler]);

        log.printf("dbg: noisy", vec![]).unwrap();
        log.printf("inf: kept", vec![]).unwrap();

        assert_eq!(buffer.contents(), "[INF] kept\n");
        assert_eq!(*seen.lock(), vec!["kept".to_string()]);
    }

    #[test]
    fn test_verbose_logger_keeps_debug() {
        let buffer = Buffer::default();
        let log = Logger::new(buffer.clone(), Options::LEVELS);
        log.printf("dbg: noisy", vec![]).unwrap();
        assert_eq!(buffer.contents(), "[DBG] noisy\n");
    }

    // ── Handlers ─────────────────────────────────────────────────

    #[test]
    fn test_handlers_receive_messages_in_order() {
        let (seen, handler) = recording();
        let (errors, error_handler) = recorder();
        let log = Logger::new(Buffer::default(), Options::empty()).handlers(vec![
            handler,
            Arc::new(LevelFilter::new(Level::ERROR, error_handler)),
        ]);

        log.printf("first", vec![]).unwrap();
        log.printf("err: second", vec![]).unwrap();

        assert_eq!(*seen.lock(), vec!["first".to_string(), "second".to_string()]);
        assert_eq!(*errors.lock(), vec!["second".to_string()]);
    }

    #[test]
    fn test_write_failure_still_reaches_handlers() {
        let (seen, handler) = recording();
        let log = Logger::new(FailingWriter, Options::LEVELS).handlers(vec![handler]);

        let result = log.printf("err: disk full", vec![]);

        assert!(matches!(result, Err(crate::error::LoggerError::Io(_))));
        assert_eq!(*seen.lock(), vec!["disk full".to_string()]);
    }

    // ── io::Write ────────────────────────────────────────────────

    #[test]
    fn test_io_write_logs_each_buffer() {
        let buffer = Buffer::default();
        let mut log = Logger::new(buffer.clone(), Options::LEVELS | Options::TAGS).tag("std");

        log.write_all(b"wrn: from a writer\n").unwrap();

        assert_eq!(buffer.contents(), "[WRN] [std] from a writer\n");
    }

    // ── Configuration ────────────────────────────────────────────

    #[test]
    fn test_from_config() {
        let buffer = Buffer::default();
        let config = LoggerConfig {
            options: vec!["levels".into(), "tags".into(), "properties".into()],
            tag: "svc".into(),
            verbose: false,
            delimiter: "/".into(),
        };
        let log = Logger::from_config(buffer.clone(), &config).unwrap();

        log.printf("dbg: hidden", vec![]).unwrap();
        log.printf("state %v", vec![Arg::from(serde_json::json!({"a": {"b": 1}}))]).unwrap();

        assert_eq!(buffer.contents(), "[INF] [svc] state a/b=1\n");
    }

    #[test]
    fn test_from_config_rejects_unknown_option() {
        let config = LoggerConfig {
            options: vec!["nope".into()],
            ..LoggerConfig::default()
        };
        assert!(Logger::from_config(Buffer::default(), &config).is_err());
    }
}
