use std::panic::Location;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::args::Arg;
use crate::level::Level;
use crate::parser::{attribute_indices, segment};

/// Call site a message was created from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: String,
    pub line: u32,
    /// Enclosing module or function path; empty when captured via `#[track_caller]`.
    pub function: String,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line,
            function: function.into(),
        }
    }

    /// Location of the caller. Functions annotated `#[track_caller]` between
    /// here and the user code are skipped, which replaces an explicit stack depth.
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    pub fn basename(&self) -> &str {
        self.file.rsplit(['/', '\\']).next().unwrap_or(&self.file)
    }
}

impl From<&Location<'_>> for SourceLocation {
    fn from(location: &Location<'_>) -> Self {
        Self::new(location.file(), location.line(), "")
    }
}

/// A parsed log message.
///
/// Built once per log call and immutable afterwards; it can be rendered any
/// number of times with different options.
#[derive(Debug, Clone)]
pub struct Message {
    pub(crate) tags: Vec<String>,
    pub(crate) level: Level,
    pub(crate) text: String,
    pub(crate) args: Vec<Arg>,
    pub(crate) attributes: Vec<usize>,
    pub(crate) created_at: DateTime<Local>,
    pub(crate) location: Option<SourceLocation>,
}

impl Message {
    /// Parse `text` with `args`, capturing the caller as the source location.
    #[track_caller]
    pub fn new(text: &str, args: Vec<Arg>) -> Self {
        Self::builder(text)
            .args(args)
            .location(SourceLocation::caller())
            .build()
    }

    pub fn builder(text: impl Into<String>) -> MessageBuilder {
        MessageBuilder {
            text: text.into(),
            args: Vec::new(),
            tags: Vec::new(),
            location: None,
            created_at: None,
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// Display template with placeholders still in place.
    pub fn template(&self) -> &str {
        &self.text
    }

    /// Caller arguments, plus the decoded embedded JSON object when present.
    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn attribute_indices(&self) -> &[usize] {
        &self.attributes
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn source_location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }
}

/// Collects the inputs of a parse before the immutable `Message` exists.
#[derive(Debug, Clone)]
pub struct MessageBuilder {
    text: String,
    args: Vec<Arg>,
    tags: Vec<String>,
    location: Option<SourceLocation>,
    created_at: Option<DateTime<Local>>,
}

impl MessageBuilder {
    pub fn args(mut self, args: Vec<Arg>) -> Self {
        self.args = args;
        self
    }

    pub fn arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Tags placed ahead of the ones parsed from the text. A colon-separated
    /// tag such as `a:b` contributes two tags.
    pub fn base_tag(mut self, tag: &str) -> Self {
        self.tags.extend(
            tag.split(':')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_lowercase),
        );
        self
    }

    pub fn location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn created_at(mut self, at: DateTime<Local>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn build(self) -> Message {
        let segments = segment(&self.text);

        let level = match segments.level {
            Some(level) => level,
            None if self.args.len() == 1 && self.args[0].is_error() => Level::ERROR,
            None => Level::INFO,
        };

        let mut args = self.args;
        if let Some(map) = segments.embedded {
            args.push(Arg::Map(map));
        }

        let mut tags = self.tags;
        tags.extend(segments.tags);

        let attributes = attribute_indices(&segments.text, &args);

        Message {
            tags,
            level,
            text: segments.text,
            args,
            attributes,
            created_at: self.created_at.unwrap_or_else(Local::now),
            location: self.location,
        }
    }
}

/// Build a [`Message`] capturing `file!()`, `line!()` and `module_path!()`.
///
/// ```
/// let m = message::message!("payments:wrn: low balance %d", 3);
/// assert_eq!(m.tags(), ["payments"]);
/// ```
#[macro_export]
macro_rules! message {
    ($text:expr $(, $arg:expr)* $(,)?) => {
        $crate::Message::builder($text)
            .args(vec![$($crate::Arg::from($arg)),*])
            .location($crate::SourceLocation::new(file!(), line!(), module_path!()))
            .build()
    };
}
