/// Rendering of a parsed `Message` into text, colored text, flat
/// `key=value` text, or JSON.

use std::fmt::{self, Write};

use bytes::Bytes;
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::ansi;
use crate::args::Arg;
use crate::error::RenderResult;
use crate::flatten::{self, DEFAULT_DELIMITER};
use crate::message::Message;
use crate::options::Options;
use crate::parser::printf::{format_arg, pieces, Piece};

const DATE_FORMAT: &str = "%Y/%m/%d";
const TIME_FORMAT: &str = "%H:%M:%S%.6f";

/// Fixed property set used by the JSON and flat-text renderings.
///
/// Fields are declared in lexicographic order so JSON keys come out sorted.
#[derive(Debug, Clone, Serialize)]
pub struct Properties {
    pub attr: Vec<Arg>,
    pub date: DateTime<Local>,
    pub file: String,
    pub func: String,
    pub level: String,
    pub line: u32,
    pub tag: String,
    pub tags: Vec<String>,
    pub text: String,
}

impl Message {
    /// Render according to `options`. With `Options::JSON` every other bit is
    /// ignored and the property set is returned as JSON.
    pub fn render(&self, options: Options) -> RenderResult<Bytes> {
        self.render_with_delimiter(options, DEFAULT_DELIMITER)
    }

    /// Like [`Message::render`], joining nested attribute paths with `delimiter`.
    pub fn render_with_delimiter(&self, options: Options, delimiter: &str) -> RenderResult<Bytes> {
        if options.contains(Options::JSON) {
            return self.to_json();
        }
        Ok(Bytes::from(self.render_text_with(options, delimiter)))
    }

    /// Non-JSON rendering: `[date] [time] [level] [tags] text [location]`.
    pub fn render_text(&self, options: Options) -> String {
        self.render_text_with(options, DEFAULT_DELIMITER)
    }

    fn render_text_with(&self, options: Options, delimiter: &str) -> String {
        let colors = options.contains(Options::COLORS);
        let mut out = String::new();

        if options.contains(Options::DATE) {
            let _ = write!(out, "{} ", self.created_at.format(DATE_FORMAT));
        }
        if options.contains(Options::TIME) {
            let _ = write!(out, "{} ", self.created_at.format(TIME_FORMAT));
        }
        if options.contains(Options::LEVELS) {
            let _ = write!(out, "[{}] ", self.level.render(true, colors));
        }
        if options.contains(Options::TAGS) {
            let tag = self.tag(colors);
            if !tag.is_empty() {
                let _ = write!(out, "[{}] ", tag);
            }
        }

        out.push_str(&self.text_with(colors, options.contains(Options::PROPERTIES), delimiter));

        if options.contains(Options::TRACE) {
            if let Some(location) = self.location(colors) {
                let _ = write!(out, " {}", location);
            }
        }

        out.trim().to_string()
    }

    /// Display text with placeholders substituted.
    ///
    /// Attribute positions expand to their flattened properties when
    /// `properties` is set and to nothing otherwise.
    pub fn text(&self, colors: bool, properties: bool) -> String {
        self.text_with(colors, properties, DEFAULT_DELIMITER)
    }

    fn text_with(&self, colors: bool, properties: bool, delimiter: &str) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut position = 0;

        for piece in pieces(&self.text) {
            match piece {
                Piece::Literal(s) => out.push_str(s),
                Piece::Percent => out.push('%'),
                Piece::Directive(directive) => {
                    if let Some(arg) = self.args.get(position) {
                        if self.attributes.contains(&position) {
                            if properties {
                                let pairs = flatten::flatten_arg(arg, "", delimiter);
                                out.push_str(&flatten::render_pairs(&pairs, colors));
                            }
                        } else {
                            out.push_str(&format_arg(&directive, arg));
                        }
                    }
                    position += 1;
                }
            }
        }

        out.replace("  ", " ")
    }

    /// Colon-joined tag path.
    pub fn tag(&self, colors: bool) -> String {
        let tag = self.tags.join(":");
        if colors && !tag.is_empty() {
            ansi::paint(ansi::TAGS, &tag)
        } else {
            tag
        }
    }

    /// `basename:line` of the captured call site.
    pub fn location(&self, colors: bool) -> Option<String> {
        let location = self.location.as_ref()?;
        let rendered = format!("{}:{}", location.basename(), location.line);
        if colors {
            Some(ansi::paint(ansi::LOCATION, &rendered))
        } else {
            Some(rendered)
        }
    }

    /// The structured attribute arguments, in placeholder order.
    pub fn attributes(&self) -> Vec<&Arg> {
        self.attributes
            .iter()
            .filter_map(|&i| self.args.get(i))
            .collect()
    }

    pub fn properties(&self) -> Properties {
        let (file, func, line) = match &self.location {
            Some(l) => (l.file.clone(), l.function.clone(), l.line),
            None => (String::new(), String::new(), 0),
        };

        Properties {
            attr: self.attributes().into_iter().cloned().collect(),
            date: self.created_at,
            file,
            func,
            level: self.level.as_str().to_string(),
            line,
            tag: self.tags.iter().map(|t| title_case(t)).collect(),
            tags: self.tags.clone(),
            text: self.text(false, true),
        }
    }

    pub fn to_json(&self) -> RenderResult<Bytes> {
        let encoded = serde_json::to_vec(&self.properties())?;
        Ok(Bytes::from(encoded))
    }

    /// The property set flattened into uncolored `key=value` text.
    pub fn to_flat_text(&self) -> String {
        match serde_json::to_value(self.properties()) {
            Ok(value) => flatten::render_pairs(&flatten::flatten(&value, "", DEFAULT_DELIMITER), false),
            Err(e) => {
                tracing::debug!("property set could not be flattened: {}", e);
                String::new()
            }
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_text(
            Options::DATE | Options::TIME | Options::TAGS | Options::LEVELS | Options::PROPERTIES,
        ))
    }
}

/// Upper-case the first letter of every word.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}
