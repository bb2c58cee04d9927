/// Tag/level prefix segmentation and trailing JSON detection.
///
/// The prefix grammar is a heuristic, not a guarantee: a message such as
/// `payments:billing: Tim balance updated` has the prefix `payments:billing`,
/// while in `elo:err: failed:tricky string` the space after `err:` marks the
/// start of prose, so the later colon stays in the display text.

use serde_json::Value;

use crate::args::AttributeMap;
use crate::level::Level;

/// Paragraph-continuation marker. Text starting with it never carries a prefix.
pub const CONTINUATION_MARK: &str = "⇨";

/// Placeholder substituted for an embedded JSON literal.
pub const EMBEDDED_PLACEHOLDER: &str = "%v";

/// Fields extracted from the raw text of a single message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segments {
    /// Last explicit severity keyword found in the prefix, if any.
    pub level: Option<Level>,
    pub tags: Vec<String>,
    pub text: String,
    /// Decoded trailing JSON object, already replaced by `%v` in `text`.
    pub embedded: Option<AttributeMap>,
}

pub fn segment(raw: &str) -> Segments {
    let mut segments = Segments::default();
    let mut rest = raw;

    if let Some(boundary) = prefix_boundary(raw) {
        for part in raw[..boundary].split(':') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            match Level::from_keyword(part) {
                Some(level) => segments.level = Some(level),
                None => segments.tags.push(part.to_lowercase()),
            }
        }
        rest = &raw[boundary..];
        rest = rest.strip_prefix(':').unwrap_or(rest);
    }

    let mut text = rest.trim().to_string();
    if let Some(start) = json_start(&text) {
        match serde_json::from_str::<Value>(&text[start..]) {
            Ok(Value::Object(map)) => {
                text.truncate(start);
                text.push_str(EMBEDDED_PLACEHOLDER);
                segments.embedded = Some(map);
            }
            Ok(_) => {
                tracing::debug!("embedded JSON literal is not an object, kept as text");
            }
            Err(_) => {}
        }
    }

    segments.text = text;
    segments
}

/// Byte index where the tag/level prefix ends, or `None` if there is no prefix.
///
/// Starts from the last colon. If a space occurs before it, the boundary moves
/// to the last colon before the first space. A valid JSON literal starting
/// before the boundary pulls the boundary back to the literal.
pub fn prefix_boundary(text: &str) -> Option<usize> {
    if text.is_empty() || text.starts_with(CONTINUATION_MARK) || text.starts_with('\n') {
        return None;
    }

    let mut boundary = text.rfind(':');
    if let Some(colon) = boundary {
        if let Some(space) = text[..colon].find(' ') {
            boundary = text[..space].rfind(':');
        }
    }

    if let Some(start) = json_start(text) {
        let before_boundary = boundary.map_or(false, |b| b > start);
        if before_boundary && is_valid_json(&text[start..]) {
            boundary = Some(start);
        }
    }

    boundary.filter(|&b| b > 0)
}

/// Position of the first `{`, or of the first `[` when there is no brace.
pub fn json_start(text: &str) -> Option<usize> {
    text.find('{').or_else(|| text.find('['))
}

fn is_valid_json(candidate: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(candidate).is_ok()
}
