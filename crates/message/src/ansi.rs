/// ANSI SGR wrapping for the colored render paths.
///
/// Every colored segment is emitted as `ESC[<code>m<text>ESC[0m`, so a
/// terminal that ignores SGR still shows the plain text in order.

pub const RESET: &str = "\x1b[0m";

pub const ERROR: &str = "31;1";
pub const WARNING: &str = "33;1";
pub const INFO: &str = "32;1";
pub const DEBUG: &str = "36;1";
pub const UNKNOWN: &str = "39;1";

pub const TAGS: &str = "34;1";
pub const LOCATION: &str = "35;1";

pub const PROPERTY_KEY: &str = "90;1";
pub const PROPERTY_VALUE: &str = "37;3";

/// Wrap `text` in the SGR sequence `code`.
pub fn paint(code: &str, text: &str) -> String {
    format!("\x1b[{}m{}{}", code, text, RESET)
}
