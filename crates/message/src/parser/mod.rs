/// Message text parsing
///
/// Turns a free-form format string into the fields of a `Message` without an
/// explicit schema.
///
/// # Architecture
///
/// - `segment.rs`: tag/level prefix and trailing JSON detection
/// - `placeholder.rs`: which argument positions are structured attributes
/// - `printf.rs`: directive scanning and scalar verb formatting
///
/// None of these steps can fail: ambiguous prefixes fall into the display
/// text and undecodable JSON stays literal.

pub mod segment;
pub mod placeholder;
pub mod printf;

pub use segment::{segment, Segments};
pub use placeholder::attribute_indices;
