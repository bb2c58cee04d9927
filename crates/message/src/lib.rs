// Structured log message engine: parsing of free-form format strings into
// tags, level, text and attributes, and rendering to text or JSON.

// Core model
pub mod args;
pub mod level;
pub mod options;
pub mod message;

// Parsing and rendering
pub mod parser;
pub mod flatten;
pub mod render;
pub mod ansi;
pub mod error;

pub use args::{Arg, ArgKind, AttributeMap};
pub use error::{RenderError, RenderResult};
pub use flatten::{flatten, flatten_arg, flatten_map, render_pairs, DEFAULT_DELIMITER};
pub use level::Level;
pub use message::{Message, MessageBuilder, SourceLocation};
pub use options::Options;
pub use render::Properties;
