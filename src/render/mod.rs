// Rendering module.
// Turns public events into the HTML list embedded in pages.

pub mod feed;
pub mod format;
pub mod messages;

pub use feed::render;
pub use format::{EventFormatter, escape_html};
pub use messages::Messages;
