//! Configuration value types.

mod font;
mod logging;

pub use font::FontRange;
pub use logging::LogLevel;
