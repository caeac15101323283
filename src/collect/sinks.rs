//! Result strategies for the collection engine.
//!
//! Each sink overrides only the [`Sink`](crate::collect::Sink) hooks it
//! needs; everything else falls through to the defaults.
//!
//! # Available types
//!
//! - [`StringSink`]: concatenates all displayed text.
//! - [`MeasureSink`]: total width of the displayed text on one line.
//! - [`ColumnWidthSink`]: widest string in one column of a table.
//! - [`EmptinessSink`]: whether anything at all would be displayed.
//! - [`RichTextSink`]: the displayed text with its run formatting, one
//!   separator between paragraphs.

/// Plain text.
pub mod string;
/// Width of the whole display.
pub mod measure;
/// Width of a table column.
pub mod column;
/// Emptiness probe.
pub mod emptiness;
/// Formatted text.
pub mod rich_text;

pub use column::{ColumnWidth, ColumnWidthSink};
pub use emptiness::EmptinessSink;
pub use measure::MeasureSink;
pub use rich_text::RichTextSink;
pub use string::StringSink;
