//! Display collection.
//!
//! A collection pass walks exactly the display a view constructor would
//! build on screen, but instead of laying it out it collects one piece of
//! information about it: the text, its width, the width of a table column,
//! whether it shows anything, or its formatted text.
//!
//! # Available types
//!
//! - [`CollectionEngine`]: implements the display protocol
//!   ([`DisplayEnv`]) on top of a [`TraversalContext`].
//! - [`Sink`]: what the engine does with the content it meets. See
//!   [`sinks`] for the provided ones.
//! - [`DisplayEnv`], [`OuterEnv`], [`ViewConstructor`]: the display
//!   protocol itself.
//!
//! The free functions below run a single pass with one of the provided
//! sinks.

/// Stack of open objects and occurrence bookkeeping.
pub mod context;
/// The collection engine and the sink hooks.
pub mod engine;
/// The display protocol.
pub mod env;
/// One level of the traversal stack.
pub mod frame;
/// Per-level property occurrence counts.
pub mod occurrence;
/// Result strategies.
pub mod sinks;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{OuterObject, SelectionLevel, TraversalContext};
pub use engine::{CollectionEngine, Sink};
pub use env::{Boundary, DisplayEnv, OuterEnv, Placeholder, ViewConstructor};
pub use frame::ContextFrame;
pub use occurrence::PropertyOccurrenceCounter;
pub use sinks::{ColumnWidth, ColumnWidthSink, EmptinessSink, MeasureSink, RichTextSink, StringSink};

use crate::config::CollectConfig;
use crate::data::DataProvider;
use crate::errors::Result;
use crate::text::{Extent, RichString, TextMeasurer};
use crate::types::{FragmentCode, ObjectId};

/// The plain text of the display of `root`.
pub fn collect_string(
    data: &dyn DataProvider,
    root: ObjectId,
    vc: &dyn ViewConstructor,
    frag: FragmentCode,
) -> Result<String> {
    let mut engine = CollectionEngine::new(None, data, root, StringSink::new());
    engine.display(vc, frag)?;
    Ok(engine.into_sink().into_result())
}

/// Width and line height of the display of `root` laid out on one line.
pub fn measure_width<M: TextMeasurer>(
    data: &dyn DataProvider,
    root: ObjectId,
    vc: &dyn ViewConstructor,
    frag: FragmentCode,
    measurer: M,
) -> Result<Extent> {
    let mut engine = CollectionEngine::new(None, data, root, MeasureSink::new(measurer));
    engine.display(vc, frag)?;
    Ok(engine.sink().extent())
}

/// Widest string in table column `column` of the display of `root`.
pub fn max_column_width<M: TextMeasurer>(
    data: &dyn DataProvider,
    root: ObjectId,
    vc: &dyn ViewConstructor,
    frag: FragmentCode,
    measurer: M,
    column: usize,
    config: &CollectConfig,
) -> Result<ColumnWidth> {
    let sink = ColumnWidthSink::new(measurer, column, config);
    let mut engine = CollectionEngine::new(None, data, root, sink);
    engine.display(vc, frag)?;
    Ok(engine.sink().result())
}

/// Whether the display of `root` (or of `upstream`'s open object) shows
/// anything.
///
/// With [`CollectConfig::note_empty_dependencies`] set, empty properties met
/// on the way are reported to `upstream`.
pub fn is_displayed(
    upstream: Option<&dyn OuterEnv>,
    data: &dyn DataProvider,
    root: ObjectId,
    vc: &dyn ViewConstructor,
    frag: FragmentCode,
    config: &CollectConfig,
) -> Result<bool> {
    let sink = EmptinessSink::new().with_empty_dependencies(config.note_empty_dependencies);
    let mut engine = CollectionEngine::new(upstream, data, root, sink);
    engine.display(vc, frag)?;
    Ok(engine.sink().result())
}

/// The formatted text of the display of `root`, paragraphs joined by
/// [`CollectConfig::paragraph_separator`].
pub fn collect_rich(
    data: &dyn DataProvider,
    root: ObjectId,
    vc: &dyn ViewConstructor,
    frag: FragmentCode,
    config: &CollectConfig,
) -> Result<RichString> {
    let mut engine = CollectionEngine::new(None, data, root, RichTextSink::new(config));
    engine.display(vc, frag)?;
    Ok(engine.into_sink().into_result())
}
