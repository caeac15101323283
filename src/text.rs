//! Text values and text measurement.
//!
//! - [`rich`]: run-formatted strings ([`RichString`]) as stored in string
//!   properties and produced by the rich-text collector.
//! - [`measure`]: the [`TextMeasurer`] collaborator used by the width
//!   collectors, with a deterministic [`FixedWidthMeasurer`].
//! - [`parley_measurer`]: a [`TextMeasurer`] that shapes text with Parley
//!   (only with the `parley_layout` feature).

/// Run-formatted strings.
pub mod rich;
/// Text measurement collaborator.
pub mod measure;
/// Parley-backed text measurement.
#[cfg(feature = "parley_layout")]
pub mod parley_measurer;

pub use measure::{Extent, FixedWidthMeasurer, FontSpec, TextMeasurer};
#[cfg(feature = "parley_layout")]
pub use parley_measurer::ParleyMeasurer;
pub use rich::{RichString, RichStringBuilder, Run, TextFlags, TextProps};
