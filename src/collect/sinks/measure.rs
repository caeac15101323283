use crate::collect::engine::Sink;
use crate::errors::Result;
use crate::text::{Extent, TextMeasurer};

/// Adds up the width of all displayed text as if it were laid out on a
/// single line.
pub struct MeasureSink<M: TextMeasurer> {
    measurer: M,
    width: u32,
}

impl<M: TextMeasurer> MeasureSink<M> {
    /// Measures with whatever font `measurer` currently has selected.
    pub fn new(measurer: M) -> Self {
        Self { measurer, width: 0 }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// The line height of the measurer; the display is one line.
    pub fn height(&self) -> u32 {
        self.measurer.line_height()
    }

    pub fn extent(&self) -> Extent {
        Extent {
            width: self.width,
            height: self.height(),
        }
    }

    pub fn into_measurer(self) -> M {
        self.measurer
    }
}

impl<M: TextMeasurer> Sink for MeasureSink<M> {
    fn add_text(&mut self, text: &str) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.width = self.width.saturating_add(self.measurer.text_extent(text)?.width);
        Ok(())
    }
}
