use crate::collect::engine::Sink;
use crate::errors::Result;
use crate::text::RichString;

/// Finds out whether a display shows any text at all, stopping the
/// traversal at the first piece it finds.
///
/// Literal text added by the view constructor itself does not count:
/// labels and punctuation around empty properties are not content.
/// Whitespace does count, and so do placeholders.
#[derive(Clone, Debug, Default)]
pub struct EmptinessSink {
    found: bool,
    note_empty: bool,
}

impl EmptinessSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report empty object, vector and string properties as dependencies so
    /// the host can re-run the probe once they gain content.
    pub fn with_empty_dependencies(mut self, on: bool) -> Self {
        self.note_empty = on;
        self
    }

    /// True when something would be displayed.
    pub fn result(&self) -> bool {
        self.found
    }
}

impl Sink for EmptinessSink {
    fn add_text(&mut self, text: &str) -> Result<()> {
        if !self.found && !text.is_empty() {
            log::debug!("display is not empty");
            self.found = true;
        }
        Ok(())
    }

    fn add_literal(&mut self, _text: &RichString) -> Result<()> {
        Ok(())
    }

    fn finished(&self) -> bool {
        self.found
    }

    fn notes_empty_dependencies(&self) -> bool {
        self.note_empty
    }
}
