use crate::collect::engine::Sink;
use crate::collect::env::Boundary;
use crate::config::CollectConfig;
use crate::errors::Result;
use crate::text::{RichString, RichStringBuilder};
use crate::types::WritingSystem;

/// Collects the displayed text with its formatting.
///
/// Paragraphs are joined with a single separator character, inserted in
/// front of the first text of each later paragraph with the props of that
/// text. Empty paragraphs add nothing, so runs of them still produce one
/// separator.
#[derive(Clone, Debug)]
pub struct RichTextSink {
    builder: RichStringBuilder,
    separator: char,
    paragraphs: usize,
    separator_pending: bool,
}

impl RichTextSink {
    pub fn new(config: &CollectConfig) -> Self {
        Self {
            builder: RichStringBuilder::new(),
            separator: config.paragraph_separator,
            paragraphs: 0,
            separator_pending: false,
        }
    }

    pub fn result(&self) -> RichString {
        self.builder.snapshot()
    }

    pub fn into_result(self) -> RichString {
        self.builder.build()
    }
}

impl Default for RichTextSink {
    fn default() -> Self {
        Self::new(&CollectConfig::default())
    }
}

impl Sink for RichTextSink {
    fn add_text(&mut self, text: &str) -> Result<()> {
        self.add_text_ws(text, WritingSystem::DEFAULT)
    }

    fn add_text_ws(&mut self, text: &str, ws: WritingSystem) -> Result<()> {
        self.add_rich(&RichString::with_ws(text, ws))
    }

    fn add_rich(&mut self, text: &RichString) -> Result<()> {
        let Some(first) = text.runs().first() else {
            return Ok(());
        };
        if self.separator_pending {
            if !self.builder.is_empty() {
                let mut buf = [0; 4];
                self.builder.push_str(self.separator.encode_utf8(&mut buf), &first.props);
            }
            self.separator_pending = false;
        }
        self.builder.push_rich(text);
        Ok(())
    }

    fn open_boundary(&mut self, boundary: Boundary) -> Result<()> {
        if boundary == Boundary::Paragraph {
            self.paragraphs += 1;
            if self.paragraphs > 1 {
                self.separator_pending = true;
            }
        }
        Ok(())
    }
}
