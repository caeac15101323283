use crate::collect::engine::Sink;
use crate::errors::Result;

/// Appends every piece of displayed text to a buffer.
#[derive(Clone, Debug, Default)]
pub struct StringSink {
    buf: String,
}

impl StringSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn into_result(self) -> String {
        self.buf
    }
}

impl Sink for StringSink {
    fn add_text(&mut self, text: &str) -> Result<()> {
        self.buf.push_str(text);
        Ok(())
    }
}
