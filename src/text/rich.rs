//! Run-formatted strings.
//!
//! A [`RichString`] is a sequence of [`Run`]s, each a piece of text with a
//! single set of [`TextProps`]. Strings read from string properties carry
//! their formatting this way, and the rich-text collector builds its result
//! with a [`RichStringBuilder`].

use crate::types::WritingSystem;
use bitflags::bitflags;

bitflags! {
    /// Character formatting toggles of a run.
    #[derive(Default)]
    pub struct TextFlags: u8 {
        const BOLD        = 0b0000_0001;
        const ITALIC      = 0b0000_0010;
        const UNDERLINE   = 0b0000_0100;
        const SUPERSCRIPT = 0b0000_1000;
        const SUBSCRIPT   = 0b0001_0000;
    }
}

/// Formatting of a single run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextProps {
    /// Writing system of the run
    pub ws: WritingSystem,
    /// Character formatting toggles
    pub flags: TextFlags,
    /// Explicit font size in pixels, if any
    pub font_size: Option<u32>,
    /// Named character style, if any
    pub style: Option<String>,
}

impl TextProps {
    pub fn with_ws(ws: WritingSystem) -> Self {
        Self { ws, ..Default::default() }
    }
}

/// A piece of text with uniform formatting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub props: TextProps,
}

impl Run {
    pub fn new(text: impl Into<String>, props: TextProps) -> Self {
        Self { text: text.into(), props }
    }
}

/// A string made of formatted runs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RichString {
    runs: Vec<Run>,
}

impl RichString {
    /// The empty string.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single run in the default writing system without formatting.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::with_props(text, TextProps::default())
    }

    /// A single unformatted run in writing system `ws`.
    pub fn with_ws(text: impl Into<String>, ws: WritingSystem) -> Self {
        Self::with_props(text, TextProps::with_ws(ws))
    }

    pub fn with_props(text: impl Into<String>, props: TextProps) -> Self {
        let mut b = RichStringBuilder::new();
        b.push_str(&text.into(), &props);
        b.build()
    }

    pub fn from_runs(runs: impl IntoIterator<Item = Run>) -> Self {
        let mut b = RichStringBuilder::new();
        for run in runs {
            b.push_run(run);
        }
        b.build()
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// The concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.runs.iter().map(|r| r.text.chars().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Writing system of the first run, which decides how the string is measured.
    pub fn leading_ws(&self) -> Option<WritingSystem> {
        self.runs.first().map(|r| r.props.ws)
    }
}

/// Incrementally builds a [`RichString`].
///
/// Empty runs are dropped and a run whose props equal the previous run's
/// props is merged into it, so the result is always in canonical form.
#[derive(Clone, Debug, Default)]
pub struct RichStringBuilder {
    runs: Vec<Run>,
}

impl RichStringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, text: &str, props: &TextProps) {
        if text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.props == *props => last.text.push_str(text),
            _ => self.runs.push(Run::new(text, props.clone())),
        }
    }

    pub fn push_run(&mut self, run: Run) {
        if run.text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.props == run.props => last.text.push_str(&run.text),
            _ => self.runs.push(run),
        }
    }

    pub fn push_rich(&mut self, s: &RichString) {
        for run in s.runs() {
            self.push_str(&run.text, &run.props);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Returns the string built so far without consuming the builder.
    pub fn snapshot(&self) -> RichString {
        RichString { runs: self.runs.clone() }
    }

    pub fn build(self) -> RichString {
        RichString { runs: self.runs }
    }
}
