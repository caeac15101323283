//! Text measurement with Parley.
//!
//! [`ParleyMeasurer`] shapes the text exactly like the renderer does
//! (`FontContext` + `LayoutContext`, single unbounded line), so widths
//! collected from a display match what ends up on screen. Shaped widths are
//! cached per (text, font) because collectors tend to measure the same
//! labels over and over.

use crate::text::measure::{Extent, FontSpec, TextMeasurer};
use parley::style::{FontFamily, FontStack, StyleProperty};
use parley::{FontContext, LayoutContext};
use std::collections::HashMap;

/// Shaped extents kept before the cache is flushed.
const CACHE_LIMIT: usize = 4096;

/// Cache key for a measured string.
#[derive(Clone, PartialEq, Eq, Hash)]
struct MeasureKey {
    text: String,
    font: FontSpec,
}

/// [`TextMeasurer`] backed by Parley shaping.
pub struct ParleyMeasurer {
    font_cx: FontContext,
    layout_cx: LayoutContext<[u8; 4]>,
    font: FontSpec,
    line_height: u32,
    cache: HashMap<MeasureKey, Extent>,
}

impl ParleyMeasurer {
    /// Create a measurer using `font` until [`TextMeasurer::set_font`] is called.
    pub fn new(font: FontSpec) -> Self {
        let mut m = Self {
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
            font,
            line_height: 0,
            cache: HashMap::new(),
        };
        m.line_height = m.shape(" ").height;
        m
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Number of cached extents.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Shape `text` on one unbounded line and return its rounded-up extent.
    fn shape(&mut self, text: &str) -> Extent {
        let family = match self.font.family.as_deref() {
            Some(name) => FontFamily::Named(name.to_string().into()),
            None => FontFamily::Generic(fontique::GenericFamily::UiSansSerif),
        };

        let mut builder = self.layout_cx.ranged_builder(&mut self.font_cx, text, 1.0, true);
        builder.push_default(StyleProperty::FontSize(self.font.size_px as f32));
        builder.push_default(StyleProperty::FontStack(FontStack::Single(family)));
        let mut layout = builder.build(text);
        layout.break_all_lines(Some(f32::INFINITY));

        Extent {
            width: layout.width().ceil() as u32,
            height: layout.height().ceil() as u32,
        }
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn text_extent(&mut self, text: &str) -> anyhow::Result<Extent> {
        if text.is_empty() {
            return Ok(Extent { width: 0, height: self.line_height });
        }

        let key = MeasureKey { text: text.to_string(), font: self.font.clone() };
        if let Some(extent) = self.cache.get(&key) {
            return Ok(*extent);
        }

        let extent = self.shape(text);
        if self.cache.len() >= CACHE_LIMIT {
            log::debug!("ParleyMeasurer: flushing {} cached extents", self.cache.len());
            self.cache.clear();
        }
        self.cache.insert(key, extent);
        Ok(extent)
    }

    fn set_font(&mut self, font: &FontSpec) -> anyhow::Result<()> {
        if font.size_px == 0 {
            anyhow::bail!("cannot shape text with a 0px font");
        }
        if *font != self.font {
            log::debug!("ParleyMeasurer: switching font to {:?} {}px", font.family, font.size_px);
            self.font = font.clone();
            self.line_height = self.shape(" ").height;
        }
        Ok(())
    }

    fn line_height(&self) -> u32 {
        self.line_height
    }
}
