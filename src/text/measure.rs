use serde::Deserialize;

/// Size of a piece of measured text in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

/// Font selection used by measuring collaborators.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Font family name. `None` picks the platform's UI sans-serif font.
    pub family: Option<String>,
    /// Font size in pixels.
    pub size_px: u32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { family: None, size_px: 16 }
    }
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size_px: u32) -> Self {
        Self { family: Some(family.into()), size_px }
    }
}

/// Measures text the way the real layout would draw it.
///
/// Implementations are stateful: [`TextMeasurer::set_font`] changes the font
/// used by every following [`TextMeasurer::text_extent`] call.
pub trait TextMeasurer {
    /// Width and height of `text` in the current font.
    fn text_extent(&mut self, text: &str) -> anyhow::Result<Extent>;

    /// Switches the font used for subsequent measurements.
    fn set_font(&mut self, font: &FontSpec) -> anyhow::Result<()>;

    /// Height of one line in the current font.
    fn line_height(&self) -> u32;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &mut T {
    fn text_extent(&mut self, text: &str) -> anyhow::Result<Extent> {
        (**self).text_extent(text)
    }

    fn set_font(&mut self, font: &FontSpec) -> anyhow::Result<()> {
        (**self).set_font(font)
    }

    fn line_height(&self) -> u32 {
        (**self).line_height()
    }
}

/// Measurer where every character has the same advance.
///
/// Useful for hosts without a font stack (terminals) and for tests. The
/// font family is ignored; the font size only scales the line height when
/// [`FixedWidthMeasurer::scale_with_font`] is enabled.
#[derive(Clone, Debug)]
pub struct FixedWidthMeasurer {
    char_width: u32,
    line_height: u32,
    scale_with_font: bool,
    font: FontSpec,
    fonts_set: Vec<FontSpec>,
}

impl FixedWidthMeasurer {
    pub fn new(char_width: u32, line_height: u32) -> Self {
        Self {
            char_width,
            line_height,
            scale_with_font: false,
            font: FontSpec::default(),
            fonts_set: Vec::new(),
        }
    }

    /// Scales both advance and line height by `size_px / 16`.
    pub fn scale_with_font(mut self, on: bool) -> Self {
        self.scale_with_font = on;
        self
    }

    /// Current font.
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Every font passed to [`TextMeasurer::set_font`], in order.
    pub fn fonts_set(&self) -> &[FontSpec] {
        &self.fonts_set
    }

    fn scaled(&self, v: u32) -> u32 {
        if self.scale_with_font {
            v.saturating_mul(self.font.size_px) / 16
        } else {
            v
        }
    }
}

impl TextMeasurer for FixedWidthMeasurer {
    fn text_extent(&mut self, text: &str) -> anyhow::Result<Extent> {
        let chars = text.chars().count() as u32;
        Ok(Extent {
            width: chars.saturating_mul(self.scaled(self.char_width)),
            height: self.line_height(),
        })
    }

    fn set_font(&mut self, font: &FontSpec) -> anyhow::Result<()> {
        if font.size_px == 0 {
            anyhow::bail!("cannot measure with a 0px font");
        }
        self.font = font.clone();
        self.fonts_set.push(font.clone());
        Ok(())
    }

    fn line_height(&self) -> u32 {
        self.scaled(self.line_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_width_counts_chars_not_bytes() {
        let mut m = FixedWidthMeasurer::new(10, 20);
        assert_eq!(m.text_extent("abcd").unwrap(), Extent { width: 40, height: 20 });
        assert_eq!(m.text_extent("äöü").unwrap().width, 30);
        assert_eq!(m.text_extent("").unwrap().width, 0);
    }

    #[test]
    fn scaling_follows_font_size() {
        let mut m = FixedWidthMeasurer::new(10, 20).scale_with_font(true);
        m.set_font(&FontSpec { family: None, size_px: 32 }).unwrap();
        assert_eq!(m.text_extent("ab").unwrap(), Extent { width: 40, height: 40 });
        assert_eq!(m.fonts_set().len(), 1);
    }

    #[test]
    fn zero_sized_font_is_rejected() {
        let mut m = FixedWidthMeasurer::new(10, 20);
        assert!(m.set_font(&FontSpec { family: None, size_px: 0 }).is_err());
    }

    #[test]
    fn measurer_works_through_mutable_reference() {
        fn width_of<M: TextMeasurer>(mut m: M, s: &str) -> u32 {
            m.text_extent(s).unwrap().width
        }
        let mut m = FixedWidthMeasurer::new(7, 20);
        assert_eq!(width_of(&mut m, "abc"), 21);
    }
}
