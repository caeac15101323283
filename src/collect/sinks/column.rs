use crate::collect::engine::Sink;
use crate::collect::env::Boundary;
use crate::config::CollectConfig;
use crate::errors::Result;
use crate::text::TextMeasurer;
use crate::types::WritingSystem;

/// Widest string found in a table column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnWidth {
    pub width: u32,
    /// Row that held the widest string, counted from 0 within its table with
    /// header rows included. `None` when the column had no text.
    pub row: Option<usize>,
}

/// Measures every string displayed in one column of a table and keeps the
/// widest.
///
/// A "string" is the text of one paragraph, or of a whole cell when the cell
/// has no paragraphs. Only cells that start in the target column and span
/// exactly one column count. Text is measured with the font configured for
/// its writing system.
pub struct ColumnWidthSink<M: TextMeasurer> {
    measurer: M,
    config: CollectConfig,
    target_column: usize,

    rows_seen: usize,
    current_row: usize,
    next_column: usize,
    current_column: Option<usize>,
    col_span: usize,
    font_ws: Option<WritingSystem>,

    width: u32,
    widest: ColumnWidth,
}

impl<M: TextMeasurer> ColumnWidthSink<M> {
    pub fn new(measurer: M, target_column: usize, config: &CollectConfig) -> Self {
        Self {
            measurer,
            config: config.clone(),
            target_column,
            rows_seen: 0,
            current_row: 0,
            next_column: 0,
            current_column: None,
            col_span: 1,
            font_ws: None,
            width: 0,
            widest: ColumnWidth::default(),
        }
    }

    pub fn result(&self) -> ColumnWidth {
        self.widest
    }

    fn counting(&self) -> bool {
        self.current_column == Some(self.target_column) && self.col_span == 1
    }

    fn flush(&mut self) {
        if self.width > self.widest.width {
            log::trace!("column {} row {}: new widest {}", self.target_column, self.current_row, self.width);
            self.widest = ColumnWidth {
                width: self.width,
                row: Some(self.current_row),
            };
        }
        self.width = 0;
    }

    fn select_font(&mut self, ws: WritingSystem) -> Result<()> {
        if self.font_ws != Some(ws) {
            self.measurer.set_font(self.config.font_for(ws))?;
            self.font_ws = Some(ws);
        }
        Ok(())
    }
}

impl<M: TextMeasurer> Sink for ColumnWidthSink<M> {
    fn add_text(&mut self, text: &str) -> Result<()> {
        self.add_text_ws(text, WritingSystem::DEFAULT)
    }

    fn add_text_ws(&mut self, text: &str, ws: WritingSystem) -> Result<()> {
        if text.is_empty() || !self.counting() {
            return Ok(());
        }
        self.select_font(ws)?;
        self.width = self.width.saturating_add(self.measurer.text_extent(text)?.width);
        Ok(())
    }

    fn open_boundary(&mut self, boundary: Boundary) -> Result<()> {
        match boundary {
            Boundary::Table => self.rows_seen = 0,
            Boundary::TableRow => {
                self.current_row = self.rows_seen;
                self.rows_seen += 1;
                self.next_column = 0;
                self.current_column = None;
                self.width = 0;
            }
            Boundary::TableCell { cols, .. } | Boundary::TableHeaderCell { cols, .. } => {
                self.current_column = Some(self.next_column);
                self.col_span = cols;
                self.next_column += cols;
                self.width = 0;
            }
            Boundary::Paragraph => self.width = 0,
            _ => {}
        }
        Ok(())
    }

    fn close_boundary(&mut self, boundary: Boundary) -> Result<()> {
        match boundary {
            Boundary::Paragraph => self.flush(),
            Boundary::TableCell { .. } | Boundary::TableHeaderCell { .. } => {
                self.flush();
                self.current_column = None;
            }
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{FixedWidthMeasurer, FontSpec};

    fn row(sink: &mut ColumnWidthSink<&mut FixedWidthMeasurer>, cells: &[(&str, usize)]) {
        sink.open_boundary(Boundary::TableRow).unwrap();
        for (text, cols) in cells {
            let cell = Boundary::TableCell { rows: 1, cols: *cols };
            sink.open_boundary(cell).unwrap();
            sink.add_text(text).unwrap();
            sink.close_boundary(cell).unwrap();
        }
        sink.close_boundary(Boundary::TableRow).unwrap();
    }

    #[test]
    fn widest_cell_and_its_row_are_remembered() {
        let mut m = FixedWidthMeasurer::new(10, 16);
        let mut sink = ColumnWidthSink::new(&mut m, 0, &CollectConfig::default());
        row(&mut sink, &[("four", 1)]);
        row(&mut sink, &[("seven..", 1)]);
        row(&mut sink, &[("five.", 1)]);

        assert_eq!(sink.result(), ColumnWidth { width: 70, row: Some(1) });
    }

    #[test]
    fn only_single_span_cells_of_the_target_column_count() {
        let mut m = FixedWidthMeasurer::new(10, 16);
        let mut sink = ColumnWidthSink::new(&mut m, 1, &CollectConfig::default());
        row(&mut sink, &[("a", 1), ("bb", 1), ("cccccccc", 1)]);
        row(&mut sink, &[("dddddddddd", 2), ("e", 1)]);
        row(&mut sink, &[("f", 1), ("ggg", 1)]);

        assert_eq!(sink.result(), ColumnWidth { width: 30, row: Some(2) });
    }

    #[test]
    fn rows_are_numbered_per_table() {
        let mut m = FixedWidthMeasurer::new(10, 16);
        let mut sink = ColumnWidthSink::new(&mut m, 0, &CollectConfig::default());
        sink.open_boundary(Boundary::Table).unwrap();
        row(&mut sink, &[("ab", 1)]);
        row(&mut sink, &[("abc", 1)]);
        sink.close_boundary(Boundary::Table).unwrap();

        sink.open_boundary(Boundary::Table).unwrap();
        row(&mut sink, &[("a", 1)]);
        row(&mut sink, &[("abcdef", 1)]);
        sink.close_boundary(Boundary::Table).unwrap();

        assert_eq!(sink.result(), ColumnWidth { width: 60, row: Some(1) });
    }

    #[test]
    fn huge_widths_saturate() {
        let mut m = FixedWidthMeasurer::new(u32::MAX / 2, 16);
        let mut sink = ColumnWidthSink::new(&mut m, 0, &CollectConfig::default());
        row(&mut sink, &[("abc", 1)]);

        assert_eq!(sink.result().width, u32::MAX);
    }

    #[test]
    fn paragraphs_are_measured_separately() {
        let mut m = FixedWidthMeasurer::new(10, 16);
        let mut sink = ColumnWidthSink::new(&mut m, 0, &CollectConfig::default());
        sink.open_boundary(Boundary::TableRow).unwrap();
        sink.open_boundary(Boundary::cell()).unwrap();
        for text in ["abc", "abcdef", "ab"] {
            sink.open_boundary(Boundary::Paragraph).unwrap();
            sink.add_text(text).unwrap();
            sink.close_boundary(Boundary::Paragraph).unwrap();
        }
        sink.close_boundary(Boundary::cell()).unwrap();

        assert_eq!(sink.result().width, 60);
    }

    #[test]
    fn text_outside_cells_is_ignored() {
        let mut m = FixedWidthMeasurer::new(10, 16);
        let mut sink = ColumnWidthSink::new(&mut m, 0, &CollectConfig::default());
        sink.add_text("caption").unwrap();

        assert_eq!(sink.result(), ColumnWidth { width: 0, row: None });
        assert!(m.fonts_set().is_empty());
    }

    #[test]
    fn font_follows_writing_system() {
        let config = CollectConfig::builder()
            .default_font(FontSpec::new("Sans", 16))
            .writing_system_font(WritingSystem(2), FontSpec::new("Serif", 32))
            .build()
            .unwrap();
        let mut m = FixedWidthMeasurer::new(10, 16).scale_with_font(true);
        let mut sink = ColumnWidthSink::new(&mut m, 0, &config);

        sink.open_boundary(Boundary::TableRow).unwrap();
        sink.open_boundary(Boundary::cell()).unwrap();
        sink.add_text_ws("ab", WritingSystem(1)).unwrap();
        sink.add_text_ws("cd", WritingSystem(1)).unwrap();
        sink.add_text_ws("ef", WritingSystem(2)).unwrap();
        sink.close_boundary(Boundary::cell()).unwrap();

        // 4 chars at 10px plus 2 chars at 20px.
        assert_eq!(sink.result().width, 80);
        let families: Vec<_> = m.fonts_set().iter().map(|f| f.family.clone()).collect();
        assert_eq!(families, vec![Some("Sans".to_string()), Some("Serif".to_string())]);
    }
}
