//! The display protocol.
//!
//! A view constructor describes how an object is displayed by calling into a
//! [`DisplayEnv`]; the environment calls back into the view constructor for
//! every nested object it opens. The real layout engine is one such
//! environment, the collection engines in this crate are others: they walk
//! exactly the same calls but collect a string, a width or a flag instead of
//! building boxes.
//!
//! [`OuterEnv`] is the read-only part of an environment. It is what a
//! collection engine needs from an environment it runs on top of: where it is
//! (embedding level, outer objects) and where dependency notes go.

use crate::collect::context::{OuterObject, SelectionLevel};
use crate::data::DataProvider;
use crate::errors::{CollectError, Result};
use crate::text::RichString;
use crate::types::{FragmentCode, ObjectId, Tag, WritingSystem};

/// Flow structure opened and closed around content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Paragraph,
    Table,
    TableHeader,
    TableFooter,
    TableBody,
    TableRow,
    TableCell { rows: usize, cols: usize },
    TableHeaderCell { rows: usize, cols: usize },
    Span,
    Div,
    InnerPile,
}

impl Boundary {
    /// A table cell spanning one row and one column.
    pub fn cell() -> Self {
        Boundary::TableCell { rows: 1, cols: 1 }
    }
}

/// Non-text leaf content. Collectors see it as a fixed placeholder text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placeholder {
    Picture,
    Window,
    Rectangle,
    SeparatorBar,
}

impl Placeholder {
    pub fn text(&self) -> &'static str {
        match self {
            Placeholder::Picture => "a picture",
            Placeholder::Window => "a window",
            Placeholder::Rectangle => "a rectangle",
            Placeholder::SeparatorBar => "|",
        }
    }
}

/// Read-only view of a display environment.
pub trait OuterEnv {
    /// Number of objects currently open, including those of any environment
    /// this one runs on top of.
    fn embedding_level(&self) -> usize;

    /// Enclosing object, property and index of the object opened at `level`
    /// (0 = outermost).
    fn outer_object(&self, level: usize) -> Result<OuterObject>;

    /// The object whose properties are currently being displayed.
    fn open_object(&self) -> ObjectId;

    /// The display depends on `tags[i]` of `objects[i]` for every `i`.
    fn note_dependency(&self, objects: &[ObjectId], tags: &[Tag]);

    /// The display depends on `tag` of `object` keeping the value `value`.
    fn note_string_value_dependency(&self, object: ObjectId, tag: Tag, ws: WritingSystem, value: &RichString);
}

/// Displays objects by calling back into a [`DisplayEnv`].
pub trait ViewConstructor {
    /// Display `object` using the variant selected by `frag`.
    fn display(&self, env: &mut dyn DisplayEnv, object: ObjectId, frag: FragmentCode) -> Result<()>;

    /// Display the whole vector `tag` of `object`, for [`DisplayEnv::add_object_vec`].
    fn display_vec(&self, _env: &mut dyn DisplayEnv, _object: ObjectId, _tag: Tag, _frag: FragmentCode) -> Result<()> {
        Err(CollectError::not_supported("display_vec"))
    }

    /// Format property `tag` of the current object, for [`DisplayEnv::add_prop`].
    fn display_variant(&self, _env: &mut dyn DisplayEnv, _tag: Tag, _frag: FragmentCode) -> Result<RichString> {
        Err(CollectError::not_supported("display_variant"))
    }
}

/// The calls a view constructor makes to display an object.
pub trait DisplayEnv: OuterEnv {
    /// The data the display reads from.
    fn data_access(&self) -> &dyn DataProvider;

    /// The object whose properties are currently being displayed.
    fn current_object(&self) -> ObjectId;

    /// Earlier occurrences of `tag` in the current object, `None` if never opened.
    fn previous_occurrence_count(&self, tag: Tag) -> Option<u32>;

    /// Selection path to the current object, outermost level first.
    fn location(&self) -> Vec<SelectionLevel>;

    /// Display the object held by atomic property `tag`. Nothing happens when
    /// the property is empty.
    fn add_object_prop(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()>;

    /// Let `vc` display vector `tag` as a whole through [`ViewConstructor::display_vec`].
    fn add_object_vec(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()>;

    /// Display every item of vector `tag`, first to last.
    fn add_object_vec_items(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()>;

    /// Display every item of vector `tag`, last to first.
    fn add_reversed_object_vec_items(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()>;

    /// Display `object` as part of the current property.
    fn add_object(&mut self, object: ObjectId, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()>;

    /// Display property `tag` as formatted by [`ViewConstructor::display_variant`].
    fn add_prop(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()>;

    fn add_string_prop(&mut self, tag: Tag, vc: &dyn ViewConstructor) -> Result<()>;

    fn add_unicode_prop(&mut self, tag: Tag, ws: WritingSystem, vc: &dyn ViewConstructor) -> Result<()>;

    fn add_int_prop(&mut self, tag: Tag) -> Result<()>;

    /// Display alternative `ws` of multi-string property `tag`.
    fn add_string_alt_member(&mut self, tag: Tag, ws: WritingSystem, vc: &dyn ViewConstructor) -> Result<()>;

    /// Add literal text that belongs to no property.
    fn add_string(&mut self, text: &RichString) -> Result<()>;

    fn add_literal_text(&mut self, text: &str) -> Result<()> {
        self.add_string(&RichString::plain(text))
    }

    /// Add a picture, window, rectangle or separator bar.
    fn add_placeholder(&mut self, kind: Placeholder) -> Result<()>;

    fn open_boundary(&mut self, boundary: Boundary) -> Result<()>;

    fn close_boundary(&mut self, boundary: Boundary) -> Result<()>;

    /// Open property `tag` of the current object by hand.
    fn open_property(&mut self, tag: Tag);

    fn close_property(&mut self);

    /// Open `object` by hand inside the current property.
    fn open_single_object(&mut self, object: ObjectId);

    fn close_object(&mut self);

    fn add_lazy_vec_items(&mut self, _tag: Tag, _vc: &dyn ViewConstructor, _frag: FragmentCode) -> Result<()> {
        Err(CollectError::not_supported("add_lazy_vec_items"))
    }

    fn add_lazy_items(&mut self, _items: &[ObjectId], _vc: &dyn ViewConstructor, _frag: FragmentCode) -> Result<()> {
        Err(CollectError::not_supported("add_lazy_items"))
    }

    fn add_derived_prop(&mut self, _tags: &[Tag], _vc: &dyn ViewConstructor, _frag: FragmentCode) -> Result<()> {
        Err(CollectError::not_supported("add_derived_prop"))
    }

    fn add_string_alt(&mut self, _tag: Tag) -> Result<()> {
        Err(CollectError::not_supported("add_string_alt"))
    }

    fn add_string_alt_seq(&mut self, _tag: Tag, _wss: &[WritingSystem]) -> Result<()> {
        Err(CollectError::not_supported("add_string_alt_seq"))
    }
}
