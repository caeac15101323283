//! The collection engine.
//!
//! [`CollectionEngine`] implements every [`DisplayEnv`] call once, in terms of
//! a [`TraversalContext`], and hands all content it meets to a [`Sink`]. The
//! sinks in [`crate::collect::sinks`] only override the handful of hooks
//! they care about.
//!
//! An engine can run on top of another environment (usually the real layout
//! engine). It then starts at that environment's open object, reports
//! embedding levels and outer objects relative to it, and forwards every
//! dependency note to it so derived displays take part in its invalidation.
//! The other environment is only ever read.
//!
//! An engine serves exactly one traversal. Build a fresh one per call.

use crate::collect::context::{OuterObject, SelectionLevel, TraversalContext};
use crate::collect::env::{Boundary, DisplayEnv, OuterEnv, Placeholder, ViewConstructor};
use crate::data::DataProvider;
use crate::errors::{CollectError, Result};
use crate::text::RichString;
use crate::types::{FragmentCode, ObjectId, Tag, WritingSystem};

/// Receives everything a traversal displays and turns it into a result.
///
/// Only [`Sink::add_text`] is required; every other hook has a default that
/// either forwards to it or does nothing.
pub trait Sink {
    /// Plain text from a property, a placeholder or a literal.
    fn add_text(&mut self, text: &str) -> Result<()>;

    /// Text known to be in writing system `ws`.
    fn add_text_ws(&mut self, text: &str, _ws: WritingSystem) -> Result<()> {
        self.add_text(text)
    }

    /// A formatted string, reported as its text in the writing system of its
    /// first run. Empty strings are dropped.
    fn add_rich(&mut self, text: &RichString) -> Result<()> {
        match text.leading_ws() {
            Some(ws) => self.add_text_ws(&text.text(), ws),
            None => Ok(()),
        }
    }

    /// Literal text added outside any property.
    fn add_literal(&mut self, text: &RichString) -> Result<()> {
        self.add_rich(text)
    }

    fn open_boundary(&mut self, _boundary: Boundary) -> Result<()> {
        Ok(())
    }

    fn close_boundary(&mut self, _boundary: Boundary) -> Result<()> {
        Ok(())
    }

    /// Whether `item` of vector `tag` is displayed at all. Skipped items still
    /// keep their index.
    fn should_display(&self, _item: ObjectId, _tag: Tag) -> bool {
        true
    }

    /// Once true, the engine stops displaying anything else.
    fn finished(&self) -> bool {
        false
    }

    /// Whether empty properties should be reported as dependencies so that the
    /// host hears about them gaining content.
    fn notes_empty_dependencies(&self) -> bool {
        false
    }
}

/// Walks a display, feeding a [`Sink`].
pub struct CollectionEngine<'a, S: Sink> {
    context: TraversalContext,
    data: &'a dyn DataProvider,
    upstream: Option<&'a dyn OuterEnv>,
    sink: S,
}

impl<'a, S: Sink> CollectionEngine<'a, S> {
    /// Creates an engine starting at `root`, or at the open object of
    /// `upstream` when one is given.
    pub fn new(upstream: Option<&'a dyn OuterEnv>, data: &'a dyn DataProvider, root: ObjectId, sink: S) -> Self {
        let start = upstream.map_or(root, |u| u.open_object());
        Self {
            context: TraversalContext::new(start),
            data,
            upstream,
            sink,
        }
    }

    /// Runs `vc` on the starting object.
    pub fn display(&mut self, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()> {
        let object = self.context.current_object();
        log::debug!("collecting {} with {} (level {})", object, frag, self.embedding_level());

        vc.display(self, object, frag)?;

        debug_assert_eq!(self.context.depth(), 0, "display returned with objects still open");
        log::debug!("collected {} (finished early: {})", object, self.sink.finished());
        Ok(())
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn context(&self) -> &TraversalContext {
        &self.context
    }

    fn add_vec_items(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode, reversed: bool) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        let object = self.context.current_object();
        let count = self.data.vec_size(object, tag)?;
        if count == 0 && self.sink.notes_empty_dependencies() {
            self.note_dependency(&[object], &[tag]);
        }

        self.context.open_property(tag);
        for step in 0..count {
            let index = if reversed { count - 1 - step } else { step };
            let item = self.data.vec_item(object, tag, index)?;
            if self.sink.should_display(item, tag) {
                self.context.open_object(item, index);
                vc.display(self, item, frag)?;
                self.context.close_object();
            }
            if self.sink.finished() {
                log::debug!("stopped {} of {} after item {}", tag, object, index);
                break;
            }
        }
        self.context.close_property();
        Ok(())
    }

    fn note_empty_string(&self, tag: Tag, ws: WritingSystem, value: &RichString) {
        if value.is_empty() && self.sink.notes_empty_dependencies() {
            self.note_string_value_dependency(self.context.current_object(), tag, ws, value);
        }
    }
}

impl<'a, S: Sink> OuterEnv for CollectionEngine<'a, S> {
    fn embedding_level(&self) -> usize {
        self.upstream.map_or(0, |u| u.embedding_level()) + self.context.depth()
    }

    fn outer_object(&self, level: usize) -> Result<OuterObject> {
        let base = self.upstream.map_or(0, |u| u.embedding_level());
        match self.upstream {
            Some(upstream) if level < base => upstream.outer_object(level),
            _ => self
                .context
                .outer_context_at(level - base)
                .ok_or(CollectError::NoOuterObject { level }),
        }
    }

    fn open_object(&self) -> ObjectId {
        self.context.current_object()
    }

    fn note_dependency(&self, objects: &[ObjectId], tags: &[Tag]) {
        debug_assert_eq!(objects.len(), tags.len(), "dependency objects and tags differ in length");
        let Some(upstream) = self.upstream else {
            return;
        };

        if let ([object], [tag]) = (objects, tags) {
            if let Some(handler) = self.data.virtual_handler(*tag) {
                let expanded = handler.dependencies(*object, *tag);
                if !expanded.is_empty() {
                    log::trace!("expanded computed {} of {} into {} dependencies", tag, object, expanded.len());
                    let (objects, tags): (Vec<ObjectId>, Vec<Tag>) =
                        expanded.into_iter().map(|d| (d.object, d.tag)).unzip();
                    upstream.note_dependency(&objects, &tags);
                    return;
                }
            }
        }

        upstream.note_dependency(objects, tags);
    }

    fn note_string_value_dependency(&self, object: ObjectId, tag: Tag, ws: WritingSystem, value: &RichString) {
        if let Some(upstream) = self.upstream {
            upstream.note_string_value_dependency(object, tag, ws, value);
        }
    }
}

impl<'a, S: Sink> DisplayEnv for CollectionEngine<'a, S> {
    fn data_access(&self) -> &dyn DataProvider {
        self.data
    }

    fn current_object(&self) -> ObjectId {
        self.context.current_object()
    }

    fn previous_occurrence_count(&self, tag: Tag) -> Option<u32> {
        self.context.previous_occurrence_count(tag)
    }

    /// Only this engine's own levels; an upstream environment's levels are
    /// not included.
    fn location(&self) -> Vec<SelectionLevel> {
        self.context.levels()
    }

    fn add_object_prop(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        let object = self.context.current_object();
        let item = self.data.object_prop(object, tag)?;
        if item.is_none() {
            if self.sink.notes_empty_dependencies() {
                self.note_dependency(&[object], &[tag]);
            }
            return Ok(());
        }

        self.context.open_property(tag);
        self.context.open_object(item, 0);
        vc.display(self, item, frag)?;
        self.context.close_object();
        self.context.close_property();
        Ok(())
    }

    fn add_object_vec(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        let object = self.context.current_object();
        self.context.open_property(tag);
        vc.display_vec(self, object, tag, frag)?;
        self.context.close_property();
        Ok(())
    }

    fn add_object_vec_items(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()> {
        self.add_vec_items(tag, vc, frag, false)
    }

    fn add_reversed_object_vec_items(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()> {
        self.add_vec_items(tag, vc, frag, true)
    }

    fn add_object(&mut self, object: ObjectId, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        self.context.open_object(object, 0);
        vc.display(self, object, frag)?;
        self.context.close_object();
        Ok(())
    }

    fn add_prop(&mut self, tag: Tag, vc: &dyn ViewConstructor, frag: FragmentCode) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        self.context.open_property(tag);
        let value = vc.display_variant(self, tag, frag)?;
        self.sink.add_rich(&value)?;
        self.context.close_property();
        Ok(())
    }

    fn add_string_prop(&mut self, tag: Tag, _vc: &dyn ViewConstructor) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        let value = self.data.string_prop(self.context.current_object(), tag)?;
        self.note_empty_string(tag, WritingSystem::DEFAULT, &value);

        self.context.open_property(tag);
        self.sink.add_rich(&value)?;
        self.context.close_property();
        Ok(())
    }

    fn add_unicode_prop(&mut self, tag: Tag, ws: WritingSystem, _vc: &dyn ViewConstructor) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        let value = self
            .data
            .unicode_prop(self.context.current_object(), tag)?
            .unwrap_or_default();
        if value.is_empty() {
            self.note_empty_string(tag, ws, &RichString::new());
        }

        self.context.open_property(tag);
        self.sink.add_text_ws(&value, ws)?;
        self.context.close_property();
        Ok(())
    }

    fn add_int_prop(&mut self, tag: Tag) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        let value = self.data.int_prop(self.context.current_object(), tag)?;

        self.context.open_property(tag);
        self.sink.add_text(&value.to_string())?;
        self.context.close_property();
        Ok(())
    }

    fn add_string_alt_member(&mut self, tag: Tag, ws: WritingSystem, _vc: &dyn ViewConstructor) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        let value = self.data.multi_string_alt(self.context.current_object(), tag, ws)?;
        self.note_empty_string(tag, ws, &value);

        self.context.open_property(tag);
        self.sink.add_rich(&value)?;
        self.context.close_property();
        Ok(())
    }

    fn add_string(&mut self, text: &RichString) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        self.context.note_leaf_added();
        self.sink.add_literal(text)
    }

    fn add_placeholder(&mut self, kind: Placeholder) -> Result<()> {
        if self.sink.finished() {
            return Ok(());
        }

        self.context.note_leaf_added();
        self.sink.add_text(kind.text())
    }

    fn open_boundary(&mut self, boundary: Boundary) -> Result<()> {
        self.context.note_leaf_added();
        self.sink.open_boundary(boundary)
    }

    fn close_boundary(&mut self, boundary: Boundary) -> Result<()> {
        self.sink.close_boundary(boundary)
    }

    fn open_property(&mut self, tag: Tag) {
        self.context.open_property(tag);
    }

    fn close_property(&mut self) {
        self.context.close_property();
    }

    fn open_single_object(&mut self, object: ObjectId) {
        self.context.open_object(object, 0);
    }

    fn close_object(&mut self) {
        self.context.close_object();
    }
}
