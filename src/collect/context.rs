//! Traversal context.
//!
//! [`TraversalContext`] tracks where a collection pass currently is: the
//! stack of open objects, the property being displayed, and how often each
//! property has already been opened at every nesting level. Those counts
//! (together with the synthetic [`Tag::GAP`] occurrences for content added
//! between properties) are what selection addressing needs to tell repeated
//! runs of the same property apart.

use crate::collect::frame::ContextFrame;
use crate::collect::occurrence::PropertyOccurrenceCounter;
use crate::types::{ObjectId, Tag};

/// Object/property/index triple describing one enclosing level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OuterObject {
    pub object: ObjectId,
    pub tag: Tag,
    pub index: usize,
}

/// One level of a selection path, outermost first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionLevel {
    /// Object opened at this level
    pub object: ObjectId,
    /// Property of the enclosing object the object was displayed in
    pub tag: Tag,
    /// Position within that property
    pub index: usize,
    /// Earlier occurrences of `tag` in the enclosing object
    pub previous_occurrences: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct TraversalContext {
    stack: Vec<ContextFrame>,
    current_object: ObjectId,
    current_tag: Tag,
    root_occurrences: PropertyOccurrenceCounter,
    property_open: bool,
    unattributed_content: bool,
}

impl TraversalContext {
    pub fn new(root: ObjectId) -> Self {
        Self {
            stack: Vec::new(),
            current_object: root,
            current_tag: Tag::NONE,
            root_occurrences: PropertyOccurrenceCounter::new(),
            property_open: false,
            unattributed_content: false,
        }
    }

    /// Pushes `object` as the new current object, displayed at `vector_index`
    /// of the current property.
    pub fn open_object(&mut self, object: ObjectId, vector_index: usize) {
        log::trace!(
            "open {} at {}[{}] (depth {})",
            object,
            self.current_tag,
            vector_index,
            self.stack.len() + 1
        );
        self.stack.push(ContextFrame::new(
            self.current_object,
            object,
            self.current_tag,
            vector_index,
            self.property_open,
        ));
        self.current_object = object;
        self.property_open = false;
    }

    /// Pops the innermost object and restores the enclosing one, including
    /// whether a property was open around it.
    ///
    /// Must not be called while a property is open. Debug builds assert; release
    /// builds log and carry on with whatever state results.
    pub fn close_object(&mut self) {
        debug_assert!(!self.property_open, "close_object called with a property open");
        if self.property_open {
            log::warn!("close_object called with {} still open", self.current_tag);
        }

        self.check_for_non_prop_info();

        let Some(frame) = self.stack.pop() else {
            debug_assert!(false, "close_object called with no open object");
            log::warn!("close_object called with no open object");
            return;
        };
        log::trace!("close {} (depth {})", frame.object, self.stack.len());

        self.current_object = frame.outer_object;
        self.current_tag = frame.tag;
        self.property_open = frame.property_was_open;
    }

    pub fn open_property(&mut self, tag: Tag) {
        self.check_for_non_prop_info();
        self.occurrences_mut().increment(tag);
        self.current_tag = tag;
        self.property_open = true;
    }

    pub fn close_property(&mut self) {
        self.property_open = false;
    }

    /// Records that content was added. Only content outside any property counts
    /// as unattributed.
    pub fn note_leaf_added(&mut self) {
        if !self.property_open {
            self.unattributed_content = true;
        }
    }

    /// Earlier occurrences of `tag` at the current level, `None` if never opened.
    pub fn previous_occurrence_count(&self, tag: Tag) -> Option<u32> {
        self.occurrences().count(tag)
    }

    /// Enclosing object, property and index of the object opened at `level`
    /// (0 = outermost) of this context's own stack.
    pub fn outer_context_at(&self, level: usize) -> Option<OuterObject> {
        self.stack.get(level).map(|f| OuterObject {
            object: f.outer_object,
            tag: f.tag,
            index: f.vector_index,
        })
    }

    /// Selection path to the current object, outermost level first.
    pub fn levels(&self) -> Vec<SelectionLevel> {
        let mut out = Vec::with_capacity(self.stack.len());
        for (i, frame) in self.stack.iter().enumerate() {
            let enclosing = if i == 0 { &self.root_occurrences } else { &self.stack[i - 1].occurrences };
            out.push(SelectionLevel {
                object: frame.object,
                tag: frame.tag,
                index: frame.vector_index,
                previous_occurrences: enclosing.count(frame.tag),
            });
        }
        out
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn current_object(&self) -> ObjectId {
        self.current_object
    }

    pub fn current_tag(&self) -> Tag {
        self.current_tag
    }

    pub fn is_property_open(&self) -> bool {
        self.property_open
    }

    fn occurrences(&self) -> &PropertyOccurrenceCounter {
        match self.stack.last() {
            Some(frame) => &frame.occurrences,
            None => &self.root_occurrences,
        }
    }

    fn occurrences_mut(&mut self) -> &mut PropertyOccurrenceCounter {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.occurrences,
            None => &mut self.root_occurrences,
        }
    }

    /// Turns pending unattributed content into an occurrence of [`Tag::GAP`].
    fn check_for_non_prop_info(&mut self) {
        if self.unattributed_content {
            self.occurrences_mut().increment(Tag::GAP);
            self.unattributed_content = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROOT: ObjectId = ObjectId(1);
    const T: Tag = Tag(10);
    const U: Tag = Tag(11);

    #[test]
    fn reopening_a_property_counts_previous_occurrences() {
        let mut ctx = TraversalContext::new(ROOT);

        ctx.open_property(T);
        assert_eq!(ctx.previous_occurrence_count(T), Some(0));
        ctx.close_property();

        ctx.open_property(T);
        assert_eq!(ctx.previous_occurrence_count(T), Some(1));
        ctx.close_property();

        ctx.open_property(U);
        ctx.close_property();
        assert_eq!(ctx.previous_occurrence_count(T), Some(1));
        assert_eq!(ctx.previous_occurrence_count(U), Some(0));
    }

    #[test]
    fn object_frames_restore_outer_state() {
        let mut ctx = TraversalContext::new(ROOT);

        ctx.open_property(T);
        ctx.open_object(ObjectId(2), 3);
        assert_eq!(ctx.depth(), 1);
        assert_eq!(ctx.current_object(), ObjectId(2));
        assert!(!ctx.is_property_open());

        // Counts inside the new object start fresh.
        assert_eq!(ctx.previous_occurrence_count(T), None);
        ctx.open_property(U);
        ctx.close_property();

        ctx.close_object();
        assert_eq!(ctx.depth(), 0);
        assert_eq!(ctx.current_object(), ROOT);
        assert_eq!(ctx.current_tag(), T);
        assert!(ctx.is_property_open());
        assert_eq!(ctx.previous_occurrence_count(U), None);
        ctx.close_property();
    }

    #[test]
    fn outer_context_reports_enclosing_object() {
        let mut ctx = TraversalContext::new(ROOT);
        ctx.open_property(T);
        ctx.open_object(ObjectId(2), 4);
        ctx.open_property(U);
        ctx.open_object(ObjectId(3), 0);

        assert_eq!(ctx.outer_context_at(0), Some(OuterObject { object: ROOT, tag: T, index: 4 }));
        assert_eq!(ctx.outer_context_at(1), Some(OuterObject { object: ObjectId(2), tag: U, index: 0 }));
        assert_eq!(ctx.outer_context_at(2), None);
    }

    #[test]
    fn content_between_properties_becomes_a_gap_occurrence() {
        let mut ctx = TraversalContext::new(ROOT);

        ctx.open_property(T);
        ctx.note_leaf_added();
        ctx.close_property();
        assert_eq!(ctx.previous_occurrence_count(Tag::GAP), None);

        ctx.note_leaf_added();
        ctx.note_leaf_added();
        ctx.open_property(T);
        ctx.close_property();
        assert_eq!(ctx.previous_occurrence_count(Tag::GAP), Some(0));

        // A flushed gap is not counted twice.
        ctx.open_property(U);
        ctx.close_property();
        assert_eq!(ctx.previous_occurrence_count(Tag::GAP), Some(0));
    }

    #[test]
    fn gap_is_flushed_into_closing_object() {
        let mut ctx = TraversalContext::new(ROOT);
        ctx.open_property(T);
        ctx.open_object(ObjectId(2), 0);
        ctx.note_leaf_added();
        ctx.close_object();
        ctx.close_property();
        assert_eq!(ctx.previous_occurrence_count(Tag::GAP), None);

        ctx.open_property(T);
        ctx.open_object(ObjectId(3), 0);
        ctx.note_leaf_added();
        ctx.open_property(U);
        assert_eq!(ctx.previous_occurrence_count(Tag::GAP), Some(0));
        ctx.close_property();
        ctx.close_object();
        ctx.close_property();
    }

    #[test]
    fn levels_carry_occurrence_counts() {
        let mut ctx = TraversalContext::new(ROOT);
        ctx.open_property(T);
        ctx.close_property();
        ctx.open_property(T);
        ctx.open_object(ObjectId(2), 1);
        ctx.open_property(U);
        ctx.open_object(ObjectId(3), 0);

        assert_eq!(
            ctx.levels(),
            vec![
                SelectionLevel { object: ObjectId(2), tag: T, index: 1, previous_occurrences: Some(1) },
                SelectionLevel { object: ObjectId(3), tag: U, index: 0, previous_occurrences: Some(0) },
            ]
        );
    }

    #[test]
    fn object_opened_outside_a_property_closes_back_outside() {
        let mut ctx = TraversalContext::new(ROOT);
        ctx.open_property(T);
        ctx.open_object(ObjectId(2), 0);

        ctx.open_object(ObjectId(3), 0);
        ctx.close_object();
        assert!(!ctx.is_property_open());

        // Content after the inner object is unattributed again.
        ctx.note_leaf_added();
        ctx.open_property(U);
        assert_eq!(ctx.previous_occurrence_count(Tag::GAP), Some(0));
        ctx.close_property();

        ctx.close_object();
        assert!(ctx.is_property_open());
        ctx.close_property();
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "property open")]
    fn closing_object_with_open_property_asserts() {
        let mut ctx = TraversalContext::new(ROOT);
        ctx.open_property(T);
        ctx.open_object(ObjectId(2), 0);
        ctx.open_property(U);
        ctx.close_object();
    }
}
