use crate::collect::occurrence::PropertyOccurrenceCounter;
use crate::types::{ObjectId, Tag};

/// One open object on the traversal stack.
#[derive(Clone, Debug)]
pub struct ContextFrame {
    /// Object that was current when this one was opened
    pub outer_object: ObjectId,
    /// The opened object
    pub object: ObjectId,
    /// Property of `outer_object` the object was opened in
    pub tag: Tag,
    /// Position of the object within that property
    pub vector_index: usize,
    /// Whether a property of `outer_object` was open when the object was opened
    pub property_was_open: bool,
    /// Occurrences of the properties opened inside `object`
    pub occurrences: PropertyOccurrenceCounter,
}

impl ContextFrame {
    pub fn new(outer_object: ObjectId, object: ObjectId, tag: Tag, vector_index: usize, property_was_open: bool) -> Self {
        Self {
            outer_object,
            object,
            tag,
            vector_index,
            property_was_open,
            occurrences: PropertyOccurrenceCounter::new(),
        }
    }
}
