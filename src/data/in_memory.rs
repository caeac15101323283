use crate::data::{DataProvider, Dependency, VirtualHandler};
use crate::text::RichString;
use crate::types::{ObjectId, Tag, WritingSystem};
use anyhow::{anyhow, Result};
use std::collections::HashMap;

/// In‑memory object graph. Used as the default provider for tests and for hosts
/// that assemble small displays by hand.
///
/// Unset values read as empty: [`ObjectId::NONE`] for object properties, no
/// items for vectors, `None`/empty for strings and `0` for integers.
#[derive(Default)]
pub struct InMemoryData {
    objects: HashMap<(ObjectId, Tag), ObjectId>,
    vectors: HashMap<(ObjectId, Tag), Vec<ObjectId>>,
    unicode: HashMap<(ObjectId, Tag), String>,
    strings: HashMap<(ObjectId, Tag), RichString>,
    multi_strings: HashMap<(ObjectId, Tag, WritingSystem), RichString>,
    ints: HashMap<(ObjectId, Tag), i64>,
    virtuals: HashMap<Tag, Box<dyn VirtualHandler>>,
}

impl InMemoryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_object(&mut self, object: ObjectId, tag: Tag, value: ObjectId) -> &mut Self {
        self.objects.insert((object, tag), value);
        self
    }

    pub fn set_vector(&mut self, object: ObjectId, tag: Tag, items: impl Into<Vec<ObjectId>>) -> &mut Self {
        self.vectors.insert((object, tag), items.into());
        self
    }

    pub fn set_unicode(&mut self, object: ObjectId, tag: Tag, value: impl Into<String>) -> &mut Self {
        self.unicode.insert((object, tag), value.into());
        self
    }

    pub fn set_string(&mut self, object: ObjectId, tag: Tag, value: RichString) -> &mut Self {
        self.strings.insert((object, tag), value);
        self
    }

    pub fn set_multi_string(&mut self, object: ObjectId, tag: Tag, ws: WritingSystem, value: RichString) -> &mut Self {
        self.multi_strings.insert((object, tag, ws), value);
        self
    }

    pub fn set_int(&mut self, object: ObjectId, tag: Tag, value: i64) -> &mut Self {
        self.ints.insert((object, tag), value);
        self
    }

    /// Marks `tag` as a computed property handled by `handler`.
    pub fn register_virtual(&mut self, tag: Tag, handler: impl VirtualHandler + 'static) -> &mut Self {
        self.virtuals.insert(tag, Box::new(handler));
        self
    }
}

impl DataProvider for InMemoryData {
    fn object_prop(&self, object: ObjectId, tag: Tag) -> Result<ObjectId> {
        Ok(self.objects.get(&(object, tag)).copied().unwrap_or(ObjectId::NONE))
    }

    fn vec_size(&self, object: ObjectId, tag: Tag) -> Result<usize> {
        Ok(self.vectors.get(&(object, tag)).map_or(0, Vec::len))
    }

    fn vec_item(&self, object: ObjectId, tag: Tag, index: usize) -> Result<ObjectId> {
        self.vectors
            .get(&(object, tag))
            .and_then(|v| v.get(index))
            .copied()
            .ok_or_else(|| anyhow!("no item {index} in {tag} of {object}"))
    }

    fn unicode_prop(&self, object: ObjectId, tag: Tag) -> Result<Option<String>> {
        Ok(self.unicode.get(&(object, tag)).cloned())
    }

    fn string_prop(&self, object: ObjectId, tag: Tag) -> Result<RichString> {
        Ok(self.strings.get(&(object, tag)).cloned().unwrap_or_default())
    }

    fn multi_string_alt(&self, object: ObjectId, tag: Tag, ws: WritingSystem) -> Result<RichString> {
        Ok(self.multi_strings.get(&(object, tag, ws)).cloned().unwrap_or_default())
    }

    fn int_prop(&self, object: ObjectId, tag: Tag) -> Result<i64> {
        Ok(self.ints.get(&(object, tag)).copied().unwrap_or(0))
    }

    fn virtual_handler(&self, tag: Tag) -> Option<&dyn VirtualHandler> {
        self.virtuals.get(&tag).map(|h| h.as_ref())
    }
}

/// Virtual handler with a fixed list of underlying dependencies.
///
/// The object part of each entry is taken from the dependency being expanded
/// when it is [`ObjectId::NONE`].
pub struct StaticVirtualHandler {
    underlying: Vec<Dependency>,
}

impl StaticVirtualHandler {
    pub fn new(underlying: impl Into<Vec<Dependency>>) -> Self {
        Self { underlying: underlying.into() }
    }
}

impl VirtualHandler for StaticVirtualHandler {
    fn dependencies(&self, object: ObjectId, _tag: Tag) -> Vec<Dependency> {
        self.underlying
            .iter()
            .map(|d| Dependency {
                object: if d.object.is_none() { object } else { d.object },
                tag: d.tag,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OBJ: ObjectId = ObjectId(1);
    const NAME: Tag = Tag(10);
    const ITEMS: Tag = Tag(11);

    #[test]
    fn unset_values_read_as_empty() {
        let data = InMemoryData::new();

        assert_eq!(data.object_prop(OBJ, NAME).unwrap(), ObjectId::NONE);
        assert_eq!(data.vec_size(OBJ, ITEMS).unwrap(), 0);
        assert!(data.unicode_prop(OBJ, NAME).unwrap().is_none());
        assert!(data.string_prop(OBJ, NAME).unwrap().is_empty());
        assert!(data.multi_string_alt(OBJ, NAME, WritingSystem(1)).unwrap().is_empty());
        assert_eq!(data.int_prop(OBJ, NAME).unwrap(), 0);
        assert!(data.virtual_handler(NAME).is_none());
    }

    #[test]
    fn vector_items_are_indexed() {
        let mut data = InMemoryData::new();
        data.set_vector(OBJ, ITEMS, vec![ObjectId(5), ObjectId(6)]);

        assert_eq!(data.vec_size(OBJ, ITEMS).unwrap(), 2);
        assert_eq!(data.vec_item(OBJ, ITEMS, 1).unwrap(), ObjectId(6));
        assert!(data.vec_item(OBJ, ITEMS, 2).is_err());
    }

    #[test]
    fn multi_string_alternatives_are_isolated() {
        let mut data = InMemoryData::new();
        data.set_multi_string(OBJ, NAME, WritingSystem(1), RichString::plain("en"));
        data.set_multi_string(OBJ, NAME, WritingSystem(2), RichString::plain("fr"));

        assert_eq!(data.multi_string_alt(OBJ, NAME, WritingSystem(1)).unwrap().text(), "en");
        assert_eq!(data.multi_string_alt(OBJ, NAME, WritingSystem(2)).unwrap().text(), "fr");
        assert!(data.multi_string_alt(OBJ, NAME, WritingSystem(3)).unwrap().is_empty());
    }

    #[test]
    fn static_handler_fills_in_object() {
        let mut data = InMemoryData::new();
        data.register_virtual(
            Tag(99),
            StaticVirtualHandler::new(vec![
                Dependency::new(ObjectId::NONE, NAME),
                Dependency::new(ObjectId(42), ITEMS),
            ]),
        );

        let deps = data.virtual_handler(Tag(99)).unwrap().dependencies(OBJ, Tag(99));
        assert_eq!(deps, vec![Dependency::new(OBJ, NAME), Dependency::new(ObjectId(42), ITEMS)]);
    }
}
