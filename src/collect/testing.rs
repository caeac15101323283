//! Scripted collaborators for engine tests.

use crate::collect::context::{OuterObject, SelectionLevel};
use crate::collect::env::{Boundary, DisplayEnv, OuterEnv, Placeholder, ViewConstructor};
use crate::data::Dependency;
use crate::errors::{CollectError, Result};
use crate::text::RichString;
use crate::types::{FragmentCode, ObjectId, Tag, WritingSystem};
use std::cell::RefCell;
use std::collections::HashMap;

/// One call a [`ScriptVc`] makes on the environment.
#[derive(Clone, Debug)]
pub(crate) enum Step {
    Unicode(Tag, WritingSystem),
    StringProp(Tag),
    AltMember(Tag, WritingSystem),
    Int(Tag),
    Variant(Tag),
    Literal(&'static str),
    Rich(RichString),
    Placeholder(Placeholder),
    ObjectProp(Tag, FragmentCode),
    VecItems(Tag, FragmentCode),
    ReversedVecItems(Tag, FragmentCode),
    Vec(Tag, FragmentCode),
    Object(ObjectId, FragmentCode),
    LazyVecItems(Tag, FragmentCode),
    Open(Boundary),
    Close(Boundary),
    OpenProperty(Tag),
    CloseProperty,
    OpenObject(ObjectId),
    CloseObject,
    /// Remember [`DisplayEnv::location`].
    RecordLocation,
    /// Remember [`DisplayEnv::previous_occurrence_count`] of a tag.
    RecordOccurrences(Tag),
    /// Remember the embedding level and every outer object.
    RecordOuter,
}

/// View constructor running a fixed list of steps per fragment. Objects are
/// all displayed the same way; unknown fragments display nothing.
///
/// `display_vec` shows every item joined by `"; "`, `display_variant`
/// formats an integer property as `#<value>`.
#[derive(Default)]
pub(crate) struct ScriptVc {
    scripts: HashMap<FragmentCode, Vec<Step>>,
    visited: RefCell<Vec<ObjectId>>,
    locations: RefCell<Vec<Vec<SelectionLevel>>>,
    occurrences: RefCell<Vec<Option<u32>>>,
    outer: RefCell<Vec<(usize, Vec<OuterObject>)>>,
}

impl ScriptVc {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fragment(mut self, frag: FragmentCode, steps: Vec<Step>) -> Self {
        self.scripts.insert(frag, steps);
        self
    }

    /// Objects displayed, in order, without the starting object.
    pub(crate) fn visited(&self) -> Vec<ObjectId> {
        self.visited.borrow().iter().skip(1).copied().collect()
    }

    pub(crate) fn locations(&self) -> Vec<Vec<SelectionLevel>> {
        self.locations.borrow().clone()
    }

    pub(crate) fn occurrences(&self) -> Vec<Option<u32>> {
        self.occurrences.borrow().clone()
    }

    pub(crate) fn outer(&self) -> Vec<(usize, Vec<OuterObject>)> {
        self.outer.borrow().clone()
    }

    fn run(&self, env: &mut dyn DisplayEnv, step: &Step) -> Result<()> {
        match step {
            Step::Unicode(tag, ws) => env.add_unicode_prop(*tag, *ws, self),
            Step::StringProp(tag) => env.add_string_prop(*tag, self),
            Step::AltMember(tag, ws) => env.add_string_alt_member(*tag, *ws, self),
            Step::Int(tag) => env.add_int_prop(*tag),
            Step::Variant(tag) => env.add_prop(*tag, self, FragmentCode::default()),
            Step::Literal(text) => env.add_literal_text(text),
            Step::Rich(text) => env.add_string(text),
            Step::Placeholder(kind) => env.add_placeholder(*kind),
            Step::ObjectProp(tag, frag) => env.add_object_prop(*tag, self, *frag),
            Step::VecItems(tag, frag) => env.add_object_vec_items(*tag, self, *frag),
            Step::ReversedVecItems(tag, frag) => env.add_reversed_object_vec_items(*tag, self, *frag),
            Step::Vec(tag, frag) => env.add_object_vec(*tag, self, *frag),
            Step::Object(object, frag) => env.add_object(*object, self, *frag),
            Step::LazyVecItems(tag, frag) => env.add_lazy_vec_items(*tag, self, *frag),
            Step::Open(boundary) => env.open_boundary(*boundary),
            Step::Close(boundary) => env.close_boundary(*boundary),
            Step::OpenProperty(tag) => {
                env.open_property(*tag);
                Ok(())
            }
            Step::CloseProperty => {
                env.close_property();
                Ok(())
            }
            Step::OpenObject(object) => {
                env.open_single_object(*object);
                Ok(())
            }
            Step::CloseObject => {
                env.close_object();
                Ok(())
            }
            Step::RecordLocation => {
                self.locations.borrow_mut().push(env.location());
                Ok(())
            }
            Step::RecordOccurrences(tag) => {
                self.occurrences.borrow_mut().push(env.previous_occurrence_count(*tag));
                Ok(())
            }
            Step::RecordOuter => {
                let level = env.embedding_level();
                let levels = (0..level).map(|l| env.outer_object(l)).collect::<Result<Vec<_>>>()?;
                self.outer.borrow_mut().push((level, levels));
                Ok(())
            }
        }
    }
}

impl ViewConstructor for ScriptVc {
    fn display(&self, env: &mut dyn DisplayEnv, object: ObjectId, frag: FragmentCode) -> Result<()> {
        self.visited.borrow_mut().push(object);
        let Some(steps) = self.scripts.get(&frag) else {
            return Ok(());
        };
        for step in steps {
            self.run(env, step)?;
        }
        Ok(())
    }

    fn display_vec(&self, env: &mut dyn DisplayEnv, object: ObjectId, tag: Tag, frag: FragmentCode) -> Result<()> {
        let count = env.data_access().vec_size(object, tag)?;
        for index in 0..count {
            if index > 0 {
                env.add_literal_text("; ")?;
            }
            let item = env.data_access().vec_item(object, tag, index)?;
            env.add_object(item, self, frag)?;
        }
        Ok(())
    }

    fn display_variant(&self, env: &mut dyn DisplayEnv, tag: Tag, _frag: FragmentCode) -> Result<RichString> {
        let value = env.data_access().int_prop(env.current_object(), tag)?;
        Ok(RichString::plain(format!("#{value}")))
    }
}

/// Outer environment with a fixed stack that records every dependency note.
pub(crate) struct RecordingUpstream {
    open_object: ObjectId,
    outer: Vec<OuterObject>,
    dependencies: RefCell<Vec<Vec<Dependency>>>,
    string_dependencies: RefCell<Vec<(ObjectId, Tag, String)>>,
}

impl RecordingUpstream {
    pub(crate) fn new(open_object: ObjectId, outer: Vec<OuterObject>) -> Self {
        Self {
            open_object,
            outer,
            dependencies: RefCell::new(Vec::new()),
            string_dependencies: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn dependencies(&self) -> Vec<Vec<Dependency>> {
        self.dependencies.borrow().clone()
    }

    pub(crate) fn string_dependencies(&self) -> Vec<(ObjectId, Tag, String)> {
        self.string_dependencies.borrow().clone()
    }
}

impl OuterEnv for RecordingUpstream {
    fn embedding_level(&self) -> usize {
        self.outer.len()
    }

    fn outer_object(&self, level: usize) -> Result<OuterObject> {
        self.outer.get(level).copied().ok_or(CollectError::NoOuterObject { level })
    }

    fn open_object(&self) -> ObjectId {
        self.open_object
    }

    fn note_dependency(&self, objects: &[ObjectId], tags: &[Tag]) {
        let deps = objects.iter().zip(tags).map(|(o, t)| Dependency::new(*o, *t)).collect();
        self.dependencies.borrow_mut().push(deps);
    }

    fn note_string_value_dependency(&self, object: ObjectId, tag: Tag, _ws: WritingSystem, value: &RichString) {
        self.string_dependencies.borrow_mut().push((object, tag, value.text()));
    }
}
