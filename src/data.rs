//! Data access for the collection engine.
//!
//! The engine never owns data. Everything it displays is read through a
//! [`DataProvider`], the read-only view of the external object graph. The
//! provider also doubles as the schema lookup for computed ("virtual")
//! properties through [`DataProvider::virtual_handler`].
//!
//! # Available types
//!
//! - [`DataProvider`]: trait for any object graph the engine can walk.
//! - [`VirtualHandler`]: expands a computed property into the stored
//!   properties it is derived from.
//! - [`Dependency`]: a single (object, property) pair.
//! - [`InMemoryData`]: hash-map backed provider, for tests and small hosts.

use crate::text::RichString;
use crate::types::{ObjectId, Tag, WritingSystem};
use anyhow::Result;

/// In-memory data provider.
pub mod in_memory;

pub use in_memory::{InMemoryData, StaticVirtualHandler};

/// A property on a specific object another party depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub object: ObjectId,
    pub tag: Tag,
}

impl Dependency {
    pub fn new(object: ObjectId, tag: Tag) -> Self {
        Self { object, tag }
    }
}

/// Handler registered for a computed property.
pub trait VirtualHandler {
    /// The stored properties whose change invalidates `tag` on `object`.
    ///
    /// The result replaces the single `(object, tag)` pair when dependencies
    /// are forwarded to the real layout engine.
    fn dependencies(&self, object: ObjectId, tag: Tag) -> Vec<Dependency>;
}

/// Read-only access to the object graph being displayed.
///
/// All methods take `&self`: the engine issues nested, reentrant reads
/// while a traversal is in progress and never writes.
pub trait DataProvider {
    /// The object held by an atomic object property, [`ObjectId::NONE`] when empty.
    fn object_prop(&self, object: ObjectId, tag: Tag) -> Result<ObjectId>;

    /// Number of items in a vector property.
    fn vec_size(&self, object: ObjectId, tag: Tag) -> Result<usize>;

    /// The item at `index` in a vector property.
    fn vec_item(&self, object: ObjectId, tag: Tag, index: usize) -> Result<ObjectId>;

    /// A plain unicode property, `None` when unset.
    fn unicode_prop(&self, object: ObjectId, tag: Tag) -> Result<Option<String>>;

    /// A formatted string property.
    fn string_prop(&self, object: ObjectId, tag: Tag) -> Result<RichString>;

    /// One writing-system alternative of a multi-string property.
    fn multi_string_alt(&self, object: ObjectId, tag: Tag, ws: WritingSystem) -> Result<RichString>;

    /// An integer property.
    fn int_prop(&self, object: ObjectId, tag: Tag) -> Result<i64>;

    /// Handler for `tag` when it is a computed property.
    fn virtual_handler(&self, _tag: Tag) -> Option<&dyn VirtualHandler> {
        None
    }
}
