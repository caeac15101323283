//! Identifier types shared by the collection engine and its collaborators.
//!
//! All of them are thin, copyable wrappers around integers. The engine never
//! interprets them beyond equality and the few reserved values defined here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a node in the external data graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// "No object". Object properties holding this value are empty.
    pub const NONE: ObjectId = ObjectId(0);

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a property (field) on an object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub u32);

impl Tag {
    /// No property. Current tag of a traversal before any property was opened.
    pub const NONE: Tag = Tag(0);

    /// Pseudo-tag counted whenever content was added outside of any property.
    pub const GAP: Tag = Tag(u32::MAX);
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::GAP {
            write!(f, "tag:gap")
        } else {
            write!(f, "tag:{}", self.0)
        }
    }
}

/// Tells a view constructor which display variant to use for an object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FragmentCode(pub u32);

impl fmt::Display for FragmentCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frag:{}", self.0)
    }
}

/// Language/script variant of a run of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WritingSystem(pub u32);

impl WritingSystem {
    pub const DEFAULT: WritingSystem = WritingSystem(0);
}

impl fmt::Display for WritingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ws:{}", self.0)
    }
}
