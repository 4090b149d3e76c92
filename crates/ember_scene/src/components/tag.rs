//! Display-name tag component.

use ember_component::{Component, StreamMeta};
use serde::{Deserialize, Serialize};

/// A human-readable display name for an entity.
///
/// Shown in the editor's scene tree and attached automatically by
/// [`Scene::spawn_named`](crate::Scene::spawn_named). The name lives on the
/// heap, so `Tag` carries custom stream metadata instead of raw-byte
/// round-tripping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// The entity's display name.
    pub name: String,
}

impl Tag {
    /// Create a new tag.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Component for Tag {
    fn type_name() -> &'static str {
        "Tag"
    }

    fn stream_meta() -> Option<StreamMeta> {
        Some(StreamMeta::of::<Self>())
    }
}
