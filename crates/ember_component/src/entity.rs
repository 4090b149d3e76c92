//! Entity identifiers and allocation.
//!
//! An [`EntityId`] is a lightweight `u32` with no inherent data. Components
//! are attached to entities to give them meaning; the id `0` is reserved as
//! the invalid sentinel.

use serde::{Deserialize, Serialize};

/// A unique entity identifier within one scene.
///
/// Ids are allocated monotonically by the owning scene and are never reused
/// within that scene's lifetime, even across deserialisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The null / invalid entity sentinel.
    pub const INVALID: EntityId = EntityId(0);

    /// Create an entity id from a raw `u32`.
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw `u32` identifier.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns `true` if this is a valid (non-zero) entity id.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Allocates monotonically increasing entity ids.
///
/// Owned by a scene; ids start at 1 (0 is reserved for
/// [`EntityId::INVALID`]) and strictly increase. The counter is never reset
/// while the scene lives, so ids stay unique across free/reload cycles.
#[derive(Debug)]
pub struct EntityAllocator {
    next_id: u32,
}

impl EntityAllocator {
    /// Creates a new allocator starting at id 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next_id: 1 }
    }

    /// Allocates a fresh entity id.
    pub fn allocate(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        EntityId(id)
    }

    /// Ensure all future allocations are greater than `id`.
    ///
    /// Called after deserialisation so freshly created entities can never
    /// collide with loaded ones. Never moves the counter backwards.
    pub fn advance_past(&mut self, id: EntityId) {
        self.next_id = self.next_id.max(id.0 + 1);
    }

    /// Returns the number of ids allocated so far.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.next_id - 1
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
