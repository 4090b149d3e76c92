//! Ergonomic entity handle.
//!
//! An [`Entity`] pairs an [`EntityId`] with a borrow of its [`Scene`] and
//! forwards component operations to it. The borrow guarantees the scene
//! outlives the handle; handles are cheap and can be re-created from the id
//! at any time via [`Scene::entity`].

use ember_component::{Component, EntityId};

use crate::error::SceneError;
use crate::scene::Scene;

/// A borrowed view of one entity in a [`Scene`].
///
/// Two handles compare equal iff their ids match — the scene borrow is not
/// part of the comparison, so only compare handles from the same scene.
#[derive(Debug)]
pub struct Entity<'s> {
    id: EntityId,
    scene: &'s mut Scene,
}

impl<'s> Entity<'s> {
    pub(crate) fn new(id: EntityId, scene: &'s mut Scene) -> Self {
        Self { id, scene }
    }

    /// The entity's id.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Returns `true` if the id is not the invalid sentinel.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.id.is_valid()
    }

    /// Returns `true` if the entity is currently registered in the scene.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.scene.contains(self.id)
    }

    /// Attach a component to this entity.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::EntityNotFound`] if the entity is no longer in
    /// the scene.
    pub fn add<T: Component>(&mut self, value: T) -> Result<&mut T, SceneError> {
        self.scene.add_component(self.id, value)
    }

    /// Look up a component on this entity.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.scene.get_component(self.id)
    }

    /// Mutable component lookup.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.scene.get_component_mut(self.id)
    }

    /// Detach a component from this entity. Returns `false` if absent.
    pub fn remove<T: Component>(&mut self) -> bool {
        self.scene.remove_component::<T>(self.id)
    }

    /// Returns `true` if this entity has a component of type `T`.
    #[must_use]
    pub fn has<T: Component>(&self) -> bool {
        self.scene.has_component::<T>(self.id)
    }

    /// Remove this entity and all its components from the scene.
    ///
    /// Consumes the handle. Returns `false` if the entity was already gone.
    pub fn despawn(self) -> bool {
        self.scene.remove_entity(self.id)
    }
}

impl PartialEq for Entity<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Entity<'_> {}
