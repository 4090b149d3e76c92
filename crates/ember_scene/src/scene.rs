//! The [`Scene`]: entity ownership, component orchestration, and the binary
//! scene format.
//!
//! A scene owns its entity id space, one [`ComponentVector`] per component
//! type ever attached, and a derived address cache mapping
//! `(entity, component type)` to a byte offset inside the owning vector.
//! The cache is rebuilt after every structural mutation, so
//! [`Scene::get_component`] stays O(1)-ish between mutations.
//!
//! All mutation runs on one thread; nothing here locks or suspends.

use std::collections::{BTreeMap, HashMap};

use ember_component::{
    Component, ComponentTypeId, ComponentVector, EntityAllocator, EntityId, registry,
};
use ember_stream::BinaryStream;
use tracing::{debug, trace};

use crate::components::Tag;
use crate::entity::Entity;
use crate::error::SceneError;

/// Magic bytes leading every serialised scene.
pub const SCENE_MAGIC: u32 = u32::from_le_bytes(*b"EMSC");

/// Current scene format version. Bump on any layout change.
pub const SCENE_FORMAT_VERSION: u32 = 1;

/// The entity-component store for one scene.
///
/// Render passes and the editor only read through [`Scene::get_component`]
/// and [`Scene::each_component`]; the vectors and the address cache are
/// private implementation details.
#[derive(Debug)]
pub struct Scene {
    name: String,
    allocator: EntityAllocator,
    entities: Vec<EntityId>,
    /// One vector per component type. A `BTreeMap` keeps serialisation
    /// output deterministic.
    vectors: BTreeMap<ComponentTypeId, ComponentVector>,
    /// Derived cache: entity -> component type -> record byte offset.
    /// Always rebuildable from `vectors`; byte offsets stay valid across
    /// buffer growth and are refreshed whenever records shift.
    addresses: HashMap<EntityId, HashMap<ComponentTypeId, usize>>,
}

impl Scene {
    /// Create an empty scene with a display name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            allocator: EntityAllocator::new(),
            entities: Vec::new(),
            vectors: BTreeMap::new(),
            addresses: HashMap::new(),
        }
    }

    /// The scene's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the scene.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // -- Entity lifecycle --

    /// Create a new entity with a fresh, never-recycled id.
    pub fn create_entity(&mut self) -> EntityId {
        let id = self.allocator.allocate();
        self.entities.push(id);
        self.addresses.insert(id, HashMap::new());
        trace!(entity = id.id(), "entity created");
        id
    }

    /// Create an entity and attach a [`Tag`] with the given display name.
    pub fn spawn_named(&mut self, name: &str) -> EntityId {
        let id = self.create_entity();
        // The entity was just created, so this cannot fail.
        let _ = self.add_component(id, Tag::new(name));
        id
    }

    /// Low-level: register an externally allocated entity id.
    ///
    /// No-op if the id is already present. The allocator is advanced past
    /// the id so future [`Scene::create_entity`] calls can never collide.
    pub fn add_entity(&mut self, id: EntityId) {
        if self.contains(id) {
            return;
        }
        self.entities.push(id);
        self.addresses.insert(id, HashMap::new());
        self.allocator.advance_past(id);
    }

    /// Remove an entity and every component it owns.
    ///
    /// Returns `false` (no-op) if the id is not in the scene — removal is
    /// deliberately lenient, matching the rest of the entity API.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(position) = self.entities.iter().position(|&e| e == id) else {
            return false;
        };

        // Cascade: drop the entity's records from every vector before the
        // id disappears, otherwise they would dangle unreachable.
        let mut touched = Vec::new();
        for (&type_id, vector) in &mut self.vectors {
            if vector.remove(id) {
                touched.push(type_id);
            }
        }
        for type_id in touched {
            self.rebuild_addresses(type_id);
        }

        self.entities.remove(position);
        self.addresses.remove(&id);
        trace!(entity = id.id(), "entity removed");
        true
    }

    /// Returns `true` if the id is registered in this scene.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains(&id)
    }

    /// All live entity ids, in creation order.
    #[must_use]
    pub fn entities(&self) -> &[EntityId] {
        &self.entities
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Borrow an [`Entity`] handle for convenient component access.
    pub fn entity(&mut self, id: EntityId) -> Entity<'_> {
        Entity::new(id, self)
    }

    /// Create a new entity and return its handle.
    pub fn spawn(&mut self) -> Entity<'_> {
        let id = self.create_entity();
        Entity::new(id, self)
    }

    // -- Component operations --

    /// Attach a component to an entity, returning a reference to the stored
    /// value.
    ///
    /// If the entity already has a component of this type, the old value is
    /// dropped and replaced. The component type is registered in the
    /// process-wide metadata tables on first use.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::EntityNotFound`] if the entity is not in this
    /// scene.
    pub fn add_component<T: Component>(
        &mut self,
        id: EntityId,
        value: T,
    ) -> Result<&mut T, SceneError> {
        if !self.contains(id) {
            return Err(SceneError::EntityNotFound(id));
        }
        registry::register::<T>();

        let type_id = T::component_type_id();
        let vector = self
            .vectors
            .entry(type_id)
            .or_insert_with(ComponentVector::of::<T>);
        let offset = vector.insert(id, value);

        // Appends and in-place replacement never shift other records, so
        // only this entity's cache entry needs updating.
        self.addresses
            .entry(id)
            .or_default()
            .insert(type_id, offset);
        Ok(vector.value_mut(offset))
    }

    /// Look up an entity's component of type `T`.
    ///
    /// Consults the address cache first and falls back to a linear scan of
    /// the component vector. `None` is the normal "entity has no such
    /// component" outcome, not an error.
    #[must_use]
    pub fn get_component<T: Component>(&self, id: EntityId) -> Option<&T> {
        let type_id = T::component_type_id();
        let vector = self.vectors.get(&type_id)?;
        if let Some(&offset) = self.addresses.get(&id).and_then(|map| map.get(&type_id)) {
            return Some(vector.value(offset));
        }
        vector.get(id)
    }

    /// Mutable variant of [`Scene::get_component`].
    #[must_use]
    pub fn get_component_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        let type_id = T::component_type_id();
        let vector = self.vectors.get_mut(&type_id)?;
        if let Some(&offset) = self.addresses.get(&id).and_then(|map| map.get(&type_id)) {
            return Some(vector.value_mut(offset));
        }
        vector.get_mut(id)
    }

    /// Returns `true` if the entity has a component of type `T`.
    #[must_use]
    pub fn has_component<T: Component>(&self, id: EntityId) -> bool {
        self.get_component::<T>(id).is_some()
    }

    /// Detach and drop an entity's component of type `T`.
    ///
    /// Returns `false` if the entity has no such component.
    pub fn remove_component<T: Component>(&mut self, id: EntityId) -> bool {
        let type_id = T::component_type_id();
        let Some(vector) = self.vectors.get_mut(&type_id) else {
            return false;
        };
        if !vector.remove(id) {
            return false;
        }
        // Records after the removed one shifted down one stride.
        self.rebuild_addresses(type_id);
        true
    }

    /// Visit every live component of type `T` in storage (append) order.
    ///
    /// The scene is immutably borrowed for the duration, so callbacks
    /// cannot structurally mutate the storage being walked — the compiler
    /// enforces what used to be a caller-beware rule.
    pub fn each_component<T: Component>(&self, mut f: impl FnMut(EntityId, &T)) {
        let Some(vector) = self.vectors.get(&T::component_type_id()) else {
            return;
        };
        for (entity, value) in vector.iter::<T>() {
            f(entity, value);
        }
    }

    /// Mutable variant of [`Scene::each_component`]. Field updates are
    /// allowed; structural mutation of the scene is not expressible while
    /// the iteration borrow lives.
    pub fn each_component_mut<T: Component>(&mut self, mut f: impl FnMut(EntityId, &mut T)) {
        let Some(vector) = self.vectors.get_mut(&T::component_type_id()) else {
            return;
        };
        for (entity, value) in vector.iter_mut::<T>() {
            f(entity, value);
        }
    }

    // -- Teardown --

    /// Full teardown: drop every component record (running destructors),
    /// then clear the entity list, the vectors, and the address cache.
    ///
    /// The id allocator is deliberately left running — ids stay unique for
    /// the scene's whole lifetime, and the scene remains usable.
    pub fn free(&mut self) {
        for vector in self.vectors.values_mut() {
            vector.clear();
        }
        self.vectors.clear();
        self.entities.clear();
        self.addresses.clear();
        debug!(name = %self.name, "scene freed");
    }

    // -- Serialisation --

    /// Write the whole scene to a stream.
    ///
    /// Layout: magic, format version, name, entity id list, distinct
    /// component type count, then per type its id and vector payload. See
    /// the crate documentation for the full format.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Component`] if a custom component payload
    /// fails to encode.
    pub fn serialize(&self, stream: &mut BinaryStream) -> Result<(), SceneError> {
        stream.put(SCENE_MAGIC);
        stream.put(SCENE_FORMAT_VERSION);
        stream.put_str(&self.name);

        let ids: Vec<u32> = self.entities.iter().map(|entity| entity.id()).collect();
        stream.put_list(&ids);

        stream.put(self.vectors.len() as u64);
        for (type_id, vector) in &self.vectors {
            stream.put(type_id.0);
            vector.serialize(stream)?;
        }

        debug!(
            name = %self.name,
            entities = self.entities.len(),
            component_types = self.vectors.len(),
            bytes = stream.len(),
            "scene serialised"
        );
        Ok(())
    }

    /// Replace this scene's contents with a stream written by
    /// [`Scene::serialize`].
    ///
    /// The incoming stream is parsed and validated completely before the
    /// live scene is touched; on any error the scene is left exactly as it
    /// was. On success the allocator is advanced past the highest loaded id
    /// and the address cache is rebuilt in full.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::BadHeader`] / [`SceneError::UnsupportedVersion`]
    /// for foreign streams, [`SceneError::Component`] when a stored type was
    /// never registered or its records are corrupt, and
    /// [`SceneError::Stream`] if the stream runs out.
    pub fn deserialize(&mut self, stream: &mut BinaryStream) -> Result<(), SceneError> {
        if stream.take::<u32>()? != SCENE_MAGIC {
            return Err(SceneError::BadHeader);
        }
        let version = stream.take::<u32>()?;
        if version != SCENE_FORMAT_VERSION {
            return Err(SceneError::UnsupportedVersion(version));
        }

        let name = stream.take_str()?;
        let entities: Vec<EntityId> = stream
            .take_list::<u32>()?
            .into_iter()
            .map(EntityId)
            .collect();

        let type_count = stream.take::<u64>()?;
        let mut vectors = BTreeMap::new();
        for _ in 0..type_count {
            let type_id = ComponentTypeId(stream.take::<u64>()?);
            let meta = registry::meta(type_id)?;
            let stream_meta = registry::stream_meta(type_id);
            let vector = ComponentVector::deserialize(meta, stream_meta, stream)?;
            vectors.insert(type_id, vector);
        }

        // Everything parsed — only now discard the live state.
        self.free();
        self.name = name;
        self.entities = entities;
        self.vectors = vectors;
        for index in 0..self.entities.len() {
            self.allocator.advance_past(self.entities[index]);
        }
        self.rebuild_all_addresses();

        debug!(
            name = %self.name,
            entities = self.entities.len(),
            component_types = self.vectors.len(),
            "scene deserialised"
        );
        Ok(())
    }

    // -- Address cache --

    /// Recompute the cached byte offsets for one component type.
    fn rebuild_addresses(&mut self, type_id: ComponentTypeId) {
        for map in self.addresses.values_mut() {
            map.remove(&type_id);
        }
        if let Some(vector) = self.vectors.get(&type_id) {
            for (entity, offset) in vector.offsets() {
                self.addresses.entry(entity).or_default().insert(type_id, offset);
            }
        }
    }

    /// Recompute the whole address cache from the component vectors.
    fn rebuild_all_addresses(&mut self) {
        self.addresses.clear();
        for &entity in &self.entities {
            self.addresses.insert(entity, HashMap::new());
        }
        for vector in self.vectors.values() {
            let type_id = vector.type_id();
            for (entity, offset) in vector.offsets() {
                self.addresses.entry(entity).or_default().insert(type_id, offset);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::components::{PointLight, Transform};

    #[test]
    fn test_entity_ids_unique_and_increasing() {
        let mut scene = Scene::new("test");
        let mut previous = 0;
        for _ in 0..64 {
            let id = scene.create_entity();
            assert!(id.is_valid());
            assert!(id.id() > previous);
            previous = id.id();
        }
    }

    #[test]
    fn test_component_roundtrip() {
        let mut scene = Scene::new("test");
        let player = scene.create_entity();
        scene
            .add_component(player, Transform::from_position(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();

        let transform = scene.get_component::<Transform>(player).unwrap();
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_add_component_to_missing_entity() {
        let mut scene = Scene::new("test");
        let result = scene.add_component(EntityId(99), Transform::default());
        assert!(matches!(result, Err(SceneError::EntityNotFound(id)) if id.id() == 99));
    }

    #[test]
    fn test_add_replaces_existing_component() {
        let mut scene = Scene::new("test");
        let e = scene.create_entity();
        scene.add_component(e, Tag::new("old")).unwrap();
        scene.add_component(e, Tag::new("new")).unwrap();

        assert_eq!(scene.get_component::<Tag>(e).unwrap().name, "new");
        let mut visits = 0;
        scene.each_component::<Tag>(|_, _| visits += 1);
        assert_eq!(visits, 1);
    }

    #[test]
    fn test_get_component_mut_writes_through() {
        let mut scene = Scene::new("test");
        let e = scene.create_entity();
        scene.add_component(e, Transform::default()).unwrap();

        scene.get_component_mut::<Transform>(e).unwrap().position = Vec3::splat(4.0);
        assert_eq!(
            scene.get_component::<Transform>(e).unwrap().position,
            Vec3::splat(4.0)
        );
    }

    #[test]
    fn test_remove_component() {
        let mut scene = Scene::new("test");
        let e1 = scene.create_entity();
        let e2 = scene.create_entity();
        scene.add_component(e1, PointLight::default()).unwrap();
        scene.add_component(e2, PointLight::default()).unwrap();

        assert!(scene.remove_component::<PointLight>(e1));
        assert!(!scene.remove_component::<PointLight>(e1));

        assert!(scene.get_component::<PointLight>(e1).is_none());
        let mut visited = Vec::new();
        scene.each_component::<PointLight>(|entity, _| visited.push(entity));
        assert_eq!(visited, vec![e2]);
    }

    #[test]
    fn test_address_cache_consistent_after_shifting_removal() {
        let mut scene = Scene::new("test");
        let entities: Vec<_> = (0..4).map(|_| scene.create_entity()).collect();
        for (index, &e) in entities.iter().enumerate() {
            scene
                .add_component(e, Transform::from_position(Vec3::splat(index as f32)))
                .unwrap();
        }

        // Removing an early record shifts every later record down.
        assert!(scene.remove_component::<Transform>(entities[0]));

        for (index, &e) in entities.iter().enumerate().skip(1) {
            let transform = scene.get_component::<Transform>(e).unwrap();
            assert_eq!(transform.position, Vec3::splat(index as f32));
        }
    }

    #[test]
    fn test_each_component_visits_all_lights() {
        let mut scene = Scene::new("test");
        for index in 0..4 {
            let e = scene.create_entity();
            scene
                .add_component(e, PointLight::new(Vec3::splat(index as f32), index as f32))
                .unwrap();
        }

        let mut visited = Vec::new();
        scene.each_component::<PointLight>(|entity, light| {
            visited.push((entity.id(), light.intensity));
        });
        assert_eq!(visited, vec![(1, 0.0), (2, 1.0), (3, 2.0), (4, 3.0)]);
    }

    #[test]
    fn test_each_component_mut_updates_fields() {
        let mut scene = Scene::new("test");
        for _ in 0..3 {
            let e = scene.create_entity();
            scene.add_component(e, PointLight::default()).unwrap();
        }

        scene.each_component_mut::<PointLight>(|_, light| light.intensity = 0.25);
        scene.each_component::<PointLight>(|_, light| assert_eq!(light.intensity, 0.25));
    }

    #[test]
    fn test_remove_entity_cascades_to_components() {
        let mut scene = Scene::new("test");
        let e1 = scene.create_entity();
        let e2 = scene.create_entity();
        scene.add_component(e1, Tag::new("doomed")).unwrap();
        scene.add_component(e1, Transform::default()).unwrap();
        scene.add_component(e2, Transform::default()).unwrap();

        assert!(scene.remove_entity(e1));
        assert!(!scene.contains(e1));
        assert!(scene.get_component::<Tag>(e1).is_none());
        assert!(scene.get_component::<Transform>(e1).is_none());

        let mut visited = Vec::new();
        scene.each_component::<Transform>(|entity, _| visited.push(entity));
        assert_eq!(visited, vec![e2]);
    }

    #[test]
    fn test_remove_missing_entity_is_lenient() {
        let mut scene = Scene::new("test");
        assert!(!scene.remove_entity(EntityId(123)));
    }

    #[test]
    fn test_free_then_empty_and_reusable() {
        let mut scene = Scene::new("test");
        let before = scene.create_entity();
        scene.add_component(before, Tag::new("gone")).unwrap();

        scene.free();

        let mut visits = 0;
        scene.each_component::<Tag>(|_, _| visits += 1);
        assert_eq!(visits, 0);
        assert_eq!(scene.entity_count(), 0);

        // The scene stays usable and ids keep increasing.
        let after = scene.create_entity();
        assert!(after.id() > before.id());
    }

    #[test]
    fn test_scene_serialization_roundtrip() {
        let mut scene = Scene::new("Main Scene");
        let player = scene.create_entity();
        scene.add_component(player, Tag::new("Player")).unwrap();
        scene
            .add_component(player, Transform::from_position(Vec3::new(1.0, 2.0, 3.0)))
            .unwrap();
        let lamp = scene.create_entity();
        scene
            .add_component(lamp, PointLight::new(Vec3::new(1.0, 0.9, 0.8), 5.0))
            .unwrap();

        let mut stream = BinaryStream::new();
        scene.serialize(&mut stream).unwrap();
        stream.seek(0).unwrap();

        let mut restored = Scene::new("empty");
        restored.deserialize(&mut stream).unwrap();

        assert_eq!(restored.name(), "Main Scene");
        assert_eq!(restored.entities(), scene.entities());
        assert_eq!(restored.get_component::<Tag>(player).unwrap().name, "Player");
        assert_eq!(
            restored.get_component::<Transform>(player).unwrap().position,
            Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(
            restored.get_component::<PointLight>(lamp).unwrap().intensity,
            5.0
        );
    }

    #[test]
    fn test_allocator_continues_after_deserialize() {
        let mut scene = Scene::new("source");
        for _ in 0..3 {
            scene.create_entity();
        }
        let mut stream = BinaryStream::new();
        scene.serialize(&mut stream).unwrap();
        stream.seek(0).unwrap();

        let mut restored = Scene::new("target");
        restored.deserialize(&mut stream).unwrap();
        let fresh = restored.create_entity();
        assert!(fresh.id() > 3);
        assert!(!scene.entities().contains(&fresh));
    }

    #[test]
    fn test_deserialize_bad_magic_leaves_scene_intact() {
        let mut scene = Scene::new("live");
        let e = scene.create_entity();
        scene.add_component(e, Tag::new("survivor")).unwrap();

        let mut stream = BinaryStream::new();
        stream.put(0xDEAD_BEEFu32);
        stream.put(1u32);
        stream.seek(0).unwrap();

        assert!(matches!(
            scene.deserialize(&mut stream),
            Err(SceneError::BadHeader)
        ));
        assert_eq!(scene.get_component::<Tag>(e).unwrap().name, "survivor");
    }

    #[test]
    fn test_deserialize_unsupported_version() {
        let mut scene = Scene::new("live");
        let mut stream = BinaryStream::new();
        stream.put(SCENE_MAGIC);
        stream.put(99u32);
        stream.seek(0).unwrap();

        assert!(matches!(
            scene.deserialize(&mut stream),
            Err(SceneError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_deserialize_unregistered_component_type() {
        let mut stream = BinaryStream::new();
        stream.put(SCENE_MAGIC);
        stream.put(SCENE_FORMAT_VERSION);
        stream.put_str("foreign");
        stream.put_list::<u32>(&[1]);
        stream.put(1u64); // one component type follows
        stream.put(0x1234_5678_9ABC_DEF0u64); // never registered
        stream.put_bytes(&[]);
        stream.seek(0).unwrap();

        let mut scene = Scene::new("live");
        let survivor = scene.create_entity();

        let result = scene.deserialize(&mut stream);
        assert!(matches!(
            result,
            Err(SceneError::Component(
                ember_component::ComponentError::UnknownComponentType(_)
            ))
        ));
        // Validation failed before the live state was discarded.
        assert!(scene.contains(survivor));
    }

    #[test]
    fn test_spawn_named_attaches_tag() {
        let mut scene = Scene::new("test");
        let id = scene.spawn_named("Camera");
        assert_eq!(scene.get_component::<Tag>(id).unwrap().name, "Camera");
    }
}
