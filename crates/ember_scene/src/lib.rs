//! Scene container and built-in components.
//!
//! A [`Scene`] owns a set of entities and their components, backed by one
//! densely packed [`ComponentVector`](ember_component::ComponentVector) per
//! component type. Entities are plain u32 ids handed out by the scene; the
//! [`Entity`] handle wraps an id together with a scene borrow for ergonomic
//! chained access.
//!
//! # Scene file format
//!
//! [`Scene::serialize`] writes a little-endian binary stream:
//!
//! ```text
//! u32                magic "EMSC"
//! u32                format version (currently 1)
//! string             scene name (u64 length + UTF-8 bytes)
//! list<u32>          live entity ids (u64 count + ids)
//! u64                component type count
//! per type:
//!   u64              component type id (FNV-1a of the type name)
//!   bytes            raw record blob (u64 length + bytes; value slots are
//!                    zeroed when the type streams custom payloads)
//!   per record, if the type streams custom payloads:
//!     bytes          MessagePack value (u64 length + bytes)
//! ```
//!
//! Component types are written in ascending type-id order, so the same scene
//! always produces the same bytes. Loading validates the header, the blob
//! stride, and that every type id is registered before any live state is
//! replaced; on error the current scene contents are left untouched.
//!
//! ```no_run
//! use ember_scene::{Scene, components};
//! use glam::Vec3;
//!
//! components::register_builtin();
//!
//! let mut scene = Scene::new("level_1");
//! let player = scene.spawn_named("Player");
//! scene
//!     .add_component(player, components::Transform::from_position(Vec3::ZERO))
//!     .unwrap();
//! ```

pub mod components;
pub mod entity;
pub mod error;
pub mod scene;

pub use ember_component::{Component, ComponentTypeId, EntityId};
pub use entity::Entity;
pub use error::SceneError;
pub use scene::{SCENE_FORMAT_VERSION, SCENE_MAGIC, Scene};
