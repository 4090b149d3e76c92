//! Built-in components consumed by the render passes and the editor.
//!
//! [`Transform`] and the lights are plain-old-data and round-trip as raw
//! record bytes; [`Tag`] owns a heap string and opts into custom
//! MessagePack streaming.

pub mod light;
pub mod tag;
pub mod transform;

pub use light::{DirectionalLight, PointLight};
pub use tag::Tag;
pub use transform::Transform;

use ember_component::registry;

/// Register every built-in component type in the process-wide metadata
/// tables.
///
/// Call once during startup, before any scene file is deserialised. Adding
/// components through [`Scene::add_component`](crate::Scene::add_component)
/// also registers their types, but a loader cannot rely on that having
/// happened.
pub fn register_builtin() {
    registry::register::<Tag>();
    registry::register::<Transform>();
    registry::register::<PointLight>();
    registry::register::<DirectionalLight>();
}
