//! Process-wide component metadata tables.
//!
//! Two tables, both keyed by [`ComponentTypeId`]: the mandatory
//! [`ComponentMeta`] table and the optional [`StreamMeta`] table for types
//! with custom serialisation. The backing storage is allocated exactly once
//! and lives for the rest of the process.
//!
//! Registration is idempotent. A scene registers types lazily the first time
//! a component is added, but deserialisation can only restore types that are
//! already registered — call [`register`] for every component type during
//! startup, before any scene file is loaded.

use std::sync::OnceLock;

use dashmap::DashMap;

use crate::component::{Component, ComponentMeta, ComponentTypeId, StreamMeta};
use crate::error::ComponentError;

struct Tables {
    metas: DashMap<ComponentTypeId, ComponentMeta>,
    streams: DashMap<ComponentTypeId, StreamMeta>,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

fn tables() -> &'static Tables {
    TABLES.get_or_init(|| Tables {
        metas: DashMap::new(),
        streams: DashMap::new(),
    })
}

/// Register a component type in the process-wide tables.
///
/// Idempotent: re-registering the same type is a no-op. The [`StreamMeta`]
/// table only gains an entry when [`Component::stream_meta`] is overridden.
pub fn register<T: Component>() {
    let t = tables();
    let meta = T::meta();
    let type_id = meta.type_id;
    t.metas.entry(type_id).or_insert(meta);
    if let Some(stream) = T::stream_meta() {
        t.streams.entry(type_id).or_insert(stream);
    }
}

/// Look up the [`ComponentMeta`] for a type id.
///
/// # Errors
///
/// Returns [`ComponentError::UnknownComponentType`] if the id was never
/// registered. This is a hard failure: callers must guarantee registration
/// happened during startup.
pub fn meta(type_id: ComponentTypeId) -> Result<ComponentMeta, ComponentError> {
    tables()
        .metas
        .get(&type_id)
        .map(|entry| entry.clone())
        .ok_or(ComponentError::UnknownComponentType(type_id))
}

/// Look up the optional [`StreamMeta`] for a type id.
///
/// Absence is not an error — it means the type round-trips as raw bytes.
#[must_use]
pub fn stream_meta(type_id: ComponentTypeId) -> Option<StreamMeta> {
    tables().streams.get(&type_id).map(|entry| *entry)
}

/// Returns `true` if the type id has a registered [`ComponentMeta`].
#[must_use]
pub fn is_registered(type_id: ComponentTypeId) -> bool {
    tables().metas.contains_key(&type_id)
}

/// Snapshot of every registered [`ComponentMeta`], for full-table walks.
#[must_use]
pub fn metas() -> Vec<ComponentMeta> {
    tables()
        .metas
        .iter()
        .map(|entry| entry.value().clone())
        .collect()
}
