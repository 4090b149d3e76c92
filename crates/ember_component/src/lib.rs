//! # ember_component
//!
//! The storage heart of the engine's ECS — defines what a component is, how
//! its metadata is registered, and how instances are stored type-erased.
//!
//! This crate provides:
//!
//! - [`Component`] trait — the contract all ECS data must satisfy.
//! - [`ComponentTypeId`] — stable FNV-1a identity derived from the type name.
//! - [`ComponentMeta`] / [`StreamMeta`] — per-type layout, destructor, and
//!   optional custom serialisation function pointers.
//! - [`registry`] — the process-wide metadata tables.
//! - [`ComponentVector`] — stride-packed, type-erased storage for all live
//!   instances of one component type.
//! - [`EntityId`] / [`EntityAllocator`] — entity identity primitives.

mod buffer;
pub mod component;
pub mod entity;
pub mod error;
pub mod registry;
pub mod vector;

pub use component::{Component, ComponentMeta, ComponentTypeId, StreamMeta};
pub use entity::{EntityAllocator, EntityId};
pub use error::ComponentError;
pub use vector::ComponentVector;
