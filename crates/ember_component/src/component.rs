//! Core [`Component`] trait and associated metadata.
//!
//! Every piece of data attached to an entity must implement [`Component`].
//! The trait requires `Send + Sync + 'static` so components can be stored in
//! type-erased buffers and shared with render passes safely.
//!
//! ## Stable Type Identity
//!
//! [`ComponentTypeId`] is derived from the component's **string name** using
//! the FNV-1a 64-bit hash algorithm. This is deterministic across builds and
//! toolchains, which makes it safe to embed in scene files — unlike a runtime
//! type hash, the same declared name always yields the same ID.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::entity::EntityId;

/// A unique identifier for a component type, derived from its string name
/// using the FNV-1a 64-bit hash algorithm.
///
/// The ID is deterministic: any build that hashes the same UTF-8 name bytes
/// produces the same `ComponentTypeId`, so scene files written by one binary
/// can be read by another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] from a component's string name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentTypeId`] for a component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        Self::from_name(T::type_name())
    }
}

/// Metadata about a component type, used for type-erased storage.
///
/// One `ComponentMeta` exists per distinct component type; it carries
/// everything a [`ComponentVector`](crate::vector::ComponentVector) needs to
/// manage records without knowing the Rust type: the memory layout, the
/// destructor, and the derived record geometry.
#[derive(Debug, Clone)]
pub struct ComponentMeta {
    /// The unique type identifier.
    pub type_id: ComponentTypeId,
    /// The human-readable name of the component (e.g. `"Transform"`).
    pub name: &'static str,
    /// Memory layout of one component value.
    pub layout: std::alloc::Layout,
    /// Function pointer to drop a component value in-place.
    pub drop_fn: Option<unsafe fn(*mut u8)>,
}

impl ComponentMeta {
    /// Size in bytes of the owner-id header that leads every record.
    pub const HEADER_SIZE: usize = size_of::<EntityId>();

    /// Byte size of one component value.
    #[must_use]
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    /// Offset of the component value within a record. The owner id comes
    /// first; the value starts at the next boundary its alignment allows.
    #[must_use]
    pub fn value_offset(&self) -> usize {
        Self::HEADER_SIZE.next_multiple_of(self.layout.align())
    }

    /// Total byte size of one record: header, padding, value, and trailing
    /// padding so consecutive records keep the value aligned.
    #[must_use]
    pub fn stride(&self) -> usize {
        (self.value_offset() + self.size()).next_multiple_of(self.layout.align().max(Self::HEADER_SIZE))
    }
}

/// Custom (de)serialisation entry points for a component type.
///
/// Present only for types whose values cannot round-trip as raw bytes —
/// anything owning heap data or variable-length fields. Both functions work
/// on the raw in-record value bytes so the storage layer never needs the
/// concrete type.
#[derive(Debug, Clone, Copy)]
pub struct StreamMeta {
    /// Serialise one component value (given as its in-record bytes) to
    /// MessagePack.
    pub encode: fn(&[u8]) -> Result<Vec<u8>, rmp_serde::encode::Error>,
    /// Deserialise one component value from MessagePack, returning the bytes
    /// of a freshly constructed value ready to be copied into a record.
    pub decode: fn(&[u8]) -> Result<Vec<u8>, rmp_serde::decode::Error>,
}

impl StreamMeta {
    /// Build the [`StreamMeta`] for a serde-capable component type.
    #[must_use]
    pub fn of<T: Component + Serialize + DeserializeOwned>() -> Self {
        Self {
            encode: |bytes: &[u8]| {
                assert!(bytes.len() >= size_of::<T>());
                // SAFETY: the caller passes the bytes of a live `T`. The
                // unaligned read is a bitwise copy with no alignment
                // requirement; `ManuallyDrop` keeps the copy from dropping
                // the original's heap resources.
                let value = unsafe { std::ptr::read_unaligned(bytes.as_ptr() as *const T) };
                let value = std::mem::ManuallyDrop::new(value);
                rmp_serde::to_vec_named(&*value)
            },
            decode: |bytes: &[u8]| {
                let value: T = rmp_serde::from_slice(bytes)?;
                let mut result = vec![0u8; size_of::<T>()];
                // SAFETY: the buffer is exactly `size_of::<T>()` bytes. A
                // `Vec<u8>` makes no alignment promise, so the write is
                // unaligned; ownership of the value's resources moves into
                // the bytes.
                unsafe {
                    std::ptr::write_unaligned(result.as_mut_ptr() as *mut T, value);
                }
                Ok(result)
            },
        }
    }
}

/// The core component trait.
///
/// Components without a [`StreamMeta`] are persisted and restored as raw
/// byte copies of their records, so they must be plain-old-data: no heap
/// pointers, no GPU handles that need re-creation, no interior mutability.
/// Types that own heap data (strings, vectors) must override
/// [`Component::stream_meta`] to opt into custom serialisation.
///
/// # Examples
///
/// ```rust
/// use ember_component::Component;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Sized + Send + Sync + 'static {
    /// A human-readable name for this component type. Must be unique across
    /// the whole engine — it is the source of the type's identity.
    fn type_name() -> &'static str;

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }

    /// Returns the [`ComponentMeta`] descriptor for this component type.
    fn meta() -> ComponentMeta {
        ComponentMeta {
            type_id: Self::component_type_id(),
            name: Self::type_name(),
            layout: std::alloc::Layout::new::<Self>(),
            drop_fn: if std::mem::needs_drop::<Self>() {
                Some(|ptr: *mut u8| unsafe {
                    std::ptr::drop_in_place(ptr as *mut Self);
                })
            } else {
                None
            },
        }
    }

    /// Custom serialisation entry points, if this type needs them.
    ///
    /// The default is `None`: the type is treated as plain-old-data and its
    /// records round-trip as raw bytes.
    fn stream_meta() -> Option<StreamMeta> {
        None
    }
}
