//! Alignment-aware backing storage for component records.
//!
//! A `Vec<u8>` only guarantees alignment 1, which is not enough to hand out
//! `&T` references into record slots: the record geometry is computed
//! relative to the buffer base, so the base itself must honour the
//! component's alignment. This buffer allocates with an explicit alignment
//! and keeps it across every growth.

use std::alloc::{self, Layout};
use std::ptr::NonNull;

pub(crate) struct AlignedBytes {
    ptr: NonNull<u8>,
    len: usize,
    capacity: usize,
    align: usize,
}

// SAFETY: the buffer owns its allocation outright and exposes no interior
// mutability; the records stored in it are `Component` values, which are
// `Send + Sync` by trait bound.
unsafe impl Send for AlignedBytes {}
unsafe impl Sync for AlignedBytes {}

impl AlignedBytes {
    /// Create an empty buffer whose base address will honour `align`.
    ///
    /// `align` must be a power of two (it comes from a `Layout`).
    pub(crate) fn new(align: usize) -> Self {
        // SAFETY: `align` is a nonzero power of two, so the dangling
        // pointer is non-null and well aligned.
        let ptr = unsafe { NonNull::new_unchecked(std::ptr::without_provenance_mut(align)) };
        Self {
            ptr,
            len: 0,
            capacity: 0,
            align,
        }
    }

    /// Copy `bytes` into a fresh buffer whose base honours `align`.
    pub(crate) fn from_bytes(align: usize, bytes: &[u8]) -> Self {
        let mut buffer = Self::new(align);
        buffer.grow_zeroed(bytes.len());
        buffer.as_mut_slice().copy_from_slice(bytes);
        buffer
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn as_ptr(&self) -> *const u8 {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        // SAFETY: the first `len` bytes are initialised.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: the first `len` bytes are initialised.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Extend the buffer by `additional` zeroed bytes.
    pub(crate) fn grow_zeroed(&mut self, additional: usize) {
        let new_len = self.len + additional;
        if new_len > self.capacity {
            self.reallocate(new_len.max(self.capacity * 2));
        }
        // SAFETY: capacity covers `new_len`; the tail region is owned and
        // about to become initialised.
        unsafe {
            std::ptr::write_bytes(self.ptr.as_ptr().add(self.len), 0, additional);
        }
        self.len = new_len;
    }

    /// Remove the bytes in `start..end`, shifting the tail down.
    pub(crate) fn remove_range(&mut self, start: usize, end: usize) {
        assert!(start <= end && end <= self.len);
        // SAFETY: source and destination lie inside the initialised region;
        // `copy` handles the overlap.
        unsafe {
            std::ptr::copy(
                self.ptr.as_ptr().add(end),
                self.ptr.as_ptr().add(start),
                self.len - end,
            );
        }
        self.len -= end - start;
    }

    /// Forget the contents. Capacity is retained.
    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }

    fn reallocate(&mut self, new_capacity: usize) {
        let new_layout = Layout::from_size_align(new_capacity, self.align)
            .expect("record buffer capacity overflow");
        // SAFETY: growth is only requested for a larger length, so the
        // layout has non-zero size.
        let raw = unsafe { alloc::alloc(new_layout) };
        let Some(new_ptr) = NonNull::new(raw) else {
            alloc::handle_alloc_error(new_layout);
        };
        // SAFETY: the old initialised bytes fit in the new allocation and
        // the regions are distinct.
        unsafe {
            std::ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), self.len);
        }
        self.release();
        self.ptr = new_ptr;
        self.capacity = new_capacity;
    }

    fn release(&mut self) {
        if self.capacity == 0 {
            return;
        }
        // SAFETY: `ptr` was allocated with exactly this size and alignment.
        unsafe {
            alloc::dealloc(
                self.ptr.as_ptr(),
                Layout::from_size_align_unchecked(self.capacity, self.align),
            );
        }
    }
}

impl Drop for AlignedBytes {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for AlignedBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBytes")
            .field("len", &self.len)
            .field("align", &self.align)
            .finish()
    }
}
