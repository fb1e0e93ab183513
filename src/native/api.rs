//! The primitive-marshaling surface of the native runtime.
//!
//! Every call passes handles as fixed-width integers, scalars by value and
//! bulk data through pre-sized linear buffers. The concrete runtime is
//! injected as a [`NativeApi`] implementation; [`crate::mock::MockNative`]
//! is the in-memory one used by the test suites.

use std::io::{Read, Write};

use super::handle::NativeHandle;

// Runtime type tags, as reported by `NativeApi::type_tag`.
pub const TAG_SPHERE: u32 = 1;
pub const TAG_BOX: u32 = 2;
pub const TAG_CAPSULE: u32 = 3;
pub const TAG_CYLINDER: u32 = 4;
pub const TAG_CONVEX_HULL: u32 = 5;
pub const TAG_MESH: u32 = 6;
pub const TAG_HEIGHT_FIELD: u32 = 7;
pub const TAG_COMPOUND: u32 = 8;

/// Element layout for batch reads.
///
/// Each element occupies `stride()` interleaved floats in the output buffer,
/// so a batch of N elements needs a buffer of at least `stride() * N` floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchElement {
    /// Interleaved 3-vectors (positions, velocities), 3 floats per element.
    Vector3,
    /// Quaternions, 4 floats per element.
    Quaternion,
    /// Column-major 4x4 matrices, 16 floats per element.
    Matrix4,
}

impl BatchElement {
    /// Floats occupied by one element.
    #[inline]
    pub const fn stride(self) -> usize {
        match self {
            BatchElement::Vector3 => 3,
            BatchElement::Quaternion => 4,
            BatchElement::Matrix4 => 16,
        }
    }
}

/// The calls this crate forwards to the native runtime.
///
/// The runtime owns all reference-count arithmetic: "copy" operations
/// increment the target's intrusive count and hand back a fresh reference
/// slot, "release" decrements and frees the target when the count reaches
/// zero (unless the target was marked embedded). Handles passed to any
/// method other than the `restore_state` output must be valid; passing the
/// zero sentinel where an object is required is a caller bug the runtime
/// would turn into a null dereference.
///
/// Implementations must be safe to call from finalization or cleanup
/// machinery running concurrently with application threads, hence the
/// `Send + Sync` bound.
pub trait NativeApi: Send + Sync {
    /// Destroy a solely-owned (non-refcounted) object.
    fn free_object(&self, handle: NativeHandle);

    /// Allocate an empty reference slot. The caller owns the returned slot.
    fn ref_create(&self) -> NativeHandle;

    /// Increment `target`'s count and return a new reference slot pointing
    /// at it.
    fn ref_from_target(&self, target: NativeHandle) -> NativeHandle;

    /// Increment the count of the object `slot` points at and return a new,
    /// independently-releasable slot at the same target. The returned slot
    /// is not necessarily numerically equal to `slot`.
    fn ref_copy(&self, slot: NativeHandle) -> NativeHandle;

    /// Destroy `slot`, decrementing its target's count. Frees the target
    /// when the count reaches zero and the target is not embedded.
    fn ref_release(&self, slot: NativeHandle);

    /// Resolve `slot` to the handle of the object it currently points at.
    /// Returns the zero sentinel for an empty slot. No ownership transfer:
    /// the result is only valid for the duration of the enclosing call.
    fn ref_target(&self, slot: NativeHandle) -> NativeHandle;

    /// Reseat `slot`: increment `target` (if non-zero), decrement the old
    /// target, point the slot at `target`.
    fn ref_set_target(&self, slot: NativeHandle, target: NativeHandle);

    /// Current intrusive count of `target`. Diagnostics and tests only; the
    /// value is stale the moment it is returned.
    fn ref_count(&self, target: NativeHandle) -> u32;

    /// Mark `target` as owned by enclosing storage: decrements never free it.
    fn set_embedded(&self, target: NativeHandle);

    /// Runtime type tag of the object behind `handle`.
    fn type_tag(&self, handle: NativeHandle) -> u32;

    /// No-op liveness query. Test and diagnostic use only.
    fn is_alive(&self, handle: NativeHandle) -> bool;

    /// Bulk read of interleaved components for the given element indices of
    /// `handle` into `out`. `out` must hold at least
    /// `element.stride() * indices.len()` floats; the safe wrappers check
    /// this before the call is issued.
    fn batch_get(
        &self,
        handle: NativeHandle,
        element: BatchElement,
        indices: &[u32],
        out: &mut [f32],
    );

    /// Serialize the object behind `handle` to `writer`. The wire format is
    /// the runtime's own and is opaque to this crate.
    fn save_state(&self, handle: NativeHandle, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Deserialize one object from `reader`. Returns the zero sentinel when
    /// the runtime rejects the stream contents; I/O failure on the reader
    /// itself is an `Err`.
    fn restore_state(&self, reader: &mut dyn Read) -> std::io::Result<NativeHandle>;
}
