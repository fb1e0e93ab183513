//! Batch accessors over pre-sized linear buffers.
//!
//! Batch calls move N elements per boundary crossing. The output buffer is
//! caller-supplied and its capacity is a precondition, checked here before
//! any native call is issued: a short buffer is a programming error, not a
//! recoverable one.

use crate::bridge::Bridge;
use crate::native::BatchElement;
use crate::owned::Owned;

impl Bridge {
    /// Read interleaved components for `indices.len()` elements of `src`
    /// into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out` holds fewer than `element.stride() * indices.len()`
    /// floats, before anything crosses the boundary.
    pub fn batch_get(
        &self,
        src: &Owned,
        element: BatchElement,
        indices: &[u32],
        out: &mut [f32],
    ) {
        let need = element
            .stride()
            .checked_mul(indices.len())
            .expect("batch element count overflow");
        assert!(
            out.len() >= need,
            "output buffer holds {} floats, need at least {} for {} elements",
            out.len(),
            need,
            indices.len()
        );
        self.api
            .batch_get(src.handle(), element, indices, &mut out[..need]);
    }
}
