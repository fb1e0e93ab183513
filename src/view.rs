//! Call-scoped views of resolved native objects.

use std::sync::Arc;

use crate::counted::{Capability, Mutable, Ref, RefConst};
use crate::native::{NativeApi, NativeHandle};

/// A short-lived, non-owning view of a resolved native object.
///
/// A view carries no release action and no keep-alive of its own; it is
/// valid only while the reference (or wrapper) it was drawn from is, which
/// the borrow in `'a` enforces at compile time. The target may be released
/// by its true owner on the next reference-count decrement, so a view must
/// not be smuggled past the call that produced it — and the lifetime makes
/// that unrepresentable rather than a documented obligation.
///
/// The capability marker mirrors the source: a view drawn from a
/// [`RefConst`] is read-only and cannot be promoted to a mutable [`Ref`].
pub struct TargetView<'a, C: Capability = Mutable> {
    api: &'a Arc<dyn NativeApi>,
    handle: NativeHandle,
    _cap: std::marker::PhantomData<C>,
}

impl<'a, C: Capability> TargetView<'a, C> {
    pub(crate) fn new(api: &'a Arc<dyn NativeApi>, handle: NativeHandle) -> Self {
        Self {
            api,
            handle,
            _cap: std::marker::PhantomData,
        }
    }

    /// The resolved handle. Zero when the source reference was empty.
    #[inline]
    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    /// Whether the view resolved to no object.
    #[inline]
    pub fn is_null(&self) -> bool {
        !self.handle.is_valid()
    }

    /// Runtime type tag of the viewed object.
    pub fn type_tag(&self) -> u32 {
        assert!(self.handle.is_valid(), "type tag of null view");
        self.api.type_tag(self.handle)
    }

    /// Promote this view to an independently-owned read-only reference.
    ///
    /// This is the sanctioned escape hatch from borrowed to owned: the
    /// native count is incremented and the result must be separately
    /// released (which its `Drop` does).
    pub fn to_ref_const(&self) -> RefConst {
        assert!(self.handle.is_valid(), "cannot take a reference to a null view");
        let slot = self.api.ref_from_target(self.handle);
        RefConst::adopt_slot(Arc::clone(self.api), slot)
    }
}

impl<'a> TargetView<'a, Mutable> {
    /// Promote this view to an independently-owned mutable reference.
    pub fn to_ref(&self) -> Ref {
        assert!(self.handle.is_valid(), "cannot take a reference to a null view");
        let slot = self.api.ref_from_target(self.handle);
        Ref::adopt_slot(Arc::clone(self.api), slot)
    }
}
