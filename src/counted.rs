//! Counted references mirroring the native intrusive reference count.
//!
//! [`Counted`] is one refcounted-handle core instantiated twice: the native
//! runtime distinguishes mutable-target references from immutable-target
//! ones, modeled here by the sealed [`Capability`] marker instead of two
//! duplicated wrapper types. [`Ref`] narrows to [`RefConst`]; there is no
//! path back.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::native::{NativeApi, NativeHandle};
use crate::view::TargetView;

mod sealed {
    pub trait Sealed {}
}

/// Marker for what a reference lets you do with its target.
pub trait Capability: sealed::Sealed + Send + Sync + 'static {}

/// Mutable-target capability.
pub enum Mutable {}

/// Read-only-target capability.
pub enum ReadOnly {}

impl sealed::Sealed for Mutable {}
impl sealed::Sealed for ReadOnly {}
impl Capability for Mutable {}
impl Capability for ReadOnly {}

/// Shared, mutable-target reference. Copying increments the native count;
/// dropping decrements it.
pub type Ref = Counted<Mutable>;

/// Shared, read-only-target reference.
pub type RefConst = Counted<ReadOnly>;

/// Host-side proxy for one native reference slot.
///
/// The native runtime owns the count arithmetic: every copy operation here
/// asks it to increment and hands back a fresh, independently-releasable
/// slot, and `Drop` asks it to decrement (freeing the target at zero unless
/// the target was marked embedded). This wrapper assumes single-writer
/// discipline per slot and never consults the count to make ownership
/// decisions — the count is stale the moment it is read.
pub struct Counted<C: Capability> {
    api: Arc<dyn NativeApi>,
    slot: NativeHandle,
    _cap: PhantomData<C>,
}

impl<C: Capability> Counted<C> {
    /// Allocate a fresh, empty reference slot.
    pub fn create(api: Arc<dyn NativeApi>) -> Self {
        let slot = api.ref_create();
        Self::adopt_slot(api, slot)
    }

    /// Take ownership of an existing reference slot.
    pub(crate) fn adopt_slot(api: Arc<dyn NativeApi>, slot: NativeHandle) -> Self {
        assert!(slot.is_valid(), "counted reference requires a non-null slot");
        Self {
            api,
            slot,
            _cap: PhantomData,
        }
    }

    /// The handle of the reference slot itself (not of its target).
    #[inline]
    pub fn slot(&self) -> NativeHandle {
        self.slot
    }

    /// Resolve the current target into a call-scoped view.
    ///
    /// Resolution happens on every call; nothing is cached, so reseating the
    /// reference is visible to the next `target()`. The view is null when
    /// the slot is empty.
    pub fn target(&self) -> TargetView<'_, C> {
        TargetView::new(&self.api, self.api.ref_target(self.slot))
    }

    /// Copy this reference as read-only: the native count is incremented and
    /// the result must be separately released.
    pub fn to_ref_const(&self) -> RefConst {
        let slot = self.api.ref_copy(self.slot);
        RefConst::adopt_slot(Arc::clone(&self.api), slot)
    }

    /// Reseat this reference onto the target of `other`, incrementing the
    /// new target and decrementing the old one.
    pub fn reseat(&mut self, other: &TargetView<'_, C>) {
        self.api.ref_set_target(self.slot, other.handle());
    }

    /// Current native count of the target. Diagnostics and tests only.
    pub fn ref_count(&self) -> u32 {
        let target = self.api.ref_target(self.slot);
        if !target.is_valid() {
            return 0;
        }
        self.api.ref_count(target)
    }

    /// Mark the target as owned by enclosing storage. From then on the
    /// runtime never frees it through refcounting; decrements on remaining
    /// references become count bookkeeping only.
    pub fn mark_embedded(&self) {
        let target = self.api.ref_target(self.slot);
        assert!(target.is_valid(), "cannot embed an empty reference");
        self.api.set_embedded(target);
    }
}

impl Ref {
    /// Copy this reference, keeping the mutable capability.
    pub fn to_ref(&self) -> Ref {
        let slot = self.api.ref_copy(self.slot);
        Ref::adopt_slot(Arc::clone(&self.api), slot)
    }

    /// Narrow to a read-only reference. The count is unchanged overall: the
    /// copy's increment and this reference's release cancel out.
    pub fn into_const(self) -> RefConst {
        let c = self.to_ref_const();
        drop(self);
        c
    }
}

impl From<Ref> for RefConst {
    fn from(r: Ref) -> Self {
        r.into_const()
    }
}

impl<C: Capability> Drop for Counted<C> {
    fn drop(&mut self) {
        self.api.ref_release(self.slot);
    }
}
