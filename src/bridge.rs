//! Entry point tying the safe wrappers to a native runtime.

use std::sync::Arc;

use crate::counted::{Ref, RefConst};
use crate::native::{NativeApi, NativeHandle};
use crate::owned::{KeepAlive, Owned, ReleaseAction};

/// Handle factory for one native runtime.
///
/// A `Bridge` owns the shared [`NativeApi`] and stamps out the wrapper types
/// around handles the runtime returns. Cloning is cheap (one `Arc` bump) and
/// every wrapper keeps its own clone, so the runtime stays reachable for as
/// long as any handle to it exists.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use px::{mock::MockNative, Bridge};
///
/// let native = Arc::new(MockNative::new());
/// let bridge = Bridge::new(native.clone());
///
/// let body = bridge.adopt(native.alloc_object(px::native::TAG_SPHERE));
/// assert!(body.owns());
/// drop(body); // frees the native object, exactly once
/// assert_eq!(native.live_objects(), 0);
/// ```
#[derive(Clone)]
pub struct Bridge {
    pub(crate) api: Arc<dyn NativeApi>,
}

impl Bridge {
    /// Wrap a native runtime.
    pub fn new(api: Arc<dyn NativeApi>) -> Self {
        Self { api }
    }

    /// The underlying runtime surface.
    pub fn api(&self) -> &Arc<dyn NativeApi> {
        &self.api
    }

    /// Wrap a handle the caller is documented as the new owner of; the
    /// returned wrapper frees it at end of life.
    pub fn adopt(&self, handle: NativeHandle) -> Owned {
        Owned::owned(Arc::clone(&self.api), handle)
    }

    /// Like [`Bridge::adopt`], but pin `anchor` for the wrapper's lifetime.
    /// Use this when `handle` indexes into, or was added to, the object the
    /// anchor wraps.
    pub fn adopt_pinned(&self, handle: NativeHandle, anchor: KeepAlive) -> Owned {
        Owned::owned(Arc::clone(&self.api), handle).pinned_to(anchor)
    }

    /// Wrap a handle with a caller-supplied release action.
    pub fn adopt_with_release(&self, handle: NativeHandle, release: ReleaseAction) -> Owned {
        Owned::with_release(Arc::clone(&self.api), handle, release)
    }

    /// Wrap a handle owned elsewhere; the wrapper never releases it.
    pub fn borrow(&self, handle: NativeHandle) -> Owned {
        Owned::borrowed(Arc::clone(&self.api), handle)
    }

    /// Wrap a reference slot the caller newly owns, e.g. one a runtime
    /// query allocated on the caller's behalf; dropping the wrapper
    /// releases the slot, decrementing its target.
    pub fn adopt_ref(&self, slot: NativeHandle) -> Ref {
        Ref::adopt_slot(Arc::clone(&self.api), slot)
    }

    /// Read-only flavor of [`Bridge::adopt_ref`].
    pub fn adopt_ref_const(&self, slot: NativeHandle) -> RefConst {
        RefConst::adopt_slot(Arc::clone(&self.api), slot)
    }

    /// Allocate an empty mutable reference slot.
    pub fn new_ref(&self) -> Ref {
        Ref::create(Arc::clone(&self.api))
    }

    /// Allocate an empty read-only reference slot.
    pub fn new_ref_const(&self) -> RefConst {
        RefConst::create(Arc::clone(&self.api))
    }

    /// Take the first mutable reference to a refcounted native object,
    /// incrementing its count from the runtime's side.
    pub fn ref_to(&self, target: NativeHandle) -> Ref {
        assert!(target.is_valid(), "cannot reference a null handle");
        let slot = self.api.ref_from_target(target);
        Ref::adopt_slot(Arc::clone(&self.api), slot)
    }

    /// Take the first read-only reference to a refcounted native object.
    pub fn ref_const_to(&self, target: NativeHandle) -> RefConst {
        assert!(target.is_valid(), "cannot reference a null handle");
        let slot = self.api.ref_from_target(target);
        RefConst::adopt_slot(Arc::clone(&self.api), slot)
    }
}
