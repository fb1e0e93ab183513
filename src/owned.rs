//! Owned wrappers around native handles.
//!
//! An [`Owned`] is responsible for triggering the release of its handle
//! exactly once across its lifetime. The guarantee is structural rather
//! than checked at runtime: the release action lives in an `Option` that is
//! taken by `Drop`, and every other path that could run it consumes the
//! wrapper by value, so a second invocation does not typecheck.

use std::any::Any;
use std::sync::Arc;

use crate::counted::Mutable;
use crate::native::{NativeApi, NativeHandle};
use crate::view::TargetView;

/// Anchor held by a dependent wrapper so the host reachability graph keeps
/// the anchor alive at least as long as the dependent.
pub type KeepAlive = Arc<dyn Any + Send + Sync>;

/// A deferred, run-at-most-once destruction of a native object.
///
/// The handle is captured by value at construction, so the action releases
/// the right object even if the owning wrapper's handle field is later
/// swapped. An action may also capture an anchor [`Arc`]; the anchor then
/// stays alive for exactly as long as the action has not run.
pub struct ReleaseAction(Box<dyn FnOnce() + Send + Sync>);

impl ReleaseAction {
    /// Free `handle` unconditionally through `api` when run.
    pub fn free(api: &Arc<dyn NativeApi>, handle: NativeHandle) -> Self {
        assert!(handle.is_valid(), "release action bound to null handle");
        let api = Arc::clone(api);
        Self(Box::new(move || api.free_object(handle)))
    }

    /// Decrement the reference slot `slot` through `api` when run.
    pub fn decrement(api: &Arc<dyn NativeApi>, slot: NativeHandle) -> Self {
        assert!(slot.is_valid(), "release action bound to null slot");
        let api = Arc::clone(api);
        Self(Box::new(move || api.ref_release(slot)))
    }

    /// Arbitrary release closure. Capture any anchor whose native resource
    /// must stay allocated until the release has run.
    pub fn custom(f: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self(Box::new(f))
    }

    fn run(self) {
        (self.0)()
    }
}

/// Host-side wrapper around exactly one native handle.
///
/// An `Owned` is either *owning* (a release action is armed and fires once,
/// on drop or via [`Owned::release_now`]) or *borrowed* (no release action;
/// the wrapper only presents a uniform interface over a handle its container
/// owns, and going out of scope is a no-op at the boundary).
///
/// Reassigning through a `&mut Owned` releases the previously managed handle
/// and installs the new one, the swap-on-assignment behavior falling out of
/// `Drop` on the old value.
pub struct Owned {
    api: Arc<dyn NativeApi>,
    handle: NativeHandle,
    release: Option<ReleaseAction>,
    // Dropped after `release` has run (drop glue runs after Drop::drop),
    // so the anchor outlives every use of our handle.
    keep_alive: Option<KeepAlive>,
}

impl Owned {
    /// Wrap a handle the caller newly owns; dropping the wrapper frees the
    /// object.
    pub fn owned(api: Arc<dyn NativeApi>, handle: NativeHandle) -> Self {
        assert!(handle.is_valid(), "owned wrapper requires a non-null handle");
        let release = ReleaseAction::free(&api, handle);
        Self {
            api,
            handle,
            release: Some(release),
            keep_alive: None,
        }
    }

    /// Wrap a handle with a caller-supplied release action.
    pub fn with_release(api: Arc<dyn NativeApi>, handle: NativeHandle, release: ReleaseAction) -> Self {
        assert!(handle.is_valid(), "owned wrapper requires a non-null handle");
        Self {
            api,
            handle,
            release: Some(release),
            keep_alive: None,
        }
    }

    /// Wrap a handle owned elsewhere; dropping the wrapper performs no
    /// native call.
    pub fn borrowed(api: Arc<dyn NativeApi>, handle: NativeHandle) -> Self {
        assert!(handle.is_valid(), "borrowed wrapper requires a non-null handle");
        Self {
            api,
            handle,
            release: None,
            keep_alive: None,
        }
    }

    /// Pin `anchor` for this wrapper's whole lifetime.
    ///
    /// Use this when the native object behind `self` is only valid while the
    /// anchor's native object stays allocated, e.g. a body that must not
    /// outlive the system it was added to. The relation is structural: no
    /// refcount call crosses the boundary for it.
    pub fn pinned_to(mut self, anchor: KeepAlive) -> Self {
        self.keep_alive = Some(anchor);
        self
    }

    /// The managed handle.
    #[inline]
    pub fn handle(&self) -> NativeHandle {
        self.handle
    }

    /// Whether this wrapper releases its handle at end of life.
    #[inline]
    pub fn owns(&self) -> bool {
        self.release.is_some()
    }

    /// Runtime type tag of the wrapped object.
    pub fn type_tag(&self) -> u32 {
        self.api.type_tag(self.handle)
    }

    /// Call-scoped view of the wrapped object. The view borrows `self`, so
    /// it cannot be stored past this wrapper's life.
    pub fn as_view(&self) -> TargetView<'_, Mutable> {
        TargetView::new(&self.api, self.handle)
    }

    /// Release the handle now instead of at drop. Runs the release action
    /// at most once; on a borrowed wrapper this is a no-op.
    pub fn release_now(self) {
        // Drop does the work; consuming self documents intent and makes a
        // second trigger unrepresentable.
    }

    /// Disarm the release action and hand the raw handle back to the caller,
    /// who becomes responsible for it.
    pub fn into_raw(mut self) -> NativeHandle {
        self.release = None;
        self.handle
    }
}

impl Drop for Owned {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release.run();
        }
    }
}
