//! Handle lifetime and ownership layer for a reference-counted native
//! physics runtime.
//!
//! The runtime lives on the other side of an opaque boundary: objects are
//! identified by 64-bit handles, shared objects carry an intrusive
//! reference count the runtime owns, and freeing the wrong handle (or the
//! right one twice) is undefined behavior over there. This crate makes
//! those obligations structural on the host side:
//!
//! - [`Owned`] triggers its release action exactly once, whether dropped or
//!   disposed explicitly — a second trigger does not typecheck.
//! - [`Ref`] / [`RefConst`] mirror the runtime's refcount: copying
//!   increments, dropping decrements, and the runtime frees at zero.
//! - [`TargetView`] is a call-scoped, non-owning view whose lifetime stops
//!   it from being stored past the reference it came from.
//! - Keep-alive anchors pin a container wrapper for as long as a dependent
//!   handle could still reach its native object.
//!
//! The runtime itself is injected as a [`NativeApi`] implementation;
//! [`mock::MockNative`] is the in-memory one the test suites run against.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use px::{mock::MockNative, Bridge};
//!
//! let native = Arc::new(MockNative::new());
//! let bridge = Bridge::new(native.clone());
//!
//! // Sole ownership: freed exactly once, on drop.
//! let body = bridge.adopt(native.alloc_object(px::native::TAG_SPHERE));
//!
//! // Shared ownership: the runtime counts, we mirror.
//! let shape = bridge.ref_to(native.alloc_object(px::native::TAG_BOX));
//! let copy = shape.to_ref();
//! assert_eq!(shape.ref_count(), 2);
//! drop(copy);
//! assert_eq!(shape.ref_count(), 1);
//!
//! drop(shape);
//! drop(body);
//! assert_eq!(native.live_objects(), 0);
//! ```

mod batch;
pub mod bridge;
pub mod counted;
pub mod error;
pub mod factory;
pub mod mock;
pub mod native;
pub mod owned;
mod stream;
pub mod view;

// Re-export main types at the crate root
pub use bridge::Bridge;
pub use counted::{Capability, Counted, Mutable, ReadOnly, Ref, RefConst};
pub use error::{Error, Result};
pub use factory::{TaggedShape, TypeTag};
pub use native::{BatchElement, NativeApi, NativeHandle};
pub use owned::{KeepAlive, Owned, ReleaseAction};
pub use view::TargetView;
