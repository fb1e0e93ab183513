//! The boundary to the native runtime.
//!
//! This module defines the handle contract and the primitive-marshaling
//! surface this crate forwards to. The physics runtime behind it is an
//! opaque collaborator; users should prefer the safe wrappers in the
//! parent modules.

pub mod api;
pub mod handle;

pub use api::*;
pub use handle::NativeHandle;
