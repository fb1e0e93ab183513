//! Opaque handle type for native-side objects.

/// Opaque identifier for an object owned by the native runtime.
///
/// A handle is a fixed-width 64-bit value with no structure visible to the
/// host. Zero is the universal "no object" sentinel and must never be passed
/// to a call that dereferences it; equality is by value. Whether a non-zero
/// handle actually denotes a live object is a native-side invariant this
/// crate cannot verify — it only guarantees it never double-frees or leaks
/// a handle it owns.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandle {
    _h: u64,
}

impl NativeHandle {
    /// Create an invalid (null) handle.
    #[inline]
    pub const fn invalid() -> Self {
        Self { _h: 0 }
    }

    /// Wrap a raw handle value received from the native runtime.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self { _h: raw }
    }

    /// The raw 64-bit value, as passed across the boundary.
    #[inline]
    pub const fn raw(self) -> u64 {
        self._h
    }

    /// Check if this handle is valid (non-zero).
    #[inline]
    pub const fn is_valid(&self) -> bool {
        self._h != 0
    }
}

impl Default for NativeHandle {
    fn default() -> Self {
        Self::invalid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_invalid() {
        assert!(!NativeHandle::invalid().is_valid());
        assert!(!NativeHandle::default().is_valid());
        assert!(!NativeHandle::from_raw(0).is_valid());
        assert!(NativeHandle::from_raw(1).is_valid());
    }

    #[test]
    fn test_equality_is_by_value() {
        assert_eq!(NativeHandle::from_raw(42), NativeHandle::from_raw(42));
        assert_ne!(NativeHandle::from_raw(42), NativeHandle::from_raw(43));
    }
}
