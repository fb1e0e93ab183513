//! In-memory stand-in for the native runtime.
//!
//! `MockNative` implements the full [`NativeApi`] surface over a
//! mutex-guarded registry, with one deliberate difference from a real
//! runtime: where the real thing would silently corrupt memory, the mock
//! panics. Double-frees, releases of unknown slots and refcount underflows
//! all abort the test run, which is what makes the ownership laws of this
//! crate checkable without the native library.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::sync::Mutex;

use crate::native::{BatchElement, NativeApi, NativeHandle};

const STATE_MAGIC: [u8; 4] = *b"PXS1";

struct ObjectSlot {
    tag: u32,
    ref_count: u32,
    embedded: bool,
    payload: Vec<f32>,
}

struct RefSlot {
    target: NativeHandle,
}

struct Registry {
    next: u64,
    objects: HashMap<u64, ObjectSlot>,
    refs: HashMap<u64, RefSlot>,
    batch_calls: u64,
}

impl Registry {
    fn alloc_handle(&mut self) -> NativeHandle {
        let h = self.next;
        self.next += 1;
        NativeHandle::from_raw(h)
    }

    fn object(&self, handle: NativeHandle) -> &ObjectSlot {
        self.objects
            .get(&handle.raw())
            .expect("mock: access to unknown or freed object")
    }

    fn increment(&mut self, target: NativeHandle) {
        if !target.is_valid() {
            return;
        }
        self.objects
            .get_mut(&target.raw())
            .expect("mock: increment of dead object")
            .ref_count += 1;
    }

    fn decrement(&mut self, target: NativeHandle) {
        if !target.is_valid() {
            return;
        }
        let obj = self
            .objects
            .get_mut(&target.raw())
            .expect("mock: decrement of dead object");
        assert!(obj.ref_count > 0, "mock: refcount underflow");
        obj.ref_count -= 1;
        if obj.ref_count == 0 && !obj.embedded {
            self.objects.remove(&target.raw());
        }
    }
}

/// In-memory native runtime for tests and examples.
pub struct MockNative {
    inner: Mutex<Registry>,
}

impl MockNative {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Registry {
                next: 1,
                objects: HashMap::new(),
                refs: HashMap::new(),
                batch_calls: 0,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Registry> {
        self.inner.lock().expect("mock registry poisoned")
    }

    /// Allocate a fresh object with the given type tag. The count starts at
    /// zero: the object lives until `free_object`, or until a reference
    /// drops the count back to zero.
    pub fn alloc_object(&self, tag: u32) -> NativeHandle {
        self.alloc_object_with_payload(tag, Vec::new())
    }

    /// Allocate an object carrying a payload, observable through state I/O.
    pub fn alloc_object_with_payload(&self, tag: u32, payload: Vec<f32>) -> NativeHandle {
        let mut reg = self.lock();
        let handle = reg.alloc_handle();
        reg.objects.insert(
            handle.raw(),
            ObjectSlot {
                tag,
                ref_count: 0,
                embedded: false,
                payload,
            },
        );
        handle
    }

    /// Number of objects currently allocated (reference slots not counted).
    pub fn live_objects(&self) -> usize {
        self.lock().objects.len()
    }

    /// Number of batch calls that actually crossed the boundary.
    pub fn batch_calls(&self) -> u64 {
        self.lock().batch_calls
    }
}

impl Default for MockNative {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeApi for MockNative {
    fn free_object(&self, handle: NativeHandle) {
        let mut reg = self.lock();
        reg.objects
            .remove(&handle.raw())
            .expect("mock: double free or free of unknown object");
    }

    fn ref_create(&self) -> NativeHandle {
        let mut reg = self.lock();
        let slot = reg.alloc_handle();
        reg.refs.insert(
            slot.raw(),
            RefSlot {
                target: NativeHandle::invalid(),
            },
        );
        slot
    }

    fn ref_from_target(&self, target: NativeHandle) -> NativeHandle {
        let mut reg = self.lock();
        reg.increment(target);
        let slot = reg.alloc_handle();
        reg.refs.insert(slot.raw(), RefSlot { target });
        slot
    }

    fn ref_copy(&self, slot: NativeHandle) -> NativeHandle {
        let mut reg = self.lock();
        let target = reg
            .refs
            .get(&slot.raw())
            .expect("mock: copy of unknown reference slot")
            .target;
        reg.increment(target);
        let copy = reg.alloc_handle();
        reg.refs.insert(copy.raw(), RefSlot { target });
        copy
    }

    fn ref_release(&self, slot: NativeHandle) {
        let mut reg = self.lock();
        let released = reg
            .refs
            .remove(&slot.raw())
            .expect("mock: release of unknown reference slot");
        reg.decrement(released.target);
    }

    fn ref_target(&self, slot: NativeHandle) -> NativeHandle {
        let reg = self.lock();
        reg.refs
            .get(&slot.raw())
            .expect("mock: resolve of unknown reference slot")
            .target
    }

    fn ref_set_target(&self, slot: NativeHandle, target: NativeHandle) {
        let mut reg = self.lock();
        reg.increment(target);
        let old = {
            let r = reg
                .refs
                .get_mut(&slot.raw())
                .expect("mock: reseat of unknown reference slot");
            std::mem::replace(&mut r.target, target)
        };
        reg.decrement(old);
    }

    fn ref_count(&self, target: NativeHandle) -> u32 {
        self.lock().object(target).ref_count
    }

    fn set_embedded(&self, target: NativeHandle) {
        self.lock()
            .objects
            .get_mut(&target.raw())
            .expect("mock: embed of unknown object")
            .embedded = true;
    }

    fn type_tag(&self, handle: NativeHandle) -> u32 {
        self.lock().object(handle).tag
    }

    fn is_alive(&self, handle: NativeHandle) -> bool {
        let reg = self.lock();
        reg.objects.contains_key(&handle.raw()) || reg.refs.contains_key(&handle.raw())
    }

    fn batch_get(
        &self,
        handle: NativeHandle,
        element: BatchElement,
        indices: &[u32],
        out: &mut [f32],
    ) {
        let mut reg = self.lock();
        reg.batch_calls += 1;
        reg.object(handle);
        let stride = element.stride();
        // Deterministic fill so tests can predict the contents.
        for (i, &idx) in indices.iter().enumerate() {
            for c in 0..stride {
                out[i * stride + c] = (handle.raw() * 1000 + idx as u64 * stride as u64 + c as u64) as f32;
            }
        }
    }

    fn save_state(&self, handle: NativeHandle, writer: &mut dyn Write) -> std::io::Result<()> {
        let reg = self.lock();
        let obj = reg.object(handle);
        writer.write_all(&STATE_MAGIC)?;
        writer.write_all(&obj.tag.to_le_bytes())?;
        writer.write_all(&(obj.payload.len() as u32).to_le_bytes())?;
        for v in &obj.payload {
            writer.write_all(&v.to_le_bytes())?;
        }
        Ok(())
    }

    fn restore_state(&self, reader: &mut dyn Read) -> std::io::Result<NativeHandle> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != STATE_MAGIC {
            // Unrecognized stream: the runtime reports "no result".
            return Ok(NativeHandle::invalid());
        }
        let mut word = [0u8; 4];
        reader.read_exact(&mut word)?;
        let tag = u32::from_le_bytes(word);
        reader.read_exact(&mut word)?;
        let len = u32::from_le_bytes(word) as usize;
        // A corrupt length field must not reserve memory ahead of the
        // bytes actually read; the vector grows as the payload arrives.
        let mut payload = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            reader.read_exact(&mut word)?;
            payload.push(f32::from_le_bytes(word));
        }
        Ok(self.alloc_object_with_payload(tag, payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{TAG_MESH, TAG_SPHERE};

    #[test]
    fn test_alloc_and_free() {
        let mock = MockNative::new();
        let h = mock.alloc_object(TAG_SPHERE);
        assert!(h.is_valid());
        assert_eq!(mock.live_objects(), 1);
        mock.free_object(h);
        assert_eq!(mock.live_objects(), 0);
    }

    #[test]
    #[should_panic(expected = "double free")]
    fn test_double_free_panics() {
        let mock = MockNative::new();
        let h = mock.alloc_object(TAG_SPHERE);
        mock.free_object(h);
        mock.free_object(h);
    }

    #[test]
    fn test_refcount_frees_at_zero() {
        let mock = MockNative::new();
        let h = mock.alloc_object(TAG_MESH);
        let a = mock.ref_from_target(h);
        let b = mock.ref_copy(a);
        assert_eq!(mock.ref_count(h), 2);
        mock.ref_release(a);
        assert_eq!(mock.ref_count(h), 1);
        mock.ref_release(b);
        assert!(!mock.is_alive(h));
    }

    #[test]
    fn test_embedded_survives_zero_count() {
        let mock = MockNative::new();
        let h = mock.alloc_object(TAG_MESH);
        let a = mock.ref_from_target(h);
        mock.set_embedded(h);
        mock.ref_release(a);
        assert!(mock.is_alive(h));
        assert_eq!(mock.ref_count(h), 0);
    }

    #[test]
    fn test_restore_with_corrupt_length_fails_without_allocating() {
        let mock = MockNative::new();
        let mut stream = Vec::new();
        stream.extend_from_slice(&STATE_MAGIC);
        stream.extend_from_slice(&TAG_MESH.to_le_bytes());
        // Length word claims 4 GiB of payload; none follows.
        stream.extend_from_slice(&u32::MAX.to_le_bytes());

        let result = mock.restore_state(&mut stream.as_slice());
        assert!(result.is_err(), "truncated payload must surface as an I/O error");
        assert_eq!(mock.live_objects(), 0);
    }

    #[test]
    fn test_copy_slots_are_distinct() {
        let mock = MockNative::new();
        let h = mock.alloc_object(TAG_SPHERE);
        let a = mock.ref_from_target(h);
        let b = mock.ref_copy(a);
        assert_ne!(a, b);
        assert_eq!(mock.ref_target(a), mock.ref_target(b));
        mock.ref_release(a);
        mock.ref_release(b);
    }
}
