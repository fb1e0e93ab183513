//! Batch accessor capacity preconditions.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use px::mock::MockNative;
use px::native::TAG_COMPOUND;
use px::{BatchElement, Bridge};

fn setup() -> (Arc<MockNative>, Bridge) {
    let mock = Arc::new(MockNative::new());
    let bridge = Bridge::new(mock.clone());
    (mock, bridge)
}

#[test]
fn test_vector3_batch_fills_three_per_element() {
    let (mock, bridge) = setup();
    let sys = bridge.adopt(mock.alloc_object(TAG_COMPOUND));
    let indices: Vec<u32> = (0..10).collect();
    let mut out = vec![0.0f32; 30];

    bridge.batch_get(&sys, BatchElement::Vector3, &indices, &mut out);
    assert_eq!(mock.batch_calls(), 1);

    // The mock fills deterministically from (handle, index, component).
    let base = sys.handle().raw() * 1000;
    assert_eq!(out[0], base as f32);
    assert_eq!(out[29], (base + 29) as f32);
}

#[test]
fn test_oversized_buffer_is_fine() {
    let (mock, bridge) = setup();
    let sys = bridge.adopt(mock.alloc_object(TAG_COMPOUND));
    let indices: Vec<u32> = (0..5).collect();
    let mut out = vec![0.0f32; 64];

    bridge.batch_get(&sys, BatchElement::Quaternion, &indices, &mut out);
    assert_eq!(mock.batch_calls(), 1);
    // Floats past 4 * 5 are untouched.
    assert_eq!(out[20], 0.0);
}

#[test]
fn test_short_buffer_fails_before_the_boundary() {
    let (mock, bridge) = setup();
    let sys = bridge.adopt(mock.alloc_object(TAG_COMPOUND));
    let indices: Vec<u32> = (0..10).collect();
    let mut out = vec![0.0f32; 29];

    let result = catch_unwind(AssertUnwindSafe(|| {
        bridge.batch_get(&sys, BatchElement::Vector3, &indices, &mut out);
    }));
    assert!(result.is_err(), "29 floats cannot hold 10 3-vectors");
    assert_eq!(
        mock.batch_calls(),
        0,
        "precondition must fail before any native call is issued"
    );
}

#[test]
fn test_matrix_batch_needs_sixteen_per_element() {
    let (mock, bridge) = setup();
    let sys = bridge.adopt(mock.alloc_object(TAG_COMPOUND));
    let indices: Vec<u32> = (0..10).collect();

    let mut short = vec![0.0f32; 159];
    let result = catch_unwind(AssertUnwindSafe(|| {
        bridge.batch_get(&sys, BatchElement::Matrix4, &indices, &mut short);
    }));
    assert!(result.is_err());
    assert_eq!(mock.batch_calls(), 0);

    let mut exact = vec![0.0f32; 160];
    bridge.batch_get(&sys, BatchElement::Matrix4, &indices, &mut exact);
    assert_eq!(mock.batch_calls(), 1);
}
