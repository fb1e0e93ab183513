//! State I/O forwarding tests.
//!
//! The wire format belongs to the runtime (here: the mock); these tests
//! only exercise the handle contract around it.

use std::sync::Arc;

use px::mock::MockNative;
use px::native::TAG_MESH;
use px::{Bridge, Error};

fn setup() -> (Arc<MockNative>, Bridge) {
    let mock = Arc::new(MockNative::new());
    let bridge = Bridge::new(mock.clone());
    (mock, bridge)
}

#[test]
fn test_save_restore_round_trip() {
    let (mock, bridge) = setup();
    let obj = bridge.adopt(mock.alloc_object_with_payload(TAG_MESH, vec![1.0, 2.0, 3.0]));

    let mut buf = Vec::new();
    bridge.save_state(&obj, &mut buf).expect("save should succeed");

    let restored = bridge
        .restore_state(&mut buf.as_slice())
        .expect("restore should succeed")
        .expect("stream holds one object");

    assert_ne!(restored.handle(), obj.handle(), "restore allocates a new object");
    assert_eq!(restored.type_tag(), TAG_MESH);
    assert!(restored.owns(), "caller owns the restored object");

    drop(obj);
    drop(restored);
    assert_eq!(mock.live_objects(), 0);
}

#[test]
fn test_rejected_stream_is_an_absent_result() {
    let (_mock, bridge) = setup();
    let garbage = *b"XXXXXXXX";

    let restored = bridge
        .restore_state(&mut garbage.as_slice())
        .expect("a rejected stream is not an I/O failure");
    assert!(restored.is_none(), "runtime reported no object; caller must check");
}

#[test]
fn test_truncated_stream_is_an_io_error() {
    let (_mock, bridge) = setup();
    let truncated = *b"PX";

    match bridge.restore_state(&mut truncated.as_slice()) {
        Err(Error::Io(_)) => {}
        Ok(_) => panic!("truncated stream must not produce an object"),
        Err(other) => panic!("expected an I/O error, got {other}"),
    }
}
