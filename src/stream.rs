//! Binary state I/O forwarding.
//!
//! Save/restore is the serialization boundary for persisted native object
//! graphs. The wire format belongs to the runtime; this layer only forwards
//! the handle and the stream.

use std::io::{Read, Write};
use std::sync::Arc;

use crate::bridge::Bridge;
use crate::error::Result;
use crate::owned::Owned;

impl Bridge {
    /// Serialize the object behind `src` to `writer`.
    pub fn save_state(&self, src: &Owned, writer: &mut dyn Write) -> Result<()> {
        self.api.save_state(src.handle(), writer)?;
        Ok(())
    }

    /// Deserialize one object from `reader`.
    ///
    /// Returns `Ok(None)` when the runtime legitimately produced no object
    /// (its "no result" zero handle); callers must check. Failures of the
    /// reader itself surface as `Err`.
    pub fn restore_state(&self, reader: &mut dyn Read) -> Result<Option<Owned>> {
        let handle = self.api.restore_state(reader)?;
        if !handle.is_valid() {
            return Ok(None);
        }
        Ok(Some(Owned::owned(Arc::clone(&self.api), handle)))
    }
}
