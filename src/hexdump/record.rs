//! The decoded representation of a memory dump.
//!
//! A dump is first parsed into `MemoryRecord`s (one per line, bytes already in
//! in-memory order) and then assembled into a flat, zero-initialised `ByteBuffer`.
//! The buffer is read-only once built; extraction borrows windows out of it.

use crate::error::MemconvError;

//==================================================================================
// Format Constants
//==================================================================================
/// A reasonable limit to prevent a single stray address from allocating the
/// whole address space. (1 GiB)
pub const MAX_BUFFER_LEN: usize = 1 << 30;

//==================================================================================
// Public Structs
//==================================================================================

/// One decoded dump line: a start address and its bytes in memory order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryRecord {
    pub address: u64,
    pub bytes: Vec<u8>,
}

impl MemoryRecord {
    pub fn new(address: u64, bytes: Vec<u8>) -> Self {
        Self { address, bytes }
    }

    /// One past the last address covered by this record, or `None` on overflow.
    pub fn end(&self) -> Option<u64> {
        u64::try_from(self.bytes.len())
            .ok()
            .and_then(|len| self.address.checked_add(len))
    }
}

/// A flat byte-addressable store. Unwritten bytes read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    /// Wraps bytes that are already in memory order.
    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Assembles records into a buffer sized to the furthest record end.
    ///
    /// Records are applied in order, so a later record overwrites any earlier
    /// bytes at the same addresses.
    pub fn from_records(records: &[MemoryRecord]) -> Result<Self, MemconvError> {
        let mut max_end = 0usize;
        for record in records {
            let end = record
                .end()
                .and_then(|end| usize::try_from(end).ok())
                .ok_or_else(|| {
                    MemconvError::FormatError(format!(
                        "record at 0x{:x} extends past the addressable range",
                        record.address
                    ))
                })?;
            max_end = max_end.max(end);
        }
        if max_end > MAX_BUFFER_LEN {
            return Err(MemconvError::FormatError(format!(
                "dump spans {} bytes, more than the {} byte limit",
                max_end, MAX_BUFFER_LEN
            )));
        }

        let mut data = vec![0u8; max_end];
        for record in records {
            // Bounds were established above.
            let start = record.address as usize;
            data[start..start + record.bytes.len()].copy_from_slice(&record.bytes);
        }
        Ok(Self { data })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Borrows `len` bytes starting at `offset`.
    ///
    /// `what` names the requested object in the `OutOfRange` error.
    pub fn window(&self, what: &'static str, offset: u64, len: usize) -> Result<&[u8], MemconvError> {
        let out_of_range = || MemconvError::OutOfRange {
            what,
            offset,
            needed: len,
            available: self.data.len(),
        };
        let start = usize::try_from(offset).map_err(|_| out_of_range())?;
        let end = start.checked_add(len).ok_or_else(out_of_range)?;
        self.data.get(start..end).ok_or_else(out_of_range)
    }

    /// [`window`](Self::window) reinterpreted as two's-complement samples.
    pub fn window_i8(&self, what: &'static str, offset: u64, len: usize) -> Result<&[i8], MemconvError> {
        let bytes = self.window(what, offset, len)?;
        Ok(bytemuck::try_cast_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records_sizes_to_furthest_end_and_zero_fills() {
        let records = vec![
            MemoryRecord::new(0x08, vec![1, 2]),
            MemoryRecord::new(0x00, vec![9]),
        ];
        let buf = ByteBuffer::from_records(&records).unwrap();
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.as_bytes(), &[9, 0, 0, 0, 0, 0, 0, 0, 1, 2]);
    }

    #[test]
    fn test_last_write_wins() {
        let records = vec![
            MemoryRecord::new(0, vec![1, 1, 1, 1]),
            MemoryRecord::new(2, vec![7, 7]),
            MemoryRecord::new(1, vec![5]),
        ];
        let buf = ByteBuffer::from_records(&records).unwrap();
        assert_eq!(buf.as_bytes(), &[1, 5, 7, 7]);
    }

    #[test]
    fn test_window_bounds() {
        let buf = ByteBuffer::from_bytes((0..16).collect());
        assert_eq!(buf.window("image", 14, 2).unwrap(), &[14, 15]);
        assert_eq!(buf.window("image", 16, 0).unwrap(), &[] as &[u8]);
        let err = buf.window("kernel", 1, 16).unwrap_err();
        assert!(matches!(
            err,
            MemconvError::OutOfRange { what: "kernel", offset: 1, needed: 16, available: 16 }
        ));
        assert!(buf.window("image", u64::MAX, 1).is_err());
        assert!(buf.window("image", 4, usize::MAX).is_err());
    }

    #[test]
    fn test_window_i8_reinterprets_twos_complement() {
        let buf = ByteBuffer::from_bytes(vec![0x00, 0xFF, 0x80, 0x7F, 0x00]);
        assert_eq!(buf.window_i8("image", 1, 4).unwrap(), &[-1, -128, 127, 0]);
        assert!(matches!(
            buf.window_i8("kernel", 2, 4),
            Err(MemconvError::OutOfRange { what: "kernel", needed: 4, available: 5, .. })
        ));
    }

    #[test]
    fn test_overflowing_record_is_format_error() {
        let records = vec![MemoryRecord::new(u64::MAX, vec![1, 2])];
        assert!(matches!(
            ByteBuffer::from_records(&records),
            Err(MemconvError::FormatError(_))
        ));
    }

    #[test]
    fn test_oversized_dump_is_rejected() {
        let records = vec![MemoryRecord::new(MAX_BUFFER_LEN as u64, vec![1])];
        assert!(matches!(
            ByteBuffer::from_records(&records),
            Err(MemconvError::FormatError(_))
        ));
    }
}
