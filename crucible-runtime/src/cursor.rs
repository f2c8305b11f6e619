//! Forward-only byte cursor over an asset body.

/// Reads little-endian fields in order, never seeking backwards. Every
/// accessor returns `None` once the body runs out, so callers can attach
/// an error naming the field they were after.
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, at: 0 }
    }

    pub(crate) fn i32_le(&mut self) -> Option<i32> {
        let bytes = self.take(4)?;
        Some(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn u32_le(&mut self) -> Option<u32> {
        let bytes = self.take(4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub(crate) fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let end = self.at.checked_add(len)?;
        if end > self.bytes.len() {
            return None;
        }
        let slice = &self.bytes[self.at..end];
        self.at = end;
        Some(slice)
    }

    /// Bytes not yet consumed.
    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_fields_in_order() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&7i32.to_le_bytes());
        bytes.extend_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        bytes.extend_from_slice(b"abc");

        let mut cursor = Cursor::new(&bytes);
        assert_eq!(cursor.i32_le(), Some(7));
        assert_eq!(cursor.u32_le(), Some(0xDEAD_BEEF));
        assert_eq!(cursor.take(3), Some(&b"abc"[..]));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_stops_at_the_end() {
        let bytes = [1u8, 2, 3];
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(cursor.i32_le(), None);
        // A failed read consumes nothing.
        assert_eq!(cursor.take(3), Some(&[1u8, 2, 3][..]));
        assert_eq!(cursor.take(1), None);
    }

    #[test]
    fn test_remaining_counts_down() {
        let bytes = [0u8; 10];
        let mut cursor = Cursor::new(&bytes);
        assert_eq!(cursor.remaining(), 10);
        cursor.take(4);
        assert_eq!(cursor.remaining(), 6);
    }
}
