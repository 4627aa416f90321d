//! LEB128-style unsigned varints
//!
//!     Seven value bits per byte, least significant group first, high bit
//!     set on every byte except the last. All counts, lengths and ids in
//!     the binary stream use this encoding.

use crate::error::{CodecError, CodecErrorKind};

pub(super) fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

/// Read one varint at `*pos`, advancing it past the encoding.
///
/// Errors are positioned at the varint's first byte.
pub(super) fn read_varint(input: &[u8], pos: &mut usize) -> Result<u64, CodecError> {
    let start = *pos;
    let mut result: u64 = 0;
    let mut shift: u32 = 0;
    loop {
        let byte = *input.get(*pos).ok_or_else(|| {
            CodecError::new(
                CodecErrorKind::Truncated,
                start,
                "varint runs past end of input",
            )
        })?;
        *pos += 1;
        let bits = (byte & 0x7f) as u64;
        if shift >= 64 || (shift == 63 && bits > 1) {
            return Err(CodecError::new(
                CodecErrorKind::SizeMismatch,
                start,
                "varint exceeds 64 bits",
            ));
        }
        result |= bits << shift;
        if byte & 0x80 == 0 {
            return Ok(result);
        }
        shift += 7;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint(&mut out, value);
        out
    }

    #[test]
    fn single_byte_values() {
        assert_eq!(encoded(0), vec![0x00]);
        assert_eq!(encoded(1), vec![0x01]);
        assert_eq!(encoded(127), vec![0x7f]);
    }

    #[test]
    fn multi_byte_values() {
        assert_eq!(encoded(128), vec![0x80, 0x01]);
        assert_eq!(encoded(300), vec![0xac, 0x02]);
        assert_eq!(encoded(16_384), vec![0x80, 0x80, 0x01]);
    }

    #[test]
    fn round_trips_across_the_range() {
        for value in [0, 1, 127, 128, 255, 300, 16_383, 16_384, u64::MAX / 2, u64::MAX] {
            let bytes = encoded(value);
            let mut pos = 0;
            assert_eq!(read_varint(&bytes, &mut pos).unwrap(), value);
            assert_eq!(pos, bytes.len());
        }
    }

    #[test]
    fn read_advances_past_each_value() {
        let mut bytes = Vec::new();
        write_varint(&mut bytes, 5);
        write_varint(&mut bytes, 300);
        let mut pos = 0;
        assert_eq!(read_varint(&bytes, &mut pos).unwrap(), 5);
        assert_eq!(read_varint(&bytes, &mut pos).unwrap(), 300);
        assert_eq!(pos, bytes.len());
    }

    #[test]
    fn truncated_varint_is_reported_at_its_first_byte() {
        let mut pos = 1;
        let err = read_varint(&[0x00, 0x80], &mut pos).unwrap_err();
        assert_eq!(err.kind, CodecErrorKind::Truncated);
        assert_eq!(err.offset, 1);
    }

    #[test]
    fn varint_wider_than_u64_is_rejected() {
        // Ten full payload groups carry 70 bits.
        let bytes = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
        let mut pos = 0;
        let err = read_varint(&bytes, &mut pos).unwrap_err();
        assert_eq!(err.kind, CodecErrorKind::SizeMismatch);
        assert_eq!(err.offset, 0);
    }

    #[test]
    fn u64_max_is_the_widest_accepted_value() {
        // u64::MAX encodes as nine 0xff bytes and a final 0x01.
        let bytes = encoded(u64::MAX);
        assert_eq!(bytes.len(), 10);
        let mut pos = 0;
        assert_eq!(read_varint(&bytes, &mut pos).unwrap(), u64::MAX);
    }
}
