//! This module contains the pure, stateless kernel for reversing byte order
//! inside each 64-bit word of a stream.
//!
//! Memory dumps print every 8-byte word big-endian, while the buffer they describe
//! is little-endian. The transform is its own inverse: applying it twice returns
//! the original bytes. A trailing partial chunk is reversed on its own.

/// The width in bytes of one printed memory word.
pub const WORD_BYTES: usize = 8;

/// Reverses the bytes of every consecutive `WORD_BYTES` chunk into `output_buf`.
pub fn reverse_per_word_into(input_bytes: &[u8], output_buf: &mut Vec<u8>) {
    output_buf.clear();
    output_buf.reserve(input_bytes.len());
    for chunk in input_bytes.chunks(WORD_BYTES) {
        output_buf.extend(chunk.iter().rev());
    }
}

/// Owned convenience form of [`reverse_per_word_into`].
pub fn reverse_per_word(input_bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input_bytes.len());
    reverse_per_word_into(input_bytes, &mut out);
    out
}
