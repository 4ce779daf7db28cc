//! Rendering of byte buffers as address-tagged hex dumps.
//!
//! Two writers exist because two downstream consumers expect different things
//! from a short final line:
//!
//! * [`encode_leading_zero_pad`] completes the short line with zeros at its
//!   high-address end in memory order, then reverses each word, so the printed
//!   word carries its padding in front of the data. Used for stage passthrough
//!   dumps at any line width.
//! * [`encode_trailing_zero_pad`] reverses the short chunk first and appends the
//!   zeros to the printed text. Used for final results and packed kernel/image
//!   files.
//!
//! The exact line spacing of each address style is a compatibility surface for
//! downstream tooling and must not change.

use serde::{Deserialize, Serialize};

use crate::error::MemconvError;
use crate::kernels::word_swap::{reverse_per_word, WORD_BYTES};

//==================================================================================
// 1. Output Options
//==================================================================================

/// Byte order of each printed 64-bit word relative to memory order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WordOrder {
    /// Memory is little-endian; each word is reversed for big-endian display.
    #[default]
    Little,
    /// Bytes are printed in memory order.
    Big,
}

/// Address column layout of an emitted dump line.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AddressStyle {
    /// `" @%016x %s"`: leading space, 64-bit address, one space.
    Wide,
    /// `"@%08x  %s"`: 32-bit address, two spaces.
    Narrow,
}

impl AddressStyle {
    pub fn format_line(&self, address: u64, hex_text: &str) -> String {
        match self {
            AddressStyle::Wide => format!(" @{:016x} {}", address, hex_text),
            AddressStyle::Narrow => format!("@{:08x}  {}", address, hex_text),
        }
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Checks that a line width is a positive multiple of the word size.
pub fn validate_line_width(line_width: usize) -> Result<(), MemconvError> {
    if line_width == 0 || line_width % WORD_BYTES != 0 {
        return Err(MemconvError::ConfigError(format!(
            "line width must be a positive multiple of {} (got {})",
            WORD_BYTES, line_width
        )));
    }
    Ok(())
}

/// Writes `raw_le` (memory order) starting at `start_address`, `line_width` bytes
/// per line, in the wide address style.
///
/// A short final line is completed with zeros after the data in memory order,
/// before the per-word reversal, so decoding the text puts every byte back at
/// its own address followed by zeros. `comment`, if non-empty, is attached to the
/// first line only.
pub fn encode_leading_zero_pad(
    start_address: u64,
    raw_le: &[u8],
    line_width: usize,
    comment: Option<&str>,
) -> Result<String, MemconvError> {
    validate_line_width(line_width)?;
    let step = u64::try_from(line_width)
        .map_err(|_| MemconvError::ConfigError(format!("line width {} too large", line_width)))?;

    let mut out = String::with_capacity(raw_le.len() * 2 + raw_le.len() / line_width * 24);
    let mut address = start_address;
    let mut line_le = Vec::with_capacity(line_width);

    for (i, chunk) in raw_le.chunks(line_width).enumerate() {
        line_le.clear();
        line_le.extend_from_slice(chunk);
        line_le.resize(line_width, 0u8);

        out.push_str(&AddressStyle::Wide.format_line(address, &hex::encode(reverse_per_word(&line_le))));
        if i == 0 {
            if let Some(text) = comment.filter(|c| !c.is_empty()) {
                out.push_str("  // ");
                out.push_str(text);
            }
        }
        out.push('\n');

        address = address.checked_add(step).ok_or_else(|| {
            MemconvError::ConfigError("dump address overflowed 64 bits".to_string())
        })?;
    }
    Ok(out)
}

/// Writes `raw` from address 0, one 8-byte word per line.
///
/// Each chunk is put in display order first (reversed for `WordOrder::Little`)
/// and a short chunk is then extended with zeros at the end of the printed text.
pub fn encode_trailing_zero_pad(raw: &[u8], style: AddressStyle, order: WordOrder) -> String {
    let mut out = String::with_capacity(raw.len() * 3 + 32);
    let mut word = Vec::with_capacity(WORD_BYTES);

    for (i, chunk) in raw.chunks(WORD_BYTES).enumerate() {
        word.clear();
        match order {
            WordOrder::Little => word.extend(chunk.iter().rev()),
            WordOrder::Big => word.extend_from_slice(chunk),
        }
        word.resize(WORD_BYTES, 0u8);

        // `chunks` bounds i * 8 by the slice length, which fits in u64.
        let address = (i * WORD_BYTES) as u64;
        out.push_str(&style.format_line(address, &hex::encode(&word)));
        out.push('\n');
    }
    out
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::hexdump::decode::decode;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_single_word_display_order() {
        let raw: Vec<u8> = (0..8).collect();
        let text = encode_leading_zero_pad(0, &raw, 8, None).unwrap();
        assert_eq!(text, " @0000000000000000 0706050403020100\n");
        assert_eq!(decode(&text).unwrap().as_bytes(), raw.as_slice());
    }

    #[test]
    fn test_comment_only_on_first_line() {
        let raw: Vec<u8> = (0..16).collect();
        let text = encode_leading_zero_pad(0x10, &raw, 8, Some("image (input)")).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], " @0000000000000010 0706050403020100  // image (input)");
        assert_eq!(lines[1], " @0000000000000018 0f0e0d0c0b0a0908");
    }

    #[test]
    fn test_leading_pad_on_short_line() {
        let text = encode_leading_zero_pad(0, &[0xaa, 0xbb, 0xcc], 8, None).unwrap();
        // Zeros follow the data in memory, so they print ahead of it.
        assert_eq!(text, " @0000000000000000 0000000000ccbbaa\n");
        assert_eq!(
            decode(&text).unwrap().as_bytes(),
            &[0xaa, 0xbb, 0xcc, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_leading_pad_on_multi_word_line() {
        let text = encode_leading_zero_pad(0, &[1, 2, 3], 16, None).unwrap();
        assert_eq!(
            text,
            " @0000000000000000 00000000000302010000000000000000\n"
        );
    }

    #[test]
    fn test_trailing_pad_wide_and_narrow() {
        let raw: Vec<u8> = (1..=10).collect();
        let wide = encode_trailing_zero_pad(&raw, AddressStyle::Wide, WordOrder::Little);
        assert_eq!(
            wide,
            " @0000000000000000 0807060504030201\n @0000000000000008 0a09000000000000\n"
        );
        let narrow = encode_trailing_zero_pad(&raw, AddressStyle::Narrow, WordOrder::Little);
        assert_eq!(
            narrow,
            "@00000000  0807060504030201\n@00000008  0a09000000000000\n"
        );
    }

    #[test]
    fn test_trailing_pad_big_order_keeps_memory_order() {
        let text = encode_trailing_zero_pad(&[1, 2, 3], AddressStyle::Narrow, WordOrder::Big);
        assert_eq!(text, "@00000000  0102030000000000\n");
    }

    #[test]
    fn test_invalid_line_width_is_config_error() {
        for width in [0usize, 4, 12] {
            let result = encode_leading_zero_pad(0, &[1, 2, 3], width, None);
            assert!(matches!(result, Err(MemconvError::ConfigError(_))));
        }
    }

    #[test]
    fn test_empty_input_encodes_to_empty_text() {
        assert_eq!(encode_leading_zero_pad(0, &[], 8, None).unwrap(), "");
        assert_eq!(encode_trailing_zero_pad(&[], AddressStyle::Wide, WordOrder::Little), "");
    }

    #[test]
    fn test_round_trip_random_buffers() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for words in 1..12usize {
            let raw: Vec<u8> = (0..words * 8).map(|_| rng.random()).collect();
            for width in [8usize, 16, 24, 64] {
                let text = encode_leading_zero_pad(0, &raw, width, Some("rt")).unwrap();
                let decoded = decode(&text).unwrap();
                // Every byte returns to its address; a short last line adds zeros.
                assert_eq!(decoded.len(), raw.len().div_ceil(width) * width);
                assert_eq!(&decoded.as_bytes()[..raw.len()], raw.as_slice());
                assert!(decoded.as_bytes()[raw.len()..].iter().all(|&b| b == 0));
            }
            for style in [AddressStyle::Wide, AddressStyle::Narrow] {
                let text = encode_trailing_zero_pad(&raw, style, WordOrder::Little);
                assert_eq!(decode(&text).unwrap().as_bytes(), raw.as_slice());
            }
        }
    }
}
