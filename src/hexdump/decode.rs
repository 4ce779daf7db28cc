//! Parsing of address-tagged hex dumps.
//!
//! Accepted lines look like `@<hex address> <hex bytes>` with an optional
//! trailing `// comment`. Both 8-digit and 16-digit address producers are read the
//! same way. Every printed 64-bit word is big-endian text, so each 8-byte chunk is
//! reversed on the way in. Lines that do not have the record shape are skipped.

use std::path::Path;

use crate::error::MemconvError;
use crate::hexdump::record::{ByteBuffer, MemoryRecord};
use crate::kernels::word_swap::reverse_per_word;

//==================================================================================
// 1. Line Parsing
//==================================================================================

/// Parses one raw line. `Ok(None)` means the line is not a record.
///
/// `line_no` is 1-based and only used in error messages.
pub fn parse_line(raw: &str, line_no: usize) -> Result<Option<MemoryRecord>, MemconvError> {
    // `split` always yields at least one piece.
    let line = raw.split("//").next().unwrap_or_default().trim();
    let rest = match line.strip_prefix('@') {
        Some(rest) => rest,
        None => return Ok(None),
    };

    let addr_len = rest
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(rest.len());
    let (addr_text, data) = rest.split_at(addr_len);
    if addr_text.is_empty() || !data.starts_with(char::is_whitespace) {
        return Ok(None);
    }
    if !data.chars().all(|c| c.is_ascii_hexdigit() || c.is_whitespace()) {
        return Ok(None);
    }

    let digits: String = data.split_whitespace().collect();
    if digits.is_empty() {
        return Ok(None);
    }
    if digits.len() % 2 != 0 {
        return Err(MemconvError::FormatError(format!(
            "odd hex digit count ({}) at line {}: {}",
            digits.len(),
            line_no,
            raw.trim_end()
        )));
    }

    let address = u64::from_str_radix(addr_text, 16).map_err(|e| {
        MemconvError::FormatError(format!(
            "bad address '{}' at line {}: {}",
            addr_text, line_no, e
        ))
    })?;
    let big_endian_bytes = hex::decode(&digits)?;

    Ok(Some(MemoryRecord::new(
        address,
        reverse_per_word(&big_endian_bytes),
    )))
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Parses every record line in `text`, in file order.
pub fn parse_records(text: &str) -> Result<Vec<MemoryRecord>, MemconvError> {
    let mut records = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        if let Some(record) = parse_line(raw, idx + 1)? {
            records.push(record);
        }
    }
    Ok(records)
}

/// Decodes a dump into a zero-filled buffer sized to the furthest record end.
///
/// Fails with `FormatError` when the text holds no records or a record is malformed.
pub fn decode(text: &str) -> Result<ByteBuffer, MemconvError> {
    let records = parse_records(text)?;
    if records.is_empty() {
        return Err(MemconvError::FormatError(
            "no @ADDR HEX lines found".to_string(),
        ));
    }
    log::debug!("decoded {} memory records", records.len());
    ByteBuffer::from_records(&records)
}

/// Reads and decodes a dump file. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<ByteBuffer, MemconvError> {
    let raw = std::fs::read(path)?;
    decode(&String::from_utf8_lossy(&raw))
}
