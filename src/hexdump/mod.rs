//! The address-tagged hex-dump codec.
//!
//! Text on disk carries each 64-bit word in big-endian digit order while memory is
//! little-endian, so both directions reverse bytes per 8-byte word. Decoding
//! assembles a flat `ByteBuffer`; the two encoders differ only in how they fill a
//! short final line and which address column they print.

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod decode;
pub mod encode;
pub mod record;

//==================================================================================
// 2. Public API Re-exports
//==================================================================================
pub use decode::{decode, decode_file, parse_records};
pub use encode::{
    encode_leading_zero_pad, encode_trailing_zero_pad, validate_line_width, AddressStyle,
    WordOrder,
};
pub use record::{ByteBuffer, MemoryRecord};
