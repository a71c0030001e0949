//! Endian-aware primitive writers and readers layered over [std::io::Write] / [std::io::Read].
//!
//! Both sides share the same byte order policy:
//! * the plain methods (`write_int`, `read_int`, ...) always use big-endian, like a classic
//!   `DataOutput` stream
//! * the `little_endian` methods always use little-endian
//! * the `endian` methods use little-endian only if the stream was created with
//!   `match_system_order` and is not currently treated as big-endian. Otherwise they fall back to
//!   big-endian.
//!
//! The chosen order is never written to the stream itself. Formats built on top have to
//! communicate it out of band.

mod byte_order_reader;
mod byte_order_writer;

pub use byte_order_reader::EndianReader;
pub use byte_order_writer::EndianWriter;

/// the byte order of the machine we are running on
pub const NATIVE_IS_BIG_ENDIAN: bool = cfg!(target_endian = "big");

/// decides which encoding the `endian` family of methods uses
pub(crate) fn endian_is_little(match_system_order: bool, treat_stream_as_big_endian: bool) -> bool {
    match_system_order && !treat_stream_as_big_endian
}
