//! Endian-aware binary I/O.
//!
//! [EndianWriter] and [EndianReader] wrap any [std::io::Write] / [std::io::Read] and encode
//! primitive values and strings in big-endian, little-endian or a per-stream configurable order.
//! On top of that, [Record] describes a flat binary structure of named, typed fields that can be
//! written with [RecordWriter], decoded with [RecordReader] and (with the `yaml` feature) edited
//! as text.

pub mod byte_order_rw;
pub mod record;
mod record_reader;
mod record_writer;
#[cfg(feature = "yaml")]
pub mod yaml;

pub use byte_order_rw::{EndianReader, EndianWriter, NATIVE_IS_BIG_ENDIAN};
pub use record::{
    Field, FieldLayout, FieldOrder, FieldValue, Record, RecordError, StreamOrder, ValueType,
};
pub use record_reader::RecordReader;
pub use record_writer::RecordWriter;
