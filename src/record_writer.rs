use crate::byte_order_rw::EndianWriter;
use crate::record::{Field, FieldOrder, FieldValue, Record, RecordError};
use paste::paste;
use std::io::Write;
use tracing::{debug, trace};

macro_rules! write_ordered {
    ($writer:expr, $order:expr, $name:ident, $value:expr) => {
        paste! {
            match $order {
                FieldOrder::Endian => $writer.[<write_endian_ $name>]($value),
                FieldOrder::Little => $writer.[<write_little_endian_ $name>]($value),
                FieldOrder::Big => $writer.[<write_ $name>]($value),
            }
        }
    };
}

/// Serializes a [Record] field by field using an [EndianWriter]
pub struct RecordWriter;
impl RecordWriter {
    /// writes all fields of `record` to `writer`. The stream order of the record configures the
    /// `endian` fields, it is not written itself.
    pub fn write<W: Write>(writer: W, record: &Record) -> Result<(), RecordError> {
        debug!(
            fields = record.fields().len(),
            bytes = record.byte_len(),
            byte_order = ?record.byte_order,
            "writing record"
        );
        let mut writer = Self::endian_writer(writer, record);
        for field in record.fields() {
            Self::write_field(&mut writer, field)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// creates the [EndianWriter] a record would be written with
    pub fn endian_writer<W: Write>(writer: W, record: &Record) -> EndianWriter<W> {
        let mut writer =
            EndianWriter::with_match_system_order(writer, record.byte_order.match_system_order);
        writer.set_treat_stream_as_big_endian(record.byte_order.treat_as_big_endian);
        writer
    }

    pub fn write_field<W: Write>(
        writer: &mut EndianWriter<W>,
        field: &Field,
    ) -> Result<(), RecordError> {
        trace!(name = %field.name, order = ?field.order, value = ?field.value, "writing field");
        let written = match &field.value {
            FieldValue::Byte(v) => writer.write_byte(*v),
            FieldValue::Char1(v) => write_ordered!(writer, field.order, char1s, v),
            FieldValue::Char(v) => write_ordered!(writer, field.order, chars, v),
            FieldValue::Short(v) => write_ordered!(writer, field.order, short, *v),
            FieldValue::Int(v) => write_ordered!(writer, field.order, int, *v),
            FieldValue::Long(v) => write_ordered!(writer, field.order, long, *v),
            FieldValue::Float(v) => write_ordered!(writer, field.order, float, *v),
            FieldValue::Double(v) => write_ordered!(writer, field.order, double, *v),
        };
        Ok(written?)
    }
}
