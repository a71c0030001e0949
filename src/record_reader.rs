use crate::byte_order_rw::EndianReader;
use crate::record::{
    Field, FieldLayout, FieldOrder, FieldValue, Record, RecordError, StreamOrder, ValueType,
};
use paste::paste;
use std::io::Read;
use tracing::{debug, trace};

macro_rules! read_ordered {
    ($reader:expr, $order:expr, $name:ident $(, $arg:expr)?) => {
        paste! {
            match $order {
                FieldOrder::Endian => $reader.[<read_endian_ $name>]($($arg)?),
                FieldOrder::Little => $reader.[<read_little_endian_ $name>]($($arg)?),
                FieldOrder::Big => $reader.[<read_ $name>]($($arg)?),
            }
        }
    };
}

/// Decodes a [Record] from its binary form given the layout it was written with
pub struct RecordReader;
impl RecordReader {
    pub fn read<R: Read>(
        reader: R,
        byte_order: StreamOrder,
        layout: &[FieldLayout],
    ) -> Result<Record, RecordError> {
        debug!(fields = layout.len(), byte_order = ?byte_order, "reading record");
        let mut reader =
            EndianReader::with_match_system_order(reader, byte_order.match_system_order);
        reader.set_treat_stream_as_big_endian(byte_order.treat_as_big_endian);

        let mut record = Record::new(byte_order);
        for field_layout in layout {
            let value = Self::read_value(&mut reader, field_layout)?;
            trace!(name = %field_layout.name, value = ?value, "read field");
            record.push(Field {
                name: field_layout.name.clone(),
                order: field_layout.order,
                value,
            })?;
        }
        Ok(record)
    }

    pub fn read_value<R: Read>(
        reader: &mut EndianReader<R>,
        layout: &FieldLayout,
    ) -> Result<FieldValue, RecordError> {
        Ok(match layout.value_type {
            ValueType::Byte => FieldValue::Byte(reader.read_byte()?),
            // single bytes have no order
            ValueType::Char1 => FieldValue::Char1(reader.read_char1s(layout.count)?),
            ValueType::Char => {
                FieldValue::Char(read_ordered!(reader, layout.order, chars, layout.count)?)
            }
            ValueType::Short => FieldValue::Short(read_ordered!(reader, layout.order, short)?),
            ValueType::Int => FieldValue::Int(read_ordered!(reader, layout.order, int)?),
            ValueType::Long => FieldValue::Long(read_ordered!(reader, layout.order, long)?),
            ValueType::Float => FieldValue::Float(read_ordered!(reader, layout.order, float)?),
            ValueType::Double => FieldValue::Double(read_ordered!(reader, layout.order, double)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordWriter;
    use std::io::{self, Cursor};

    fn sample(byte_order: StreamOrder) -> Record {
        let mut record = Record::new(byte_order);
        let fields = [
            ("magic", FieldOrder::Endian, FieldValue::Int(0x12345678)),
            ("id", FieldOrder::Little, FieldValue::Long(-42)),
            ("label", FieldOrder::Endian, FieldValue::Char1("gauge".into())),
            ("wide", FieldOrder::Little, FieldValue::Char("Aé".into())),
            ("count", FieldOrder::Big, FieldValue::Short(-2)),
            ("nan", FieldOrder::Endian, FieldValue::Float(f32::from_bits(0x7FC0_0001))),
            ("flow", FieldOrder::Endian, FieldValue::Double(12.5)),
        ];
        for (name, order, value) in fields {
            record
                .push(Field {
                    name: name.to_string(),
                    order,
                    value,
                })
                .unwrap();
        }
        record
    }

    #[test]
    fn read_what_was_written() {
        for treat_as_big_endian in [false, true] {
            for match_system_order in [false, true] {
                let byte_order = StreamOrder {
                    treat_as_big_endian,
                    match_system_order,
                };
                let record = sample(byte_order);
                let mut buf = Vec::new();
                RecordWriter::write(&mut buf, &record).unwrap();

                let read =
                    RecordReader::read(Cursor::new(buf), byte_order, &record.layout()).unwrap();
                assert_eq!(read.layout(), record.layout());
                for (a, b) in read.fields().iter().zip(record.fields()) {
                    match (&a.value, &b.value) {
                        (FieldValue::Float(a), FieldValue::Float(b)) => {
                            assert_eq!(a.to_bits(), b.to_bits())
                        }
                        (a, b) => assert_eq!(a, b),
                    }
                }
            }
        }
    }

    #[test]
    fn truncated_input() {
        let record = sample(StreamOrder::default());
        let mut buf = Vec::new();
        RecordWriter::write(&mut buf, &record).unwrap();
        buf.truncate(buf.len() - 1);

        let err = RecordReader::read(Cursor::new(buf), record.byte_order, &record.layout())
            .unwrap_err();
        match err {
            RecordError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            e => panic!("unexpected error {e:?}"),
        }
    }
}
