use crate::record::{Field, FieldValue, Record};
use itertools::Itertools;
use lazy_regex::regex_is_match;

/// Dumps a [Record] into a friendly human readable text-representation that
/// [RecordYamlParser][super::parser::RecordYamlParser] can read back
#[derive(Default)]
pub struct RecordYamlDumper {
    /// print integers as their hex bit pattern instead of decimal
    pub dump_integers_as_hex: bool,
}
impl RecordYamlDumper {
    pub fn dump_record(&self, record: &Record) -> String {
        let fields = record
            .fields()
            .iter()
            .map(|field| self.dump_field(field))
            .join("\n");
        let header = format!(
            "byte_order: {}\nmatch_system_order: {}\n",
            if record.byte_order.treat_as_big_endian {
                "big"
            } else {
                "little"
            },
            record.byte_order.match_system_order
        );
        if fields.is_empty() {
            header
        } else {
            format!("{header}fields:\n{}\n", textwrap::indent(&fields, "  "))
        }
    }
    pub fn dump_field(&self, field: &Field) -> String {
        format!(
            "{}: !{}{} {}",
            Self::dump_name(&field.name),
            field.order.prefix(),
            field.value.value_type(),
            self.dump_value(&field.value)
        )
    }
    pub fn dump_value(&self, value: &FieldValue) -> String {
        match value {
            FieldValue::Byte(x) => self.dump_integer(*x, format!("{x}")),
            FieldValue::Char1(x) => Self::quote(x),
            FieldValue::Char(x) => Self::quote(x),
            FieldValue::Short(x) => self.dump_integer(*x, format!("{x}")),
            FieldValue::Int(x) => self.dump_integer(*x, format!("{x}")),
            FieldValue::Long(x) => self.dump_integer(*x, format!("{x}")),
            // non finite values keep their exact bits
            FieldValue::Float(x) if x.is_finite() => format!("{x:?}"),
            FieldValue::Float(x) => format!("{:#010x}", x.to_bits()),
            FieldValue::Double(x) if x.is_finite() => format!("{x:?}"),
            FieldValue::Double(x) => format!("{:#018x}", x.to_bits()),
        }
    }
    fn dump_integer(&self, x: impl std::fmt::LowerHex, decimal: String) -> String {
        if self.dump_integers_as_hex {
            format!("{x:#x}")
        } else {
            decimal
        }
    }
    /// plain identifiers stay bare, everything else is quoted so it parses back as the same key
    fn dump_name(name: &str) -> String {
        if regex_is_match!("^[A-Za-z_][A-Za-z0-9_]*$", name)
            && !regex_is_match!("(?i)^(true|false|null|yes|no|on|off)$", name)
        {
            name.to_string()
        } else {
            Self::quote(name)
        }
    }
    fn quote(x: &str) -> String {
        let escaped: String = x
            .chars()
            .map(|c| match c {
                '"' => "\\\"".to_string(),
                '\\' => "\\\\".to_string(),
                '\n' => "\\n".to_string(),
                '\t' => "\\t".to_string(),
                '\r' => "\\r".to_string(),
                c if c.is_control() => format!("\\u{:04X}", c as u32),
                c => c.to_string(),
            })
            .collect();
        format!("\"{escaped}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldOrder, StreamOrder};
    use crate::yaml::parser::RecordYamlParser;

    fn field(name: &str, order: FieldOrder, value: FieldValue) -> Field {
        Field {
            name: name.to_string(),
            order,
            value,
        }
    }

    #[test]
    fn dump_fields() {
        let dumper = RecordYamlDumper::default();
        assert_eq!(
            dumper.dump_field(&field("magic", FieldOrder::Endian, FieldValue::Int(305419896))),
            "magic: !INT 305419896"
        );
        assert_eq!(
            dumper.dump_field(&field("scale", FieldOrder::Little, FieldValue::Double(1.0))),
            "scale: !LE-DOUBLE 1.0"
        );
        assert_eq!(
            dumper.dump_field(&field("name", FieldOrder::Big, FieldValue::Char("a\"b".into()))),
            "name: !BE-CHAR \"a\\\"b\""
        );
        assert_eq!(
            dumper.dump_value(&FieldValue::Float(f32::INFINITY)),
            "0x7f800000"
        );
    }

    #[test]
    fn dump_hex() {
        let dumper = RecordYamlDumper {
            dump_integers_as_hex: true,
        };
        assert_eq!(dumper.dump_value(&FieldValue::Short(-2)), "0xfffe");
        assert_eq!(dumper.dump_value(&FieldValue::Byte(10)), "0xa");
    }

    #[test]
    fn dump_record() {
        let mut record = Record::new(StreamOrder {
            treat_as_big_endian: false,
            match_system_order: true,
        });
        record
            .push(field("a", FieldOrder::Endian, FieldValue::Byte(1)))
            .unwrap();
        record
            .push(field("b", FieldOrder::Little, FieldValue::Long(-1)))
            .unwrap();
        assert_eq!(
            RecordYamlDumper::default().dump_record(&record),
            "byte_order: little\nmatch_system_order: true\nfields:\n  a: !BYTE 1\n  \
             b: !LE-LONG -1\n"
        );
    }

    #[test]
    fn ordered_fields_parse_back() {
        let mut record = Record::new(StreamOrder {
            treat_as_big_endian: true,
            match_system_order: true,
        });
        record
            .push(field("little", FieldOrder::Little, FieldValue::Int(-5)))
            .unwrap();
        record
            .push(field("big", FieldOrder::Big, FieldValue::Short(0x0102)))
            .unwrap();
        record
            .push(field("wide", FieldOrder::Little, FieldValue::Char("Aé".into())))
            .unwrap();
        record
            .push(field("plain", FieldOrder::Endian, FieldValue::Double(0.5)))
            .unwrap();

        let dumped = RecordYamlDumper::default().dump_record(&record);
        let parsed = RecordYamlParser::parse_from_str(&dumped).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn names_that_need_quoting() {
        let dumper = RecordYamlDumper::default();
        assert_eq!(RecordYamlDumper::dump_name("first_year"), "first_year");
        assert_eq!(RecordYamlDumper::dump_name("a: b"), "\"a: b\"");
        assert_eq!(RecordYamlDumper::dump_name("true"), "\"true\"");
        assert_eq!(RecordYamlDumper::dump_name("1st"), "\"1st\"");

        let mut record = Record::default();
        for name in ["a: b", "# hash", "true", "1st", "dash-name"] {
            record
                .push(field(name, FieldOrder::Endian, FieldValue::Byte(7)))
                .unwrap();
        }
        let dumped = dumper.dump_record(&record);
        let parsed = RecordYamlParser::parse_from_str(&dumped).unwrap();
        assert_eq!(parsed.layout(), record.layout());
    }
}
