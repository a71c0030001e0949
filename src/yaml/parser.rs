use crate::byte_order_rw::NATIVE_IS_BIG_ENDIAN;
use crate::record::{
    Field, FieldLayout, FieldOrder, FieldValue, Record, RecordError, StreamOrder, ValueType,
};
use lazy_regex::regex_captures;
use tracing::{debug, trace};
use yaml_peg::parser::parse;
use yaml_peg::parser::PError;
use yaml_peg::repr::RcRepr;
use yaml_peg::Node;

impl From<PError> for RecordError {
    fn from(e: PError) -> Self {
        match e {
            PError::Terminate { name, msg } => RecordError::Parse {
                pos: 0,
                msg: format!("{name}:\n{msg}"),
            },
            PError::Mismatch => RecordError::Parse {
                pos: 0,
                msg: "PError::Mismatch".to_string(),
            },
        }
    }
}

macro_rules! err {
    ($pos:expr, $($format_args:tt)*) => {
        RecordError::Parse { pos: $pos, msg: format!($($format_args)*) }
    };
}

// hex literals are taken as the raw bit pattern of the field width
macro_rules! parse_int_like {
    ($str:expr, $pos:expr, $kind:ty, $bits:ty) => {{
        let str = $str.trim();
        if let Some((_whole, digits)) = regex_captures!("^0[xX]([0-9a-fA-F]+)$", str) {
            <$bits>::from_str_radix(digits, 16)
                .map_err(|e| err!($pos, "couldn't parse {str} as {}: {e}", stringify!($kind)))?
                as $kind
        } else {
            str.parse::<$kind>()
                .map_err(|e| err!($pos, "couldn't parse {str} as {}: {e}", stringify!($kind)))?
        }
    }};
}

macro_rules! parse_float_like {
    ($str:expr, $pos:expr, $kind:ident, $bits:ty) => {{
        let str = $str.trim();
        if let Some((_whole, digits)) = regex_captures!("^0[xX]([0-9a-fA-F]+)$", str) {
            $kind::from_bits(<$bits>::from_str_radix(digits, 16).map_err(|e| {
                err!($pos, "couldn't parse {str} as {}: {e}", stringify!($kind))
            })?)
        } else {
            match str {
                ".nan" | ".NaN" | ".NAN" => $kind::NAN,
                ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" => $kind::INFINITY,
                "-.inf" | "-.Inf" | "-.INF" => $kind::NEG_INFINITY,
                _ => str.parse::<$kind>().map_err(|e| {
                    err!($pos, "couldn't parse {str} as {}: {e}", stringify!($kind))
                })?,
            }
        }
    }};
}

/// Parses the textual YAML representation of a [Record] as written by
/// [RecordYamlDumper][super::dumper::RecordYamlDumper]
pub struct RecordYamlParser {}
impl RecordYamlParser {
    pub fn parse_from_str(source: &str) -> Result<Record, RecordError> {
        let parsed_yaml = parse(source)?;
        if parsed_yaml.is_empty() {
            return Err(err!(0, "empty document"));
        }
        let record = Self::parse_record(&parsed_yaml[0])?;
        debug!(
            fields = record.fields().len(),
            bytes = record.byte_len(),
            "parsed record from yaml"
        );
        Ok(record)
    }

    /// parses a record document but only keeps what is needed to decode the binary form
    pub fn layout_from_str(source: &str) -> Result<(StreamOrder, Vec<FieldLayout>), RecordError> {
        let record = Self::parse_from_str(source)?;
        Ok((record.byte_order, record.layout()))
    }

    fn parse_record(source: &Node<RcRepr>) -> Result<Record, RecordError> {
        let mut byte_order = StreamOrder::default();
        let mut fields = None;
        let map = source
            .as_map()
            .map_err(|pos| err!(pos, "cant read {source:?} as map (required for a record)"))?;
        for (key, value) in map.iter() {
            let key_str = key
                .as_value()
                .map_err(|pos| err!(pos, "cant read {key:?} as a key"))?;
            match key_str {
                "byte_order" => {
                    byte_order.treat_as_big_endian = Self::parse_byte_order(value)?;
                }
                "match_system_order" => {
                    byte_order.match_system_order = value
                        .as_bool()
                        .map_err(|pos| err!(pos, "match_system_order must be true or false"))?;
                }
                "fields" => fields = Some(value),
                _ => return Err(err!(key.pos(), "unknown key '{key_str}'")),
            }
        }

        let mut record = Record::new(byte_order);
        if let Some(fields) = fields {
            for (key, value) in fields
                .as_map()
                .map_err(|pos| err!(pos, "cant read {fields:?} as map (required for fields)"))?
                .iter()
            {
                let name = key
                    .as_value()
                    .map_err(|pos| err!(pos, "cant read {key:?} as a field name"))?;
                let field = Self::parse_field(name, value)?;
                trace!(name = %field.name, value = ?field.value, "parsed field");
                record.push(field).map_err(|e| err!(key.pos(), "{e}"))?;
            }
        }
        Ok(record)
    }

    fn parse_byte_order(value: &Node<RcRepr>) -> Result<bool, RecordError> {
        let str = value
            .as_value()
            .map_err(|pos| err!(pos, "cant read {value:?} as a byte order"))?;
        match str.to_lowercase().as_str() {
            "big" | "big_endian" => Ok(true),
            "little" | "little_endian" => Ok(false),
            "native" => Ok(NATIVE_IS_BIG_ENDIAN),
            _ => Err(err!(
                value.pos(),
                "invalid byte order '{str}'. expected one of big, little, native"
            )),
        }
    }

    /// splits a yaml tag like `LE-INT` into its order and type
    pub fn parse_type_tag(tag: &str) -> Result<(FieldOrder, ValueType), RecordError> {
        let tag = tag.trim_start_matches('!');
        let (order, name) = if let Some(name) = tag.strip_prefix(FieldOrder::Little.prefix()) {
            (FieldOrder::Little, name)
        } else if let Some(name) = tag.strip_prefix(FieldOrder::Big.prefix()) {
            (FieldOrder::Big, name)
        } else {
            (FieldOrder::Endian, tag)
        };
        Ok((order, ValueType::from_name(name)?))
    }

    fn parse_field(name: &str, value: &Node<RcRepr>) -> Result<Field, RecordError> {
        let (order, value_type) = Self::parse_type_tag(value.tag()).map_err(|_| {
            err!(
                value.pos(),
                "couldnt determine the type of field '{name}' (tag '{}'). the type must be specified with a YAML tag like !INT or !LE-DOUBLE",
                value.tag()
            )
        })?;
        Ok(Field {
            name: name.to_string(),
            order,
            value: Self::parse_value(value, value_type)?,
        })
    }

    fn parse_value(value: &Node<RcRepr>, value_type: ValueType) -> Result<FieldValue, RecordError> {
        let str = value
            .as_value()
            .map_err(|pos| err!(pos, "{value:?} is not a scalar value"))?;
        let pos = value.pos();

        Ok(match value_type {
            ValueType::Byte => FieldValue::Byte(parse_int_like!(str, pos, u8, u8)),
            ValueType::Char1 => FieldValue::Char1(str.to_string()),
            ValueType::Char => FieldValue::Char(str.to_string()),
            ValueType::Short => FieldValue::Short(parse_int_like!(str, pos, i16, u16)),
            ValueType::Int => FieldValue::Int(parse_int_like!(str, pos, i32, u32)),
            ValueType::Long => FieldValue::Long(parse_int_like!(str, pos, i64, u64)),
            ValueType::Float => FieldValue::Float(parse_float_like!(str, pos, f32, u32)),
            ValueType::Double => FieldValue::Double(parse_float_like!(str, pos, f64, u64)),
        })
    }
}
