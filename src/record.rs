use crate::byte_order_rw::NATIVE_IS_BIG_ENDIAN;
use std::fmt::{Display, Formatter};
use std::io;
use thiserror::Error;

/// The error-type produced while building, writing or reading a [Record]
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("IoError: '{0}'")]
    Io(#[from] io::Error),
    #[error("field '{0}' is defined more than once")]
    DuplicateField(String),
    #[error("unknown value type '{0}'")]
    UnknownType(String),
    #[error("Error '{msg}' at: {pos}")]
    Parse { pos: u64, msg: String },
}

/// The primitive types a record field can hold
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueType {
    Byte,
    /// one byte per character, only the low 8 bits are kept
    Char1,
    /// two bytes per UTF-16 code unit
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}
impl ValueType {
    /// bytes per element
    pub fn size(&self) -> usize {
        match self {
            ValueType::Byte => 1,
            ValueType::Char1 => 1,
            ValueType::Char => 2,
            ValueType::Short => 2,
            ValueType::Int => 4,
            ValueType::Long => 8,
            ValueType::Float => 4,
            ValueType::Double => 8,
        }
    }
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Byte => "BYTE",
            ValueType::Char1 => "CHAR1",
            ValueType::Char => "CHAR",
            ValueType::Short => "SHORT",
            ValueType::Int => "INT",
            ValueType::Long => "LONG",
            ValueType::Float => "FLOAT",
            ValueType::Double => "DOUBLE",
        }
    }
    pub fn from_name(name: &str) -> Result<Self, RecordError> {
        Ok(match name {
            "BYTE" => ValueType::Byte,
            "CHAR1" => ValueType::Char1,
            "CHAR" => ValueType::Char,
            "SHORT" => ValueType::Short,
            "INT" => ValueType::Int,
            "LONG" => ValueType::Long,
            "FLOAT" => ValueType::Float,
            "DOUBLE" => ValueType::Double,
            _ => return Err(RecordError::UnknownType(name.to_string())),
        })
    }
    pub fn is_string(&self) -> bool {
        matches!(self, ValueType::Char1 | ValueType::Char)
    }
}
impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Which byte order a single field is written in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FieldOrder {
    /// whatever the stream settings select (see [StreamOrder])
    #[default]
    Endian,
    Little,
    Big,
}
impl FieldOrder {
    /// the prefix used in front of the type name in textual representations
    pub fn prefix(&self) -> &'static str {
        match self {
            FieldOrder::Endian => "",
            FieldOrder::Little => "LE-",
            FieldOrder::Big => "BE-",
        }
    }
}

/// The stream settings a record is written with. They are not part of the written bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StreamOrder {
    pub treat_as_big_endian: bool,
    pub match_system_order: bool,
}
impl Default for StreamOrder {
    fn default() -> Self {
        Self {
            treat_as_big_endian: NATIVE_IS_BIG_ENDIAN,
            match_system_order: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Byte(u8),
    Char1(String),
    Char(String),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}
impl FieldValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            FieldValue::Byte(_) => ValueType::Byte,
            FieldValue::Char1(_) => ValueType::Char1,
            FieldValue::Char(_) => ValueType::Char,
            FieldValue::Short(_) => ValueType::Short,
            FieldValue::Int(_) => ValueType::Int,
            FieldValue::Long(_) => ValueType::Long,
            FieldValue::Float(_) => ValueType::Float,
            FieldValue::Double(_) => ValueType::Double,
        }
    }
    /// number of elements: UTF-16 code units for strings, 1 otherwise
    pub fn count(&self) -> usize {
        match self {
            FieldValue::Char1(s) | FieldValue::Char(s) => s.encode_utf16().count(),
            _ => 1,
        }
    }
    pub fn byte_len(&self) -> usize {
        self.count() * self.value_type().size()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: String,
    pub order: FieldOrder,
    pub value: FieldValue,
}
impl Field {
    pub fn layout(&self) -> FieldLayout {
        FieldLayout {
            name: self.name.clone(),
            order: self.order,
            value_type: self.value.value_type(),
            count: self.value.count(),
        }
    }
}

/// Everything needed to decode a field except its value
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: String,
    pub order: FieldOrder,
    pub value_type: ValueType,
    pub count: usize,
}
impl FieldLayout {
    pub fn byte_len(&self) -> usize {
        self.count * self.value_type.size()
    }
}

/// An ordered list of named fields, written back to back without padding or framing
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Record {
    pub byte_order: StreamOrder,
    fields: Vec<Field>,
}
impl Record {
    pub fn new(byte_order: StreamOrder) -> Self {
        Self {
            byte_order,
            fields: Vec::new(),
        }
    }
    pub fn push(&mut self, field: Field) -> Result<(), RecordError> {
        if self.get(&field.name).is_some() {
            return Err(RecordError::DuplicateField(field.name));
        }
        self.fields.push(field);
        Ok(())
    }
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }
    pub fn layout(&self) -> Vec<FieldLayout> {
        self.fields.iter().map(Field::layout).collect()
    }
    pub fn byte_len(&self) -> usize {
        self.fields.iter().map(|field| field.value.byte_len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, value: FieldValue) -> Field {
        Field {
            name: name.to_string(),
            order: FieldOrder::Endian,
            value,
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut record = Record::default();
        record.push(field("a", FieldValue::Int(1))).unwrap();
        let err = record.push(field("a", FieldValue::Short(2))).unwrap_err();
        assert!(matches!(err, RecordError::DuplicateField(name) if name == "a"));
        assert_eq!(record.fields().len(), 1);
    }

    #[test]
    fn lengths() {
        let mut record = Record::default();
        record.push(field("name", FieldValue::Char1("AB".into()))).unwrap();
        record.push(field("wide", FieldValue::Char("AB".into()))).unwrap();
        record.push(field("scale", FieldValue::Double(1.0))).unwrap();
        assert_eq!(record.byte_len(), 2 + 4 + 8);

        let layout = record.layout();
        assert_eq!(layout[1].value_type, ValueType::Char);
        assert_eq!(layout[1].count, 2);
        assert_eq!(layout[1].byte_len(), 4);
    }

    #[test]
    fn type_names() {
        for ty in [
            ValueType::Byte,
            ValueType::Char1,
            ValueType::Char,
            ValueType::Short,
            ValueType::Int,
            ValueType::Long,
            ValueType::Float,
            ValueType::Double,
        ] {
            assert_eq!(ValueType::from_name(ty.name()).unwrap(), ty);
        }
        assert!(matches!(
            ValueType::from_name("RATIONAL"),
            Err(RecordError::UnknownType(_))
        ));
    }
}
