use super::{endian_is_little, NATIVE_IS_BIG_ENDIAN};
use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use derivative::Derivative;
use paste::paste;
use std::io::Write;
use std::{
    io::{self},
    ops::{Deref, DerefMut},
};

/// Writes primitive values to a sink in big-endian, little-endian or a configurable byte order.
///
/// The writer owns its sink. Dropping the writer drops (and thereby closes) the sink, use
/// [into_inner][Self::into_inner] to get it back instead.
///
/// # Examples
///
/// ```
/// use endian_stream::EndianWriter;
///
/// let mut writer = EndianWriter::with_match_system_order(Vec::new(), true);
/// writer.set_treat_stream_as_big_endian(false);
/// writer.write_endian_int(0x12345678).unwrap();
/// writer.write_little_endian_char1s("AB").unwrap();
/// assert_eq!(writer.into_inner(), vec![0x78, 0x56, 0x34, 0x12, 0x41, 0x42]);
/// ```
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct EndianWriter<W: Write> {
    #[derivative(Debug = "ignore")]
    writer: W,
    native_is_big_endian: bool,
    treat_stream_as_big_endian: bool,
    match_system_order: bool,
}
impl<W: Write> EndianWriter<W> {
    /// creates a writer whose `endian` methods always write big-endian
    pub fn new(writer: W) -> Self {
        Self::with_match_system_order(writer, false)
    }
    /// creates a writer whose `endian` methods follow
    /// [treat_stream_as_big_endian][Self::treat_stream_as_big_endian] if `match_system_order` is
    /// set. The stream starts out in the native byte order of the host.
    pub fn with_match_system_order(writer: W, match_system_order: bool) -> Self {
        Self {
            writer,
            native_is_big_endian: NATIVE_IS_BIG_ENDIAN,
            treat_stream_as_big_endian: NATIVE_IS_BIG_ENDIAN,
            match_system_order,
        }
    }

    pub fn native_is_big_endian(&self) -> bool {
        self.native_is_big_endian
    }
    pub fn treat_stream_as_big_endian(&self) -> bool {
        self.treat_stream_as_big_endian
    }
    /// only has an effect on the `endian` methods and only if the writer matches the system order
    pub fn set_treat_stream_as_big_endian(&mut self, big_endian: bool) {
        self.treat_stream_as_big_endian = big_endian;
    }
    pub fn match_system_order(&self) -> bool {
        self.match_system_order
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn endian_is_little(&self) -> bool {
        endian_is_little(self.match_system_order, self.treat_stream_as_big_endian)
    }
}

macro_rules! generate_write_functions {
    ($name:ident, $kind:ident) => {
        paste! {
            #[doc = "writes a `" $kind "` in big-endian order"]
            pub fn [<write_ $name>](&mut self, value: $kind) -> Result<(), io::Error> {
                self.writer.[<write_ $kind>]::<BigEndian>(value)
            }
            #[doc = "writes a `" $kind "` in little-endian order"]
            pub fn [<write_little_endian_ $name>](
                &mut self,
                value: $kind,
            ) -> Result<(), io::Error> {
                self.writer.[<write_ $kind>]::<LittleEndian>(value)
            }
            #[doc = "writes a `" $kind "` in the order selected by the stream settings"]
            pub fn [<write_endian_ $name>](&mut self, value: $kind) -> Result<(), io::Error> {
                if self.endian_is_little() {
                    self.[<write_little_endian_ $name>](value)
                } else {
                    self.[<write_ $name>](value)
                }
            }
        }
    };
}
impl<W: Write> EndianWriter<W> {
    pub fn write_byte(&mut self, value: u8) -> Result<(), io::Error> {
        self.writer.write_u8(value)
    }
    pub fn write_bytes(&mut self, value: &[u8]) -> Result<(), io::Error> {
        self.writer.write_all(value)
    }
    pub fn write_boolean(&mut self, value: bool) -> Result<(), io::Error> {
        self.writer.write_u8(value as u8)
    }

    generate_write_functions!(short, i16);
    // a char is a single UTF-16 code unit
    generate_write_functions!(char, u16);
    generate_write_functions!(int, i32);
    generate_write_functions!(long, i64);
    generate_write_functions!(float, f32);
    generate_write_functions!(double, f64);

    /// writes the low 8 bits of `value`
    pub fn write_char1(&mut self, value: char) -> Result<(), io::Error> {
        self.writer.write_u8(value as u32 as u8)
    }
    /// writes the low 8 bits of every UTF-16 code unit of `value`. No length is written.
    pub fn write_char1s(&mut self, value: &str) -> Result<(), io::Error> {
        let bytes: Vec<u8> = value.encode_utf16().map(|unit| unit as u8).collect();
        self.writer.write_all(&bytes)
    }
    /// same as [write_char1][Self::write_char1], a single byte has no order
    pub fn write_little_endian_char1(&mut self, value: char) -> Result<(), io::Error> {
        self.write_char1(value)
    }
    pub fn write_little_endian_char1s(&mut self, value: &str) -> Result<(), io::Error> {
        self.write_char1s(value)
    }
    pub fn write_endian_char1(&mut self, value: char) -> Result<(), io::Error> {
        self.write_char1(value)
    }
    pub fn write_endian_char1s(&mut self, value: &str) -> Result<(), io::Error> {
        self.write_char1s(value)
    }

    /// writes every UTF-16 code unit of `value` as two big-endian bytes. No length is written.
    pub fn write_chars(&mut self, value: &str) -> Result<(), io::Error> {
        self.write_utf16::<BigEndian>(value)
    }
    pub fn write_little_endian_chars(&mut self, value: &str) -> Result<(), io::Error> {
        self.write_utf16::<LittleEndian>(value)
    }
    pub fn write_endian_chars(&mut self, value: &str) -> Result<(), io::Error> {
        if self.endian_is_little() {
            self.write_little_endian_chars(value)
        } else {
            self.write_chars(value)
        }
    }
    fn write_utf16<O: byteorder::ByteOrder>(&mut self, value: &str) -> Result<(), io::Error> {
        let mut bytes = Vec::with_capacity(value.len() * 2);
        for unit in value.encode_utf16() {
            bytes.write_u16::<O>(unit)?;
        }
        self.writer.write_all(&bytes)
    }
}

impl<W: Write> Deref for EndianWriter<W> {
    type Target = W;

    fn deref(&self) -> &Self::Target {
        &self.writer
    }
}
impl<W: Write> DerefMut for EndianWriter<W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(match_system_order: bool, f: impl FnOnce(&mut EndianWriter<Vec<u8>>)) -> Vec<u8> {
        let mut writer = EndianWriter::with_match_system_order(Vec::new(), match_system_order);
        f(&mut writer);
        writer.into_inner()
    }

    #[test]
    fn little_endian_int() {
        let bytes = written(false, |w| w.write_little_endian_int(0x12345678).unwrap());
        assert_eq!(bytes, [0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn little_endian_char1_string() {
        let bytes = written(false, |w| w.write_little_endian_char1s("AB").unwrap());
        assert_eq!(bytes, [0x41, 0x42]);
    }

    #[test]
    fn little_endian_double_one() {
        let bytes = written(false, |w| w.write_little_endian_double(1.0).unwrap());
        assert_eq!(bytes, [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F]);
    }

    #[test]
    fn endian_char_without_system_order_is_big_endian() {
        let bytes = written(false, |w| w.write_endian_char(65).unwrap());
        assert_eq!(bytes, [0x00, 0x41]);
    }

    #[test]
    fn little_endian_short_byte_swapped() {
        for v in [0x0102i16, -2, i16::MIN, i16::MAX, 0x3333] {
            let bytes = written(false, |w| w.write_little_endian_short(v).unwrap());
            assert_eq!(i16::from_le_bytes([bytes[0], bytes[1]]), v);
            assert_eq!(i16::from_be_bytes([bytes[0], bytes[1]]), v.swap_bytes());
        }
    }

    #[test]
    fn endian_int_matches_little_endian_when_matching_system_order() {
        for v in [0, 1, -1, 0x12345678, i32::MIN] {
            let endian = written(true, |w| {
                w.set_treat_stream_as_big_endian(false);
                w.write_endian_int(v).unwrap()
            });
            let little = written(false, |w| w.write_little_endian_int(v).unwrap());
            assert_eq!(endian, little);
        }
    }

    #[test]
    fn endian_int_ignores_stream_order_without_system_order() {
        for treat_as_big in [false, true] {
            let bytes = written(false, |w| {
                w.set_treat_stream_as_big_endian(treat_as_big);
                w.write_endian_int(0x12345678).unwrap()
            });
            assert_eq!(bytes, 0x12345678i32.to_be_bytes());
        }
    }

    #[test]
    fn endian_int_big_endian_stream() {
        let bytes = written(true, |w| {
            w.set_treat_stream_as_big_endian(true);
            w.write_endian_int(0x12345678).unwrap()
        });
        assert_eq!(bytes, [0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn char1_discards_high_byte() {
        for c in ['A', '\u{00FF}', '\u{0141}', '\0'] {
            let plain = written(false, |w| w.write_char1(c).unwrap());
            let little = written(false, |w| w.write_little_endian_char1(c).unwrap());
            assert_eq!(plain, little);
            assert_eq!(plain, [(c as u32 & 0xFF) as u8]);
        }
    }

    #[test]
    fn chars_per_order() {
        let big = written(false, |w| w.write_chars("Aé").unwrap());
        assert_eq!(big, [0x00, 0x41, 0x00, 0xE9]);
        let little = written(false, |w| w.write_little_endian_chars("Aé").unwrap());
        assert_eq!(little, [0x41, 0x00, 0xE9, 0x00]);
    }

    #[test]
    fn nan_keeps_its_payload() {
        let nan = f32::from_bits(0x7FA0_0001);
        let bytes = written(false, |w| w.write_little_endian_float(nan).unwrap());
        assert_eq!(u32::from_le_bytes(bytes.try_into().unwrap()), 0x7FA0_0001);

        let nan = f64::from_bits(0xFFF0_0000_0000_0001);
        let bytes = written(false, |w| w.write_little_endian_double(nan).unwrap());
        assert_eq!(
            u64::from_le_bytes(bytes.try_into().unwrap()),
            0xFFF0_0000_0000_0001
        );
    }

    #[test]
    fn stream_starts_in_native_order() {
        let writer = EndianWriter::new(Vec::new());
        assert_eq!(writer.treat_stream_as_big_endian(), writer.native_is_big_endian());
        assert!(!writer.match_system_order());
    }

    #[test]
    fn sink_errors_are_propagated() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let mut writer = EndianWriter::new(Broken);
        let err = writer.write_little_endian_long(7).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
