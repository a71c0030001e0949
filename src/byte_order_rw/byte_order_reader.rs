use super::{endian_is_little, NATIVE_IS_BIG_ENDIAN};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use derivative::Derivative;
use paste::paste;
use std::{
    io::{self, Read},
    ops::{Deref, DerefMut},
};

/// Reads what an [EndianWriter][super::EndianWriter] with the same settings wrote.
#[derive(Derivative)]
#[derivative(Debug(bound = ""))]
pub struct EndianReader<R: Read> {
    #[derivative(Debug = "ignore")]
    reader: R,
    native_is_big_endian: bool,
    treat_stream_as_big_endian: bool,
    match_system_order: bool,
}
impl<R: Read> EndianReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_match_system_order(reader, false)
    }
    pub fn with_match_system_order(reader: R, match_system_order: bool) -> Self {
        Self {
            reader,
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
    pub fn set_treat_stream_as_big_endian(&mut self, big_endian: bool) {
        self.treat_stream_as_big_endian = big_endian;
    }
    pub fn match_system_order(&self) -> bool {
        self.match_system_order
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn endian_is_little(&self) -> bool {
        endian_is_little(self.match_system_order, self.treat_stream_as_big_endian)
    }
}

macro_rules! generate_read_functions {
    ($name:ident, $kind:ident) => {
        paste! {
            #[allow(unused)]
            pub fn [<read_ $name>](&mut self) -> Result<$kind, io::Error> {
                self.reader.[<read_ $kind>]::<BigEndian>()
            }
            #[allow(unused)]
            pub fn [<read_little_endian_ $name>](&mut self) -> Result<$kind, io::Error> {
                self.reader.[<read_ $kind>]::<LittleEndian>()
            }
            #[allow(unused)]
            pub fn [<read_endian_ $name>](&mut self) -> Result<$kind, io::Error> {
                if self.endian_is_little() {
                    self.[<read_little_endian_ $name>]()
                } else {
                    self.[<read_ $name>]()
                }
            }
        }
    };
}
impl<R: Read> EndianReader<R> {
    pub fn read_byte(&mut self) -> Result<u8, io::Error> {
        self.reader.read_u8()
    }
    pub fn read_boolean(&mut self) -> Result<bool, io::Error> {
        Ok(self.reader.read_u8()? != 0)
    }

    generate_read_functions!(short, i16);
    generate_read_functions!(char, u16);
    generate_read_functions!(int, i32);
    generate_read_functions!(long, i64);
    generate_read_functions!(float, f32);
    generate_read_functions!(double, f64);

    /// reads a single byte as the code point of the same value
    pub fn read_char1(&mut self) -> Result<char, io::Error> {
        Ok(self.reader.read_u8()? as char)
    }
    /// reads `count` single byte characters
    pub fn read_char1s(&mut self, count: usize) -> Result<String, io::Error> {
        let mut bytes = vec![0u8; count];
        self.reader.read_exact(&mut bytes)?;
        Ok(bytes.into_iter().map(char::from).collect())
    }

    /// reads `count` big-endian UTF-16 code units. Unpaired surrogates become U+FFFD.
    pub fn read_chars(&mut self, count: usize) -> Result<String, io::Error> {
        self.read_utf16::<BigEndian>(count)
    }
    pub fn read_little_endian_chars(&mut self, count: usize) -> Result<String, io::Error> {
        self.read_utf16::<LittleEndian>(count)
    }
    pub fn read_endian_chars(&mut self, count: usize) -> Result<String, io::Error> {
        if self.endian_is_little() {
            self.read_little_endian_chars(count)
        } else {
            self.read_chars(count)
        }
    }
    fn read_utf16<O: byteorder::ByteOrder>(&mut self, count: usize) -> Result<String, io::Error> {
        let mut units = vec![0u16; count];
        self.reader.read_u16_into::<O>(&mut units)?;
        Ok(String::from_utf16_lossy(&units))
    }
}

impl<R: Read> Deref for EndianReader<R> {
    type Target = R;

    fn deref(&self) -> &Self::Target {
        &self.reader
    }
}
impl<R: Read> DerefMut for EndianReader<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.reader
    }
}
