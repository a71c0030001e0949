//! Textual YAML representation of [Records][crate::Record].
//!
//! A document consists of an optional stream header and an ordered mapping of fields. Every field
//! carries its type as a YAML tag, optionally prefixed with `LE-` or `BE-` to pin its byte order:
//!
//! ```yaml
//! byte_order: little        # little | big | native
//! match_system_order: true
//! fields:
//!   magic: !INT 0x12345678
//!   station: !CHAR1 "AB"
//!   scale: !LE-DOUBLE 1.0
//! ```

pub mod dumper;
pub mod parser;
