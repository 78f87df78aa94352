//!
//! Contains wrappers around the logic to encode and decode records into bytes, abstracting away the format.
//!

/// Wraps an interface to a fixed-width encode / decode format
///
/// NOTE: It's unlikely you will want to implement this trait.  Instead use [BincodeCoder], which is
/// the coder every built-in schema uses.
///
/// A Coder used by a [Table](crate::Table) must produce the same number of bytes for every value
/// of a record type, because the persisted file has no framing and the record count is derived from
/// the file length.  The Table checks this on every encode.
pub trait Coder: Clone + Send + Sync + 'static {

    /// Create a new coder
    fn new() -> Self;

    /// Encodes a record to bytes
    fn encode_to_buf<T: serde::ser::Serialize>(&self, obj: &T) -> Result<Vec<u8>, String>;

    /// Encodes a record, appending the bytes to an existing buffer
    fn encode_into<T: serde::ser::Serialize>(&self, obj: &T, buf: &mut Vec<u8>) -> Result<(), String> {
        buf.extend_from_slice(&self.encode_to_buf(obj)?);
        Ok(())
    }

    /// Decodes a record from bytes.  All of the bytes must be consumed
    fn decode_from_bytes<'a, T: serde::de::Deserialize<'a>>(&self, bytes: &'a [u8]) -> Result<T, String>;
}

pub(crate) mod bincode_interface {
    use super::*;
    use bincode::Options;
    use bincode::config::*;

    /// A [Coder] using bincode with fixed-width integers and little-endian byte order
    ///
    /// With this configuration every integer and float is written at its natural width, a `bool`
    /// is one byte, and fixed arrays (including [FixedText](crate::FixedText)) are written element
    /// by element with no length prefix.  The layout of a record is therefore exactly the sum of
    /// the widths of its fields, in declaration order, with no padding.
    #[derive(Clone)]
    pub struct BincodeCoder {
        fixint_coder: WithOtherEndian<WithOtherIntEncoding<DefaultOptions, FixintEncoding>, LittleEndian>,
    }

    impl Coder for BincodeCoder {

        fn new() -> Self {
            Self {
                fixint_coder: bincode::DefaultOptions::new().with_fixint_encoding().with_little_endian(),
            }
        }
        fn encode_to_buf<T: serde::ser::Serialize>(&self, obj: &T) -> Result<Vec<u8>, String> {
            self.fixint_coder.serialize(obj).map_err(|e| format!("Encode error: {e}"))
        }
        fn encode_into<T: serde::ser::Serialize>(&self, obj: &T, buf: &mut Vec<u8>) -> Result<(), String> {
            self.fixint_coder.serialize_into(buf, obj).map_err(|e| format!("Encode error: {e}"))
        }
        fn decode_from_bytes<'a, T: serde::de::Deserialize<'a>>(&self, bytes: &'a [u8]) -> Result<T, String> {
            self.fixint_coder.deserialize(bytes).map_err(|e| format!("Decode error: {e}"))
        }
    }
}

pub use bincode_interface::BincodeCoder;

#[cfg(test)]
mod tests {
    use serde::{Serialize, Deserialize};

    use super::*;
    use crate::FixedText;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id : u32,
        flag : bool,
        label : FixedText<6>,
        amounts : [i32; 2],
        rate : f64,
    }

    #[test]
    fn fixint_layout_is_exact() {
        let coder = BincodeCoder::new();
        let sample = Sample {
            id : 0x0102_0304,
            flag : true,
            label : FixedText::new("abc"),
            amounts : [-1, 2],
            rate : 1.5,
        };
        let bytes = coder.encode_to_buf(&sample).unwrap();

        //4 + 1 + 6 + 2*4 + 8
        assert_eq!(bytes.len(), 27);
        assert_eq!(&bytes[0..4], &[4, 3, 2, 1]);
        assert_eq!(bytes[4], 1);
        assert_eq!(&bytes[5..11], b"abc\0\0\0");
        assert_eq!(&bytes[11..15], &(-1i32).to_le_bytes());
        assert_eq!(&bytes[15..19], &2i32.to_le_bytes());
        assert_eq!(&bytes[19..27], &1.5f64.to_le_bytes());

        //Every value encodes to the same width
        assert_eq!(coder.encode_to_buf(&Sample::default()).unwrap().len(), 27);

        let decoded : Sample = coder.decode_from_bytes(&bytes).unwrap();
        assert_eq!(decoded, sample);
    }

    #[test]
    fn encode_into_appends() {
        let coder = BincodeCoder::new();
        let mut buf = vec![9u8];
        coder.encode_into(&7u32, &mut buf).unwrap();
        assert_eq!(buf, vec![9, 7, 0, 0, 0]);
    }

    #[test]
    fn decode_rejects_short_and_long_input() {
        let coder = BincodeCoder::new();
        let bytes = coder.encode_to_buf(&Sample::default()).unwrap();
        assert!(coder.decode_from_bytes::<Sample>(&bytes[..bytes.len()-1]).is_err());

        let mut long = bytes.clone();
        long.push(0);
        assert!(coder.decode_from_bytes::<Sample>(&long).is_err());
    }
}
