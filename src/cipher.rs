//!
//! The Cipher module contains the Caesar shift used by the file encryptor.  Only ASCII letters
//! are shifted, within their own case; every other byte passes through unchanged, so a file
//! keeps its length and line structure.
//!

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// The smallest usable key
pub const MIN_KEY : i32 = 1;

/// The largest usable key
pub const MAX_KEY : i32 = 25;

const ALPHABET_LEN : i32 = 26;
const CHUNK_SIZE : usize = 8 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum CipherError {

    #[error("invalid key {0}, use a number between 1 and 25")]
    InvalidKey(i32),

    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path : PathBuf,
        #[source]
        source : std::io::Error,
    },
}

impl CipherError {
    fn io(path : impl Into<PathBuf>, source : std::io::Error) -> Self {
        CipherError::Io { path : path.into(), source }
    }
}

/// Which way the alphabet is rotated
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    fn sign(&self) -> i32 {
        match self {
            Direction::Encrypt => 1,
            Direction::Decrypt => -1,
        }
    }

    /// The name of the operation, as shown to the user
    pub fn verb(&self) -> &'static str {
        match self {
            Direction::Encrypt => "encrypt",
            Direction::Decrypt => "decrypt",
        }
    }
}

/// A key that has been checked to lie in 1..=25
#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub struct ShiftKey(u8);

impl ShiftKey {
    pub fn new(key : i32) -> Result<Self, CipherError> {
        if !(MIN_KEY..=MAX_KEY).contains(&key) {
            return Err(CipherError::InvalidKey(key));
        }
        Ok(ShiftKey(key as u8))
    }
}

/// Shifts a single byte
pub fn shift_byte(byte : u8, key : ShiftKey, direction : Direction) -> u8 {
    let base = match byte {
        b'A'..=b'Z' => b'A',
        b'a'..=b'z' => b'a',
        _ => return byte,
    };
    let offset = (byte - base) as i32 + key.0 as i32 * direction.sign();
    offset.rem_euclid(ALPHABET_LEN) as u8 + base
}

/// Shifts every byte of `bytes` in place
pub fn transform(bytes : &mut [u8], key : ShiftKey, direction : Direction) {
    for byte in bytes.iter_mut() {
        *byte = shift_byte(*byte, key, direction);
    }
}

/// Streams `input` through the cipher into `output`, returning the number of bytes processed
///
/// The output is written to a temporary file beside `output` and moved into place at the end, so
/// a failure never leaves a half-written output, and `input` and `output` may be the same file.
pub fn transform_file(input : impl AsRef<Path>, output : impl AsRef<Path>, key : ShiftKey, direction : Direction) -> Result<u64, CipherError> {

    let input = input.as_ref();
    let output = output.as_ref();

    let mut reader = BufReader::new(File::open(input).map_err(|e| CipherError::io(input, e))?);

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let temp_file = tempfile::NamedTempFile::new_in(&dir).map_err(|e| CipherError::io(&dir, e))?;
    let mut writer = BufWriter::new(temp_file);

    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let read = reader.read(&mut buf).map_err(|e| CipherError::io(input, e))?;
        if read == 0 {
            break;
        }
        transform(&mut buf[..read], key, direction);
        writer.write_all(&buf[..read]).map_err(|e| CipherError::io(output, e))?;
        total += read as u64;
    }

    let temp_file = writer.into_inner().map_err(|e| CipherError::io(output, e.into_error()))?;
    temp_file.persist(output).map_err(|e| CipherError::io(output, e.error))?;

    debug!(input = %input.display(), output = %output.display(), "replaced output file");
    info!(bytes = total, direction = direction.verb(), "transformed file");
    Ok(total)
}
