//! The `"<type> <size>\0"` prefix that frames every stored object.

use std::io::{self, BufRead};

use thiserror::Error;

use super::parse_utils::{self, Token};
use super::{Kind, ParseKindError};

/// Maximum number of bytes examined while looking for the end of a header.
///
/// The longest legitimate header (`commit ` followed by a 20-digit size and
/// the null byte) is well under this.
pub const MAX_HEADER_LEN: usize = 128;

/// Reasons why an object header could not be decoded.
#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("no null byte within the first {0} bytes")]
    Unterminated(usize),

    #[error("expected `<type> <size>`, found {0:?}")]
    FieldCount(String),

    #[error(transparent)]
    Kind(#[from] ParseKindError),

    #[error("invalid object size {0:?}")]
    Size(String),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

/// The decoded type and payload size of an object.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    pub kind: Kind,
    pub size: usize,
}

impl Header {
    pub fn new(kind: Kind, size: usize) -> Header {
        Header { kind, size }
    }

    /// Encode the header, including its trailing null byte.
    pub fn encode(&self) -> Vec<u8> {
        format!("{} {}\0", self.kind, self.size).into_bytes()
    }

    /// Read a header from the start of an object stream.
    ///
    /// On success the stream is positioned at the first byte of the payload
    /// and the returned length counts the header bytes including the null.
    /// Nothing past the null byte is consumed.
    pub fn read_from<R: BufRead + ?Sized>(r: &mut R) -> Result<(Header, usize), HeaderError> {
        let text = match parse_utils::read_until_bounded(r, 0, MAX_HEADER_LEN)? {
            Token::Found(text) => text,
            Token::Eof(_) | Token::TooLong(_) => {
                return Err(HeaderError::Unterminated(MAX_HEADER_LEN))
            }
        };

        let header = Header::parse(&text)?;
        Ok((header, text.len() + 1))
    }

    /// Parse header text with the null byte already removed.
    pub fn parse(text: &[u8]) -> Result<Header, HeaderError> {
        let fields: Vec<&[u8]> = text.split(|b| *b == b' ').collect();
        if fields.len() != 2 {
            return Err(HeaderError::FieldCount(
                String::from_utf8_lossy(text).into_owned(),
            ));
        }

        let kind = Kind::from_bytes(fields[0])?;
        let size = parse_size(fields[1])?;

        Ok(Header { kind, size })
    }
}

fn parse_size(digits: &[u8]) -> Result<usize, HeaderError> {
    let invalid = || HeaderError::Size(String::from_utf8_lossy(digits).into_owned());

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .ok_or_else(invalid)
}
