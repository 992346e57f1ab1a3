use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of bytes in a SHA-1 object ID.
pub const ID_LEN: usize = 20;

/// Number of hex digits in the printed form of an object ID.
pub const HEX_LEN: usize = ID_LEN * 2;

/// Reasons a byte slice or hex string cannot be turned into an [`Id`].
///
/// [`Id`]: struct.Id.html
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ParseIdError {
    #[error("cannot parse object ID from empty string")]
    Empty,

    /// A hex digit outside `0-9a-fA-F`.
    #[error("value contains invalid digit `{0}`")]
    InvalidDigit(char),

    #[error("value is more than 40 digits long")]
    Overflow,

    #[error("value is less than 40 digits long")]
    Underflow,
}

/// An object ID is a string that identifies an object within a repository.
/// It is stored as a 20-byte signature, but can also be represented as 40 hex digits.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Id {
    id: [u8; ID_LEN],
}

impl Id {
    /// Create a new ID from a 20-byte binary slice.
    ///
    /// It is an error if the slice contains anything other than 20 bytes.
    pub fn new(id: &[u8]) -> Result<Id, ParseIdError> {
        match id.len() {
            ID_LEN => {
                let mut bytes = [0u8; ID_LEN];
                bytes.copy_from_slice(id);
                Ok(Id { id: bytes })
            }
            0 => Err(ParseIdError::Empty),
            n if n < ID_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Wrap an already-computed 20-byte digest.
    pub fn from_bytes(id: [u8; ID_LEN]) -> Id {
        Id { id }
    }

    /// Convert a 40-character hex ID to an object ID.
    pub fn from_hex<T: AsRef<[u8]>>(id: T) -> Result<Id, ParseIdError> {
        let digits = id.as_ref();

        match digits.len() {
            HEX_LEN => {
                let mut bytes = [0u8; ID_LEN];
                hex::decode_to_slice(digits, &mut bytes).map_err(|err| match err {
                    hex::FromHexError::InvalidHexCharacter { c, .. } => {
                        ParseIdError::InvalidDigit(c)
                    }
                    _ => ParseIdError::Underflow,
                })?;
                Ok(Id { id: bytes })
            }
            0 => Err(ParseIdError::Empty),
            n if n < HEX_LEN => Err(ParseIdError::Underflow),
            _ => Err(ParseIdError::Overflow),
        }
    }

    /// Return the 20 raw bytes of the ID, as written into tree entries.
    pub fn as_bytes(&self) -> &[u8] {
        &self.id
    }

    /// Return the 40-digit lowercase hex form of the ID.
    pub fn to_hex(&self) -> String {
        hex::encode(self.id)
    }
}

impl FromStr for Id {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Id::from_hex(s.as_bytes())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
