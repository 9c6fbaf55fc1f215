use std::fmt;
use std::str::FromStr;

use primitive_types::H160;
use thiserror::Error;

/// Number of bytes in a receiver address
pub const ADDRESS_LENGTH: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid address hex: {0}")]
    InvalidHex(String),
}

/// A 20-byte receiver address. Parsing checks only the hex form and length;
/// checksums and ownership belong to the wallet layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(H160);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(H160(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        self.0.as_fixed_bytes()
    }
}

impl From<H160> for Address {
    fn from(hash: H160) -> Self {
        Self(hash)
    }
}

impl From<Address> for H160 {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength(bytes.len()));
        }
        Ok(Self(H160::from_slice(bytes)))
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != ADDRESS_LENGTH * 2 {
            return Err(AddressError::InvalidLength(digits.len() / 2));
        }
        let hash = H160::from_str(digits).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        Ok(Self(hash))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
