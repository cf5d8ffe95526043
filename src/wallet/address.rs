use crate::error::{Result, VaultError};
use crate::keyguard::CryptoProvider;
use crate::utils::strip_hex_prefix;
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_LEN: usize = 20;

/// 20-byte account address, written as `0x` + 40 hex digits
///
/// Parsing accepts any letter case; display is always lower-case, so the
/// displayed form doubles as the canonical key for lookups.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LEN]);

/// The address whose hash keys the AES cipher for a private key
pub type HelperAddress = Address;

impl Address {
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn parse(input: &str) -> Result<Address> {
        let digits = strip_hex_prefix(input.trim());
        if digits.len() != ADDRESS_LEN * 2 {
            return Err(VaultError::InvalidAddress(format!(
                "{input}: expected {} hex digits, got {}",
                ADDRESS_LEN * 2,
                digits.len()
            )));
        }

        let mut bytes = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| VaultError::InvalidAddress(format!("{input}: {e}")))?;
        Ok(Address(bytes))
    }

    /// Fresh random address
    pub fn generate<P: CryptoProvider + ?Sized>(provider: &P) -> Result<Address> {
        let mut bytes = [0u8; ADDRESS_LEN];
        provider.fill_random(&mut bytes)?;
        Ok(Address(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s)
    }
}

pub fn validate_address(address: &str) -> bool {
    Address::parse(address).is_ok()
}
