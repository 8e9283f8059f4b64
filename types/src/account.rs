//! Account identifier type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::FaceIdError;

/// A ledger account identifier: 20 bytes, rendered as `0x` + 40 lowercase hex digits.
///
/// Identifiers are assigned externally (by the wallet holding the account) and are
/// the sole key of an [`IdentityRecord`](crate::IdentityRecord). Parsing accepts
/// mixed-case input so checksummed addresses compare equal to their lowercase form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId([u8; 20]);

impl AccountId {
    /// The standard prefix for all account identifiers.
    pub const PREFIX: &'static str = "0x";

    /// Byte length of the raw identifier.
    pub const LEN: usize = 20;

    /// Create an account identifier from its raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Parse an identifier from its `0x`-prefixed hex form.
    pub fn parse(raw: &str) -> Result<Self, FaceIdError> {
        let digits = raw
            .strip_prefix(Self::PREFIX)
            .or_else(|| raw.strip_prefix("0X"))
            .ok_or_else(|| FaceIdError::InvalidAccount(format!("{raw}: missing 0x prefix")))?;
        if digits.len() != Self::LEN * 2 {
            return Err(FaceIdError::InvalidAccount(format!(
                "{raw}: expected {} hex digits, got {}",
                Self::LEN * 2,
                digits.len()
            )));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| FaceIdError::InvalidAccount(format!("{raw}: {e}")))?;
        Ok(Self(bytes))
    }

    /// Return the raw identifier bytes (used as the storage key).
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Rebuild an identifier from a storage key.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FaceIdError> {
        let arr: [u8; 20] = bytes.try_into().map_err(|_| {
            FaceIdError::InvalidAccount(format!("expected 20 bytes, got {}", bytes.len()))
        })?;
        Ok(Self(arr))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({self})")
    }
}

impl FromStr for AccountId {
    type Err = FaceIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = FaceIdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AccountId> for String {
    fn from(account: AccountId) -> Self {
        account.to_string()
    }
}
