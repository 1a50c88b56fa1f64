use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DexError;

/// Lower-cased `0x`-prefixed 20-byte hex identifier for pairs and tokens.
///
/// Subgraph entity ids are case-sensitive strings, so everything is normalized
/// to lower case on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address.
    ///
    /// # Errors
    /// Returns `DexError::InvalidArg` unless the input is `0x` followed by 40 hex digits.
    pub fn new(raw: &str) -> Result<Self, DexError> {
        let s = raw.trim();
        let hex = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| DexError::InvalidArg(format!("address must start with 0x: {raw}")))?;
        if hex.len() != 40 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(DexError::InvalidArg(format!(
                "address must be 20 hex-encoded bytes: {raw}"
            )));
        }
        Ok(Self(format!("0x{}", hex.to_ascii_lowercase())))
    }

    /// Build from a literal known to be well formed (constants, fixtures).
    #[must_use]
    pub fn from_static(raw: &'static str) -> Self {
        debug_assert!(Self::new(raw).is_ok(), "malformed address literal {raw}");
        Self(raw.to_ascii_lowercase())
    }

    /// Borrow the normalized string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = DexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Address {
    type Error = DexError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
