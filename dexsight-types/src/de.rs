//! Serde helpers for subgraph scalars.
//!
//! `BigInt` values arrive as JSON strings while `Int` values arrive as numbers;
//! both decode into the same Rust integer.

/// Integers encoded either as a JSON number or as a decimal string.
pub mod num_str {
    use core::fmt::Display;
    use std::str::FromStr;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &T, s: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        value.serialize(s)
    }

    pub fn deserialize<'de, T, D>(d: D) -> Result<T, D::Error>
    where
        T: FromStr + Deserialize<'de>,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw<T> {
            Num(T),
            Str(String),
        }

        match Raw::<T>::deserialize(d)? {
            Raw::Num(n) => Ok(n),
            Raw::Str(s) => s.trim().parse::<T>().map_err(serde::de::Error::custom),
        }
    }
}

/// `BigDecimal` values that may not fit a [`Decimal`](rust_decimal::Decimal).
///
/// Decodes to `None` when the value overflows the 96-bit mantissa or is so
/// small that it would round to zero. Null and missing values are `None` too.
/// Text that is not a number at all is still an error.
pub mod lenient_decimal {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::FromPrimitive;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(d: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Str(String),
            Num(f64),
        }

        match Option::<Raw>::deserialize(d)? {
            None => Ok(None),
            Some(Raw::Num(n)) => Ok(Decimal::from_f64(n).filter(|v| !v.is_zero() || n == 0.0)),
            Some(Raw::Str(s)) => parse(s.trim()).map_err(serde::de::Error::custom),
        }
    }

    /// Parse a decimal string, mapping out-of-range magnitudes to `None`.
    ///
    /// # Errors
    /// Returns an error if `s` is not a decimal number.
    pub fn parse(s: &str) -> Result<Option<Decimal>, String> {
        let mantissa = s.split(['e', 'E']).next().unwrap_or_default();
        let numeric = !mantissa.is_empty()
            && mantissa.bytes().any(|b| b.is_ascii_digit())
            && s.bytes().all(|b| b.is_ascii_digit() || b"+-.eE".contains(&b));
        if !numeric {
            return Err(format!("invalid decimal `{s}`"));
        }
        let parsed = if s.len() == mantissa.len() {
            Decimal::from_str_exact(s).or_else(|_| s.parse::<Decimal>())
        } else {
            Decimal::from_scientific(s)
        };
        let nonzero = mantissa.bytes().any(|b| (b'1'..=b'9').contains(&b));
        Ok(parsed.ok().filter(|v| !v.is_zero() || !nonzero))
    }

}
