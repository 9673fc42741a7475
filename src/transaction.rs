//! Transaction models for JSON parsing.

use crate::filter::parse_purchase_date;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;

/// A purchase transaction as supplied by the data source.
///
/// Deserialization is lenient: identifiers may be strings or numbers, and a
/// malformed `price` or `purchaseDate` never rejects the record. Those fields
/// degrade later, inside the calculator and the date filter.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Opaque, unique transaction identifier
    #[serde(default)]
    pub transaction_id: Identifier,

    /// Stable customer identifier, used as the monthly grouping key
    #[serde(default)]
    pub customer_id: Identifier,

    #[serde(default, deserialize_with = "text_or_number")]
    pub customer_name: String,

    /// Raw purchase date, typically `YYYY-MM-DD`
    #[serde(default)]
    pub purchase_date: Option<String>,

    #[serde(default, deserialize_with = "text_or_number")]
    pub product: String,

    #[serde(default)]
    pub price: Price,
}

impl Transaction {
    /// Returns the parsed purchase date, or `None` if absent or unparseable.
    pub fn purchased_on(&self) -> Option<NaiveDate> {
        self.purchase_date.as_deref().and_then(parse_purchase_date)
    }
}

/// Purchase amount as it appeared in the input.
///
/// Numbers and numeric strings become `Amount`; anything else that is a
/// string is kept verbatim in `Text` so the calculator can apply
/// leading-integer semantics to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Price {
    /// null, missing, or a non-numeric JSON value
    #[default]
    Missing,

    Amount(Decimal),

    Text(String),
}

impl Price {
    /// Truncates the amount to whole units.
    ///
    /// Strings are read up to the first character that cannot continue an
    /// integer (`"105.5"` is 105, `"12abc"` is 12). Returns `None` when no
    /// integer can be read at all.
    pub fn whole_units(&self) -> Option<i64> {
        match self {
            Price::Missing => None,
            Price::Amount(amount) => {
                let truncated = amount.trunc();
                truncated.to_i64().or_else(|| {
                    if truncated.is_sign_positive() {
                        Some(i64::MAX)
                    } else {
                        Some(i64::MIN)
                    }
                })
            }
            Price::Text(text) => leading_integer(text),
        }
    }
}

/// A transaction or customer identifier.
///
/// Numeric identifiers keep their numeric value so that tables order them
/// numerically (`2 < 9 < 10`); everything else is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Number(Decimal),
    Text(String),
}

impl Default for Identifier {
    fn default() -> Self {
        Identifier::Text(String::new())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(number) => write!(f, "{}", number),
            Identifier::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Identifier {
    fn from(text: &str) -> Self {
        Identifier::Text(text.to_string())
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        match self {
            Identifier::Text(text) => text.as_str() == *other,
            Identifier::Number(_) => self.to_string() == *other,
        }
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<TextOrNumber>::deserialize(deserializer)?;
        Ok(match value {
            Some(TextOrNumber::Text(text)) => Identifier::Text(text),
            Some(TextOrNumber::Number(number)) => {
                let spelled = number.to_string();
                match Decimal::from_str(&spelled) {
                    Ok(decimal) => Identifier::Number(decimal),
                    Err(_) => Identifier::Text(spelled),
                }
            }
            None => Identifier::default(),
        })
    }
}

/// Shape of a price in the input before classification.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Amount(Decimal),
    Text(String),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<RawPrice>::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawPrice::Amount(amount)) => Price::Amount(amount),
            Some(RawPrice::Text(text)) => Price::Text(text),
            Some(RawPrice::Other(_)) | None => Price::Missing,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Accepts a string, a number, or null; numbers keep their JSON spelling.
fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(match value {
        Some(TextOrNumber::Text(text)) => text,
        Some(TextOrNumber::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

/// Reads an optionally signed integer prefix, saturating on overflow.
fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { -value } else { value })
}
