//! Lenient serde helpers
//!
//! Multipart form fields always arrive as text, while JSON clients send real
//! numbers. Numeric payload fields accept both `30` and `"30"`.

use serde::{Deserialize, Deserializer};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText<T> {
    Number(T),
    Text(String),
}

impl<T> NumberOrText<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn into_number<E: serde::de::Error>(self) -> Result<T, E> {
        match self {
            NumberOrText::Number(n) => Ok(n),
            NumberOrText::Text(s) => s
                .trim()
                .parse::<T>()
                .map_err(|e| E::custom(format!("invalid number '{}': {}", s, e))),
        }
    }
}

/// Deserialize a number given either as a JSON number or a numeric string
pub fn number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    NumberOrText::<T>::deserialize(deserializer)?.into_number()
}

/// Optional variant of [`number`]; `null` and blank strings map to `None`
pub fn option_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    match Option::<NumberOrText<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => v.into_number().map(Some),
    }
}
