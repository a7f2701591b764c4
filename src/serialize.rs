//! Contains custom serialization and deserialization functions.

use crate::time::{timestamp_to_server_time, ServerTime};
use std::fmt::{self, Display};
use std::marker::PhantomData;
use std::str::FromStr;
use serde::Deserialize;
use serde::de::{self, MapAccess, SeqAccess, Visitor, Deserializer, Unexpected};

/// Deserializes a number which may be given as either a string or a number.
pub fn string_or_number<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64>,
    T::Err: Display,
{
    struct NumericVisitor<T> {
        marker: PhantomData<T>,
    }

    impl<'de, T> Visitor<'de> for NumericVisitor<T>
    where
        T: FromStr + TryFrom<u64>,
        T::Err: Display,
    {
        type Value = T;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            T::try_from(v)
                .map_err(|_e| de::Error::custom("Number too large to fit in target type"))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            let v = u64::try_from(v)
                .map_err(|_e| de::Error::invalid_value(Unexpected::Signed(v), &self))?;

            self.visit_u64(v)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.parse::<T>().map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_any(NumericVisitor {
        marker: PhantomData,
    })
}

/// Same as [`string_or_number`] but falls back to `0` when the value is missing or null. Use with
/// `#[serde(default)]`.
pub fn string_or_number_or_zero<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<u64> + Default,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Null(()),
        Value(#[serde(deserialize_with = "string_or_number")] u64),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Null(()) => Ok(T::default()),
        Raw::Value(v) => T::try_from(v)
            .map_err(|_e| de::Error::custom("Number too large to fit in target type")),
    }
}

/// Deserializes a pagination cursor. Steam sends `false` when there is no next page and either a
/// number or a numeric string when there is.
pub fn cursor<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CursorVisitor;

    impl<'de> Visitor<'de> for CursorVisitor {
        type Value = Option<u64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number, a number string, false or null")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_bool<E>(self, _v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(v))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u64::try_from(v)
                .map(Some)
                .map_err(|_e| de::Error::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            v.parse::<u64>().map(Some).map_err(de::Error::custom)
        }
    }

    deserializer.deserialize_any(CursorVisitor)
}

/// Deserializes a boolean which may be given as `true`/`false`, `0`/`1` or `"0"`/`"1"`.
pub fn into_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct DeserializeBoolVisitor;

    impl<'de> Visitor<'de> for DeserializeBoolVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean, an integer or a string")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(de::Error::invalid_value(
                    Unexpected::Unsigned(other),
                    &"zero or one",
                )),
            }
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(de::Error::invalid_value(
                    Unexpected::Signed(other),
                    &"zero or one",
                )),
            }
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            match v {
                "0" => Ok(false),
                "1" => Ok(true),
                other => Err(de::Error::invalid_value(
                    Unexpected::Str(other),
                    &"zero or one",
                )),
            }
        }

        fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }
    }

    deserializer.deserialize_any(DeserializeBoolVisitor)
}

/// Deserializes a map of values keyed by strings, keeping the document order and discarding the
/// keys. Steam sends an empty array in place of an empty map.
pub fn map_values_in_order<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct MapValuesVisitor<T> {
        marker: PhantomData<Vec<T>>,
    }

    impl<'de, T> Visitor<'de> for MapValuesVisitor<T>
    where
        T: Deserialize<'de>,
    {
        type Value = Vec<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map or an array")
        }

        fn visit_seq<V>(self, mut seq: V) -> Result<Self::Value, V::Error>
        where
            V: SeqAccess<'de>,
        {
            let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));

            while let Some(item) = seq.next_element::<T>()? {
                items.push(item);
            }

            Ok(items)
        }

        fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut items = Vec::with_capacity(access.size_hint().unwrap_or(0));

            while let Some((_key, item)) = access.next_entry::<String, T>()? {
                items.push(item);
            }

            Ok(items)
        }
    }

    deserializer.deserialize_any(MapValuesVisitor {
        marker: PhantomData,
    })
}

/// Deserializes an empty string as `None`.
pub fn empty_string_is_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;

    Ok(s.filter(|s| !s.is_empty()))
}

/// Deserializes a unix timestamp in seconds, treating `0` or a missing value as `None`.
pub fn ts_seconds_option_none_when_zero<'de, D>(deserializer: D) -> Result<Option<ServerTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<i64>::deserialize(deserializer)? {
        None | Some(0) => Ok(None),
        Some(timestamp) => timestamp_to_server_time(timestamp)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {timestamp}"))),
    }
}

pub mod string {
    use std::fmt::Display;
    use std::str::FromStr;
    use serde::{de, Serializer, Deserialize, Deserializer};

    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?.parse().map_err(de::Error::custom)
    }
}

pub mod option_string {
    use std::fmt::Display;
    use std::str::FromStr;
    use serde::{Serializer, Deserialize, Deserializer};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(string) => serializer.collect_str(string),
            None => serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s: Option<String> = Option::<String>::deserialize(deserializer)?;

        if let Some(v) = s {
            return Ok(Some(v.parse::<T>().map_err(serde::de::Error::custom)?))
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Page {
        #[serde(default, deserialize_with = "cursor")]
        more_start: Option<u64>,
        #[serde(deserialize_with = "string_or_number")]
        amount: u32,
        #[serde(default, deserialize_with = "string_or_number_or_zero")]
        instanceid: u64,
        #[serde(deserialize_with = "into_bool")]
        tradable: bool,
    }

    #[test]
    fn deserializes_lenient_values() {
        let page: Page = serde_json::from_str(r#"{"more_start":false,"amount":"3","tradable":1}"#).unwrap();

        assert_eq!(page.more_start, None);
        assert_eq!(page.amount, 3);
        assert_eq!(page.instanceid, 0);
        assert!(page.tradable);

        let page: Page = serde_json::from_str(r#"{"more_start":"2000","amount":1,"instanceid":"15","tradable":false}"#).unwrap();

        assert_eq!(page.more_start, Some(2000));
        assert_eq!(page.instanceid, 15);
        assert!(!page.tradable);
    }

    #[test]
    fn deserializes_empty_array_as_empty_map() {
        #[derive(Deserialize)]
        struct Inventory {
            #[serde(deserialize_with = "map_values_in_order")]
            items: Vec<u32>,
        }

        let inventory: Inventory = serde_json::from_str(r#"{"items":[]}"#).unwrap();

        assert!(inventory.items.is_empty());

        let inventory: Inventory = serde_json::from_str(r#"{"items":{"9":3,"1":2}}"#).unwrap();

        assert_eq!(inventory.items, vec![3, 2]);
    }
}
