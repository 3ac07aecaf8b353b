//! Serde support: stamps travel as their `sdns://` strings.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::relay::RelayAndServerStamp;
use crate::stamp::Stamp;

impl Serialize for Stamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = self.to_sdns().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

impl Serialize for RelayAndServerStamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let s = self.to_sdns().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }
}

struct SdnsVisitor<T>(std::marker::PhantomData<T>);

impl<'de, T> Visitor<'de> for SdnsVisitor<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an sdns:// stamp string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.parse::<T>().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Stamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(SdnsVisitor(std::marker::PhantomData))
    }
}

impl<'de> Deserialize<'de> for RelayAndServerStamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(SdnsVisitor(std::marker::PhantomData))
    }
}
