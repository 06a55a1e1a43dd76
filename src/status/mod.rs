//! Decoding of tagged unions that the node encodes in two shapes.
//!
//! Payload-less variants may arrive as a bare JSON string (`"Started"`),
//! every variant may arrive as a single-key object (`{"Failure": {..}}`).
//! Both are normalized through one path: a bare string becomes
//! `{ name: {} }` before the object rules run.

pub mod execution;
pub mod transaction;

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::Error;

pub use execution::{ExecutionStatus, ExecutionStatusKind};
pub use transaction::{SIMPLE_TRANSACTION_STATUSES, TransactionStatus, TransactionStatusKind};

/// A closed set of named variants with a mixed wire encoding.
pub trait TaggedUnion: Sized {
    /// Variant table. Parsing a name that is not in the table must fail.
    type Kind: Copy + FromStr + AsRef<str>;

    /// Whether `kind` may appear on the wire as a bare string.
    fn is_bare(kind: Self::Kind) -> bool;

    fn kind(&self) -> Self::Kind;

    /// Builds the value for `kind`, taking ownership of its payload.
    fn from_payload(kind: Self::Kind, payload: Value) -> Result<Self, Error>;

    /// Payload in canonical form; `{}` for payload-less variants.
    fn payload(&self) -> Value;
}

/// Decodes raw JSON bytes into `T`.
pub fn decode_tagged<T: TaggedUnion>(bytes: &[u8]) -> Result<T, Error> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_tagged_value(value)
}

/// Decodes an already-parsed JSON value into `T`.
pub fn decode_tagged_value<T: TaggedUnion>(value: Value) -> Result<T, Error> {
    let obj = match value {
        Value::String(name) => {
            let kind = lookup::<T>(&name)?;
            if !T::is_bare(kind) {
                return Err(Error::UnsupportedBareVariant { name });
            }
            Map::from_iter([(name, Value::Object(Map::new()))])
        }
        other => serde_json::from_value::<Map<String, Value>>(other)?,
    };

    if obj.len() != 1 {
        return Err(Error::InvalidVariantObjectShape {
            key_count: obj.len(),
        });
    }

    let Some((name, payload)) = obj.into_iter().next() else {
        return Err(Error::InvalidVariantObjectShape { key_count: 0 });
    };
    let kind = lookup::<T>(&name)?;
    T::from_payload(kind, payload)
}

/// Canonical wire form: always the single-key object, even for variants
/// that could be sent bare.
pub fn encode_tagged<T: TaggedUnion>(value: &T) -> Value {
    let mut obj = Map::new();
    obj.insert(value.kind().as_ref().to_string(), value.payload());
    Value::Object(obj)
}

fn lookup<T: TaggedUnion>(name: &str) -> Result<T::Kind, Error> {
    name.parse::<T::Kind>()
        .map_err(|_| Error::UnknownVariant {
            name: name.to_string(),
        })
}

/// Serde glue shared by the status types.
macro_rules! impl_tagged_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&$crate::status::encode_tagged(self), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = <serde_json::Value as serde::Deserialize>::deserialize(deserializer)?;
                $crate::status::decode_tagged_value(value).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_tagged_serde;
