use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::error::Error;
use crate::status::{TaggedUnion, decode_tagged, impl_tagged_serde};
use crate::types::CryptoHash;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
pub enum ExecutionStatusKind {
    Unknown,
    Failure,
    SuccessValue,
    SuccessReceiptId,
}

/// Status of a single transaction or receipt outcome.
///
/// The node sends `"Unknown"` bare; the rest use the object form.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExecutionStatus {
    #[default]
    Unknown,
    Failure(Value),
    /// Base64 return value, possibly empty.
    SuccessValue(String),
    SuccessReceiptId(CryptoHash),
}

impl ExecutionStatus {
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        decode_tagged(bytes)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::SuccessValue(_) | Self::SuccessReceiptId(_))
    }

    /// Decoded return bytes of a `SuccessValue`, `None` for other variants.
    pub fn success_bytes(&self) -> Result<Option<Vec<u8>>, Error> {
        let Self::SuccessValue(encoded) = self else {
            return Ok(None);
        };
        STANDARD
            .decode(encoded)
            .map(Some)
            .map_err(|e| Error::Payload {
                field: "SuccessValue",
                reason: e.to_string(),
            })
    }
}

impl TaggedUnion for ExecutionStatus {
    type Kind = ExecutionStatusKind;

    fn is_bare(kind: ExecutionStatusKind) -> bool {
        kind == ExecutionStatusKind::Unknown
    }

    fn kind(&self) -> ExecutionStatusKind {
        match self {
            Self::Unknown => ExecutionStatusKind::Unknown,
            Self::Failure(_) => ExecutionStatusKind::Failure,
            Self::SuccessValue(_) => ExecutionStatusKind::SuccessValue,
            Self::SuccessReceiptId(_) => ExecutionStatusKind::SuccessReceiptId,
        }
    }

    fn from_payload(kind: ExecutionStatusKind, payload: Value) -> Result<Self, Error> {
        match kind {
            ExecutionStatusKind::Unknown => Ok(Self::Unknown),
            ExecutionStatusKind::Failure => Ok(Self::Failure(payload)),
            ExecutionStatusKind::SuccessValue => match payload {
                Value::String(encoded) => Ok(Self::SuccessValue(encoded)),
                other => Err(Error::Payload {
                    field: "SuccessValue",
                    reason: format!("expected a base64 string, got {other}"),
                }),
            },
            ExecutionStatusKind::SuccessReceiptId => {
                let Some(id) = payload.as_str() else {
                    return Err(Error::Payload {
                        field: "SuccessReceiptId",
                        reason: format!("expected a receipt hash, got {payload}"),
                    });
                };
                let hash = id.parse::<CryptoHash>().map_err(|e| Error::Payload {
                    field: "SuccessReceiptId",
                    reason: e.to_string(),
                })?;
                Ok(Self::SuccessReceiptId(hash))
            }
        }
    }

    fn payload(&self) -> Value {
        match self {
            Self::Unknown => Value::Object(serde_json::Map::new()),
            Self::Failure(v) => v.clone(),
            Self::SuccessValue(s) => Value::String(s.clone()),
            Self::SuccessReceiptId(hash) => Value::String(hash.to_string()),
        }
    }
}

impl_tagged_serde!(ExecutionStatus);

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;

    const RECEIPT: &str = "9FtHUFBQsZ2MG77K3x3MJ9wjX3UT8zE1TczCrhZEcG8U";

    #[test]
    fn unknown_decodes_from_bare_string() {
        assert_eq!(
            ExecutionStatus::decode(b"\"Unknown\"").unwrap(),
            ExecutionStatus::Unknown
        );
    }

    #[test]
    fn success_value_keeps_base64_and_decodes_bytes() {
        let status = ExecutionStatus::decode(br#"{"SuccessValue": "aGVsbG8="}"#).unwrap();
        assert_eq!(status, ExecutionStatus::SuccessValue("aGVsbG8=".to_string()));
        assert_eq!(status.success_bytes().unwrap(), Some(b"hello".to_vec()));

        let empty = ExecutionStatus::decode(br#"{"SuccessValue": ""}"#).unwrap();
        assert_eq!(empty.success_bytes().unwrap(), Some(Vec::new()));
        assert!(empty.is_success());
    }

    #[test]
    fn success_receipt_id_is_a_hash() {
        let input = format!(r#"{{"SuccessReceiptId": "{RECEIPT}"}}"#);
        let status = ExecutionStatus::decode(input.as_bytes()).unwrap();
        assert_eq!(
            status,
            ExecutionStatus::SuccessReceiptId(RECEIPT.parse().unwrap())
        );
        assert_eq!(status.success_bytes().unwrap(), None);
    }

    #[test]
    fn typed_payload_mismatches_are_payload_errors() {
        let err = ExecutionStatus::decode(br#"{"SuccessValue": 5}"#).unwrap_err();
        assert!(matches!(err, Error::Payload { field: "SuccessValue", .. }));

        let err = ExecutionStatus::decode(br#"{"SuccessReceiptId": "not-base58!"}"#).unwrap_err();
        assert!(matches!(err, Error::Payload { field: "SuccessReceiptId", .. }));
        assert!(err.is_decode_failure());
    }

    #[test]
    fn bare_payload_variants_are_unsupported() {
        let err = ExecutionStatus::decode(b"\"SuccessReceiptId\"").unwrap_err();
        assert!(matches!(err, Error::UnsupportedBareVariant { .. }));
    }

    #[test]
    fn transaction_only_variants_are_unknown_here() {
        let err = ExecutionStatus::decode(b"\"Started\"").unwrap_err();
        assert!(matches!(err, Error::UnknownVariant { .. }));
    }

    #[test]
    fn invalid_base64_surfaces_on_access() {
        let status = ExecutionStatus::SuccessValue("***".to_string());
        assert!(matches!(
            status.success_bytes(),
            Err(Error::Payload { field: "SuccessValue", .. })
        ));
    }

    #[test]
    fn serializes_in_object_form() {
        let hash: CryptoHash = RECEIPT.parse().unwrap();
        assert_eq!(
            serde_json::to_value(ExecutionStatus::SuccessReceiptId(hash)).unwrap(),
            serde_json::json!({ "SuccessReceiptId": RECEIPT })
        );
        assert_eq!(
            serde_json::to_value(ExecutionStatus::Unknown).unwrap(),
            serde_json::json!({ "Unknown": {} })
        );
    }

    #[test]
    fn failure_payload_keeps_wide_integers() {
        let input = r#"{"Failure":{"balance":340282366920938463463374607431768211455}}"#;
        let status = ExecutionStatus::decode(input.as_bytes()).unwrap();
        assert_eq!(serde_json::to_string(&status).unwrap(), input);
    }
}
