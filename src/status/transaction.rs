use serde_json::Value;

use crate::error::Error;
use crate::status::{TaggedUnion, decode_tagged, encode_tagged, impl_tagged_serde};

/// Variant table for [`TransactionStatus`]. The ordinal only selects a
/// payload slot; the wire carries the name.
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
#[repr(u8)]
pub enum TransactionStatusKind {
    NotStarted = 0,
    Started = 1,
    Failure = 2,
    SuccessValue = 3,
}

/// Variants allowed to arrive as a bare string.
pub const SIMPLE_TRANSACTION_STATUSES: &[TransactionStatusKind] = &[
    TransactionStatusKind::NotStarted,
    TransactionStatusKind::Started,
];

impl TransactionStatusKind {
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::NotStarted),
            1 => Some(Self::Started),
            2 => Some(Self::Failure),
            3 => Some(Self::SuccessValue),
            _ => None,
        }
    }

    pub fn is_simple(self) -> bool {
        SIMPLE_TRANSACTION_STATUSES.contains(&self)
    }
}

/// Overall status of a transaction, the `status` field of a final
/// execution outcome.
///
/// `Failure` and `SuccessValue` carry the node's JSON untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TransactionStatus {
    #[default]
    NotStarted,
    Started,
    Failure(Value),
    SuccessValue(Value),
}

impl TransactionStatus {
    /// Decodes a status from raw JSON bytes in either wire form.
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        decode_tagged(bytes)
    }

    /// Canonical object-form encoding.
    pub fn to_canonical_json(&self) -> Value {
        encode_tagged(self)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::SuccessValue(_))
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Failure(_) | Self::SuccessValue(_))
    }

    pub fn failure(&self) -> Option<&Value> {
        match self {
            Self::Failure(v) => Some(v),
            _ => None,
        }
    }

    pub fn success_value(&self) -> Option<&Value> {
        match self {
            Self::SuccessValue(v) => Some(v),
            _ => None,
        }
    }
}

impl TaggedUnion for TransactionStatus {
    type Kind = TransactionStatusKind;

    fn is_bare(kind: TransactionStatusKind) -> bool {
        kind.is_simple()
    }

    fn kind(&self) -> TransactionStatusKind {
        match self {
            Self::NotStarted => TransactionStatusKind::NotStarted,
            Self::Started => TransactionStatusKind::Started,
            Self::Failure(_) => TransactionStatusKind::Failure,
            Self::SuccessValue(_) => TransactionStatusKind::SuccessValue,
        }
    }

    fn from_payload(kind: TransactionStatusKind, payload: Value) -> Result<Self, Error> {
        Ok(match kind {
            TransactionStatusKind::NotStarted => Self::NotStarted,
            TransactionStatusKind::Started => Self::Started,
            TransactionStatusKind::Failure => Self::Failure(payload),
            TransactionStatusKind::SuccessValue => Self::SuccessValue(payload),
        })
    }

    fn payload(&self) -> Value {
        match self {
            Self::NotStarted | Self::Started => Value::Object(serde_json::Map::new()),
            Self::Failure(v) | Self::SuccessValue(v) => v.clone(),
        }
    }
}

impl_tagged_serde!(TransactionStatus);

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    clippy::panic,
    reason = "test code uses unwrap/panic for concise assertions"
)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn bare_simple_variants_decode() {
        assert_eq!(
            TransactionStatus::decode(b"\"NotStarted\"").unwrap(),
            TransactionStatus::NotStarted
        );
        assert_eq!(
            TransactionStatus::decode(b"\"Started\"").unwrap(),
            TransactionStatus::Started
        );
    }

    #[test]
    fn success_value_payload_is_kept_verbatim() {
        let status =
            TransactionStatus::decode(br#"{"SuccessValue": {"result":"aGVsbG8="}}"#).unwrap();
        assert_eq!(
            status,
            TransactionStatus::SuccessValue(serde_json::json!({"result": "aGVsbG8="}))
        );
        assert!(status.is_success());
    }

    #[test]
    fn failure_payload_is_kept_verbatim() {
        let status = TransactionStatus::decode(
            br#"{"Failure": {"error": "InvalidTxError", "message":"nonce too low"}}"#,
        )
        .unwrap();
        assert_eq!(
            status.failure(),
            Some(&serde_json::json!({"error": "InvalidTxError", "message": "nonce too low"}))
        );
        assert!(status.is_final());
        assert!(!status.is_success());
    }

    #[test]
    fn two_keys_are_rejected() {
        let err = TransactionStatus::decode(br#"{"NotStarted": {}, "Started": {}}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidVariantObjectShape { key_count: 2 }
        ));
    }

    #[test]
    fn empty_object_is_rejected() {
        let err = TransactionStatus::decode(b"{}").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidVariantObjectShape { key_count: 0 }
        ));
    }

    #[test]
    fn bare_payload_variants_are_unsupported() {
        for name in ["SuccessValue", "Failure"] {
            let input = format!("\"{name}\"");
            let err = TransactionStatus::decode(input.as_bytes()).unwrap_err();
            let Error::UnsupportedBareVariant { name: got } = err else {
                panic!("expected UnsupportedBareVariant for {name}");
            };
            assert_eq!(got, name);
        }
    }

    #[test]
    fn unknown_names_are_rejected_in_both_forms() {
        let err = TransactionStatus::decode(b"\"Pending\"").unwrap_err();
        assert!(matches!(err, Error::UnknownVariant { ref name } if name == "Pending"));

        let err = TransactionStatus::decode(br#"{"SuccessReceiptId": "abc"}"#).unwrap_err();
        assert!(matches!(err, Error::UnknownVariant { ref name } if name == "SuccessReceiptId"));

        let err = TransactionStatus::decode(b"\"started\"").unwrap_err();
        assert!(matches!(err, Error::UnknownVariant { .. }));
    }

    #[test]
    fn simple_variant_payload_is_ignored() {
        let status = TransactionStatus::decode(br#"{"Started": {"progress": 3}}"#).unwrap();
        assert_eq!(status, TransactionStatus::Started);
        assert_eq!(status.to_canonical_json(), serde_json::json!({"Started": {}}));
    }

    #[test]
    fn default_is_not_started_at_ordinal_zero() {
        let status = TransactionStatus::default();
        assert_eq!(status, TransactionStatus::NotStarted);
        assert_eq!(status.kind().ordinal(), 0);
    }

    #[test]
    fn ordinal_table_is_bidirectional() {
        for kind in TransactionStatusKind::iter() {
            assert_eq!(TransactionStatusKind::from_ordinal(kind.ordinal()), Some(kind));
            assert_eq!(kind.as_ref().parse::<TransactionStatusKind>().ok(), Some(kind));
        }
        assert_eq!(TransactionStatusKind::from_ordinal(4), None);
        assert_eq!(TransactionStatusKind::SuccessValue.to_string(), "SuccessValue");
    }

    #[test]
    fn only_payload_less_variants_are_simple() {
        let simple: Vec<_> = TransactionStatusKind::iter()
            .filter(|k| k.is_simple())
            .collect();
        assert_eq!(simple, SIMPLE_TRANSACTION_STATUSES);
    }

    #[test]
    fn serde_uses_the_same_rules() {
        let status: TransactionStatus = serde_json::from_str("\"Started\"").unwrap();
        assert_eq!(status, TransactionStatus::Started);
        assert_eq!(
            serde_json::to_string(&TransactionStatus::NotStarted).unwrap(),
            r#"{"NotStarted":{}}"#
        );

        let err = serde_json::from_str::<TransactionStatus>(r#"{"A": 1, "B": 2}"#).unwrap_err();
        assert!(err.to_string().contains("expected: 1, got: 2"));
    }

    #[test]
    fn numbers_outside_machine_range_survive_round_trip() {
        let input = r#"{"Failure":{"amount":340282366920938463463374607431768211455}}"#;
        let status = TransactionStatus::decode(input.as_bytes()).unwrap();
        let amount = &status.failure().unwrap()["amount"];
        assert_eq!(amount.to_string(), u128::MAX.to_string());
        assert_eq!(status.to_canonical_json().to_string(), input);
        let again: TransactionStatus = serde_json::from_str(input).unwrap();
        assert_eq!(again, status);

        let input = r#"{"SuccessValue":1e400}"#;
        let status = TransactionStatus::decode(input.as_bytes()).unwrap();
        assert_eq!(status.success_value().unwrap().to_string(), "1e400");
        assert_eq!(serde_json::to_string(&status).unwrap(), input);
        let bytes = serde_json::to_vec(&status).unwrap();
        assert_eq!(TransactionStatus::decode(&bytes).unwrap(), status);
    }
}
