use serde::{Deserialize, Serialize};

use crate::status::{ExecutionStatus, TransactionStatus};
use crate::types::{AccountId, Balance, CryptoHash, Gas, Nonce};

/// Actions are carried as the node encodes them; their variants are not
/// modelled here.
pub type Action = serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransactionView {
    pub signer_id: AccountId,
    /// Access-key nonce; strictly increasing per key.
    pub nonce: Nonce,
    pub receiver_id: AccountId,
    /// Actions in execution order, as the node encodes them.
    pub actions: Vec<Action>,
    /// `ed25519:`-prefixed base58 signature.
    pub signature: String,
    pub hash: CryptoHash,
}

/// Result of `tx`: the transaction, its own outcome and the outcomes of
/// every receipt it spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalExecutionOutcomeView {
    pub status: TransactionStatus,
    pub transaction: SignedTransactionView,
    pub transaction_outcome: ExecutionOutcomeWithIdView,
    pub receipts_outcome: Vec<ExecutionOutcomeWithIdView>,
}

impl FinalExecutionOutcomeView {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn failure(&self) -> Option<&serde_json::Value> {
        self.status.failure()
    }

    /// Gas burnt by the transaction and all of its receipts.
    pub fn total_gas_burnt(&self) -> Gas {
        self.receipts_outcome
            .iter()
            .map(|r| r.outcome.gas_burnt)
            .fold(self.transaction_outcome.outcome.gas_burnt, Gas::saturating_add)
    }

    pub fn logs(&self) -> impl Iterator<Item = &str> {
        std::iter::once(&self.transaction_outcome)
            .chain(&self.receipts_outcome)
            .flat_map(|o| o.outcome.logs.iter().map(String::as_str))
    }
}

/// Result of `EXPERIMENTAL_tx_status`.
///
/// On the wire the outcome fields sit next to `receipts`. Not
/// `#[serde(flatten)]`: flatten loses numbers under `arbitrary_precision`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ReceiptOutcomeWire", into = "ReceiptOutcomeWire")]
pub struct FinalExecutionOutcomeWithReceiptView {
    pub outcome: FinalExecutionOutcomeView,
    pub receipts: Vec<ReceiptView>,
}

#[derive(Serialize, Deserialize)]
struct ReceiptOutcomeWire {
    status: TransactionStatus,
    transaction: SignedTransactionView,
    transaction_outcome: ExecutionOutcomeWithIdView,
    receipts_outcome: Vec<ExecutionOutcomeWithIdView>,
    receipts: Vec<ReceiptView>,
}

impl From<ReceiptOutcomeWire> for FinalExecutionOutcomeWithReceiptView {
    fn from(wire: ReceiptOutcomeWire) -> Self {
        Self {
            outcome: FinalExecutionOutcomeView {
                status: wire.status,
                transaction: wire.transaction,
                transaction_outcome: wire.transaction_outcome,
                receipts_outcome: wire.receipts_outcome,
            },
            receipts: wire.receipts,
        }
    }
}

impl From<FinalExecutionOutcomeWithReceiptView> for ReceiptOutcomeWire {
    fn from(view: FinalExecutionOutcomeWithReceiptView) -> Self {
        let FinalExecutionOutcomeView {
            status,
            transaction,
            transaction_outcome,
            receipts_outcome,
        } = view.outcome;
        Self {
            status,
            transaction,
            transaction_outcome,
            receipts_outcome,
            receipts: view.receipts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptView {
    /// Account that created the receipt.
    pub predecessor_id: AccountId,
    pub receiver_id: AccountId,
    pub receipt_id: CryptoHash,
    pub receipt: Receipt,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Receipt {
    Action(ActionReceipt),
    Data(DataReceipt),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReceipt {
    /// Signer of the originating transaction.
    pub signer_id: AccountId,
    #[serde(default)]
    pub signer_public_key: Option<String>,
    /// Gas price the receipt was purchased at, in yoctoNEAR.
    pub gas_price: Balance,
    /// Receipts waiting on this one's return value.
    #[serde(default)]
    pub output_data_receivers: Vec<serde_json::Value>,
    /// Data receipts this one must wait for before executing.
    #[serde(default)]
    pub input_data_ids: Vec<CryptoHash>,
    pub actions: Vec<Action>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataReceipt {
    pub data_id: CryptoHash,
    /// Base64 return value delivered to the waiting receipt; `None` when
    /// the producing call failed.
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcomeView {
    /// Log lines emitted during execution.
    pub logs: Vec<String>,
    /// Receipts spawned by this execution.
    pub receipt_ids: Vec<CryptoHash>,
    pub gas_burnt: Gas,
    /// Gas burnt converted to tokens at the block's gas price, in yoctoNEAR.
    pub tokens_burnt: Balance,
    /// Account the execution ran on.
    pub executor_id: AccountId,
    pub status: ExecutionStatus,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::AsRefStr,
)]
pub enum MerkleDirection {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePathItem {
    /// Sibling hash at this level of the outcome tree.
    pub hash: CryptoHash,
    /// Side the sibling sits on.
    pub direction: MerkleDirection,
}

pub type MerklePath = Vec<MerklePathItem>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcomeWithIdView {
    /// Inclusion proof of the outcome in the block's outcome root.
    pub proof: MerklePath,
    /// Block the outcome was included in.
    pub block_hash: CryptoHash,
    /// Transaction or receipt hash the outcome belongs to.
    pub id: CryptoHash,
    pub outcome: ExecutionOutcomeView,
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;

    const H1: &str = "9FtHUFBQsZ2MG77K3x3MJ9wjX3UT8zE1TczCrhZEcG8U";
    const H2: &str = "11111111111111111111111111111111";

    fn outcome(gas_burnt: u64, logs: &[&str], status: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "proof": [{ "hash": H1, "direction": "Right" }],
            "block_hash": H2,
            "id": H1,
            "outcome": {
                "logs": logs,
                "receipt_ids": [H1],
                "gas_burnt": gas_burnt,
                "tokens_burnt": "242995126800000000000",
                "executor_id": "alice.near",
                "status": status
            }
        })
    }

    fn final_outcome(status: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "status": status,
            "transaction": {
                "signer_id": "alice.near",
                "nonce": 7,
                "receiver_id": "bob.near",
                "actions": [{ "Transfer": { "deposit": "1" } }],
                "signature": "ed25519:3s1dvZdQtcAjBksMHFrysqvF63wnyMHPA4owNQmCJZ2EBakZEKdtMsLqrHdKWQjJbSRN6kRknN2WdwSBLWGCokXj",
                "hash": H1
            },
            "transaction_outcome": outcome(100, &["tx log"], serde_json::json!({ "SuccessReceiptId": H1 })),
            "receipts_outcome": [
                outcome(200, &["r1"], serde_json::json!({ "SuccessValue": "" })),
                outcome(300, &[], serde_json::json!("Unknown"))
            ]
        })
    }

    #[test]
    fn final_outcome_decodes_nested_statuses() {
        let view: FinalExecutionOutcomeView =
            serde_json::from_value(final_outcome(serde_json::json!({ "SuccessValue": "" })))
                .unwrap();
        assert!(view.is_success());
        assert_eq!(
            view.transaction_outcome.outcome.status,
            ExecutionStatus::SuccessReceiptId(H1.parse().unwrap())
        );
        assert_eq!(view.receipts_outcome[1].outcome.status, ExecutionStatus::Unknown);
        assert_eq!(
            view.transaction_outcome.proof[0].direction,
            MerkleDirection::Right
        );
        assert_eq!(view.total_gas_burnt(), 600);
        assert_eq!(view.logs().collect::<Vec<_>>(), vec!["tx log", "r1"]);
    }

    #[test]
    fn bare_started_status_decodes_inside_outcome() {
        let view: FinalExecutionOutcomeView =
            serde_json::from_value(final_outcome(serde_json::json!("Started"))).unwrap();
        assert_eq!(view.status, TransactionStatus::Started);
        assert!(view.failure().is_none());
    }

    #[test]
    fn malformed_status_fails_the_whole_outcome() {
        let result = serde_json::from_value::<FinalExecutionOutcomeView>(final_outcome(
            serde_json::json!({ "NotStarted": {}, "Started": {} }),
        ));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("invalid amount of keys"));

        let result = serde_json::from_value::<FinalExecutionOutcomeView>(final_outcome(
            serde_json::json!("SuccessValue"),
        ));
        assert!(result.is_err());
    }

    #[test]
    fn merkle_direction_rejects_other_strings() {
        assert!(serde_json::from_str::<MerkleDirection>("\"Up\"").is_err());
        assert_eq!(MerkleDirection::Left.to_string(), "Left");
    }

    #[test]
    fn receipts_decode_both_kinds() {
        let action: Receipt = serde_json::from_value(serde_json::json!({
            "Action": {
                "signer_id": "alice.near",
                "signer_public_key": "ed25519:6E8sCci9badyRkXb3JoRpBj5p8C6Tw41ELDZoiihKEtp",
                "gas_price": "103000000",
                "output_data_receivers": [],
                "input_data_ids": [],
                "actions": ["CreateAccount"]
            }
        }))
        .unwrap();
        let Receipt::Action(body) = action else {
            unreachable!("decoded as data receipt");
        };
        assert_eq!(body.gas_price, Balance(103_000_000));
        assert_eq!(body.actions, vec![serde_json::json!("CreateAccount")]);

        let data: Receipt = serde_json::from_value(serde_json::json!({
            "Data": { "data_id": H1, "data": null }
        }))
        .unwrap();
        assert!(matches!(data, Receipt::Data(DataReceipt { data: None, .. })));
    }

    #[test]
    fn receipt_outcome_keeps_wide_failure_payloads() {
        let status: serde_json::Value =
            serde_json::from_str(r#"{"Failure":{"amount":340282366920938463463374607431768211455}}"#)
                .unwrap();
        let mut input = final_outcome(status);
        input["receipts"] = serde_json::json!([{
            "predecessor_id": "system",
            "receiver_id": "alice.near",
            "receipt_id": H1,
            "receipt": { "Data": { "data_id": H2 } }
        }]);
        let view: FinalExecutionOutcomeWithReceiptView =
            serde_json::from_value(input.clone()).unwrap();
        assert_eq!(
            view.outcome.failure().unwrap()["amount"].to_string(),
            u128::MAX.to_string()
        );
        assert_eq!(view.outcome.total_gas_burnt(), 600);
        assert_eq!(view.receipts.len(), 1);

        let back = serde_json::to_value(&view).unwrap();
        assert_eq!(back["status"], input["status"]);
        assert_eq!(back["transaction"]["nonce"], 7);
    }
}
