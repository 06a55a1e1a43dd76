//! JSON-RPC 2.0 request bodies and response envelopes for the supported
//! node methods. Sending the bytes is left to the caller.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::types::{AccountId, BlockHeight, CryptoHash};
use crate::views::{
    ChunkView, FinalExecutionOutcomeView, FinalExecutionOutcomeWithReceiptView, ViewStateResponse,
};

pub const JSONRPC_VERSION: &str = "2.0";

/// A typed node call: method name, params and the shape of its result.
pub trait RpcRequest {
    const METHOD: &'static str;

    type Response: DeserializeOwned;

    fn params(&self) -> Value;
}

/// Which block a query is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockReference {
    #[default]
    Final,
    Optimistic,
    Height(BlockHeight),
    Hash(CryptoHash),
}

impl BlockReference {
    fn write_params(&self, params: &mut Map<String, Value>) {
        match self {
            Self::Final => {
                params.insert("finality".into(), "final".into());
            }
            Self::Optimistic => {
                params.insert("finality".into(), "optimistic".into());
            }
            Self::Height(height) => {
                params.insert("block_id".into(), (*height).into());
            }
            Self::Hash(hash) => {
                params.insert("block_id".into(), hash.to_string().into());
            }
        }
    }
}

/// `chunk`: a chunk by its hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkDetails {
    pub chunk_id: CryptoHash,
}

impl RpcRequest for ChunkDetails {
    const METHOD: &'static str = "chunk";

    type Response = ChunkView;

    fn params(&self) -> Value {
        serde_json::json!({ "chunk_id": self.chunk_id.to_string() })
    }
}

/// `query` with `request_type = view_state`: contract storage under a key
/// prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub account_id: AccountId,
    pub prefix: Vec<u8>,
    pub block: BlockReference,
    pub include_proof: bool,
}

impl RpcRequest for ViewState {
    const METHOD: &'static str = "query";

    type Response = ViewStateResponse;

    fn params(&self) -> Value {
        let mut params = Map::new();
        params.insert("request_type".into(), "view_state".into());
        params.insert("account_id".into(), self.account_id.as_str().into());
        params.insert("prefix_base64".into(), STANDARD.encode(&self.prefix).into());
        if self.include_proof {
            params.insert("include_proof".into(), true.into());
        }
        self.block.write_params(&mut params);
        Value::Object(params)
    }
}

/// `tx`: final outcome of a transaction. The sender picks the shard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxStatus {
    pub tx_hash: CryptoHash,
    pub sender_id: AccountId,
}

impl RpcRequest for TxStatus {
    const METHOD: &'static str = "tx";

    type Response = FinalExecutionOutcomeView;

    fn params(&self) -> Value {
        serde_json::json!([self.tx_hash.to_string(), self.sender_id.as_str()])
    }
}

/// `EXPERIMENTAL_tx_status`: like [`TxStatus`] plus the receipts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxStatusWithReceipts {
    pub tx_hash: CryptoHash,
    pub sender_id: AccountId,
}

impl RpcRequest for TxStatusWithReceipts {
    const METHOD: &'static str = "EXPERIMENTAL_tx_status";

    type Response = FinalExecutionOutcomeWithReceiptView;

    fn params(&self) -> Value {
        serde_json::json!([self.tx_hash.to_string(), self.sender_id.as_str()])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn new<R: RpcRequest>(id: u64, request: &R) -> Self {
        tracing::trace!(id, method = R::METHOD, "building rpc request");
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            method: R::METHOD,
            params: request.params(),
        }
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    cause: Option<ErrorCause>,
}

#[derive(Debug, Deserialize)]
struct ErrorCause {
    name: String,
}

/// Decodes a response body for `R`.
///
/// A server error object becomes [`Error::Rpc`]. A result that fails to
/// decode, including a malformed status anywhere inside it, fails the
/// whole call with [`Error::Json`].
pub fn decode_response<R: RpcRequest>(bytes: &[u8]) -> Result<R::Response, Error> {
    let resp: JsonRpcResponse<R::Response> = serde_json::from_slice(bytes)?;

    if let Some(err) = resp.error {
        let cause = err.cause.map(|c| c.name);
        tracing::debug!(
            method = R::METHOD,
            code = err.code,
            message = %err.message,
            cause = ?cause,
            "rpc call returned an error"
        );
        return Err(Error::Rpc {
            code: err.code,
            message: err.message,
            cause,
            data: err.data,
        });
    }

    resp.result.ok_or_else(|| Error::Rpc {
        code: 0,
        message: format!("{} response has neither result nor error", R::METHOD),
        cause: None,
        data: None,
    })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::*;

    const HASH: &str = "9FtHUFBQsZ2MG77K3x3MJ9wjX3UT8zE1TczCrhZEcG8U";

    #[test]
    fn chunk_request_body() {
        let req = ChunkDetails {
            chunk_id: HASH.parse().unwrap(),
        };
        let body: Value = serde_json::from_slice(&JsonRpcRequest::new(7, &req).to_vec().unwrap())
            .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "jsonrpc": "2.0",
                "id": 7,
                "method": "chunk",
                "params": { "chunk_id": HASH }
            })
        );
    }

    #[test]
    fn view_state_params_encode_prefix_and_block() {
        let req = ViewState {
            account_id: "guest-book.testnet".into(),
            prefix: b"STATE".to_vec(),
            block: BlockReference::Height(42),
            include_proof: false,
        };
        assert_eq!(
            req.params(),
            serde_json::json!({
                "request_type": "view_state",
                "account_id": "guest-book.testnet",
                "prefix_base64": "U1RBVEU=",
                "block_id": 42
            })
        );

        let req = ViewState {
            block: BlockReference::Final,
            include_proof: true,
            ..req
        };
        let params = req.params();
        assert_eq!(params["finality"], "final");
        assert_eq!(params["include_proof"], true);
        assert!(params.get("block_id").is_none());
    }

    #[test]
    fn block_reference_by_hash_uses_base58() {
        let mut params = Map::new();
        BlockReference::Hash(HASH.parse().unwrap()).write_params(&mut params);
        assert_eq!(params["block_id"], HASH);

        let mut params = Map::new();
        BlockReference::Optimistic.write_params(&mut params);
        assert_eq!(params["finality"], "optimistic");
    }

    #[test]
    fn tx_params_are_positional() {
        let req = TxStatus {
            tx_hash: HASH.parse().unwrap(),
            sender_id: "alice.near".into(),
        };
        assert_eq!(req.params(), serde_json::json!([HASH, "alice.near"]));
        assert_eq!(TxStatusWithReceipts::METHOD, "EXPERIMENTAL_tx_status");
    }

    #[test]
    fn server_error_becomes_rpc_error() {
        let body = br#"{
            "jsonrpc": "2.0",
            "id": 1,
            "error": {
                "code": -32000,
                "message": "Server error",
                "data": "Chunk Missing",
                "cause": { "name": "UNKNOWN_CHUNK", "info": {} },
                "name": "HANDLER_ERROR"
            }
        }"#;
        let err = decode_response::<ChunkDetails>(body).unwrap_err();
        let Error::Rpc {
            code,
            message,
            cause,
            data,
        } = err
        else {
            unreachable!("expected rpc error");
        };
        assert_eq!(code, -32000);
        assert_eq!(message, "Server error");
        assert_eq!(cause.as_deref(), Some("UNKNOWN_CHUNK"));
        assert_eq!(data, Some(serde_json::json!("Chunk Missing")));
    }

    #[test]
    fn empty_envelope_is_an_error() {
        let err = decode_response::<TxStatus>(br#"{"jsonrpc": "2.0", "id": 1}"#).unwrap_err();
        assert!(matches!(err, Error::Rpc { code: 0, .. }));
        assert!(!err.is_decode_failure());
    }

    #[test]
    fn malformed_status_in_result_fails_the_call() {
        let body = br#"{"jsonrpc": "2.0", "id": 1, "result": {"status": {}}}"#;
        let err = decode_response::<TxStatus>(body).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
