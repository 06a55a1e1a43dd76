use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::types::{BlockHeight, CryptoHash};

/// Serialized trie nodes, base64 each. Proves inclusion of a node in the
/// state trie.
pub type TrieProofPath = Vec<String>;

/// Fields shared by every `query` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub block_height: BlockHeight,
    pub block_hash: CryptoHash,
    /// Older nodes report query failures here instead of as an RPC error.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ViewStateResult {
    #[serde(default)]
    pub values: Vec<StateItem>,
    /// Trie nodes proving the whole prefix range; empty unless requested.
    #[serde(default)]
    pub proof: TrieProofPath,
}

impl ViewStateResult {
    /// Decoded `(key, value)` pairs.
    pub fn decoded_pairs(&self) -> Result<Vec<(Vec<u8>, Vec<u8>)>, Error> {
        self.values
            .iter()
            .map(|item| Ok((item.decoded_key()?, item.decoded_value()?)))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateItem {
    /// Base64 storage key.
    pub key: String,
    /// Base64 storage value.
    pub value: String,
    /// Per-item proof; newer nodes leave it empty in favour of the
    /// range proof on [`ViewStateResult`].
    #[serde(default)]
    pub proof: TrieProofPath,
}

impl StateItem {
    pub fn decoded_key(&self) -> Result<Vec<u8>, Error> {
        decode_base64("key", &self.key)
    }

    pub fn decoded_value(&self) -> Result<Vec<u8>, Error> {
        decode_base64("value", &self.value)
    }
}

/// `query` result for `view_state`: the common header plus the state.
///
/// Both halves share one flat object on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ViewStateWire", into = "ViewStateWire")]
pub struct ViewStateResponse {
    pub query: QueryResponse,
    pub state: ViewStateResult,
}

#[derive(Serialize, Deserialize)]
struct ViewStateWire {
    block_height: BlockHeight,
    block_hash: CryptoHash,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(default)]
    logs: Vec<String>,
    #[serde(default)]
    values: Vec<StateItem>,
    #[serde(default)]
    proof: TrieProofPath,
}

impl From<ViewStateWire> for ViewStateResponse {
    fn from(wire: ViewStateWire) -> Self {
        Self {
            query: QueryResponse {
                block_height: wire.block_height,
                block_hash: wire.block_hash,
                error: wire.error,
                logs: wire.logs,
            },
            state: ViewStateResult {
                values: wire.values,
                proof: wire.proof,
            },
        }
    }
}

impl From<ViewStateResponse> for ViewStateWire {
    fn from(resp: ViewStateResponse) -> Self {
        Self {
            block_height: resp.query.block_height,
            block_hash: resp.query.block_hash,
            error: resp.query.error,
            logs: resp.query.logs,
            values: resp.state.values,
            proof: resp.state.proof,
        }
    }
}

impl ViewStateResponse {
    /// Turns an in-band query error into [`Error::Rpc`].
    pub fn into_result(self) -> Result<ViewStateResult, Error> {
        match self.query.error {
            Some(message) => Err(Error::Rpc {
                code: 0,
                message,
                cause: None,
                data: None,
            }),
            None => Ok(self.state),
        }
    }
}

fn decode_base64(field: &'static str, encoded: &str) -> Result<Vec<u8>, Error> {
    STANDARD.decode(encoded).map_err(|e| Error::Payload {
        field,
        reason: e.to_string(),
    })
}
