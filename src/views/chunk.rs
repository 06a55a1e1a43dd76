use serde::{Deserialize, Serialize};

use crate::types::{AccountId, Balance, BlockHeight, CryptoHash, Gas, ShardId};
use crate::views::transaction::{ReceiptView, SignedTransactionView};

/// Result of the `chunk` method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkView {
    /// Chunk producer.
    pub author: AccountId,
    pub header: ChunkHeaderView,
    pub transactions: Vec<SignedTransactionView>,
    pub receipts: Vec<ReceiptView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkHeaderView {
    pub chunk_hash: CryptoHash,
    pub prev_block_hash: CryptoHash,
    /// Merkle root of the outcomes of the previous chunk in this shard.
    pub outcome_root: CryptoHash,
    pub prev_state_root: CryptoHash,
    /// Merkle root of the erasure-coded chunk parts.
    pub encoded_merkle_root: CryptoHash,
    /// Size in bytes of the erasure-coded chunk.
    pub encoded_length: u64,
    /// Height of the block the chunk was produced for.
    pub height_created: BlockHeight,
    /// Height of the block the chunk landed in.
    pub height_included: BlockHeight,
    pub shard_id: ShardId,
    pub gas_used: Gas,
    pub gas_limit: Gas,
    #[serde(default)]
    pub rent_paid: Balance,
    #[serde(default)]
    pub validator_reward: Balance,
    /// Tokens burnt by the chunk's transactions and receipts, in yoctoNEAR.
    pub balance_burnt: Balance,
    pub outgoing_receipts_root: CryptoHash,
    pub tx_root: CryptoHash,
    #[serde(default)]
    pub validator_proposals: Vec<serde_json::Value>,
    /// Producer's `ed25519:`-prefixed signature over the header.
    pub signature: String,
}
