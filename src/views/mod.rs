//! Response shapes returned by the node. Field names follow the wire.

pub mod chunk;
pub mod contract;
pub mod transaction;

pub use chunk::{ChunkHeaderView, ChunkView};
pub use contract::{QueryResponse, StateItem, TrieProofPath, ViewStateResponse, ViewStateResult};
pub use transaction::{
    Action, ActionReceipt, DataReceipt, ExecutionOutcomeView, ExecutionOutcomeWithIdView,
    FinalExecutionOutcomeView, FinalExecutionOutcomeWithReceiptView, MerkleDirection, MerklePath,
    MerklePathItem, Receipt, ReceiptView, SignedTransactionView,
};
