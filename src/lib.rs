#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::dbg_macro,
        clippy::print_stdout,
        clippy::print_stderr,
        clippy::panic,
    )
)]

pub mod error;
pub mod rpc;
pub mod status;
pub mod types;
pub mod views;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::Error;
pub use rpc::{
    BlockReference, ChunkDetails, JsonRpcRequest, RpcRequest, TxStatus, TxStatusWithReceipts,
    ViewState, decode_response,
};
pub use status::{
    ExecutionStatus, ExecutionStatusKind, TaggedUnion, TransactionStatus, TransactionStatusKind,
    decode_tagged, decode_tagged_value, encode_tagged,
};
pub use types::{AccountId, Balance, BlockHeight, CryptoHash, Gas, Nonce, ShardId};
pub use views::{
    ChunkView, ExecutionOutcomeView, FinalExecutionOutcomeView,
    FinalExecutionOutcomeWithReceiptView, QueryResponse, ViewStateResponse, ViewStateResult,
};
