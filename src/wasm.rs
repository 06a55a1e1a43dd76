use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;

use crate::status::{ExecutionStatus, TaggedUnion, TransactionStatus, TransactionStatusKind};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = JSON)]
    fn parse(s: &str) -> JsValue;
}

fn to_js(value: &serde_json::Value) -> JsValue {
    match serde_json::to_string(value) {
        Ok(json_str) => parse(&json_str),
        Err(_) => JsValue::NULL,
    }
}

fn error_result(msg: &str) -> JsValue {
    let obj = serde_json::json!({"error": msg});
    to_js(&obj)
}

fn tagged_result<T: TaggedUnion>(status: &T) -> JsValue {
    let obj = serde_json::json!({
        "kind": status.kind().as_ref(),
        "payload": status.payload(),
    });
    to_js(&obj)
}

/// Decode a transaction status in either wire form.
/// Returns `{kind, payload}` or `{error}`.
#[wasm_bindgen]
pub fn decode_transaction_status(json: &str) -> JsValue {
    match TransactionStatus::decode(json.as_bytes()) {
        Ok(status) => tagged_result(&status),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Decode a receipt/transaction outcome status.
#[wasm_bindgen]
pub fn decode_execution_status(json: &str) -> JsValue {
    match ExecutionStatus::decode(json.as_bytes()) {
        Ok(status) => tagged_result(&status),
        Err(e) => error_result(&e.to_string()),
    }
}

/// Names of all transaction status variants, in ordinal order.
#[wasm_bindgen]
pub fn transaction_status_kinds() -> JsValue {
    let kinds: Vec<String> = TransactionStatusKind::iter()
        .map(|k| k.as_ref().to_string())
        .collect();
    serde_wasm_bindgen::to_value(&kinds).unwrap_or(JsValue::NULL)
}
