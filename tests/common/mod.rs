#![allow(dead_code)]

use ethers::{
    abi::{self, Token},
    types::{Address, U256},
};
use contract_autotest::Settings;
use serde_json::{json, Value};
use std::{num::NonZeroUsize, path::Path};
use wiremock::{
    matchers::{body_partial_json, method},
    Mock, MockServer, ResponseTemplate,
};

pub const BYTECODE: &str = "0x6080604052348015600f57600080fd5b50";

pub fn account() -> Address {
    Address::repeat_byte(0x01)
}

pub fn contract_address() -> Address {
    Address::repeat_byte(0x42)
}

pub fn tx_hash() -> String {
    format!("0x{}", "77".repeat(32))
}

/// Encoded output of `f()`: `(a, "hello", "abc", d, 0x1212..12)`.
pub fn f_output(a: u64, d: bool) -> Vec<u8> {
    let mut hello = b"hello".to_vec();
    hello.resize(32, 0);
    abi::encode(&[
        Token::Uint(U256::from(a)),
        Token::FixedBytes(hello),
        Token::FixedBytes(b"abc".to_vec()),
        Token::Bool(d),
        Token::Address(Address::repeat_byte(0x12)),
    ])
}

pub enum CallReply {
    Output(Vec<u8>),
    Error {
        status: u16,
        code: i64,
        message: &'static str,
    },
}

/// Behaviour of the mocked node.
pub struct NodeConfig {
    pub accounts: Vec<Address>,
    /// `None` keeps the deployment pending forever.
    pub receipt_status: Option<u64>,
    pub call: CallReply,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            accounts: vec![account()],
            receipt_status: Some(1),
            call: CallReply::Output(f_output(2, true)),
        }
    }
}

fn success(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "result": result
    }))
}

pub fn rpc_error(status: u16, code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": { "code": code, "message": message }
    }))
}

pub async fn mount(server: &MockServer, rpc_method: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "method": rpc_method })))
        .respond_with(response)
        .mount(server)
        .await;
}

fn transaction_json() -> Value {
    json!({
        "hash": tx_hash(),
        "nonce": "0x0",
        "blockHash": format!("0x{}", "22".repeat(32)),
        "blockNumber": "0x5",
        "transactionIndex": "0x0",
        "from": format!("{:?}", account()),
        "to": null,
        "value": "0x0",
        "gasPrice": "0x3b9aca00",
        "gas": "0x47e7c4",
        "input": BYTECODE,
        "v": "0x1b",
        "r": "0x1",
        "s": "0x1"
    })
}

fn receipt_json(status: u64) -> Value {
    json!({
        "transactionHash": tx_hash(),
        "transactionIndex": "0x0",
        "blockHash": format!("0x{}", "22".repeat(32)),
        "blockNumber": "0x5",
        "from": format!("{:?}", account()),
        "to": null,
        "cumulativeGasUsed": "0x5208",
        "gasUsed": "0x5208",
        "contractAddress": format!("{:?}", contract_address()),
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "status": format!("0x{status:x}")
    })
}

/// Starts a node that mines every deployment into block 5.
pub async fn start_node(config: NodeConfig) -> MockServer {
    let server = MockServer::start().await;
    let accounts: Vec<_> = config
        .accounts
        .iter()
        .map(|account| format!("{account:?}"))
        .collect();
    mount(&server, "eth_accounts", success(json!(accounts))).await;
    mount(&server, "eth_sendTransaction", success(json!(tx_hash()))).await;
    mount(&server, "eth_getTransactionByHash", success(transaction_json())).await;
    let receipt = config.receipt_status.map(receipt_json).unwrap_or(Value::Null);
    mount(&server, "eth_getTransactionReceipt", success(receipt)).await;
    mount(&server, "eth_blockNumber", success(json!("0x5"))).await;
    let call = match config.call {
        CallReply::Output(output) => success(json!(format!("0x{}", hex::encode(output)))),
        CallReply::Error {
            status,
            code,
            message,
        } => rpc_error(status, code, message),
    };
    mount(&server, "eth_call", call).await;
    server
}

/// JSON-RPC requests of `rpc_method` the node received, in order.
pub async fn requests(server: &MockServer, rpc_method: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|request| serde_json::from_slice::<Value>(&request.body).ok())
        .filter(|body| body["method"] == rpc_method)
        .collect()
}

/// Settings pointing at `server`, with data files and artifacts in `dir`.
pub fn settings(server: &MockServer, dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.node.rpc_url = server.uri().parse().unwrap();
    settings.node.request_timeout = 5;
    settings.receipt.poll_interval = 10;
    settings.receipt.attempts = NonZeroUsize::new(100).unwrap();
    settings.data_source.dir = dir.to_path_buf();
    settings.contracts.artifacts_dir = dir.to_path_buf();
    settings
}
