#![cfg(feature = "testing")]
use std::{net::SocketAddr, str::FromStr};

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use jsonrpsee::server::ServerHandle;
use reqwest::{header::ACCESS_CONTROL_ALLOW_ORIGIN, StatusCode};
use rstest::*;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use wallet_aggregator::test_utils::{
    fixtures::{address, ether, setup, BLOCK_NUMBER, CHAIN_ID},
    ledger_node::{FakeLedgerNode, NODE_ERROR_MESSAGE},
    rpc::start_wallet_api_server,
};

/// Wallet API running against a fake ledger node. Both stop when dropped.
struct TestServer {
    addr: SocketAddr,
    server_handle: JoinHandle<()>,
    _node_handle: ServerHandle,
}

impl TestServer {
    async fn start(node: FakeLedgerNode) -> Self {
        let (ledger_url, node_handle) = node.start().await.unwrap();
        let (addr, server_handle) = start_wallet_api_server(ledger_url).await.unwrap();
        Self { addr, server_handle, _node_handle: node_handle }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    async fn aggregate(&self, addresses: &[String]) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(self.url("/api/wallet/aggregate"))
            .json(&json!({ "addresses": addresses }))
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

fn checksummed(address: Address) -> String {
    address.to_checksum(None)
}

fn decimal(value: &Value) -> BigDecimal {
    BigDecimal::from_str(&value.to_string()).unwrap()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_aggregate_sums_balances(_setup: ()) {
    // Given
    let node = FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER)
        .with_balance(address(1), ether(2))
        .with_balance(address(2), ether(3));
    let server = TestServer::start(node).await;
    let addresses = vec![checksummed(address(1)), checksummed(address(2))];

    // When
    let (status, body) = server.aggregate(&addresses).await;

    // Then
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["addresses"], json!(addresses));
    assert_eq!(decimal(&body["totalBalance"]), BigDecimal::from(5));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_aggregate_drops_empty_wallets(_setup: ()) {
    // Given
    let node = FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER).with_balance(address(1), ether(2));
    let server = TestServer::start(node).await;
    let addresses = vec![checksummed(address(3)), checksummed(address(1))];

    // When
    let (status, body) = server.aggregate(&addresses).await;

    // Then
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["addresses"], json!([checksummed(address(1))]));
    assert_eq!(decimal(&body["totalBalance"]), BigDecimal::from(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_aggregate_lists_invalid_addresses(_setup: ()) {
    // Given
    let server = TestServer::start(FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER)).await;
    let addresses = vec![checksummed(address(1)), "not-an-address".to_string()];

    // When
    let (status, body) = server.aggregate(&addresses).await;

    // Then
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid address format.", "invalidAddresses": ["not-an-address"] }));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_aggregate_fails_when_one_balance_fails(_setup: ()) {
    // Given
    let node = FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER)
        .with_balance(address(1), ether(2))
        .with_failure(address(2));
    let server = TestServer::start(node).await;

    // When
    let response = reqwest::Client::new()
        .post(server.url("/api/wallet/aggregate"))
        .json(&json!({ "addresses": [checksummed(address(1)), checksummed(address(2))] }))
        .send()
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text().await.unwrap(),
        format!("Error fetching balance for {}: {NODE_ERROR_MESSAGE}", checksummed(address(2)))
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_balance_route(_setup: ()) {
    // Given
    let node = FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER).with_balance(address(1), ether(7));
    let server = TestServer::start(node).await;

    // When
    let response = reqwest::get(server.url(&format!("/api/wallet/balance?address={}", checksummed(address(1)))))
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["address"], json!(checksummed(address(1))));
    assert_eq!(decimal(&body["balance"]), BigDecimal::from(7));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_balance_route_requires_address(_setup: ()) {
    // Given
    let server = TestServer::start(FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER)).await;

    // When
    let response = reqwest::get(server.url("/api/wallet/balance")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Address is required.");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_metadata_route(_setup: ()) {
    // Given
    let node = FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER);
    let (ledger_url, _node_handle) = node.start().await.unwrap();
    let (addr, server_handle) = start_wallet_api_server(ledger_url.clone()).await.unwrap();

    // When
    let response = reqwest::get(format!("http://{addr}/api/wallet/metadata")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "networkName": "Polygon Amoy",
            "rpcUrl": ledger_url.to_string(),
            "chainId": CHAIN_ID.to_string(),
            "blockHeight": BLOCK_NUMBER,
        })
    );

    server_handle.abort();
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_health_route(_setup: ()) {
    // Given
    let server = TestServer::start(FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER)).await;

    // When
    let response = reqwest::get(server.url("/health")).await.unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "true");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_cross_origin_requests_are_allowed(_setup: ()) {
    // Given
    let server = TestServer::start(FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER)).await;

    // When
    let response = reqwest::Client::new()
        .get(server.url("/api/wallet/metadata"))
        .header("Origin", "http://localhost:3000")
        .send()
        .await
        .unwrap();

    // Then
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN));
}
