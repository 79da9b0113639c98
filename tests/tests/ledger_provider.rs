#![cfg(feature = "testing")]
use std::time::Duration;

use jsonrpsee::core::client::Error as ClientError;
use rstest::*;
use tokio::net::TcpListener;
use url::Url;
use wallet_aggregator::{
    providers::ledger_provider::{LedgerDataProvider, LedgerError, LedgerProvider},
    test_utils::{
        fixtures::{address, ether, setup, BLOCK_NUMBER, CHAIN_ID},
        ledger_node::{FakeLedgerNode, NODE_ERROR_CODE, NODE_ERROR_MESSAGE},
    },
};

const TIMEOUT: Duration = Duration::from_secs(5);

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_balance(_setup: ()) {
    // Given
    let node = FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER).with_balance(address(1), ether(2));
    let (url, _node_handle) = node.start().await.unwrap();
    let provider = LedgerDataProvider::try_new(&url, TIMEOUT).unwrap();

    // When
    let funded = provider.balance(address(1)).await.unwrap();
    let untouched = provider.balance(address(2)).await.unwrap();

    // Then
    assert_eq!(funded, ether(2));
    assert!(untouched.is_zero());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_chain_id_and_block_number(_setup: ()) {
    // Given
    let (url, _node_handle) = FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER).start().await.unwrap();
    let provider = LedgerDataProvider::try_new(&url, TIMEOUT).unwrap();

    // When
    let chain_id = provider.chain_id().await.unwrap();
    let block_number = provider.block_number().await.unwrap();

    // Then
    assert_eq!(chain_id, CHAIN_ID);
    assert_eq!(block_number, BLOCK_NUMBER);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_node_error_is_reported(_setup: ()) {
    // Given
    let node = FakeLedgerNode::new(CHAIN_ID, BLOCK_NUMBER).with_failure(address(1));
    let (url, _node_handle) = node.start().await.unwrap();
    let provider = LedgerDataProvider::try_new(&url, TIMEOUT).unwrap();

    // When
    let err = provider.balance(address(1)).await.unwrap_err();

    // Then
    match err {
        LedgerError::Client(ClientError::Call(err)) => {
            assert_eq!(err.code(), NODE_ERROR_CODE);
            assert_eq!(err.message(), NODE_ERROR_MESSAGE);
        }
        err => panic!("unexpected error: {err:?}"),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_node(_setup: ()) {
    // Given
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = Url::parse(&format!("http://{}", listener.local_addr().unwrap())).unwrap();
    drop(listener);
    let provider = LedgerDataProvider::try_new(&url, TIMEOUT).unwrap();

    // When
    let result = provider.block_number().await;

    // Then
    assert!(matches!(result, Err(LedgerError::Client(_))));
}
