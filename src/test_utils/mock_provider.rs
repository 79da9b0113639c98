use crate::providers::ledger_provider::{LedgerProvider, LedgerResult};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use mockall::mock;

mock! {
    pub LedgerProviderStruct {}

    #[async_trait]
    impl LedgerProvider for LedgerProviderStruct {
        async fn balance(&self, address: Address) -> LedgerResult<U256>;
        async fn block_number(&self) -> LedgerResult<u64>;
        async fn chain_id(&self) -> LedgerResult<u64>;
    }
}
