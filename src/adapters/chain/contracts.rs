//! Dataset Marketplace Contract - alloy `sol!` Binding
//!
//! Implements the `MarketplaceContract` port over the deployed
//! marketplace contract. The contract address comes from
//! `config.toml` and is validated on-chain when the handle is built.
//!
//! State-changing calls return as soon as the node accepts the
//! transaction; the receipt is awaited separately through
//! [`PendingCall::finalize`].

use alloy::network::Ethereum;
use alloy::primitives::{Address, U256};
use alloy::providers::{PendingTransactionBuilder, Provider};
use alloy::sol;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use futures_util::FutureExt;
use tracing::{debug, info, instrument};

use crate::domain::dataset::Dataset;
use crate::ports::marketplace::{CallReceipt, MarketplaceContract, PendingCall};

use super::provider::{HttpTransport, SigningProvider};

sol! {
    #[sol(rpc)]
    interface IDatasetMarketplace {
        struct DatasetRecord {
            uint256 id;
            string ipfsHash;
            address owner;
            uint256 price;
            bool isForSale;
        }

        function uploadDataset(string memory ipfsHash, uint256 price) external;

        function getDataset(uint256 datasetId) external view returns (DatasetRecord memory);

        function buyDataset(uint256 datasetId) external payable;

        function updatePrice(uint256 datasetId, uint256 newPrice) external;

        function listDatasetForSale(uint256 datasetId, uint256 price) external;

        function datasetCount() external view returns (uint256);
    }
}

impl From<IDatasetMarketplace::DatasetRecord> for Dataset {
    fn from(record: IDatasetMarketplace::DatasetRecord) -> Self {
        Self {
            id: record.id,
            ipfs_hash: record.ipfsHash,
            owner: record.owner,
            price: record.price,
            is_for_sale: record.isForSale,
        }
    }
}

/// Marketplace contract handle bound to one signing account.
pub struct DatasetMarketplace<P> {
    /// Signing provider for the session account.
    provider: SigningProvider<P>,
    /// Deployed contract address.
    address: Address,
    /// Account the provider signs for.
    account: Address,
}

impl<P> DatasetMarketplace<P>
where
    P: Provider<HttpTransport> + Clone + Send + Sync + 'static,
{
    /// Build the handle and check that code is deployed at `address`.
    ///
    /// This prevents a wrong address or network from silently failing
    /// at the first action.
    #[instrument(skip(provider))]
    pub async fn new(
        provider: SigningProvider<P>,
        address: Address,
        account: Address,
    ) -> Result<Self> {
        let code = provider
            .inner()
            .get_code_at(address)
            .await
            .context("Failed to query marketplace contract code")?;

        if code.is_empty() {
            bail!(
                "Marketplace contract at {address} has no deployed code on {}; check config.toml",
                provider.network()
            );
        }

        info!(contract = %address, account = %account, "Marketplace contract bound");

        Ok(Self {
            provider,
            address,
            account,
        })
    }

    fn instance(&self) -> IDatasetMarketplace::IDatasetMarketplaceInstance<HttpTransport, P> {
        IDatasetMarketplace::new(self.address, self.provider.inner().clone())
    }
}

/// Split a sent transaction into its hash and a receipt future.
fn into_pending_call(pending: PendingTransactionBuilder<HttpTransport, Ethereum>) -> PendingCall {
    let tx_hash = *pending.tx_hash();
    debug!(tx_hash = %tx_hash, "Transaction submitted");

    PendingCall::new(
        tx_hash,
        async move {
            let receipt = pending
                .get_receipt()
                .await
                .context("Failed to fetch transaction receipt")?;

            Ok(CallReceipt {
                tx_hash: receipt.transaction_hash,
                block_number: receipt.block_number,
                gas_used: u64::try_from(receipt.gas_used).unwrap_or(u64::MAX),
                success: receipt.status(),
            })
        }
        .boxed(),
    )
}

#[async_trait]
impl<P> MarketplaceContract for DatasetMarketplace<P>
where
    P: Provider<HttpTransport> + Clone + Send + Sync + 'static,
{
    fn address(&self) -> Address {
        self.address
    }

    fn account(&self) -> Address {
        self.account
    }

    #[instrument(skip(self), fields(price = %price))]
    async fn upload_dataset(&self, ipfs_hash: &str, price: U256) -> Result<PendingCall> {
        let contract = self.instance();
        let pending = contract
            .uploadDataset(ipfs_hash.to_string(), price)
            .send()
            .await
            .context("uploadDataset submission failed")?;

        Ok(into_pending_call(pending))
    }

    #[instrument(skip(self), fields(dataset_id = %dataset_id))]
    async fn get_dataset(&self, dataset_id: U256) -> Result<Dataset> {
        let contract = self.instance();
        let record = contract
            .getDataset(dataset_id)
            .call()
            .await
            .context("getDataset call failed")?
            ._0;

        Ok(record.into())
    }

    #[instrument(skip(self), fields(dataset_id = %dataset_id, payment = %payment))]
    async fn buy_dataset(&self, dataset_id: U256, payment: U256) -> Result<PendingCall> {
        let contract = self.instance();
        let pending = contract
            .buyDataset(dataset_id)
            .value(payment)
            .send()
            .await
            .context("buyDataset submission failed")?;

        Ok(into_pending_call(pending))
    }

    #[instrument(skip(self), fields(dataset_id = %dataset_id, new_price = %new_price))]
    async fn update_price(&self, dataset_id: U256, new_price: U256) -> Result<PendingCall> {
        let contract = self.instance();
        let pending = contract
            .updatePrice(dataset_id, new_price)
            .send()
            .await
            .context("updatePrice submission failed")?;

        Ok(into_pending_call(pending))
    }

    #[instrument(skip(self), fields(dataset_id = %dataset_id, price = %price))]
    async fn list_dataset_for_sale(&self, dataset_id: U256, price: U256) -> Result<PendingCall> {
        let contract = self.instance();
        let pending = contract
            .listDatasetForSale(dataset_id, price)
            .send()
            .await
            .context("listDatasetForSale submission failed")?;

        Ok(into_pending_call(pending))
    }

    #[instrument(skip(self))]
    async fn dataset_count(&self) -> Result<U256> {
        let contract = self.instance();
        let count = contract
            .datasetCount()
            .call()
            .await
            .context("datasetCount call failed")?
            ._0;

        Ok(count)
    }
}
