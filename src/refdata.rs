//! Reference-data store and fetch client.
//!
//! Holds the server-confirmed snapshot of accounts, liquidity pools,
//! currency pairs, and entitled order types. The snapshot is replaced
//! wholesale on every successful fetch; until the first batch arrives
//! the store reports not-loaded and consumers keep initializing.

use tracing::info;

use crate::models::order::OrderType;
use crate::models::refdata::{AccountRef, CurrencyPairRef, LiquidityPoolRef, RefDataBatch};

/// An immutable reference-data snapshot.
#[derive(Debug, Clone)]
pub struct RefDataSnapshot {
    accounts: Vec<AccountRef>,
    pools: Vec<LiquidityPoolRef>,
    pairs: Vec<CurrencyPairRef>,
    entitled: Vec<OrderType>,
}

impl RefDataSnapshot {
    /// Builds a snapshot from one batch, deduplicating pools by routing
    /// value (first occurrence wins).
    #[must_use]
    pub fn from_batch(batch: RefDataBatch) -> Self {
        let mut pools: Vec<LiquidityPoolRef> = Vec::with_capacity(batch.liquidity_pools.len());
        for pool in batch.liquidity_pools {
            if !pools.iter().any(|p| p.value == pool.value) {
                pools.push(pool);
            }
        }
        Self {
            accounts: batch.accounts,
            pools,
            pairs: batch.currency_pairs,
            entitled: batch.entitled_order_types,
        }
    }

    #[must_use]
    pub fn accounts(&self) -> &[AccountRef] {
        &self.accounts
    }

    #[must_use]
    pub fn pools(&self) -> &[LiquidityPoolRef] {
        &self.pools
    }

    #[must_use]
    pub fn pairs(&self) -> &[CurrencyPairRef] {
        &self.pairs
    }

    #[must_use]
    pub fn entitled_order_types(&self) -> &[OrderType] {
        &self.entitled
    }

    #[must_use]
    pub fn has_account(&self, sds_id: i64) -> bool {
        self.accounts.iter().any(|a| a.id == sds_id)
    }

    #[must_use]
    pub fn has_pool(&self, value: &str) -> bool {
        self.pools.iter().any(|p| p.value == value)
    }

    #[must_use]
    pub fn has_pair(&self, symbol: &str) -> bool {
        self.pairs.iter().any(|p| p.symbol == symbol)
    }

    #[must_use]
    pub fn is_entitled(&self, order_type: OrderType) -> bool {
        self.entitled.contains(&order_type)
    }
}

/// Single-owner holder for the current snapshot.
#[derive(Debug, Default)]
pub struct RefDataStore {
    snapshot: Option<RefDataSnapshot>,
}

impl RefDataStore {
    /// Creates an empty store (nothing loaded yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the snapshot wholesale with a fresh batch.
    pub fn replace(&mut self, batch: RefDataBatch) {
        let snapshot = RefDataSnapshot::from_batch(batch);
        info!(
            accounts = snapshot.accounts.len(),
            pools = snapshot.pools.len(),
            pairs = snapshot.pairs.len(),
            "Reference data snapshot replaced"
        );
        self.snapshot = Some(snapshot);
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&RefDataSnapshot> {
        self.snapshot.as_ref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }
}

/// Fetches one reference-data batch from the HTTP endpoint.
///
/// # Errors
///
/// Returns [`OrderpadError::Http`](crate::OrderpadError::Http) if the
/// request fails or the response is not valid JSON.
pub async fn fetch_reference_data(
    client: &reqwest::Client,
    url: &str,
) -> crate::Result<RefDataBatch> {
    let batch = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<RefDataBatch>()
        .await?;
    info!(url, "Fetched reference data batch");
    Ok(batch)
}
