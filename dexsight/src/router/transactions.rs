use dexsight_core::{Address, Capability, DexError, FetchPolicy, Transactions};

use crate::Dexsight;
use crate::router::macros::provider_call;

impl Dexsight {
    /// Latest mints, burns and swaps across all pairs. Always bypasses the cache.
    ///
    /// # Errors
    /// Returns an error if no connector lists transactions or the call fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "dexsight::router", skip(self), err)
    )]
    pub async fn all_pair_transactions(&self) -> Result<Transactions, DexError> {
        provider_call!(self, Capability::Transactions, as_transactions_provider, |p| p
            .transactions(None, FetchPolicy::NoCache))
    }

    /// Latest mints, burns and swaps of one pair. Always bypasses the cache.
    ///
    /// # Errors
    /// Returns an error if no connector lists transactions or the call fails.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "dexsight::router", skip(self, pair), fields(pair = %pair), err)
    )]
    pub async fn pair_transactions(&self, pair: &Address) -> Result<Transactions, DexError> {
        provider_call!(self, Capability::Transactions, as_transactions_provider, |p| p
            .transactions(Some(std::slice::from_ref(pair)), FetchPolicy::NoCache))
    }
}
