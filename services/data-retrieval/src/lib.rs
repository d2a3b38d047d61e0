//! Market data retrieval: aggregator, price index and chain RPC clients,
//! the response cache and the payload normalizers.

pub mod types;
pub mod sources {
    pub mod coingecko;
    pub mod dexscreener;
    pub(crate) mod health;
    pub mod solana_rpc;
}
pub mod cache;
pub mod normalizers;

pub use cache::TtlCache;
pub use normalizers::{normalize_chain_hint, normalize_dex_response};
pub use sources::coingecko::CoinGeckoClient;
pub use sources::dexscreener::{DexQuery, DexScreenerClient};
pub use sources::solana_rpc::SolanaRpcClient;
pub use types::*;
