//! NEP-297 JSON events (`EVENT_JSON:` log lines) for indexers.

mod builder;
mod types;

mod contract;
mod offer;
mod sale;
mod storage;

pub use contract::*;
pub use offer::*;
pub use sale::*;
pub use storage::*;

pub(crate) const STANDARD: &str = "nft_auction";
pub(crate) const VERSION: &str = "1.0.0";
pub(crate) const PREFIX: &str = "EVENT_JSON:";

pub(crate) const SALE: &str = "SALE_UPDATE";
pub(crate) const OFFER: &str = "OFFER_UPDATE";
pub(crate) const STORAGE: &str = "STORAGE_UPDATE";
pub(crate) const CONTRACT: &str = "CONTRACT_UPDATE";
