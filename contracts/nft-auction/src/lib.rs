//! NFT auction market: sales listed through NEP-178 approvals, bounded per-token bid history,
//! two-phase settlement against NEP-199 payouts, and per-account storage deposits.

use near_sdk::json_types::{U128, U64};
use near_sdk::store::{IterableMap, IterableSet, LookupMap};
use near_sdk::{AccountId, Gas, NearToken, PanicOnDefault, Promise, PromiseOrValue, env, near};

pub mod constants;
mod errors;
mod guards;
pub mod types;

mod events;
mod external;

mod offer;
mod sale;

mod admin;
mod storage;


pub use constants::*;
pub use errors::MarketplaceError;
pub use sale::{Bid, PendingSettlement, Sale};
pub use types::{
    AcceptancePolicy, ContractConfig, PaymentToken, Payout, PriceInput, PurchaseArgs, SaleArgs, SaleKey,
};

#[near]
#[derive(near_sdk::BorshStorageKey)]
pub enum StorageKey {
    Sales,
    ByOwnerId,
    ByOwnerIdInner { account_id_hash: Vec<u8> },
    ByNftContractId,
    ByNftContractIdInner { account_id_hash: Vec<u8> },
    StorageDeposits,
    BidsByOwner,
    FtTokenIds,
    Claimable,
}

#[near(
    contract_state,
    contract_metadata(
        version = "0.1.0",
        standard(standard = "nep297", version = "1.0.0"),
    )
)]
#[derive(PanicOnDefault)]
pub struct Contract {
    pub version: String,

    pub owner_id: AccountId,
    /// Per payment token; the oldest bid is evicted beyond this.
    pub bid_history_length: u8,
    pub acceptance_policy: AcceptancePolicy,

    // Keyed by `SaleKey` rendered as "<nft_contract_id>||<token_id>".
    pub sales: IterableMap<String, Sale>,
    pub(crate) by_owner_id: LookupMap<AccountId, IterableSet<String>>,
    pub(crate) by_nft_contract_id: LookupMap<AccountId, IterableSet<String>>,

    pub storage_deposits: LookupMap<AccountId, u128>,
    // Live escrowed bids per bidder; each reserves STORAGE_PER_BID of the bidder's deposit.
    pub(crate) bids_by_owner: LookupMap<AccountId, u32>,

    /// Fungible tokens accepted as `token_type`; native NEAR is always accepted.
    pub ft_token_ids: IterableSet<AccountId>,

    /// Payouts and refunds whose transfer failed, keyed by (receiver, token_type).
    pub(crate) claimable: LookupMap<(AccountId, AccountId), u128>,
}

#[near]
impl Contract {
    #[init]
    #[handle_result]
    pub fn new(
        owner_id: AccountId,
        bid_history_length: Option<u8>,
        acceptance_policy: Option<AcceptancePolicy>,
    ) -> Result<Self, MarketplaceError> {
        let bid_history_length = bid_history_length.unwrap_or(DEFAULT_BID_HISTORY_LENGTH);
        guards::check_bid_history_length(bid_history_length)?;

        let contract = Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            owner_id: owner_id.clone(),
            bid_history_length,
            acceptance_policy: acceptance_policy.unwrap_or_default(),
            sales: IterableMap::new(StorageKey::Sales),
            by_owner_id: LookupMap::new(StorageKey::ByOwnerId),
            by_nft_contract_id: LookupMap::new(StorageKey::ByNftContractId),
            storage_deposits: LookupMap::new(StorageKey::StorageDeposits),
            bids_by_owner: LookupMap::new(StorageKey::BidsByOwner),
            ft_token_ids: IterableSet::new(StorageKey::FtTokenIds),
            claimable: LookupMap::new(StorageKey::Claimable),
        };

        events::emit_contract_init(&owner_id, bid_history_length, contract.acceptance_policy);
        Ok(contract)
    }
}
