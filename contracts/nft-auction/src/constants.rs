//! Market-wide constants.

use near_sdk::NearToken;

/// Separator of the external sale key `"<nft_contract_id>||<token_id>"`.
/// `|` is not a valid account ID character, so the first occurrence always ends the contract ID.
pub const DELIMETER: &str = "||";

/// Payment token ID reserved for native NEAR.
pub const NEAR_TOKEN_TYPE: &str = "near";

/// yoctoNEAR per byte; fixed rather than read from the protocol config.
pub const STORAGE_PRICE_PER_BYTE: u128 = 10_000_000_000_000_000_000;

/// 0.01 NEAR reserved per live sale.
pub const STORAGE_PER_SALE: u128 = 1_000 * STORAGE_PRICE_PER_BYTE;

/// 0.005 NEAR reserved per live bid.
pub const STORAGE_PER_BID: u128 = 500 * STORAGE_PRICE_PER_BYTE;

pub const DEFAULT_BID_HISTORY_LENGTH: u8 = 1;
pub const MAX_BID_HISTORY_LENGTH: u8 = 10;

pub const MAX_TOKEN_ID_LEN: usize = 256;

pub const DEFAULT_PAGE_LIMIT: u64 = 50;
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Royalty recipients + owner requested from `nft_transfer_payout`.
pub const DEFAULT_MAX_LEN_PAYOUT: u32 = 10;

/// Largest payout response parsed in `resolve_offer`.
pub const MAX_PAYOUT_RESULT_LEN: usize = 4_096;

pub const ONE_YOCTO: NearToken = NearToken::from_yoctonear(1);

// Gas (TGas)
pub const GAS_NFT_TRANSFER_PAYOUT: u64 = 50;
pub const GAS_RESOLVE_OFFER: u64 = 150;
pub const GAS_FT_TRANSFER: u64 = 10;
pub const GAS_RESOLVE_PAYMENT: u64 = 5;
