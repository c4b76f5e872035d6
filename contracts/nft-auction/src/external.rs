// `#[ext_contract]` helpers look unused to the compiler outside of wasm builds.
#![allow(dead_code)]

use near_sdk::json_types::U128;
use near_sdk::{AccountId, ext_contract};

use crate::Payout;

/// NEP-171 + NEP-199 token contract.
#[ext_contract(ext_nft_contract)]
pub trait ExtNftContract {
    fn nft_transfer_payout(
        &mut self,
        receiver_id: AccountId,
        token_id: String,
        approval_id: Option<u64>,
        memo: Option<String>,
        balance: U128,
        max_len_payout: Option<u32>,
    ) -> Payout;
}

/// NEP-141 token contract, used to pay out and refund fungible-token bids.
#[ext_contract(ext_ft_contract)]
pub trait ExtFtContract {
    fn ft_transfer(&mut self, receiver_id: AccountId, amount: U128, memo: Option<String>);
}
