use near_sdk::AccountId;

use super::OFFER;
use super::builder::EventBuilder;
use crate::SaleKey;

pub fn emit_offer_made(bidder_id: &AccountId, key: &SaleKey, token_type: &AccountId, amount: u128) {
    EventBuilder::new(OFFER, "offer_made", bidder_id)
        .field("bidder_id", bidder_id)
        .sale_key(key)
        .field("token_type", token_type)
        .field("amount", amount)
        .emit();
}

/// Oldest bid pushed out of a full history; its escrow is refunded.
pub fn emit_offer_evicted(bidder_id: &AccountId, key: &SaleKey, token_type: &AccountId, amount: u128) {
    EventBuilder::new(OFFER, "offer_evicted", bidder_id)
        .field("bidder_id", bidder_id)
        .sale_key(key)
        .field("token_type", token_type)
        .field("refunded_amount", amount)
        .emit();
}

pub fn emit_offer_accepted(
    seller_id: &AccountId,
    buyer_id: &AccountId,
    key: &SaleKey,
    token_type: &AccountId,
    price: u128,
) {
    EventBuilder::new(OFFER, "offer_accepted", seller_id)
        .field("seller_id", seller_id)
        .field("buyer_id", buyer_id)
        .sale_key(key)
        .field("token_type", token_type)
        .field("price", price)
        .emit();
}

pub fn emit_settlement_failed(
    seller_id: &AccountId,
    buyer_id: &AccountId,
    key: &SaleKey,
    token_type: &AccountId,
) {
    EventBuilder::new(OFFER, "settlement_failed", seller_id)
        .field("seller_id", seller_id)
        .field("buyer_id", buyer_id)
        .sale_key(key)
        .field("token_type", token_type)
        .field("reason", "nft_transfer_failed")
        .emit();
}

/// A payout or refund that bounced and now waits for `claim`.
pub fn emit_payment_credited(receiver_id: &AccountId, token_type: &AccountId, amount: u128, claimable: u128) {
    EventBuilder::new(OFFER, "payment_credited", receiver_id)
        .field("receiver_id", receiver_id)
        .field("token_type", token_type)
        .field("amount", amount)
        .field("claimable", claimable)
        .emit();
}

pub fn emit_claim(account_id: &AccountId, token_type: &AccountId, amount: u128) {
    EventBuilder::new(OFFER, "claim", account_id)
        .field("account_id", account_id)
        .field("token_type", token_type)
        .field("amount", amount)
        .emit();
}
