use near_sdk::AccountId;

use super::SALE;
use super::builder::EventBuilder;
use crate::SaleKey;

pub fn emit_sale_list(
    owner_id: &AccountId,
    key: &SaleKey,
    price: u128,
    token_type: &AccountId,
    end_at: u64,
) {
    EventBuilder::new(SALE, "sale_list", owner_id)
        .field("owner_id", owner_id)
        .sale_key(key)
        .field("price", price)
        .field("token_type", token_type)
        .field("end_at", end_at)
        .emit();
}

pub fn emit_sale_remove(owner_id: &AccountId, key: &SaleKey) {
    EventBuilder::new(SALE, "sale_remove", owner_id)
        .field("owner_id", owner_id)
        .sale_key(key)
        .emit();
}

pub fn emit_sale_update_price(owner_id: &AccountId, key: &SaleKey, old_price: u128, new_price: u128) {
    EventBuilder::new(SALE, "sale_update_price", owner_id)
        .field("owner_id", owner_id)
        .sale_key(key)
        .field("old_price", old_price)
        .field("new_price", new_price)
        .emit();
}
