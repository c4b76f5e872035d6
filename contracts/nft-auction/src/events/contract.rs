use near_sdk::AccountId;

use super::CONTRACT;
use super::builder::EventBuilder;
use crate::AcceptancePolicy;

pub fn emit_contract_init(owner_id: &AccountId, bid_history_length: u8, policy: AcceptancePolicy) {
    EventBuilder::new(CONTRACT, "init", owner_id)
        .field("owner_id", owner_id)
        .field("bid_history_length", bid_history_length)
        .field("acceptance_policy", policy.as_str())
        .emit();
}

pub fn emit_token_type_added(owner_id: &AccountId, token_type: &AccountId) {
    EventBuilder::new(CONTRACT, "token_type_added", owner_id)
        .field("token_type", token_type)
        .emit();
}

pub fn emit_token_type_removed(owner_id: &AccountId, token_type: &AccountId) {
    EventBuilder::new(CONTRACT, "token_type_removed", owner_id)
        .field("token_type", token_type)
        .emit();
}

pub fn emit_acceptance_policy_updated(
    owner_id: &AccountId,
    old: AcceptancePolicy,
    new: AcceptancePolicy,
) {
    EventBuilder::new(CONTRACT, "acceptance_policy_updated", owner_id)
        .field("old_policy", old.as_str())
        .field("new_policy", new.as_str())
        .emit();
}

pub fn emit_bid_history_length_updated(owner_id: &AccountId, old: u8, new: u8) {
    EventBuilder::new(CONTRACT, "bid_history_length_updated", owner_id)
        .field("old_length", old)
        .field("new_length", new)
        .emit();
}

pub fn emit_owner_transferred(old_owner_id: &AccountId, new_owner_id: &AccountId) {
    EventBuilder::new(CONTRACT, "owner_transferred", old_owner_id)
        .field("old_owner", old_owner_id)
        .field("new_owner", new_owner_id)
        .emit();
}
