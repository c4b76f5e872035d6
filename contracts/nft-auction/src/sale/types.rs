use std::collections::HashMap;

use near_sdk::json_types::{U128, U64};
use near_sdk::{AccountId, near};

use crate::types::{PaymentToken, SaleKey};

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub owner_id: AccountId,
    pub price: U128,
}

/// Winning bid staged by `accept_offer` while the token transfer is in flight.
#[near(serializers = [borsh, json])]
#[derive(Clone, Debug, PartialEq)]
pub struct PendingSettlement {
    pub token_type: AccountId,
    /// Index the bid held in its history; an aborted settlement puts it back here.
    pub position: u32,
    pub bid: Bid,
}

#[near(serializers = [borsh, json])]
#[derive(Clone, Debug)]
pub struct Sale {
    pub owner_id: AccountId,
    pub approval_id: u64,
    pub nft_contract_id: AccountId,
    pub token_id: String,
    /// Reserve in the smallest unit of `token_type`; 0 = no reserve.
    pub price: U128,
    pub token_type: AccountId,
    /// Milliseconds.
    pub created_at: U64,
    /// Milliseconds; offers after this are rejected.
    pub end_at: U64,
    /// Arrival-ordered history per payment token, oldest first.
    pub bids: HashMap<AccountId, Vec<Bid>>,
    #[serde(default)]
    pub settlement: Option<PendingSettlement>,
}

impl Sale {
    pub fn key(&self) -> SaleKey {
        SaleKey::new(self.nft_contract_id.clone(), self.token_id.clone())
    }

    pub fn payment_token(&self) -> PaymentToken {
        PaymentToken::from_token_type(&self.token_type)
    }

    pub fn is_settling(&self) -> bool {
        self.settlement.is_some()
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms > self.end_at.0
    }

    pub fn bid_count(&self) -> usize {
        self.bids.values().map(Vec::len).sum()
    }

    /// Highest bid for `token_type`; on equal prices the most recent wins.
    pub fn winning_bid_index(&self, token_type: &AccountId) -> Option<usize> {
        let history = self.bids.get(token_type)?;
        history
            .iter()
            .enumerate()
            .max_by(|(i, a), (j, b)| a.price.0.cmp(&b.price.0).then(i.cmp(j)))
            .map(|(i, _)| i)
    }
}
